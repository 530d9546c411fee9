//! Route results produced by the searches.

use serde::Serialize;

use crate::domain::SegmentId;

/// An ordered path from the start bracket to the end bracket, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Route {
    segments: Vec<SegmentId>,
}

impl Route {
    pub fn new(segments: Vec<SegmentId>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    /// Segments strictly between the two brackets.
    pub fn interior(&self) -> &[SegmentId] {
        match self.segments.len() {
            0..=2 => &[],
            n => &self.segments[1..n - 1],
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_segments(self) -> Vec<SegmentId> {
        self.segments
    }
}
