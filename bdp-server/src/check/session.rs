//! Per-check context: selection memory and map viewport handling.

use std::fmt;

use tracing::debug;

use crate::domain::{LonLat, NodeId, SegmentId};

/// The host map's view, as far as a check needs to control it.
///
/// The host only holds the road network around what it displays, so a
/// check may have to zoom out for a search to see every segment it can
/// reach.
pub trait MapViewport: Send {
    /// Current zoom level.
    fn zoom(&self) -> u8;

    /// Current map centre.
    fn center(&self) -> LonLat;

    /// Move the map to `center` at `zoom`.
    fn set_view(&mut self, center: LonLat, zoom: u8);
}

/// A saved map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: LonLat,
    pub zoom: u8,
}

/// State carried by one user's BDP checks.
///
/// Holds what the host tells the check between invocations (the last
/// segment clicked while selecting a path) and what a single check needs
/// to remember (the far end of the detour, a view to restore).
#[derive(Default)]
pub struct CheckSession {
    last_path_click: Option<SegmentId>,
    route_far_end_node: Option<NodeId>,
    viewport: Option<Box<dyn MapViewport>>,
    restore: Option<ViewState>,
}

impl fmt::Debug for CheckSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckSession")
            .field("last_path_click", &self.last_path_click)
            .field("route_far_end_node", &self.route_far_end_node)
            .field("has_viewport", &self.viewport.is_some())
            .field("restore", &self.restore)
            .finish()
    }
}

impl CheckSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the host map so checks can zoom it out and back.
    pub fn with_viewport(mut self, viewport: Box<dyn MapViewport>) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// A segment was added to the selection by a path click.
    pub fn on_path_select(&mut self, segment: SegmentId) {
        self.last_path_click = Some(segment);
    }

    /// Forget the last path click. The host calls this on single feature
    /// clicks, click-outs, deselection and box selection.
    pub fn clear_path_click(&mut self) {
        self.last_path_click = None;
    }

    pub fn last_path_click(&self) -> Option<SegmentId> {
        self.last_path_click
    }

    /// The end bracket's endpoint away from the detour, for the current check.
    pub fn route_far_end_node(&self) -> Option<NodeId> {
        self.route_far_end_node
    }

    pub(crate) fn set_route_far_end_node(&mut self, node: Option<NodeId>) {
        self.route_far_end_node = node;
    }

    /// The view that will be restored when the check finishes.
    pub fn pending_restore(&self) -> Option<ViewState> {
        self.restore
    }

    /// Zoom the map out to `zoom` around `center` if it is zoomed in
    /// further. The current view is kept for [`CheckSession::restore_view`].
    ///
    /// Returns whether the view changed.
    pub(crate) fn zoom_out(&mut self, center: LonLat, zoom: u8) -> bool {
        let Some(viewport) = self.viewport.as_mut() else {
            return false;
        };
        if viewport.zoom() <= zoom {
            return false;
        }

        let current = ViewState {
            center: viewport.center(),
            zoom: viewport.zoom(),
        };
        debug!(from = current.zoom, to = zoom, "Zooming out for search");
        // Keep the first saved view if zoomed twice in one check.
        self.restore.get_or_insert(current);
        viewport.set_view(center, zoom);
        true
    }

    /// Put the map back where it was before the check zoomed it.
    ///
    /// Returns whether a view was restored.
    pub fn restore_view(&mut self) -> bool {
        let (Some(viewport), Some(view)) = (self.viewport.as_mut(), self.restore.take()) else {
            return false;
        };
        debug!(zoom = view.zoom, "Restoring map view");
        viewport.set_view(view.center, view.zoom);
        true
    }
}
