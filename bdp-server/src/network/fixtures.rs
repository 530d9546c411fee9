//! Shared helpers for building test networks.

use crate::domain::{Direction, LonLat, NodeId, RoadType, Segment, SegmentId, StreetId};

/// Helper to create a bidirectional segment.
pub(crate) fn seg(
    id: i64,
    from: i64,
    to: i64,
    length: f64,
    road_type: RoadType,
    primary_street: Option<i64>,
) -> Segment {
    Segment {
        id: SegmentId(id),
        from_node: NodeId(from),
        to_node: NodeId(to),
        direction: Direction::Bidirectional,
        length,
        road_type,
        primary_street: primary_street.map(StreetId),
        streets: Vec::new(),
        center: LonLat::default(),
    }
}

/// Helper to create a segment with alternate street names.
pub(crate) fn seg_with_alts(
    id: i64,
    from: i64,
    to: i64,
    length: f64,
    road_type: RoadType,
    primary_street: Option<i64>,
    alternates: &[i64],
) -> Segment {
    let mut segment = seg(id, from, to, length, road_type, primary_street);
    segment.streets = alternates.iter().copied().map(StreetId).collect();
    segment
}

/// Helper to set a one-way direction on a segment.
pub(crate) fn one_way(mut segment: Segment, direction: Direction) -> Segment {
    segment.direction = direction;
    segment
}

/// Helper to place a segment's centre.
pub(crate) fn centered(mut segment: Segment, lon: f64, lat: f64) -> Segment {
    segment.center = LonLat::new(lon, lat);
    segment
}
