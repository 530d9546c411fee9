//! Domain types for the road network.
//!
//! Segments, nodes and streets mirror what the host map editor holds in
//! memory. Road type codes are decoded once into [`RoadType`], which also
//! knows the BDP grouping rules.

mod error;
mod geo;
mod ids;
mod road_type;
mod segment;

pub use error::DomainError;
pub use geo::LonLat;
pub use ids::{NodeId, SegmentId, StreetId};
pub use road_type::{RoadType, RoadTypeGroup};
pub use segment::{Direction, Node, Segment, Street};
