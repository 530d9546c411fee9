//! Road type codes and their BDP grouping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Road type classification of a segment, as coded by the map editor.
///
/// Codes outside the known catalogue are kept as [`RoadType::Other`] so a
/// snapshot never fails to load because of a new editor road type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum RoadType {
    Street,
    PrimaryStreet,
    Freeway,
    Ramp,
    WalkingTrail,
    MajorHighway,
    MinorHighway,
    OffRoad,
    Walkway,
    PedestrianBoardwalk,
    Ferry,
    Stairway,
    PrivateRoad,
    Railroad,
    Runway,
    ParkingLotRoad,
    Passageway,
    Other(u8),
}

/// Coarse grouping used when comparing road types for BDP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadTypeGroup {
    MinorHighway,
    MajorHighwayOrFreeway,
}

impl RoadType {
    /// Decode an editor road type code.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => RoadType::Street,
            2 => RoadType::PrimaryStreet,
            3 => RoadType::Freeway,
            4 => RoadType::Ramp,
            5 => RoadType::WalkingTrail,
            6 => RoadType::MajorHighway,
            7 => RoadType::MinorHighway,
            8 => RoadType::OffRoad,
            9 => RoadType::Walkway,
            10 => RoadType::PedestrianBoardwalk,
            15 => RoadType::Ferry,
            16 => RoadType::Stairway,
            17 => RoadType::PrivateRoad,
            18 => RoadType::Railroad,
            19 => RoadType::Runway,
            20 => RoadType::ParkingLotRoad,
            22 => RoadType::Passageway,
            other => RoadType::Other(other),
        }
    }

    /// The editor code for this road type.
    pub fn code(self) -> u8 {
        match self {
            RoadType::Street => 1,
            RoadType::PrimaryStreet => 2,
            RoadType::Freeway => 3,
            RoadType::Ramp => 4,
            RoadType::WalkingTrail => 5,
            RoadType::MajorHighway => 6,
            RoadType::MinorHighway => 7,
            RoadType::OffRoad => 8,
            RoadType::Walkway => 9,
            RoadType::PedestrianBoardwalk => 10,
            RoadType::Ferry => 15,
            RoadType::Stairway => 16,
            RoadType::PrivateRoad => 17,
            RoadType::Railroad => 18,
            RoadType::Runway => 19,
            RoadType::ParkingLotRoad => 20,
            RoadType::Passageway => 22,
            RoadType::Other(code) => code,
        }
    }

    /// The BDP group of this road type, if it has one.
    ///
    /// Road types without a group never take part in BDP.
    pub fn group(self) -> Option<RoadTypeGroup> {
        match self {
            RoadType::MinorHighway => Some(RoadTypeGroup::MinorHighway),
            RoadType::MajorHighway | RoadType::Freeway => {
                Some(RoadTypeGroup::MajorHighwayOrFreeway)
            }
            _ => None,
        }
    }

    /// Whether a segment of this type may act as a bracketing segment.
    pub fn is_bdp_eligible(self) -> bool {
        matches!(
            self,
            RoadType::Freeway | RoadType::MajorHighway | RoadType::MinorHighway
        )
    }

    /// Whether the router can never drive over this road type.
    pub fn is_unroutable(self) -> bool {
        matches!(
            self,
            RoadType::Walkway
                | RoadType::PedestrianBoardwalk
                | RoadType::Stairway
                | RoadType::Railroad
                | RoadType::Runway
                | RoadType::Passageway
        )
    }
}

impl From<u8> for RoadType {
    fn from(code: u8) -> Self {
        RoadType::from_code(code)
    }
}

impl From<RoadType> for u8 {
    fn from(road_type: RoadType) -> Self {
        road_type.code()
    }
}

impl fmt::Display for RoadTypeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoadTypeGroup::MinorHighway => f.write_str("minor highway"),
            RoadTypeGroup::MajorHighwayOrFreeway => f.write_str("major highway/freeway"),
        }
    }
}
