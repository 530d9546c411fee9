//! BDP eligibility rules.
//!
//! Each rule either passes or names the reason the selection is not a BDP
//! case. The checker applies them in a fixed order and stops at the first
//! failure, before any search is run.

use tracing::debug;

use super::error::{CheckError, Ineligible, Meters};
use crate::continuity::{name_continuity, road_type_group_continuity};
use crate::domain::{NodeId, RoadTypeGroup, Segment};
use crate::network::RoadNetwork;

/// Both brackets must be BDP road types of the same group.
///
/// Returns the brackets' group.
pub fn check_bracket_road_types(
    start: &Segment,
    end: &Segment,
) -> Result<RoadTypeGroup, Ineligible> {
    if !start.road_type.is_bdp_eligible() || !end.road_type.is_bdp_eligible() {
        return Err(Ineligible::BracketRoadType);
    }
    if !road_type_group_continuity(&[start, end]) {
        return Err(Ineligible::BracketGroupMismatch);
    }
    start.group().ok_or(Ineligible::BracketRoadType)
}

/// The brackets must share a street name.
pub fn check_bracket_names<N: RoadNetwork + ?Sized>(
    network: &N,
    start: &Segment,
    end: &Segment,
) -> Result<(), Ineligible> {
    if name_continuity(network, &[start, end]) {
        Ok(())
    } else {
        Err(Ineligible::NoSharedName)
    }
}

/// Find the detour segment that leads into the end bracket at `near`.
///
/// When several detour segments end at `near`, the one-way segment that
/// may turn into the end bracket is taken; any other outcome is ambiguous.
pub fn resolve_last_detour_segment<'a, N: RoadNetwork + ?Sized>(
    network: &N,
    detour: &[&'a Segment],
    end: &Segment,
    near: NodeId,
) -> Result<&'a Segment, CheckError> {
    let touching: Vec<&'a Segment> = detour
        .iter()
        .copied()
        .filter(|segment| segment.touches(near))
        .collect();

    if let &[only] = touching.as_slice() {
        return Ok(only);
    }

    let one_way: Vec<&'a Segment> = touching
        .iter()
        .copied()
        .filter(|segment| segment.is_one_way() && network.is_turn_allowed(segment, end, near))
        .collect();

    match *one_way.as_slice() {
        [only] => Ok(only),
        _ => {
            debug!(
                end = %end.id,
                node = %near,
                candidates = touching.len(),
                "Last detour segment is ambiguous"
            );
            Err(CheckError::AmbiguousDetourEndpoint {
                candidates: touching.iter().map(|segment| segment.id).collect(),
            })
        }
    }
}

/// No detour segment may be of a road type the router never uses.
pub fn check_detour_road_types(detour: &[&Segment]) -> Result<(), Ineligible> {
    if detour.iter().any(|segment| segment.road_type.is_unroutable()) {
        Err(Ineligible::UnroutableDetour)
    } else {
        Ok(())
    }
}

/// The detour must actually leave the road: its last segment may share
/// neither a name nor a road type group with the end bracket.
pub fn check_detour_continuity<N: RoadNetwork + ?Sized>(
    network: &N,
    last_detour: &Segment,
    end: &Segment,
) -> Result<(), Ineligible> {
    if name_continuity(network, &[last_detour, end]) {
        return Err(Ineligible::DetourSharesName);
    }
    if road_type_group_continuity(&[last_detour, end]) {
        return Err(Ineligible::DetourSharesGroup);
    }
    Ok(())
}

/// The detour must be at least two segments and at most `cap` meters long.
pub fn check_detour_length(detour: &[&Segment], cap: f64) -> Result<(), Ineligible> {
    if detour.len() < 2 {
        return Err(Ineligible::DetourTooShort);
    }
    let length: f64 = detour.iter().map(|segment| segment.length).sum();
    if length > cap {
        debug!(length, cap, "Detour is over the length cap");
        return Err(Ineligible::DetourTooLong { cap: Meters(cap) });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, RoadType, SegmentId};
    use crate::network::fixtures::{one_way, seg, seg_with_alts};
    use crate::network::{MemoryNetwork, NetworkBuilder};

    fn network() -> MemoryNetwork {
        NetworkBuilder::new()
            .street(1, "SR-1")
            .street(2, "Main St")
            // Brackets.
            .segment(seg(100, 10, 1, 100.0, RoadType::MinorHighway, Some(1)))
            .segment(seg(200, 2, 20, 100.0, RoadType::MinorHighway, Some(1)))
            .segment(seg(201, 2, 21, 100.0, RoadType::MajorHighway, Some(1)))
            .segment(seg(202, 2, 22, 100.0, RoadType::Freeway, Some(1)))
            .segment(seg(203, 2, 23, 100.0, RoadType::PrimaryStreet, Some(1)))
            .segment(seg(204, 2, 24, 100.0, RoadType::MinorHighway, Some(2)))
            // Detour segments ending at node 2.
            .segment(seg(401, 5, 2, 300.0, RoadType::Street, Some(2)))
            .segment(seg_with_alts(
                402,
                6,
                2,
                300.0,
                RoadType::Street,
                Some(2),
                &[1],
            ))
            .segment(seg(403, 7, 2, 300.0, RoadType::MinorHighway, Some(2)))
            .segment(one_way(
                seg(404, 8, 2, 300.0, RoadType::Street, Some(2)),
                Direction::FromTo,
            ))
            .segment(one_way(
                seg(405, 2, 9, 300.0, RoadType::Street, Some(2)),
                Direction::FromTo,
            ))
            .segment(seg(406, 5, 6, 300.0, RoadType::Walkway, None))
            .build()
            .unwrap()
    }

    fn get(network: &MemoryNetwork, id: i64) -> &Segment {
        network.segment(SegmentId(id)).unwrap()
    }

    #[test]
    fn bracket_types() {
        let net = network();
        assert_eq!(
            check_bracket_road_types(get(&net, 100), get(&net, 200)),
            Ok(RoadTypeGroup::MinorHighway)
        );
        assert_eq!(
            check_bracket_road_types(get(&net, 201), get(&net, 202)),
            Ok(RoadTypeGroup::MajorHighwayOrFreeway)
        );
        assert_eq!(
            check_bracket_road_types(get(&net, 100), get(&net, 203)),
            Err(Ineligible::BracketRoadType)
        );
        assert_eq!(
            check_bracket_road_types(get(&net, 100), get(&net, 201)),
            Err(Ineligible::BracketGroupMismatch)
        );
    }

    #[test]
    fn bracket_names() {
        let net = network();
        assert_eq!(check_bracket_names(&net, get(&net, 100), get(&net, 200)), Ok(()));
        assert_eq!(
            check_bracket_names(&net, get(&net, 100), get(&net, 204)),
            Err(Ineligible::NoSharedName)
        );
    }

    #[test]
    fn single_touching_segment_is_last() {
        let net = network();
        let detour = [get(&net, 406), get(&net, 401)];
        let last = resolve_last_detour_segment(&net, &detour, get(&net, 200), NodeId(2)).unwrap();
        assert_eq!(last.id, SegmentId(401));
    }

    #[test]
    fn one_way_into_bracket_breaks_tie() {
        let net = network();
        // 404 runs 8 -> 2 and may turn into 200; 405 leaves node 2.
        let detour = [get(&net, 401), get(&net, 404)];
        let last = resolve_last_detour_segment(&net, &detour, get(&net, 200), NodeId(2)).unwrap();
        assert_eq!(last.id, SegmentId(404));

        let detour = [get(&net, 405), get(&net, 404)];
        let last = resolve_last_detour_segment(&net, &detour, get(&net, 200), NodeId(2)).unwrap();
        assert_eq!(last.id, SegmentId(404));
    }

    #[test]
    fn two_way_tie_is_ambiguous() {
        let net = network();
        let detour = [get(&net, 401), get(&net, 402)];
        let err =
            resolve_last_detour_segment(&net, &detour, get(&net, 200), NodeId(2)).unwrap_err();
        assert_eq!(
            err,
            CheckError::AmbiguousDetourEndpoint {
                candidates: vec![SegmentId(401), SegmentId(402)],
            }
        );
    }

    #[test]
    fn unroutable_detour() {
        let net = network();
        assert_eq!(
            check_detour_road_types(&[get(&net, 401), get(&net, 406)]),
            Err(Ineligible::UnroutableDetour)
        );
        assert_eq!(check_detour_road_types(&[get(&net, 401), get(&net, 402)]), Ok(()));
    }

    #[test]
    fn detour_must_leave_the_road() {
        let net = network();
        let end = get(&net, 200);
        assert_eq!(check_detour_continuity(&net, get(&net, 401), end), Ok(()));
        // 402 carries SR-1 as an alternate name.
        assert_eq!(
            check_detour_continuity(&net, get(&net, 402), end),
            Err(Ineligible::DetourSharesName)
        );
        // 403 is a minor highway like the bracket.
        assert_eq!(
            check_detour_continuity(&net, get(&net, 403), end),
            Err(Ineligible::DetourSharesGroup)
        );
    }

    #[test]
    fn detour_length() {
        let net = network();
        assert_eq!(
            check_detour_length(&[get(&net, 401)], 500.0),
            Err(Ineligible::DetourTooShort)
        );
        assert_eq!(
            check_detour_length(&[get(&net, 401), get(&net, 402)], 500.0),
            Err(Ineligible::DetourTooLong { cap: Meters(500.0) })
        );
        assert_eq!(
            check_detour_length(&[get(&net, 401), get(&net, 402)], 600.0),
            Ok(())
        );
        assert_eq!(
            check_detour_length(&[get(&net, 401), get(&net, 402)], 5_000.0),
            Ok(())
        );
    }
}
