//! Continuity predicates over segment sequences.
//!
//! Both predicates decide whether a chain of segments counts as "the same
//! road" for BDP. They read the sequence only; callers may pass any slice.

use std::collections::HashSet;

use crate::domain::Segment;
use crate::network::RoadNetwork;

/// Whether every segment shares the road type group of the first.
///
/// Returns `false` for fewer than two segments, or when the first segment's
/// road type has no group.
pub fn road_type_group_continuity(segments: &[&Segment]) -> bool {
    let [first, rest @ ..] = segments else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    let Some(group) = first.group() else {
        return false;
    };
    rest.iter().all(|seg| seg.group() == Some(group))
}

/// Whether the segments are connected by street names.
///
/// With two segments, they must share a name. With more, the first and last
/// segments are brackets: both must carry a name, and every interior segment
/// must carry a name of either bracket.
pub fn name_continuity<N: RoadNetwork + ?Sized>(network: &N, segments: &[&Segment]) -> bool {
    match segments {
        [] | [_] => false,
        [first, second] => {
            let names = name_set(network, first);
            !names.is_empty()
                && network
                    .street_names(second)
                    .iter()
                    .any(|name| names.contains(name))
        }
        [first, interior @ .., last] => {
            let first_names = name_set(network, first);
            if first_names.is_empty() {
                return false;
            }
            let last_names = name_set(network, last);
            if last_names.is_empty() {
                return false;
            }
            interior.iter().all(|seg| {
                network
                    .street_names(seg)
                    .iter()
                    .any(|name| first_names.contains(name) || last_names.contains(name))
            })
        }
    }
}

fn name_set<'a, N: RoadNetwork + ?Sized>(network: &'a N, segment: &Segment) -> HashSet<&'a str> {
    network.street_names(segment).into_iter().collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{RoadType, RoadTypeGroup, SegmentId};
    use crate::network::fixtures::seg;
    use crate::network::{MemoryNetwork, NetworkBuilder};
    use proptest::prelude::*;

    /// Build a chain of segments with the given road type codes and street ids.
    fn chain(codes: &[u8], streets: &[Option<i64>]) -> MemoryNetwork {
        let mut builder = NetworkBuilder::new()
            .street(1, "A")
            .street(2, "B")
            .street(3, "C");
        for (i, (code, street)) in codes.iter().zip(streets).enumerate() {
            let i = i as i64;
            builder = builder.segment(seg(
                i,
                i,
                i + 1,
                10.0,
                RoadType::from_code(*code),
                *street,
            ));
        }
        builder.build().unwrap()
    }

    fn all_segments(network: &MemoryNetwork, n: usize) -> Vec<&Segment> {
        (0..n as i64)
            .map(|i| network.segment(SegmentId(i)).unwrap())
            .collect()
    }

    proptest! {
        #[test]
        fn group_continuity_matches_definition(codes in prop::collection::vec(0u8..24, 0..8)) {
            let streets = vec![None; codes.len()];
            let network = chain(&codes, &streets);
            let segments = all_segments(&network, codes.len());

            let groups: Vec<Option<RoadTypeGroup>> =
                codes.iter().map(|c| RoadType::from_code(*c).group()).collect();
            let expected = groups.len() >= 2
                && groups[0].is_some()
                && groups.iter().all(|g| *g == groups[0]);

            prop_assert_eq!(road_type_group_continuity(&segments), expected);
        }

        #[test]
        fn pair_name_continuity_is_symmetric(
            a in prop::option::of(1i64..4),
            b in prop::option::of(1i64..4),
        ) {
            let network = chain(&[7, 7], &[a, b]);
            let segments = all_segments(&network, 2);
            let reversed = vec![segments[1], segments[0]];

            let forward = name_continuity(&network, &segments);
            prop_assert_eq!(forward, name_continuity(&network, &reversed));
            prop_assert_eq!(forward, a.is_some() && a == b);
        }

        #[test]
        fn chain_interior_rule(streets in prop::collection::vec(prop::option::of(1i64..4), 3..7)) {
            let codes = vec![7u8; streets.len()];
            let network = chain(&codes, &streets);
            let segments = all_segments(&network, streets.len());

            let first = streets[0];
            let last = streets[streets.len() - 1];
            let expected = first.is_some()
                && last.is_some()
                && streets[1..streets.len() - 1]
                    .iter()
                    .all(|s| s.is_some() && (*s == first || *s == last));

            prop_assert_eq!(name_continuity(&network, &segments), expected);
        }
    }
}
