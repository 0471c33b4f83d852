//! Depth ordering of facets and the painter's occlusion pass.
//!
//! Facets are compared by their observer-space extents in priority order
//! `max z`, `min z`, `min x`, `min y`; the larger value is farther away.

use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;

use crate::facet::{Extents3, Facet};
use crate::math::DEPTH_EPSILON;

fn depth_key(extents: &Extents3) -> [f64; 4] {
    [extents.max.z, extents.min.z, extents.min.x, extents.min.y]
}

/// Compares two facets for occlusion. `Greater` means `a` is farther than `b`.
///
/// Facets of the same polyhedron, facets without extents, and facets whose keys
/// all agree within [`DEPTH_EPSILON`] compare `Equal`. Because of the tolerance
/// this is not a total order; use [`sort_farthest_first`] for sorting.
pub fn compare_depth(a: &Facet, b: &Facet) -> Ordering {
    if a.owner() == b.owner() {
        return Ordering::Equal;
    }
    let (Some(ea), Some(eb)) = (a.extents(), b.extents()) else {
        return Ordering::Equal;
    };
    depth_key(&ea)
        .into_iter()
        .zip(depth_key(&eb))
        .find(|(ka, kb)| (ka - kb).abs() > DEPTH_EPSILON)
        .map_or(Ordering::Equal, |(ka, kb)| ka.total_cmp(&kb))
}

/// Sorts facets farthest first.
///
/// Uses the exact depth key followed by the facet id, so the result is fully
/// deterministic.
pub fn sort_farthest_first<F: Borrow<Facet>>(facets: &mut [F]) {
    facets.sort_by(|a, b| {
        let (a, b) = (Borrow::<Facet>::borrow(a), Borrow::<Facet>::borrow(b));
        let key = |f: &Facet| f.extents().map(|e| depth_key(&e));
        let by_depth = match (key(a), key(b)) {
            (Some(ka), Some(kb)) => ka
                .iter()
                .zip(&kb)
                .map(|(x, y)| y.total_cmp(x))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_depth.then_with(|| a.id().cmp(&b.id()))
    });
}

/// Clips every facet against every facet that is strictly nearer and whose
/// outline may overlap it. Returns the number of clipped pairs.
pub fn clip_by_nearer<F: BorrowMut<Facet>>(facets: &mut [F]) -> usize {
    let mut clipped = 0;
    for i in 0..facets.len() {
        for j in 0..facets.len() {
            if i == j {
                continue;
            }
            let (target, occluder) = if i < j {
                let (head, tail) = facets.split_at_mut(j);
                (
                    BorrowMut::<Facet>::borrow_mut(&mut head[i]),
                    Borrow::<Facet>::borrow(&tail[0]),
                )
            } else {
                let (head, tail) = facets.split_at_mut(i);
                (
                    BorrowMut::<Facet>::borrow_mut(&mut tail[0]),
                    Borrow::<Facet>::borrow(&head[j]),
                )
            };
            if compare_depth(target, occluder) == Ordering::Greater && target.may_overlap(occluder) {
                target.clip_by(occluder);
                clipped += 1;
            }
        }
    }
    clipped
}
