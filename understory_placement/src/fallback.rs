// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fallback planning: an ordered candidate list around a preferred alignment.
//!
//! ## Ordering
//!
//! Each axis has a pool of alignments. The pool is reordered around the target
//! with [`prioritize_around`]: the target first, then alternately the nearest
//! unused item to its right and to its left, then whatever remains. The final
//! list is the cross product of the two reordered pools, horizontal outer,
//! vertical inner, without its first element (the target itself, which the
//! planner already placed at the front).
//!
//! ## Overlap
//!
//! A target that keeps the panel beside the anchor (`left`/`right`, `top`/`bottom`)
//! restricts that axis' pool to the two outer alignments, so no fallback ever
//! covers an anchor the caller asked to keep visible.

use alloc::vec::Vec;

use crate::resolve::resolve;
use crate::types::{HorizontalAlign, PositionCandidate, VerticalAlign};

/// Reorder `options` by distance from `target`, nearer first, right side first on ties.
///
/// If `target` is not in `options` it is still placed first and the remaining
/// items follow in their original order.
///
/// ```
/// use understory_placement::fallback::prioritize_around;
/// assert_eq!(prioritize_around(&3, &[1, 2, 3, 4, 5, 6, 7]), [3, 4, 2, 5, 1, 6, 7]);
/// ```
pub fn prioritize_around<T: Copy + PartialEq>(target: &T, options: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(options.len().max(1));
    out.push(*target);
    let (mut left, mut right) = match options.iter().position(|o| o == target) {
        Some(i) => (options[..i].iter().rev(), options[i + 1..].iter()),
        None => (options[..0].iter().rev(), options.iter()),
    };
    loop {
        match (right.next(), left.next()) {
            (Some(r), Some(l)) => {
                out.push(*r);
                out.push(*l);
            }
            (Some(r), None) => {
                out.push(*r);
                out.extend(right.by_ref().copied());
                break;
            }
            (None, Some(l)) => {
                out.push(*l);
                out.extend(left.by_ref().copied());
                break;
            }
            (None, None) => break,
        }
    }
    out
}

/// Horizontal alignments a fallback may use for target `h`.
pub fn horizontal_pool(h: HorizontalAlign) -> &'static [HorizontalAlign] {
    if h.overlaps_anchor() {
        &HorizontalAlign::ALL
    } else {
        &[HorizontalAlign::Left, HorizontalAlign::Right]
    }
}

/// Vertical alignments a fallback may use for target `v`.
pub fn vertical_pool(v: VerticalAlign) -> &'static [VerticalAlign] {
    if v.overlaps_anchor() {
        &VerticalAlign::ALL
    } else {
        &[VerticalAlign::Top, VerticalAlign::Bottom]
    }
}

/// Fallback candidates for target `(h, v)`, excluding the target itself.
pub fn fallbacks(h: HorizontalAlign, v: VerticalAlign) -> Vec<PositionCandidate> {
    let hs = prioritize_around(&h, horizontal_pool(h));
    let vs = prioritize_around(&v, vertical_pool(v));
    hs.iter()
        .flat_map(|&h| vs.iter().map(move |&v| resolve(h, v)))
        .skip(1)
        .collect()
}

/// Ordered candidate list for target `(h, v)`: the target first, then fallbacks.
///
/// With `force_alignment` the list holds the target alone.
pub fn plan(h: HorizontalAlign, v: VerticalAlign, force_alignment: bool) -> Vec<PositionCandidate> {
    let mut out = Vec::new();
    out.push(resolve(h, v));
    if !force_alignment {
        out.extend(fallbacks(h, v));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    use HorizontalAlign as H;
    use VerticalAlign as V;

    #[test]
    fn zig_zag_around_center() {
        assert_eq!(
            prioritize_around(&H::Center, &H::ALL),
            vec![H::Center, H::End, H::Start, H::Right, H::Left]
        );
    }

    #[test]
    fn zig_zag_around_start() {
        assert_eq!(
            prioritize_around(&H::Start, &H::ALL),
            vec![H::Start, H::Center, H::Left, H::End, H::Right]
        );
    }

    #[test]
    fn zig_zag_at_the_edges() {
        assert_eq!(
            prioritize_around(&V::Top, &V::ALL),
            vec![V::Top, V::Start, V::Center, V::End, V::Bottom]
        );
        assert_eq!(
            prioritize_around(&V::Bottom, &V::ALL),
            vec![V::Bottom, V::End, V::Center, V::Start, V::Top]
        );
    }

    #[test]
    fn force_alignment_yields_single_candidate() {
        for h in H::ALL {
            for v in V::ALL {
                let c = plan(h, v, true);
                assert_eq!(c, vec![resolve(h, v)]);
            }
        }
    }

    #[test]
    fn beside_targets_never_overlap() {
        // Right of the anchor, vertically centered: horizontal pool is [left, right].
        let c = plan(H::Right, V::Center, false);
        assert_eq!(c.len(), 2 * 5);
        let expected_h = [H::Right, H::Left];
        let expected_v = [V::Center, V::End, V::Start, V::Bottom, V::Top];
        let mut i = 0;
        for h in expected_h {
            for v in expected_v {
                assert_eq!(c[i], resolve(h, v), "candidate {i}");
                i += 1;
            }
        }
    }

    #[test]
    fn corner_target_restricts_both_axes() {
        let c = plan(H::Left, V::Top, false);
        assert_eq!(
            c,
            vec![
                resolve(H::Left, V::Top),
                resolve(H::Left, V::Bottom),
                resolve(H::Right, V::Top),
                resolve(H::Right, V::Bottom),
            ]
        );
    }

    #[test]
    fn default_bottom_center_plan() {
        let c = plan(H::Center, V::Bottom, false);
        // Horizontal pool is full, vertical pool is [top, bottom].
        assert_eq!(c.len(), 5 * 2);
        assert_eq!(c[0], resolve(H::Center, V::Bottom));
        assert_eq!(c[1], resolve(H::Center, V::Top));
        assert_eq!(c[2], resolve(H::End, V::Bottom));
        assert_eq!(c[9], resolve(H::Left, V::Top));
    }

    fn horizontal() -> impl Strategy<Value = H> {
        prop::sample::select(H::ALL.to_vec())
    }

    fn vertical() -> impl Strategy<Value = V> {
        prop::sample::select(V::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prioritized_is_permutation_by_distance(i in 0_usize..7) {
            let opts = [0_i32, 1, 2, 3, 4, 5, 6];
            let target = opts[i];
            let out = prioritize_around(&target, &opts);
            prop_assert_eq!(out.len(), opts.len());
            let mut sorted = out.clone();
            sorted.sort_unstable();
            prop_assert_eq!(&sorted[..], &opts[..]);
            for w in out.windows(2) {
                prop_assert!((w[0] - target).abs() <= (w[1] - target).abs());
            }
        }

        #[test]
        fn plan_is_target_first_without_duplicates(h in horizontal(), v in vertical()) {
            let c = plan(h, v, false);
            prop_assert_eq!(c[0], resolve(h, v));
            prop_assert_eq!(c.len(), horizontal_pool(h).len() * vertical_pool(v).len());
            for (i, a) in c.iter().enumerate() {
                for b in &c[i + 1..] {
                    prop_assert!(a != b);
                }
            }
        }
    }
}
