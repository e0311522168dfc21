//! Share of a class among the top-k% of a ranking.

use tracing::{debug, instrument};

use crate::attributes::AttributeTable;
use crate::error::{FairnessError, Result};
use crate::model::ClassValue;
use crate::scores::ScoreMap;

/// Size of the top-`k`% window over `total` nodes.
///
/// Halves round to even, so 2.5 → 2 and 3.5 → 4.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn top_k_window(total: usize, k: f64) -> usize {
    (total as f64 * k / 100.0).round_ties_even() as usize
}

/// Reject a `k` outside `[0, 100]` (NaN included).
///
/// # Errors
///
/// Returns [`FairnessError::InvalidK`].
pub fn check_k(k: f64) -> Result<()> {
    if (0.0..=100.0).contains(&k) {
        Ok(())
    } else {
        Err(FairnessError::InvalidK(k))
    }
}

/// Fraction of the top-`k`% ranked nodes whose class is `class`.
///
/// `k` is a percentage in `[0, 100]`. The window holds
/// [`top_k_window`]`(len, k)` nodes; every visited node counts towards it
/// whatever its class. `ranked` is walked as is and never re-sorted.
///
/// # Errors
///
/// - [`FairnessError::InvalidK`] if `k` is outside `[0, 100]` or NaN,
///   checked before anything else.
/// - [`FairnessError::NotRanked`] if `ranked` is not score-descending.
/// - [`FairnessError::EmptyTopK`] if the window rounds to zero nodes.
/// - [`FairnessError::MissingAttribute`] for a windowed node with no class.
#[instrument(skip(attributes, ranked), fields(total = ranked.len()))]
#[allow(clippy::cast_precision_loss)]
pub fn top_k_class_rate(
    k: f64,
    class: ClassValue,
    attributes: &AttributeTable,
    ranked: &ScoreMap,
) -> Result<f64> {
    check_k(k)?;
    if !ranked.is_ranked() {
        return Err(FairnessError::NotRanked);
    }

    let window = top_k_window(ranked.len(), k);
    if window == 0 {
        return Err(FairnessError::EmptyTopK {
            k,
            total: ranked.len(),
        });
    }

    let mut class_count = 0_usize;
    for (node, _) in ranked.iter().take(window) {
        if attributes.get(node)? == class {
            class_count += 1;
        }
    }

    debug!(window, class_count, "top-k window scanned");
    Ok(class_count as f64 / window as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    fn ranked(scores: &[(u64, f64)]) -> ScoreMap {
        ScoreMap::from_entries(scores.iter().map(|&(n, s)| (NodeId(n), s))).rank()
    }

    fn classes(pairs: &[(u64, i32)]) -> AttributeTable {
        pairs
            .iter()
            .map(|&(n, c)| (NodeId(n), ClassValue(c)))
            .collect()
    }

    #[test]
    fn window_rounds_half_to_even() {
        assert_eq!(top_k_window(10, 25.0), 2);
        assert_eq!(top_k_window(10, 35.0), 4);
        assert_eq!(top_k_window(10, 100.0), 10);
        assert_eq!(top_k_window(3, 10.0), 0);
    }

    #[test]
    fn out_of_range_k_is_rejected_first() {
        // Unranked input would also fail, but k is checked first.
        let unranked = ScoreMap::from_entries([(NodeId(0), 1.0)]);
        let attrs = classes(&[(0, 1)]);
        for k in [-5.0, 150.0, f64::NAN] {
            assert!(matches!(
                top_k_class_rate(k, ClassValue(1), &attrs, &unranked),
                Err(FairnessError::InvalidK(_))
            ));
        }
    }

    #[test]
    fn check_k_accepts_bounds_and_rejects_nan() {
        assert_eq!(check_k(0.0), Ok(()));
        assert_eq!(check_k(100.0), Ok(()));
        assert!(matches!(check_k(f64::NAN), Err(FairnessError::InvalidK(_))));
        assert_eq!(check_k(100.5), Err(FairnessError::InvalidK(100.5)));
    }

    #[test]
    fn unranked_scores_are_rejected() {
        let unranked = ScoreMap::from_entries([(NodeId(0), 1.0)]);
        let attrs = classes(&[(0, 1)]);
        assert_eq!(
            top_k_class_rate(50.0, ClassValue(1), &attrs, &unranked),
            Err(FairnessError::NotRanked)
        );
    }

    #[test]
    fn tiny_window_is_empty() {
        let scores = ranked(&[(0, 0.9), (1, 0.5), (2, 0.1)]);
        let attrs = classes(&[(0, 1), (1, 1), (2, 2)]);
        assert_eq!(
            top_k_class_rate(10.0, ClassValue(1), &attrs, &scores),
            Err(FairnessError::EmptyTopK { k: 10.0, total: 3 })
        );
        assert!(matches!(
            top_k_class_rate(0.0, ClassValue(1), &attrs, &scores),
            Err(FairnessError::EmptyTopK { .. })
        ));
    }

    #[test]
    fn window_counts_every_visited_node() {
        // Ranked: 3 (c2), 0 (c1), 2 (c2), 1 (c1).
        let scores = ranked(&[(0, 0.8), (1, 0.1), (2, 0.5), (3, 0.9)]);
        let attrs = classes(&[(0, 1), (1, 1), (2, 2), (3, 2)]);

        assert_eq!(top_k_class_rate(50.0, ClassValue(1), &attrs, &scores), Ok(0.5));
        assert_eq!(top_k_class_rate(25.0, ClassValue(1), &attrs, &scores), Ok(0.0));
        assert_eq!(top_k_class_rate(75.0, ClassValue(2), &attrs, &scores), Ok(2.0 / 3.0));
    }

    #[test]
    fn full_window_matches_whole_population() {
        let scores = ranked(&[(0, 0.3), (1, 0.2), (2, 0.9), (3, 0.4), (4, 0.0)]);
        let attrs = classes(&[(0, 1), (1, 2), (2, 1), (3, 2), (4, 1)]);
        assert_eq!(top_k_class_rate(100.0, ClassValue(1), &attrs, &scores), Ok(0.6));
    }

    #[test]
    fn missing_attribute_inside_window_fails() {
        let scores = ranked(&[(0, 0.9), (1, 0.5)]);
        let attrs = classes(&[(1, 1)]);
        assert_eq!(
            top_k_class_rate(50.0, ClassValue(1), &attrs, &scores),
            Err(FairnessError::MissingAttribute(NodeId(0)))
        );
    }
}
