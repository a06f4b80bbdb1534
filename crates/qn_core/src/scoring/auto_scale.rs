//! Proportional rescaling of rule weights to a target maximum.

use crate::config::{MatchPickTypeConfig, RuleSetting};
use std::collections::BTreeMap;

/// Rescale `weights` so they sum to `target_max` while keeping their ratios.
///
/// Points are integers: each weight gets its floored share and the leftover
/// points go to the largest remainders (ties in key order), so the sum is
/// exactly `target_max`. All-zero input is returned unchanged.
pub fn apply_auto_scaling<K: Ord + Clone>(
    weights: &BTreeMap<K, u32>,
    target_max: u32,
) -> BTreeMap<K, u32> {
    let total: u64 = weights.values().map(|&w| w as u64).sum();
    if total == 0 {
        return weights.clone();
    }

    let target = target_max as u64;
    // (key, floored share, remainder)
    let mut shares: Vec<(K, u64, u64)> = weights
        .iter()
        .map(|(key, &weight)| {
            let scaled = weight as u64 * target;
            (key.clone(), scaled / total, scaled % total)
        })
        .collect();

    let assigned: u64 = shares.iter().map(|(_, floor, _)| floor).sum();
    let mut leftover = target - assigned;

    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| shares[b].2.cmp(&shares[a].2));
    for index in order {
        if leftover == 0 {
            break;
        }
        if shares[index].2 > 0 {
            shares[index].1 += 1;
            leftover -= 1;
        }
    }

    shares.into_iter().map(|(key, points, _)| (key, points as u32)).collect()
}

/// Rescale the enabled rules of a phase to `target_max`; disabled rules keep
/// their stored points.
pub fn apply_auto_scaling_to_config(
    config: &MatchPickTypeConfig,
    target_max: u32,
) -> MatchPickTypeConfig {
    let weights: BTreeMap<_, _> = config.enabled_rules().collect();
    let scaled = apply_auto_scaling(&weights, target_max);

    let mut result = config.clone();
    for (rule_type, points) in scaled {
        result.set(rule_type, RuleSetting::enabled(points));
    }
    log::debug!("Auto-scaled {} rules to a maximum of {}", weights.len(), target_max);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchPickType;

    #[test]
    fn test_two_to_one_ratio_preserved() {
        let weights = BTreeMap::from([("A", 10), ("B", 5)]);
        let scaled = apply_auto_scaling(&weights, 30);
        assert_eq!(scaled, BTreeMap::from([("A", 20), ("B", 10)]));
    }

    #[test]
    fn test_rounding_still_hits_target() {
        let weights = BTreeMap::from([("A", 1), ("B", 1), ("C", 1)]);
        let scaled = apply_auto_scaling(&weights, 10);
        assert_eq!(scaled.values().sum::<u32>(), 10);
        assert_eq!(scaled, BTreeMap::from([("A", 4), ("B", 3), ("C", 3)]));
    }

    #[test]
    fn test_scaling_down() {
        let weights = BTreeMap::from([("exact", 20), ("outcome", 5), ("diff", 2)]);
        let scaled = apply_auto_scaling(&weights, 9);
        assert_eq!(scaled.values().sum::<u32>(), 9);
        assert!(scaled["exact"] > scaled["outcome"]);
        assert!(scaled["outcome"] >= scaled["diff"]);
    }

    #[test]
    fn test_zero_sum_is_unchanged() {
        let weights = BTreeMap::from([("A", 0), ("B", 0)]);
        assert_eq!(apply_auto_scaling(&weights, 50), weights);

        let empty: BTreeMap<&str, u32> = BTreeMap::new();
        assert!(apply_auto_scaling(&empty, 50).is_empty());
    }

    #[test]
    fn test_config_scaling_leaves_disabled_rules() {
        let config = MatchPickTypeConfig::new()
            .with_rule(MatchPickType::ExactScore, 10)
            .with_rule(MatchPickType::MatchOutcome90Min, 5)
            .with_disabled_rule(MatchPickType::TotalGoals, 7);

        let scaled = apply_auto_scaling_to_config(&config, 60);
        assert_eq!(scaled.get(MatchPickType::ExactScore).unwrap().points, 40);
        assert_eq!(scaled.get(MatchPickType::MatchOutcome90Min).unwrap().points, 20);
        assert_eq!(*scaled.get(MatchPickType::TotalGoals).unwrap(), RuleSetting::disabled(7));
    }
}
