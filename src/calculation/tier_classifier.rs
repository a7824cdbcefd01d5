//! Occurrence tier classification.
//!
//! This module ranks a cohort of workers by occurrence count and assigns
//! each worker a tier, and from it a commission percentage taken from the
//! worker's rate band.
//!
//! The ranking rules are:
//!
//! 1. An empty or all-zero cohort puts everyone in the low tier.
//! 2. With exactly one active worker (count > 0) that worker is high and
//!    everyone else is low.
//! 3. With exactly two active workers, equal counts make both median.
//!    Otherwise the first is high and the second median. Everyone else is low.
//! 4. With three or more active workers the whole cohort is ranked by count,
//!    descending and stable on ties, and split into three equal bands.
//! 5. A worker absent from the cohort is low.

use rust_decimal::Decimal;

use crate::config::{FleetConfig, RateBand};
use crate::models::{AuditStep, OccurrenceCountSnapshot, OccurrenceTier};

/// The result of classifying one worker, including the audit step.
#[derive(Debug, Clone)]
pub struct TierClassification {
    /// The worker's occurrence count (zero when absent from the snapshot).
    pub occurrence_count: u32,
    /// The worker's tier.
    pub tier: OccurrenceTier,
    /// The percentage taken from the worker's band.
    pub percentage: Decimal,
    /// The band the percentage was taken from.
    pub band: RateBand,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

struct TierDecision {
    tier: OccurrenceTier,
    active_workers: usize,
    position: Option<usize>,
    reasoning: String,
}

/// Determines the tier of a worker within a snapshot.
///
/// # Example
///
/// ```
/// use fleet_commission::calculation::determine_tier;
/// use fleet_commission::models::{OccurrenceCountSnapshot, OccurrenceTier};
///
/// let snapshot = OccurrenceCountSnapshot::from_counts([("a", 5), ("b", 2), ("c", 0)]);
/// assert_eq!(determine_tier("a", &snapshot), OccurrenceTier::High);
/// assert_eq!(determine_tier("b", &snapshot), OccurrenceTier::Median);
/// assert_eq!(determine_tier("c", &snapshot), OccurrenceTier::Low);
/// assert_eq!(determine_tier("missing", &snapshot), OccurrenceTier::Low);
/// ```
pub fn determine_tier(worker_id: &str, snapshot: &OccurrenceCountSnapshot) -> OccurrenceTier {
    decide(worker_id, snapshot).tier
}

/// Returns the commission percentage for a worker.
///
/// The band is looked up by `worker_name` in the configuration; the tier is
/// determined by `worker_id` within the snapshot.
///
/// # Example
///
/// ```
/// use fleet_commission::calculation::classify;
/// use fleet_commission::config::ConfigLoader;
/// use fleet_commission::models::OccurrenceCountSnapshot;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/fleet").unwrap().into_config();
/// let snapshot = OccurrenceCountSnapshot::from_counts([("a", 3), ("v", 3)]);
///
/// assert_eq!(classify("a", &snapshot, "Ana", &config), Decimal::new(9, 1));
/// assert_eq!(classify("v", &snapshot, "Valdiney", &config), Decimal::new(225, 2));
/// ```
pub fn classify(
    worker_id: &str,
    snapshot: &OccurrenceCountSnapshot,
    worker_name: &str,
    config: &FleetConfig,
) -> Decimal {
    classify_with_band(worker_id, snapshot, config.band_for(worker_name))
}

/// Returns the commission percentage for a worker given an explicit band.
///
/// # Example
///
/// ```
/// use fleet_commission::calculation::classify_with_band;
/// use fleet_commission::config::RateBand;
/// use fleet_commission::models::OccurrenceCountSnapshot;
/// use rust_decimal::Decimal;
///
/// let snapshot = OccurrenceCountSnapshot::from_counts([("a", 3), ("b", 3)]);
/// let rate = classify_with_band("a", &snapshot, &RateBand::standard());
/// assert_eq!(rate, Decimal::new(9, 1));
/// ```
pub fn classify_with_band(
    worker_id: &str,
    snapshot: &OccurrenceCountSnapshot,
    band: &RateBand,
) -> Decimal {
    band.rate_for(determine_tier(worker_id, snapshot))
}

/// Classifies a worker and records the decision as an audit step.
pub fn classify_worker(
    worker_id: &str,
    snapshot: &OccurrenceCountSnapshot,
    worker_name: &str,
    config: &FleetConfig,
    step_number: u32,
) -> TierClassification {
    let band = *config.band_for(worker_name);
    let decision = decide(worker_id, snapshot);
    let percentage = band.rate_for(decision.tier);
    let occurrence_count = snapshot.count_for(worker_id).unwrap_or(0);

    let audit_step = AuditStep {
        step_number,
        rule_id: "tier_classification".to_string(),
        rule_name: "Occurrence Tier Classification".to_string(),
        input: serde_json::json!({
            "worker_id": worker_id,
            "worker_name": worker_name,
            "occurrence_count": occurrence_count,
            "cohort_size": snapshot.len(),
            "active_workers": decision.active_workers,
            "band": {
                "min": band.min.normalize().to_string(),
                "mid": band.mid.normalize().to_string(),
                "max": band.max.normalize().to_string()
            }
        }),
        output: serde_json::json!({
            "tier": decision.tier.as_str(),
            "position": decision.position,
            "percentage": percentage.normalize().to_string()
        }),
        reasoning: format!("{} -> {}%", decision.reasoning, percentage.normalize()),
    };

    TierClassification {
        occurrence_count,
        tier: decision.tier,
        percentage,
        band,
        audit_step,
    }
}

fn decide(worker_id: &str, snapshot: &OccurrenceCountSnapshot) -> TierDecision {
    if snapshot.all_zero() {
        return TierDecision {
            tier: OccurrenceTier::Low,
            active_workers: 0,
            position: None,
            reasoning: "No occurrences in the cohort; nobody is penalised".to_string(),
        };
    }

    let mut active: Vec<&(String, u32)> = snapshot
        .entries()
        .iter()
        .filter(|(_, count)| *count > 0)
        .collect();
    // sort_by is stable, so ties keep input order
    active.sort_by(|a, b| b.1.cmp(&a.1));

    match active.as_slice() {
        [only] => {
            let tier = if only.0 == worker_id {
                OccurrenceTier::High
            } else {
                OccurrenceTier::Low
            };
            TierDecision {
                tier,
                active_workers: 1,
                position: None,
                reasoning: format!("Single active worker '{}' is singled out", only.0),
            }
        }
        [first, second] => {
            let involved = first.0 == worker_id || second.0 == worker_id;
            let (tier, reasoning) = if first.1 == second.1 && involved {
                (
                    OccurrenceTier::Median,
                    format!("Two active workers tied at {} occurrences", first.1),
                )
            } else if first.0 == worker_id {
                (
                    OccurrenceTier::High,
                    format!("First of two active workers ({} occurrences)", first.1),
                )
            } else if second.0 == worker_id {
                (
                    OccurrenceTier::Median,
                    format!("Second of two active workers ({} occurrences)", second.1),
                )
            } else {
                (
                    OccurrenceTier::Low,
                    "Not one of the two active workers".to_string(),
                )
            };
            TierDecision {
                tier,
                active_workers: 2,
                position: None,
                reasoning,
            }
        }
        _ => {
            let active_workers = active.len();
            let mut ranked: Vec<&(String, u32)> = snapshot.entries().iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            let total = ranked.len();

            match ranked.iter().position(|(id, _)| id == worker_id) {
                Some(position) => {
                    // position < total/3 and position < 2*total/3, kept exact
                    let tier = if 3 * position < total {
                        OccurrenceTier::High
                    } else if 3 * position < 2 * total {
                        OccurrenceTier::Median
                    } else {
                        OccurrenceTier::Low
                    };
                    TierDecision {
                        tier,
                        active_workers,
                        position: Some(position),
                        reasoning: format!("Ranked {} of {} by occurrences", position + 1, total),
                    }
                }
                None => TierDecision {
                    tier: OccurrenceTier::Low,
                    active_workers,
                    position: None,
                    reasoning: "Worker absent from the cohort ranks last".to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AssignmentsConfig, ChecklistTemplate, CommissionConfig, NamedRateBand, TrucksConfig,
    };
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn snapshot(counts: &[(&str, u32)]) -> OccurrenceCountSnapshot {
        OccurrenceCountSnapshot::from_counts(counts.iter().map(|(id, c)| (*id, *c)))
    }

    fn config() -> FleetConfig {
        FleetConfig::new(
            CommissionConfig {
                default_band: RateBand::standard(),
                special_bands: vec![NamedRateBand {
                    name: "Valdiney".to_string(),
                    band: RateBand {
                        min: dec("2.0"),
                        mid: dec("2.25"),
                        max: dec("2.5"),
                    },
                }],
            },
            AssignmentsConfig::default(),
            ChecklistTemplate::default(),
            TrucksConfig::default(),
        )
    }

    fn rate(worker_id: &str, snap: &OccurrenceCountSnapshot) -> Decimal {
        classify(worker_id, snap, worker_id, &config())
    }

    #[test]
    fn test_empty_snapshot_gives_max() {
        let snap = OccurrenceCountSnapshot::new();
        assert_eq!(rate("anyone", &snap), dec("1.0"));
    }

    #[test]
    fn test_all_zero_snapshot_gives_max_to_everyone() {
        let snap = snapshot(&[("a", 0), ("b", 0), ("c", 0), ("d", 0)]);
        for id in ["a", "b", "c", "d", "absent"] {
            assert_eq!(rate(id, &snap), dec("1.0"), "worker {}", id);
        }
    }

    #[test]
    fn test_single_active_worker_gets_min() {
        let snap = snapshot(&[("a", 0), ("b", 4), ("c", 0)]);
        assert_eq!(rate("b", &snap), dec("0.8"));
        assert_eq!(rate("a", &snap), dec("1.0"));
        assert_eq!(rate("c", &snap), dec("1.0"));
        assert_eq!(rate("absent", &snap), dec("1.0"));
    }

    #[test]
    fn test_two_active_equal_counts_both_mid() {
        let snap = snapshot(&[("a", 3), ("b", 3), ("c", 0)]);
        assert_eq!(rate("a", &snap), dec("0.9"));
        assert_eq!(rate("b", &snap), dec("0.9"));
        assert_eq!(rate("c", &snap), dec("1.0"));
    }

    #[test]
    fn test_two_active_unequal_counts() {
        let snap = snapshot(&[("A", 5), ("B", 2)]);
        assert_eq!(rate("A", &snap), dec("0.8"));
        assert_eq!(rate("B", &snap), dec("0.9"));
        assert_eq!(rate("C", &snap), dec("1.0"));
    }

    #[test]
    fn test_two_active_order_follows_count_not_input() {
        let snap = snapshot(&[("low", 1), ("zero", 0), ("high", 7)]);
        assert_eq!(determine_tier("high", &snap), OccurrenceTier::High);
        assert_eq!(determine_tier("low", &snap), OccurrenceTier::Median);
        assert_eq!(determine_tier("zero", &snap), OccurrenceTier::Low);
    }

    #[test]
    fn test_five_active_split_into_thirds() {
        let snap = snapshot(&[("e", 1), ("a", 5), ("d", 2), ("b", 4), ("c", 3)]);
        // total/3 = 1.67, 2*total/3 = 3.33
        assert_eq!(determine_tier("a", &snap), OccurrenceTier::High); // position 0
        assert_eq!(determine_tier("b", &snap), OccurrenceTier::High); // position 1
        assert_eq!(determine_tier("c", &snap), OccurrenceTier::Median); // position 2
        assert_eq!(determine_tier("d", &snap), OccurrenceTier::Median); // position 3
        assert_eq!(determine_tier("e", &snap), OccurrenceTier::Low); // position 4
    }

    #[test]
    fn test_three_active_one_each() {
        let snap = snapshot(&[("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(rate("a", &snap), dec("0.8"));
        assert_eq!(rate("b", &snap), dec("0.9"));
        assert_eq!(rate("c", &snap), dec("1.0"));
    }

    #[test]
    fn test_ranking_includes_zero_count_workers() {
        // Six workers, three active: bands are positions 0-1, 2-3, 4-5
        let snap = snapshot(&[
            ("z1", 0),
            ("a", 9),
            ("z2", 0),
            ("b", 4),
            ("c", 1),
            ("z3", 0),
        ]);
        assert_eq!(determine_tier("a", &snap), OccurrenceTier::High);
        assert_eq!(determine_tier("b", &snap), OccurrenceTier::High);
        assert_eq!(determine_tier("c", &snap), OccurrenceTier::Median);
        assert_eq!(determine_tier("z1", &snap), OccurrenceTier::Median);
        assert_eq!(determine_tier("z2", &snap), OccurrenceTier::Low);
        assert_eq!(determine_tier("z3", &snap), OccurrenceTier::Low);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let snap = snapshot(&[("first", 2), ("second", 2), ("third", 2)]);
        assert_eq!(determine_tier("first", &snap), OccurrenceTier::High);
        assert_eq!(determine_tier("second", &snap), OccurrenceTier::Median);
        assert_eq!(determine_tier("third", &snap), OccurrenceTier::Low);
    }

    #[test]
    fn test_absent_worker_with_three_active_gets_max() {
        let snap = snapshot(&[("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(rate("ghost", &snap), dec("1.0"));
    }

    #[test]
    fn test_special_band_uses_same_ranking() {
        let config = config();
        let snap = snapshot(&[("v", 5), ("b", 2)]);
        assert_eq!(classify("v", &snap, "Valdiney", &config), dec("2.0"));
        assert_eq!(classify("b", &snap, " valdiney ", &config), dec("2.25"));
        assert_eq!(classify("x", &snap, "VALDINEY", &config), dec("2.5"));
        assert_eq!(classify("v", &snap, "Davi", &config), dec("0.8"));
    }

    #[test]
    fn test_classify_worker_audit_step() {
        let snap = snapshot(&[("a", 5), ("b", 2)]);
        let result = classify_worker("b", &snap, "Bruno", &config(), 1);

        assert_eq!(result.tier, OccurrenceTier::Median);
        assert_eq!(result.percentage, dec("0.9"));
        assert_eq!(result.occurrence_count, 2);
        assert_eq!(result.audit_step.rule_id, "tier_classification");
        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.output["tier"].as_str().unwrap(), "median");
        assert_eq!(
            result.audit_step.output["percentage"].as_str().unwrap(),
            "0.9"
        );
        assert_eq!(result.audit_step.input["active_workers"], 2);
        assert!(result.audit_step.reasoning.contains("Second of two"));
    }

    #[test]
    fn test_classify_worker_absent_count_is_zero() {
        let snap = snapshot(&[("a", 1)]);
        let result = classify_worker("ghost", &snap, "Ghost", &config(), 3);
        assert_eq!(result.occurrence_count, 0);
        assert_eq!(result.tier, OccurrenceTier::Low);
    }

    proptest! {
        #[test]
        fn prop_zero_counts_never_penalise(len in 0usize..12) {
            let counts: Vec<(String, u32)> = (0..len).map(|i| (format!("w{}", i), 0)).collect();
            let snap = OccurrenceCountSnapshot::from_counts(counts);
            for i in 0..len {
                prop_assert_eq!(determine_tier(&format!("w{}", i), &snap), OccurrenceTier::Low);
            }
        }

        #[test]
        fn prop_more_occurrences_never_rank_better(counts in proptest::collection::vec(0u32..20, 3..15)) {
            let snap = OccurrenceCountSnapshot::from_counts(
                counts.iter().enumerate().map(|(i, c)| (format!("w{}", i), *c)),
            );
            let active = counts.iter().filter(|c| **c > 0).count();
            prop_assume!(active >= 3);

            fn severity(tier: OccurrenceTier) -> u8 {
                match tier {
                    OccurrenceTier::High => 2,
                    OccurrenceTier::Median => 1,
                    OccurrenceTier::Low => 0,
                }
            }

            for (i, ci) in counts.iter().enumerate() {
                for (j, cj) in counts.iter().enumerate() {
                    if ci > cj {
                        let ti = determine_tier(&format!("w{}", i), &snap);
                        let tj = determine_tier(&format!("w{}", j), &snap);
                        prop_assert!(severity(ti) >= severity(tj));
                    }
                }
            }
        }

        #[test]
        fn prop_rate_always_within_band(counts in proptest::collection::vec(0u32..10, 0..10), pick in 0usize..12) {
            let snap = OccurrenceCountSnapshot::from_counts(
                counts.iter().enumerate().map(|(i, c)| (format!("w{}", i), *c)),
            );
            let band = RateBand::standard();
            let rate = classify_with_band(&format!("w{}", pick), &snap, &band);
            prop_assert!(rate == band.min || rate == band.mid || rate == band.max);
        }
    }
}
