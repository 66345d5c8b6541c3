//! Unit tests for the risk policy table

use voltrix::models::risk::{Severity, StopRule};
use voltrix::models::signal::{StrategyFamily, StrategyKind};
use voltrix::risk::{risk_policy, severity_in_domain};
use voltrix::EngineError;

const ALL_SEVERITIES: [Severity; 5] = [
    Severity::Low,
    Severity::Normal,
    Severity::Elevated,
    Severity::High,
    Severity::Extreme,
];

#[test]
fn test_allocations_sum_to_one_for_every_valid_policy() {
    for strategy in StrategyKind::ALL {
        for severity in ALL_SEVERITIES {
            if let Ok(policy) = risk_policy(strategy, severity) {
                assert!(
                    (policy.allocation_total() - 1.0).abs() < 1e-9,
                    "{:?}/{:?} allocations sum to {}",
                    strategy,
                    severity,
                    policy.allocation_total()
                );
            }
        }
    }
}

#[test]
fn test_policy_bounds() {
    for strategy in StrategyKind::ALL {
        for severity in ALL_SEVERITIES {
            let Ok(policy) = risk_policy(strategy, severity) else {
                continue;
            };
            assert!(policy.size_fraction >= 0.005 && policy.size_fraction <= 0.02);
            assert!(policy.max_hold_minutes >= 15 && policy.max_hold_minutes <= 180);
            assert!(policy.trailing_activation_r > 0.0);
            assert!(!policy.targets.is_empty() && policy.targets.len() <= 3);
            for target in &policy.targets {
                assert!(target.distance_r > 0.0);
                assert!(target.allocation > 0.0);
            }
            match policy.stop {
                StopRule::AtrMultiple(mult) => {
                    assert!((0.1..=0.75).contains(&mult));
                }
                StopRule::ExpectedMoveFraction(frac) => {
                    assert!(frac > 0.0 && frac < 1.0);
                }
            }
        }
    }
}

#[test]
fn test_size_scales_inversely_with_severity() {
    let low = risk_policy(StrategyKind::Baseline, Severity::Low).unwrap();
    let normal = risk_policy(StrategyKind::Baseline, Severity::Normal).unwrap();
    assert!(low.size_fraction > normal.size_fraction);

    let extreme = risk_policy(StrategyKind::MeanReversion, Severity::Extreme).unwrap();
    assert!((extreme.size_fraction - 0.005).abs() < 1e-12);
}

#[test]
fn test_out_of_domain_combination_is_invalid_policy() {
    let err = risk_policy(StrategyKind::Baseline, Severity::Extreme).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidPolicy {
            strategy: StrategyKind::Baseline,
            severity: Severity::Extreme,
        }
    );

    assert!(risk_policy(StrategyKind::MeanReversion, Severity::Normal).is_err());
    assert!(risk_policy(StrategyKind::SqueezeBreakout, Severity::High).is_err());
    assert!(risk_policy(StrategyKind::NewsScalp, Severity::Low).is_err());
}

#[test]
fn test_domain_mirrors_evaluator_gating() {
    assert!(severity_in_domain(StrategyKind::Baseline, Severity::Low));
    assert!(severity_in_domain(StrategyKind::Baseline, Severity::Normal));
    assert!(!severity_in_domain(StrategyKind::Baseline, Severity::High));

    assert!(severity_in_domain(
        StrategyKind::MeanReversion,
        Severity::Extreme
    ));
    assert!(severity_in_domain(StrategyKind::BreakoutFade, Severity::High));
    assert!(severity_in_domain(StrategyKind::RangeTrade, Severity::High));
    assert!(severity_in_domain(
        StrategyKind::SqueezeBreakout,
        Severity::Elevated
    ));

    for kind in StrategyKind::ALL {
        if kind.family() == StrategyFamily::News {
            assert!(severity_in_domain(kind, Severity::Extreme));
            assert!(!severity_in_domain(kind, Severity::Normal));
        }
    }
}

#[test]
fn test_stop_distance_resolution() {
    let technical = risk_policy(StrategyKind::MeanReversion, Severity::Extreme).unwrap();
    let distance = technical.stop_distance(8.0, None).unwrap();
    assert!((distance - 4.0).abs() < 1e-12);
    assert!(distance <= 0.75 * 8.0);

    let news = risk_policy(StrategyKind::NewsMomentum, Severity::Extreme).unwrap();
    assert!(news.stop_distance(8.0, None).is_none());
    let distance = news.stop_distance(8.0, Some(0.0150)).unwrap();
    assert!((distance - 0.0045).abs() < 1e-12);
}

#[test]
fn test_policy_is_deterministic() {
    let a = risk_policy(StrategyKind::RangeTrade, Severity::High).unwrap();
    let b = risk_policy(StrategyKind::RangeTrade, Severity::High).unwrap();
    assert_eq!(a.size_fraction, b.size_fraction);
    assert_eq!(a.targets, b.targets);
    assert_eq!(a.max_hold_minutes, b.max_hold_minutes);
}
