//! Unit tests for shared math helpers

use voltrix::common::math::{percent_returns, sma, standard_deviation, true_range};

#[test]
fn test_sma_basic() {
    let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sma(&values, 5), Some(3.0));
    assert_eq!(sma(&values, 2), Some(4.5));
}

#[test]
fn test_sma_insufficient() {
    let values = vec![1.0, 2.0];
    assert_eq!(sma(&values, 3), None);
    assert_eq!(sma(&values, 0), None);
}

#[test]
fn test_standard_deviation_constant_series() {
    let values = vec![5.0; 10];
    assert_eq!(standard_deviation(&values, 10), Some(0.0));
}

#[test]
fn test_standard_deviation_known_values() {
    // Population stddev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2.
    let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let sd = standard_deviation(&values, 8).unwrap();
    assert!((sd - 2.0).abs() < 1e-12);
}

#[test]
fn test_true_range_gap_up() {
    // Gap above prior close: TR spans from prior close to the high.
    let tr = true_range(110.0, 106.0, 100.0);
    assert!((tr - 10.0).abs() < 1e-12);
}

#[test]
fn test_true_range_inside_bar() {
    let tr = true_range(102.0, 99.0, 101.0);
    assert!((tr - 3.0).abs() < 1e-12);
}

#[test]
fn test_percent_returns() {
    let closes = vec![100.0, 102.0, 96.9];
    let rets = percent_returns(&closes);
    assert_eq!(rets.len(), 2);
    assert!((rets[0] - 2.0).abs() < 1e-9);
    assert!((rets[1] - (-5.0)).abs() < 1e-9);
}
