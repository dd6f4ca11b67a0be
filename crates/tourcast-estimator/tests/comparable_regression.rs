//! Regression fixture and invariants for the Comparable estimator.
//!
//! Reference case: default parameters, target
//! `{search_index: 388, platform_a: 80.6, platform_b: 82.0}`, first-tier city.

use tourcast_estimator::benchmark::BenchmarkArtist;
use tourcast_estimator::demo::{demo_metrics, run_demo};
use tourcast_estimator::metrics::{metric_set, MetricSet, PLATFORM_A, PLATFORM_B, SEARCH_INDEX};
use tourcast_estimator::{ComparableEstimator, EstimatorParams};

fn approx(actual: f64, expected: f64, places: i32) {
    let tol = 0.5 * 10f64.powi(-places);
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} ≈ {} ({} d.p.)",
        actual,
        expected,
        places
    );
}

fn estimate(params: EstimatorParams, target: &MetricSet, tier: &str) -> tourcast_estimator::EstimationResult {
    ComparableEstimator::new(params).estimate(target, tier).unwrap()
}

#[test]
fn reference_case_intermediates() {
    let result = estimate(EstimatorParams::default(), &demo_metrics(), "tier1");

    let max = &result.normalization.max_values;
    assert_eq!(max[SEARCH_INDEX], 616.0);
    assert_eq!(max[PLATFORM_A], 126.6);
    assert_eq!(max[PLATFORM_B], 82.0);

    let target = result.target().unwrap();
    approx(target.normalized[SEARCH_INDEX], 0.630, 3);
    approx(target.normalized[PLATFORM_A], 0.637, 3);
    assert_eq!(target.normalized[PLATFORM_B], 1.0);
    approx(target.demand, 0.706, 3);
    approx(target.conversion, 0.655, 3);
    approx(target.combined, 0.462, 3);

    let travis = &result.indices[0];
    approx(travis.demand, 0.557, 3);
    approx(travis.conversion, 0.998, 3);
    approx(travis.combined, 0.556, 3);

    let kanye = &result.indices[1];
    approx(kanye.demand, 0.760, 3);
    approx(kanye.conversion, 0.881, 3);
    approx(kanye.combined, 0.669, 3);
}

#[test]
fn reference_case_outputs() {
    let result = estimate(EstimatorParams::default(), &demo_metrics(), "tier1");

    approx(result.anchors[0].ratio, 0.832, 3);
    approx(result.anchors[1].ratio, 0.691, 3);
    approx(result.baseline.max, 65.03, 2);
    approx(result.baseline.min, 35.24, 2);
    approx(result.baseline.avg, 50.13, 2);

    approx(result.output.conservative.value, 40.52, 2);
    approx(result.output.neutral.value, 62.67, 2);
    approx(result.output.aggressive.value, 87.79, 2);
    assert_eq!(result.output.range, [result.output.conservative.value, result.output.aggressive.value]);
    assert_eq!(result.output.mid, result.output.neutral.value);

    // with the literal defaults the scenarios happen to be ordered in every tier
    for tier in ["tier1", "tier2", "tier3"] {
        let out = estimate(EstimatorParams::default(), &demo_metrics(), tier).output;
        assert!(out.conservative.value < out.neutral.value, "{}", tier);
        assert!(out.neutral.value < out.aggressive.value, "{}", tier);
    }
}

#[test]
fn scenarios_are_not_monotone_in_general() {
    let mut params = EstimatorParams::default();
    for p in params.tier_premiums.tiers.values_mut() {
        p.conservative = 3.0;
        p.aggressive = 0.5;
    }
    let out = estimate(params, &demo_metrics(), "tier1").output;
    assert!(out.conservative.value > out.aggressive.value);
}

#[test]
fn normalised_values_stay_in_unit_interval() {
    let targets = [
        demo_metrics(),
        metric_set([(SEARCH_INDEX, 0.0), (PLATFORM_A, 0.0), (PLATFORM_B, 0.0)]),
        metric_set([(SEARCH_INDEX, 5000.0), (PLATFORM_A, 1.0)]),
        metric_set([("unknown_dimension", 42.0)]),
    ];
    for target in &targets {
        let result = estimate(EstimatorParams::default(), target, "tier1");
        for (dim, max) in &result.normalization.max_values {
            let mut hit_one = false;
            for member in &result.indices {
                let n = member.normalized[dim];
                assert!((0.0..=1.0).contains(&n), "{} = {} for {}", dim, n, member.id);
                hit_one |= n == 1.0;
            }
            if *max > 0.0 {
                assert!(hit_one, "no member at 1.0 for {}", dim);
            }
        }
    }
}

#[test]
fn conversion_within_bounds_and_combined_non_negative() {
    let mut params = EstimatorParams::default();
    params.conversion.coefficients.insert(SEARCH_INDEX.to_string(), 5.0);
    let result = estimate(params.clone(), &demo_metrics(), "tier1");
    for member in &result.indices {
        assert!(member.conversion >= params.conversion.min);
        assert!(member.conversion <= params.conversion.max);
        assert!(member.combined >= 0.0);
    }
}

#[test]
fn doubling_reference_box_office_doubles_implied_baseline() {
    let base = estimate(EstimatorParams::default(), &demo_metrics(), "tier1");

    let mut params = EstimatorParams::default();
    params.benchmarks[1].box_office *= 2.0;
    let doubled = estimate(params, &demo_metrics(), "tier1");

    approx(doubled.anchors[1].implied_baseline, 2.0 * base.anchors[1].implied_baseline, 9);
    assert_eq!(doubled.anchors[0].implied_baseline, base.anchors[0].implied_baseline);
}

#[test]
fn baseline_range_is_ordered() {
    let mut params = EstimatorParams::default();
    params.benchmarks.push(BenchmarkArtist {
        id: "third".into(),
        name: "Third".into(),
        city: None,
        tier: "tier3".into(),
        box_office: 40.0,
        metrics: metric_set([(SEARCH_INDEX, 150.0), (PLATFORM_A, 60.0), (PLATFORM_B, 30.0)]),
    });
    let b = estimate(params, &demo_metrics(), "tier2").baseline;
    assert_eq!(b.values.len(), 3);
    assert!(b.min <= b.avg && b.avg <= b.max);
}

#[test]
fn adding_a_benchmark_moves_target_indices() {
    let base = estimate(EstimatorParams::default(), &demo_metrics(), "tier1");

    let mut params = EstimatorParams::default();
    params.benchmarks.push(BenchmarkArtist {
        id: "giant".into(),
        name: "Giant".into(),
        city: None,
        tier: "tier3".into(),
        box_office: 120.0,
        metrics: metric_set([(SEARCH_INDEX, 2000.0), (PLATFORM_A, 300.0), (PLATFORM_B, 200.0)]),
    });
    let widened = estimate(params, &demo_metrics(), "tier1");

    assert_ne!(base.target().unwrap().demand, widened.target().unwrap().demand);
}

#[test]
fn identical_input_gives_identical_output() {
    let first = serde_json::to_string(&estimate(EstimatorParams::default(), &demo_metrics(), "tier1")).unwrap();
    let second = serde_json::to_string(&estimate(EstimatorParams::default(), &demo_metrics(), "tier1")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn demo_matches_reference_case() {
    let report = run_demo(&EstimatorParams::default()).unwrap();
    let direct = estimate(EstimatorParams::default(), &demo_metrics(), "tier1");
    assert_eq!(report.result, direct);
    assert_eq!(report.artist, "Cardi B");
}
