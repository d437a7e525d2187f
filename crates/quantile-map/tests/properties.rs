use approx::assert_relative_eq;
use prbias_quantile_map::{
    Climatology, CorrectionMethod, QmConfig, ZeroTotalPolicy, correct_window, disaggregate,
    map_total,
};
use prbias_stats::{min_max, nansum};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Deterministic pseudo-random sequence (LCG) scaled into `[lo, hi)`.
fn lcg_series(n: usize, seed: u64, lo: f64, hi: f64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let u = (state >> 11) as f64 / (1u64 << 53) as f64;
            lo + u * (hi - lo)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mapping properties
// ---------------------------------------------------------------------------

#[test]
fn unbiased_model_maps_to_nearest_climatology_value() {
    let clim = lcg_series(30, 7, 20.0, 200.0);
    for x in [0.0, 35.0, 90.0, 123.4, 500.0] {
        let mapped = map_total(x, &clim, &clim).unwrap();
        let nearest = clim
            .iter()
            .map(|c| (c - x).abs())
            .fold(f64::INFINITY, f64::min);
        assert!(clim.contains(&mapped.value));
        assert_relative_eq!((mapped.value - x).abs(), nearest, epsilon = 1e-12);
    }
}

#[test]
fn mapping_is_permutation_invariant() {
    let model = lcg_series(30, 11, 10.0, 300.0);
    let obs = lcg_series(30, 13, 5.0, 250.0);

    let mut model_rev = model.clone();
    model_rev.reverse();
    let mut obs_rot = obs.clone();
    obs_rot.rotate_left(7);

    for x in lcg_series(20, 17, 0.0, 320.0) {
        let a = map_total(x, &model, &obs).unwrap();
        let b = map_total(x, &model_rev, &obs_rot).unwrap();
        assert_eq!(a, b, "forecast {x}");
    }
}

#[test]
fn tie_break_uses_last_equal_rank() {
    let model = [20.0, 10.0, 30.0, 20.0];
    let obs = [1.0, 2.0, 3.0, 4.0];
    let mapped = map_total(20.0, &model, &obs).unwrap();
    assert_eq!(mapped.rank, 2);
    assert_eq!(mapped.value, 3.0);
}

#[test]
fn mapped_value_within_obs_range() {
    let model = lcg_series(30, 3, 40.0, 180.0);
    let obs = lcg_series(30, 5, 60.0, 220.0);
    let (lo, hi) = min_max(&obs).unwrap();
    for x in lcg_series(50, 9, 0.0, 400.0) {
        let v = map_total(x, &model, &obs).unwrap().value;
        assert!(v >= lo && v <= hi, "{v} outside [{lo}, {hi}]");
    }
}

// ---------------------------------------------------------------------------
// Disaggregation properties
// ---------------------------------------------------------------------------

#[test]
fn disaggregation_round_trips_on_equal_totals() {
    for seed in 1..10 {
        let daily = lcg_series(31, seed, 0.0, 12.0);
        let t = nansum(&daily);
        let out = disaggregate(&daily, t, t, ZeroTotalPolicy::Zeros);
        for (a, b) in daily.iter().zip(&out) {
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
    }
}

#[test]
fn disaggregated_sum_equals_corrected_total() {
    for seed in 1..10 {
        let daily = lcg_series(30, seed, 0.0, 8.0);
        let t = nansum(&daily);
        let corrected = t * (0.5 + seed as f64 / 10.0);
        let out = disaggregate(&daily, t, corrected, ZeroTotalPolicy::Zeros);
        assert_relative_eq!(nansum(&out), corrected, epsilon = 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Whole-window correction
// ---------------------------------------------------------------------------

#[test]
fn wet_biased_model_is_dried() {
    let obs = lcg_series(30, 21, 50.0, 150.0);
    let model: Vec<f64> = obs.iter().map(|o| o * 2.0).collect();
    let clim = Climatology::complete(1981, &model, &obs).unwrap();

    let daily = vec![200.0 / 30.0; 30];
    let out = correct_window(&daily, &clim, CorrectionMethod::EqmDes, &QmConfig::new()).unwrap();

    assert_relative_eq!(out.forecast_total(), 200.0, epsilon = 1e-9);
    assert!(out.corrected_total() < 200.0);
    assert_relative_eq!(nansum(out.daily()), out.corrected_total(), epsilon = 1e-9);
}

#[test]
fn missing_years_reduce_coverage_but_still_map() {
    let mut clim = Climatology::new();
    for (i, year) in (1981..=2010).enumerate() {
        let model = if i % 5 == 0 { None } else { Some(10.0 * i as f64) };
        clim.push(year, model, Some(5.0 * i as f64));
    }
    let out = correct_window(&[50.0], &clim, CorrectionMethod::EqmDes, &QmConfig::new()).unwrap();
    assert_eq!(out.n_paired(), Some(24));
    assert!(out.corrected_total().is_finite());
}
