//! Detection followed by impact estimation on the same series

use impact_stats::prelude::*;
use rand::prelude::*;
use rand_distr::Normal;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Route detector/estimator logs to the test output; `RUST_LOG` overrides
fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

const SERIES: [f64; 20] = [
    0.2, 0.0, 0.4, 0.0, 0.1, 0.5, 0.2, 0.4, 0.0, 0.0, 0.1, 0.6, 0.1, 0.3, 0.1, 0.1, 0.2, 0.3, 0.1,
    0.1,
];

#[test]
fn test_reference_series_pipeline() -> anyhow::Result<()> {
    init_tracing();

    let detector = EnergyDivisiveDetector::new(
        EnergyDivisiveParameters::new(0.05, 199, 3).with_seed(21),
    )?;
    let result = detector.detect_simple(&SERIES)?;
    assert_eq!(result.boundaries(), vec![0, 20]);

    // The impact split is chosen by the caller, not by the detector
    let estimator = ImpactEstimator::new(ImpactParameters::new(1000).with_seed(4))?;
    let report = estimator.report(&SERIES[..14], &SERIES[14..])?;
    assert_eq!(report.direction(), Direction::LessThan);
    assert!(report.probability() < 0.25);
    Ok(())
}

#[test]
fn test_detected_shift_feeds_impact() -> anyhow::Result<()> {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(99);
    let noise = Normal::new(0.0, 0.5).unwrap();
    let data: Vec<f64> = (0..80)
        .map(|i| noise.sample(&mut rng) + if i < 50 { 10.0 } else { 14.0 })
        .collect();

    let boundaries = detect_changes(&data, 0.05, 199, 8)?;
    assert!(boundaries.len() >= 3);
    let split = *boundaries
        .iter()
        .min_by_key(|&&b| b.abs_diff(50))
        .unwrap();
    assert!(split.abs_diff(50) <= 2, "split at {split}");

    let (before, after) = data.split_at(split);
    let estimator = ImpactEstimator::new(
        ImpactParameters::new(1000)
            .with_seed(12)
            .with_boundary(BoundaryMode::Independent),
    )?;
    let result = estimator.estimate(before, after)?;
    assert_eq!(result.direction, Direction::GreaterThan);
    assert!(result.is_significant(0.05));
    Ok(())
}

#[test]
fn test_parameters_round_trip_through_json() -> anyhow::Result<()> {
    let detection = EnergyDivisiveParameters::default().with_min_size(10).with_seed(5);
    let impact = ImpactParameters::default().with_half_window(3);

    let json = serde_json::json!({ "detection": detection, "impact": impact });
    let detection_back: EnergyDivisiveParameters = serde_json::from_value(json["detection"].clone())?;
    let impact_back: ImpactParameters = serde_json::from_value(json["impact"].clone())?;

    assert_eq!(detection_back, detection);
    assert_eq!(impact_back, impact);
    Ok(())
}

#[test]
fn test_errors_surface_through_anyhow() {
    let err = detect_changes(&SERIES, 2.0, 10, 3).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    let wrapped: anyhow::Error = err.into();
    assert!(wrapped.to_string().contains("significance"));
}
