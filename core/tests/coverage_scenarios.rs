use radarcov::prelude::{ConstantGain, FnGain, GainError, GainQuery};
use radarcov::{
    AngularSpan, CoverageSweepEngine, RadarLinkModel, RadarSystemConfig, RangeOutcome,
    SearchBounds, TargetGeometry,
};

fn reference_config() -> RadarSystemConfig {
    RadarSystemConfig::new(1.0e6, 10.0e9, 30.0, 6.0, 290.0, 13.0, 1.0e6).unwrap()
}

// Closed-form threshold range of the reference scenario.
const ANALYTIC_MAX_RANGE_M: f64 = 34_544.799_077_866;
// Bisection result over [1 km, 500 km] with a 100 m tolerance.
const GOLDEN_MAX_RANGE_M: f64 = 34_502.197_265_625;

#[test]
fn reference_scenario_matches_golden_range() {
    let link = RadarLinkModel::new(reference_config(), ConstantGain(30.0)).unwrap();
    let engine = CoverageSweepEngine::new(link, SearchBounds::default()).unwrap();

    let outcome = engine.max_range(0.0, 0.0, 1.0).unwrap();
    let found = outcome.max_range_m().expect("reference target is detectable");
    assert!(
        (found - GOLDEN_MAX_RANGE_M).abs() < 1e-6,
        "golden drifted: {}",
        found
    );
    assert!(found <= ANALYTIC_MAX_RANGE_M);
    assert!(ANALYTIC_MAX_RANGE_M - found <= 100.0);

    // Threshold crossing sits between the golden value and one tolerance above.
    let link = engine.link();
    assert!(link
        .is_detectable(&TargetGeometry::new(found, 0.0, 0.0, 1.0))
        .unwrap());
    assert!(!link
        .is_detectable(&TargetGeometry::new(ANALYTIC_MAX_RANGE_M + 1.0, 0.0, 0.0, 1.0))
        .unwrap());
}

#[test]
fn constant_gain_detectability_is_monotonic() {
    let link = RadarLinkModel::new(reference_config(), ConstantGain(30.0)).unwrap();
    let verdicts: Vec<bool> = (1..=400)
        .map(|step| {
            let target = TargetGeometry::from_degrees(step as f64 * 500.0, 15.0, 5.0, 1.0);
            link.is_detectable(&target).unwrap()
        })
        .collect();
    assert!(verdicts.windows(2).all(|pair| pair[0] || !pair[1]));
    assert!(verdicts[0]);
    assert!(!verdicts[verdicts.len() - 1]);
}

#[test]
fn repeated_grid_sweeps_are_identical() {
    let gain = FnGain(|query: &GainQuery| -> Result<f64, GainError> {
        let off_axis = query.azimuth_rad.powi(2) + query.elevation_rad.powi(2);
        Ok(query.reference_gain_db - 12.0 * off_axis)
    });
    let link = RadarLinkModel::new(reference_config(), gain).unwrap();
    let engine = CoverageSweepEngine::new(link, SearchBounds::default()).unwrap();

    let azimuth = AngularSpan::new(-180.0, 180.0, 10.0);
    let elevation = AngularSpan::new(-30.0, 90.0, 5.0);
    let first = engine.sweep_2d(azimuth, elevation, 1.0).unwrap();
    let second = engine.sweep_2d(azimuth, elevation, 1.0).unwrap();
    assert_eq!(first.len(), 37 * 25);
    assert_eq!(first, second);
}

#[test]
fn single_failing_point_does_not_abort_the_sweep() {
    let gain = FnGain(|query: &GainQuery| -> Result<f64, GainError> {
        let az = query.azimuth_rad.to_degrees();
        let el = query.elevation_rad.to_degrees();
        if (az - 30.0).abs() < 1e-6 && (el - 40.0).abs() < 1e-6 {
            Err(GainError::OutOfDomain("no pattern data".into()))
        } else {
            Ok(25.0)
        }
    });
    let link = RadarLinkModel::new(reference_config(), gain).unwrap();
    let engine = CoverageSweepEngine::new(link, SearchBounds::default()).unwrap();

    let samples = engine
        .sweep_2d(
            AngularSpan::new(0.0, 90.0, 10.0),
            AngularSpan::new(0.0, 90.0, 10.0),
            1.0,
        )
        .unwrap();

    assert_eq!(samples.len(), 100);
    assert_eq!(samples.iter().filter(|s| s.is_valid()).count(), 99);
    let invalid: Vec<_> = samples.iter().filter(|s| !s.is_valid()).collect();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].azimuth_deg, 30.0);
    assert_eq!(invalid[0].elevation_deg, 40.0);
    assert!(invalid[0].gain_db.is_none());
    assert!(matches!(invalid[0].outcome, RangeOutcome::Invalid { .. }));

    let progress = engine.progress();
    assert_eq!(progress.completed, 100);
    assert_eq!(progress.failed, 1);
}

#[test]
fn bounds_are_checked_at_construction() {
    let link = RadarLinkModel::new(reference_config(), ConstantGain(30.0)).unwrap();
    let bounds = SearchBounds {
        min_range_m: 10_000.0,
        max_range_m: 1_000.0,
        epsilon_m: 10.0,
    };
    assert!(CoverageSweepEngine::new(link, bounds).is_err());
}
