//! Common test fixtures for integration tests.

use impactsim::scenario::{OrbitalSolution, PathPoint, Scenario, ScenarioInputs};
use impactsim::types::AU_IN_KM;

/// Sample a circular ring track at the given heliocentric radius.
pub fn ring_track(samples: usize, radius_au: f64) -> Vec<PathPoint> {
    let radius_km = radius_au * AU_IN_KM;
    (0..samples)
        .map(|i| {
            let angle = i as f64 / samples as f64 * std::f64::consts::TAU;
            PathPoint::new(radius_km * angle.cos(), radius_km * angle.sin(), 0.0)
        })
        .collect()
}

/// Build a template scenario with identical baseline and deflected tracks.
///
/// Energy metrics are left zeroed so the estimator derives mass from the
/// diameter, like a fresh offline template.
pub fn template_scenario(diameter_m: f64, velocity_kms: f64) -> Scenario {
    let track = ring_track(120, 1.05);
    Scenario {
        inputs: ScenarioInputs {
            diameter_m,
            velocity_kms,
            deflection_delta_v: 0.0,
            impact_lat: 34.05,
            impact_lon: -118.25,
            asteroid_id: "test-neo".to_string(),
        },
        orbital_solution: OrbitalSolution {
            baseline_path: track.clone(),
            deflected_path: track,
            ..OrbitalSolution::default()
        },
        ..Scenario::default()
    }
}
