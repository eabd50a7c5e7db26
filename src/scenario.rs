//! Scenario data model shared between the remote backend and the local core.
//!
//! A [`Scenario`] is the complete record of one impact simulation: the user
//! inputs, the derived energy metrics and impact effects, and the sampled
//! orbital solution. It round-trips through the backend's JSON shape and is
//! treated as immutable once handed to the renderer: a new simulation cycle
//! always produces a new value, never an in-place edit of the displayed one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{AU_IN_KM, DEG_TO_RAD, finite_or_zero};

/// A single sampled point of an orbital track, in kilometres from the Sun.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Copy with non-finite coordinates coerced to zero.
    pub fn sanitized(&self) -> Self {
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
            z: finite_or_zero(self.z),
        }
    }

    /// Distance from the coordinate origin (the Sun) in kilometres.
    pub fn radius_km(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// User-controllable simulation inputs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    #[serde(default)]
    pub diameter_m: f64,
    #[serde(default)]
    pub velocity_kms: f64,
    #[serde(default)]
    pub deflection_delta_v: f64,
    #[serde(default)]
    pub impact_lat: f64,
    #[serde(default)]
    pub impact_lon: f64,
    #[serde(default)]
    pub asteroid_id: String,
}

/// Derived kinetic-energy metrics. Never set directly by callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyMetrics {
    #[serde(default)]
    pub mass_kg: f64,
    #[serde(default)]
    pub effective_velocity_ms: f64,
    #[serde(default)]
    pub energy_joules: f64,
    #[serde(default)]
    pub energy_mt: f64,
}

/// Derived surface-effect estimates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactEffects {
    #[serde(default)]
    pub crater_diameter_km: f64,
    #[serde(default)]
    pub seismic_magnitude: f64,
}

/// Sampled baseline and deflected orbital tracks plus MOID estimates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitalSolution {
    #[serde(default)]
    pub baseline_path: Vec<PathPoint>,
    #[serde(default)]
    pub deflected_path: Vec<PathPoint>,
    #[serde(default)]
    pub baseline_moid_km: f64,
    #[serde(default)]
    pub deflected_moid_km: f64,
    #[serde(default)]
    pub moid_change_km: f64,
}

/// The canonical value object threaded through the whole system.
///
/// `environment` and `neo_reference` are produced upstream and passed
/// through untouched; the core never interprets them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub inputs: ScenarioInputs,
    #[serde(default)]
    pub energy: EnergyMetrics,
    #[serde(default)]
    pub impact_effects: ImpactEffects,
    #[serde(default)]
    pub orbital_solution: OrbitalSolution,
    #[serde(default)]
    pub environment: Value,
    #[serde(default)]
    pub neo_reference: Value,
}

/// Approximate the minimum orbit intersection distance for a sampled track.
///
/// Minimises the absolute deviation of each point's heliocentric distance
/// from Earth's orbital radius (1 AU). Coarse, but adequate for the
/// visual-feedback role the number plays; an empty track yields 0.
pub fn approximate_moid_km(points: &[PathPoint]) -> f64 {
    let mut min_difference = f64::INFINITY;
    for point in points {
        let difference = (point.sanitized().radius_km() - AU_IN_KM).abs();
        if difference < min_difference {
            min_difference = difference;
        }
    }
    // Empty track: no closest approach to report
    if min_difference.is_finite() {
        min_difference
    } else {
        0.0
    }
}

/// Simplified Keplerian elements for sampling an orbital track.
#[derive(Clone, Copy, Debug)]
pub struct OrbitElements {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub longitude_ascending_node_deg: f64,
    pub argument_periapsis_deg: f64,
}

impl OrbitElements {
    /// Heliocentric position at the given true anomaly, in kilometres.
    ///
    /// Polar form from the focus rotated through the standard
    /// perifocal-to-inertial angles (Ω, i, ω).
    pub fn point_at(&self, true_anomaly_rad: f64) -> PathPoint {
        let a_km = self.semi_major_axis_au * AU_IN_KM;
        let e = self.eccentricity;
        let r = (a_km * (1.0 - e * e)) / (1.0 + e * true_anomaly_rad.cos());

        let node = self.longitude_ascending_node_deg * DEG_TO_RAD;
        let inc = self.inclination_deg * DEG_TO_RAD;
        let true_lon = self.argument_periapsis_deg * DEG_TO_RAD + true_anomaly_rad;

        let (sin_node, cos_node) = node.sin_cos();
        let (sin_inc, cos_inc) = inc.sin_cos();
        let (sin_lon, cos_lon) = true_lon.sin_cos();

        PathPoint::new(
            r * (cos_node * cos_lon - sin_node * sin_lon * cos_inc),
            r * (sin_node * cos_lon + cos_node * sin_lon * cos_inc),
            r * (sin_lon * sin_inc),
        )
    }

    /// Sample one full revolution of the orbit.
    pub fn sample_track(&self, sample_count: usize) -> Vec<PathPoint> {
        let n = sample_count.max(60);
        (0..n)
            .map(|i| {
                let nu = i as f64 / n as f64 * std::f64::consts::TAU;
                self.point_at(nu)
            })
            .collect()
    }
}

/// Number of samples per orbital track in the offline template.
pub const BASELINE_TRACK_SAMPLES: usize = 180;

/// Fixed offline baseline template.
///
/// When the remote backend has never answered, the estimator still needs a
/// template to derive from. This is a canonical high-interest NEO with a
/// deterministic sampled track; energy metrics are left zeroed so the
/// estimator derives mass from the diameter.
pub fn offline_baseline() -> Scenario {
    let elements = OrbitElements {
        semi_major_axis_au: 1.12,
        eccentricity: 0.23,
        inclination_deg: 6.5,
        longitude_ascending_node_deg: 80.2,
        argument_periapsis_deg: 130.4,
    };
    let track = elements.sample_track(BASELINE_TRACK_SAMPLES);
    let moid_km = approximate_moid_km(&track);

    Scenario {
        inputs: ScenarioInputs {
            diameter_m: 210.0,
            velocity_kms: 21.5,
            deflection_delta_v: 0.0,
            impact_lat: 34.05,
            impact_lon: -118.25,
            asteroid_id: "Impactor-2025".to_string(),
        },
        orbital_solution: OrbitalSolution {
            baseline_path: track.clone(),
            deflected_path: track,
            baseline_moid_km: moid_km,
            deflected_moid_km: moid_km,
            moid_change_km: 0.0,
        },
        ..Scenario::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        // Minimal slice of the backend's /api/simulate response
        let json = r#"{
            "inputs": {
                "diameter_m": 210.0,
                "velocity_kms": 21.5,
                "deflection_delta_v": 0.0,
                "impact_lat": 34.05,
                "impact_lon": -118.25,
                "asteroid_id": "Impactor-2025"
            },
            "energy": {
                "mass_kg": 1.45e10,
                "effective_velocity_ms": 21500.0,
                "energy_joules": 3.4e18,
                "energy_mt": 812.0
            },
            "impact_effects": {
                "crater_diameter_km": 1.02,
                "seismic_magnitude": 6.6
            },
            "orbital_solution": {
                "baseline_path": [{"x": 1.0e8, "y": 0.0, "z": 0.0}],
                "deflected_path": [{"x": 1.0e8, "y": 0.0, "z": 0.0}],
                "baseline_moid_km": 5.0e7,
                "deflected_moid_km": 5.0e7,
                "moid_change_km": 0.0
            },
            "environment": {"is_coastal_zone": true},
            "neo_reference": {"name": "Impactor-2025"}
        }"#;

        let scenario: Scenario = serde_json::from_str(json).expect("valid scenario JSON");
        assert_eq!(scenario.inputs.asteroid_id, "Impactor-2025");
        assert_eq!(scenario.orbital_solution.baseline_path.len(), 1);
        assert!(scenario.energy.mass_kg > 0.0);
        assert!(scenario.environment.get("is_coastal_zone").is_some());
    }

    #[test]
    fn test_deserialize_tolerates_missing_blocks() {
        // Inputs-only payload: every other block defaults instead of failing
        let scenario: Scenario =
            serde_json::from_str(r#"{"inputs": {"diameter_m": 150.0}}"#).expect("partial JSON");
        assert_eq!(scenario.inputs.diameter_m, 150.0);
        assert_eq!(scenario.inputs.velocity_kms, 0.0);
        assert!(scenario.orbital_solution.baseline_path.is_empty());
        assert_eq!(scenario.energy.energy_mt, 0.0);
    }

    #[test]
    fn test_moid_of_earth_radius_ring_is_zero() {
        let ring: Vec<PathPoint> = (0..90)
            .map(|i| {
                let angle = i as f64 / 90.0 * std::f64::consts::TAU;
                PathPoint::new(AU_IN_KM * angle.cos(), AU_IN_KM * angle.sin(), 0.0)
            })
            .collect();
        let moid = approximate_moid_km(&ring);
        assert!(moid < 1.0, "ring at 1 AU should have ~0 MOID, got {moid}");
    }

    #[test]
    fn test_moid_of_empty_track_is_zero() {
        assert_eq!(approximate_moid_km(&[]), 0.0);
    }

    #[test]
    fn test_moid_ignores_non_finite_points() {
        let track = vec![
            PathPoint::new(f64::NAN, 0.0, 0.0),
            PathPoint::new(1.3 * AU_IN_KM, 0.0, 0.0),
        ];
        // NaN point sanitizes to the origin (distance AU from Earth's orbit),
        // so the finite point 0.3 AU out must win
        let moid = approximate_moid_km(&track);
        assert!((moid - 0.3 * AU_IN_KM).abs() / AU_IN_KM < 1e-9);
    }

    #[test]
    fn test_offline_baseline_track_shape() {
        let baseline = offline_baseline();
        let solution = &baseline.orbital_solution;

        assert_eq!(solution.baseline_path.len(), BASELINE_TRACK_SAMPLES);
        assert_eq!(solution.baseline_path, solution.deflected_path);
        assert!(solution.baseline_moid_km >= 0.0);
        assert_eq!(solution.moid_change_km, 0.0);

        for point in &solution.baseline_path {
            assert!(point.x.is_finite() && point.y.is_finite() && point.z.is_finite());
            // a = 1.12 AU, e = 0.23: radius stays within [a(1-e), a(1+e)]
            let r_au = point.radius_km() / AU_IN_KM;
            assert!(r_au > 0.8 && r_au < 1.4, "radius {r_au} AU out of range");
        }
    }

    #[test]
    fn test_orbit_sampling_respects_inclination() {
        let flat = OrbitElements {
            semi_major_axis_au: 1.0,
            eccentricity: 0.0,
            inclination_deg: 0.0,
            longitude_ascending_node_deg: 0.0,
            argument_periapsis_deg: 0.0,
        };
        for p in flat.sample_track(60) {
            assert!(p.z.abs() < 1.0, "zero inclination should stay in plane");
        }

        let tilted = OrbitElements {
            inclination_deg: 10.0,
            ..flat
        };
        let max_z = tilted
            .sample_track(60)
            .iter()
            .map(|p| p.z.abs())
            .fold(0.0, f64::max);
        assert!(max_z > 1.0e6, "inclined orbit should leave the plane");
    }
}
