//! Offline deflection estimator.
//!
//! When the scientific backend is unreachable, this module re-derives a
//! complete alternate [`Scenario`] (energy, crater size, seismic magnitude,
//! deflected track, miss distance) from the last known good scenario
//! plus the user's new inputs. Pure functions over their arguments: no
//! network, no side effects, and no panics on degenerate input.
//!
//! The numbers are intentionally coarse. They keep the visualization and the
//! defense mini-game responsive during an outage; they are not a substitute
//! for the backend's physics.

use crate::scenario::{
    EnergyMetrics, ImpactEffects, OrbitalSolution, PathPoint, Scenario, ScenarioInputs,
    approximate_moid_km,
};
use crate::types::{
    ASTEROID_DENSITY_KG_M3, MEGATON_TNT_JOULES, MIN_EFFECTIVE_VELOCITY_MS, finite_or_zero,
};

/// Clamp band for the trajectory adjustment factor.
const MAX_ADJUSTMENT_FACTOR: f64 = 0.8;

/// Radial stretch applied per unit of adjustment factor.
const RADIAL_GAIN: f64 = 0.32;

/// In-plane rotation (radians) applied per unit of adjustment factor.
const ROTATION_GAIN: f64 = 0.45;

/// Out-of-plane sinusoid amplitude (km) per unit of adjustment factor.
const PLANE_OFFSET_GAIN_KM: f64 = 2.4e6;

/// Partial input overrides merged over a template's inputs.
///
/// This is exactly the shape a form submission produces: any field the user
/// touched is `Some`, everything else inherits from the template.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PayloadOverrides {
    pub diameter_m: Option<f64>,
    pub velocity_kms: Option<f64>,
    pub deflection_delta_v: Option<f64>,
    pub impact_lat: Option<f64>,
    pub impact_lon: Option<f64>,
    pub asteroid_id: Option<String>,
}

impl PayloadOverrides {
    /// Merge these overrides onto a set of inputs, coercing bad numerics.
    pub fn apply(&self, inputs: &mut ScenarioInputs) {
        if let Some(v) = self.diameter_m {
            inputs.diameter_m = finite_or_zero(v);
        }
        if let Some(v) = self.velocity_kms {
            inputs.velocity_kms = finite_or_zero(v);
        }
        if let Some(v) = self.deflection_delta_v {
            inputs.deflection_delta_v = finite_or_zero(v);
        }
        if let Some(v) = self.impact_lat {
            inputs.impact_lat = finite_or_zero(v);
        }
        if let Some(v) = self.impact_lon {
            inputs.impact_lon = finite_or_zero(v);
        }
        if let Some(id) = &self.asteroid_id {
            inputs.asteroid_id = id.clone();
        }
    }
}

/// Derive mass from a spherical body at the assumed bulk density.
pub fn mass_from_diameter(diameter_m: f64) -> f64 {
    let radius_m = finite_or_zero(diameter_m).max(0.0) / 2.0;
    let volume_m3 = (4.0 / 3.0) * std::f64::consts::PI * radius_m.powi(3);
    volume_m3 * ASTEROID_DENSITY_KG_M3
}

/// Closing velocity after the deflection burn, floored at 1 m/s.
pub fn effective_velocity_ms(velocity_kms: f64, delta_v_ms: f64) -> f64 {
    (finite_or_zero(velocity_kms) * 1000.0 - finite_or_zero(delta_v_ms))
        .max(MIN_EFFECTIVE_VELOCITY_MS)
}

/// Transient crater diameter in kilometres from impact energy.
///
/// Simplified cube-root scaling tuned for demonstrative visuals.
pub fn crater_diameter_km(energy_mt: f64) -> f64 {
    let energy_mt = finite_or_zero(energy_mt).max(0.0);
    (0.11 * energy_mt.cbrt()).max(0.0)
}

/// Approximate local moment magnitude from impact energy in joules.
pub fn seismic_magnitude(energy_joules: f64) -> f64 {
    let energy_joules = finite_or_zero(energy_joules).max(1.0);
    (0.67 * energy_joules.log10() - 5.8).max(0.0)
}

/// Velocity-ratio adjustment factor driving the track deformation.
///
/// Zero velocity yields zero (no deformation rather than a division blowup);
/// the result saturates at ±[`MAX_ADJUSTMENT_FACTOR`].
pub fn adjustment_factor(delta_v_ms: f64, velocity_kms: f64) -> f64 {
    let velocity_ms = finite_or_zero(velocity_kms) * 1000.0;
    if velocity_ms == 0.0 {
        return 0.0;
    }
    (finite_or_zero(delta_v_ms) / velocity_ms).clamp(-MAX_ADJUSTMENT_FACTOR, MAX_ADJUSTMENT_FACTOR)
}

/// Deform an orbital track as a smooth function of the adjustment factor.
///
/// Each point is scaled radially, rotated in its orbital plane, and offset
/// out of plane by a sinusoid whose phase sweeps once over the track. The
/// deformation is continuous in `factor` and vanishes identically at zero,
/// so an undeflected estimate reproduces the template track bit-for-bit.
pub fn adjust_track(points: &[PathPoint], factor: f64) -> Vec<PathPoint> {
    if factor == 0.0 {
        return points.iter().map(PathPoint::sanitized).collect();
    }

    let count = points.len().max(1) as f64;
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let p = point.sanitized();
            let planar_radius = (p.x * p.x + p.y * p.y).sqrt();
            let planar_angle = p.y.atan2(p.x);

            let scaled_radius = planar_radius * (1.0 + RADIAL_GAIN * factor);
            let rotated_angle = planar_angle + ROTATION_GAIN * factor;

            let phase = index as f64 / count * std::f64::consts::TAU;
            let plane_offset = phase.sin() * PLANE_OFFSET_GAIN_KM * factor;

            PathPoint::new(
                scaled_radius * rotated_angle.cos(),
                scaled_radius * rotated_angle.sin(),
                p.z + plane_offset,
            )
        })
        .collect()
}

/// Produce a complete alternate scenario from a template and input overrides.
///
/// The template's `environment` and `neo_reference` blocks pass through
/// deep-cloned; `inputs`, `energy`, `impact_effects`, and `orbital_solution`
/// are replaced with freshly derived values. The template itself is never
/// mutated.
pub fn estimate(template: &Scenario, payload: &PayloadOverrides) -> Scenario {
    let mut inputs = template.inputs.clone();
    payload.apply(&mut inputs);

    // Prefer an authoritative template mass over re-deriving from diameter.
    // The diameter is informational once a mass is known.
    let template_mass = template.energy.mass_kg;
    let mass_kg = if template_mass.is_finite() && template_mass > 0.0 {
        template_mass
    } else {
        mass_from_diameter(inputs.diameter_m)
    };

    let effective_velocity_ms = effective_velocity_ms(inputs.velocity_kms, inputs.deflection_delta_v);
    let energy_joules = 0.5 * mass_kg * effective_velocity_ms * effective_velocity_ms;
    let energy_mt = energy_joules / MEGATON_TNT_JOULES;

    let impact_effects = ImpactEffects {
        crater_diameter_km: crater_diameter_km(energy_mt),
        seismic_magnitude: seismic_magnitude(energy_joules),
    };

    let factor = adjustment_factor(inputs.deflection_delta_v, inputs.velocity_kms);
    let solution = &template.orbital_solution;
    let source_track = if solution.deflected_path.is_empty() {
        &solution.baseline_path
    } else {
        &solution.deflected_path
    };

    let baseline_path: Vec<PathPoint> =
        solution.baseline_path.iter().map(PathPoint::sanitized).collect();
    let deflected_path = adjust_track(source_track, factor);

    let baseline_moid_km = approximate_moid_km(&baseline_path);
    let deflected_moid_km = approximate_moid_km(&deflected_path).max(0.0);

    Scenario {
        inputs,
        energy: EnergyMetrics {
            mass_kg,
            effective_velocity_ms,
            energy_joules,
            energy_mt,
        },
        impact_effects,
        orbital_solution: OrbitalSolution {
            baseline_path,
            deflected_path,
            baseline_moid_km,
            deflected_moid_km,
            moid_change_km: baseline_moid_km - deflected_moid_km,
        },
        environment: template.environment.clone(),
        neo_reference: template.neo_reference.clone(),
    }
}
