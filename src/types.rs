//! Shared physical constants and numeric helpers for the impact simulator.

/// Astronomical unit in kilometres.
pub const AU_IN_KM: f64 = 1.495978707e8;

/// Bulk density assumed when deriving asteroid mass from diameter (kg/m³).
pub const ASTEROID_DENSITY_KG_M3: f64 = 3000.0;

/// Energy of one megaton of TNT in joules.
pub const MEGATON_TNT_JOULES: f64 = 4.184e15;

/// Floor for the effective closing velocity (m/s).
///
/// Keeps kinetic energy physical even when the requested delta-v
/// exceeds the approach velocity.
pub const MIN_EFFECTIVE_VELOCITY_MS: f64 = 1.0;

/// Scene scale: 1 scene unit = 1 AU. Path data arrives in kilometres.
pub const KM_TO_SCENE: f64 = 1.0 / AU_IN_KM;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Coerce a non-finite value to zero.
///
/// Malformed numeric input (NaN, infinities from upstream JSON) must never
/// reach the scene graph or the energy math; the system degrades to a
/// renderable zero instead of rejecting the whole scenario.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
