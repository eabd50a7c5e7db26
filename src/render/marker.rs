//! Marker traversal along the deflected track.
//!
//! The marker's motion is an explicit interpolation over fractional
//! progress, so any scheduler (the frame loop here, a bare counter in
//! tests) drives it deterministically.

use bevy::prelude::*;

/// Slowest allowed traversal speed (fractional progress per frame).
pub const MIN_TRAVERSAL_SPEED: f32 = 0.00045;

/// Fastest allowed traversal speed.
pub const MAX_TRAVERSAL_SPEED: f32 = 0.01;

/// Component carrying the converted track and the marker's progress along it.
#[derive(Component, Clone, Debug)]
pub struct MarkerTraversal {
    /// Track in scene coordinates.
    pub points: Vec<Vec3>,
    /// Fractional progress along the track, in [0, 1).
    pub progress: f32,
    /// Progress advanced per frame.
    pub speed: f32,
}

/// Traversal speed for a track of the given length.
///
/// Inversely proportional to point count and bounded, so short and long
/// tracks animate in comparable wall-clock time.
pub fn traversal_speed(point_count: usize) -> f32 {
    (0.9 / point_count.max(1) as f32).clamp(MIN_TRAVERSAL_SPEED, MAX_TRAVERSAL_SPEED)
}

/// Position on the track at the given fractional progress.
///
/// Maps progress to a segment index and blends linearly between the
/// segment's endpoints. Single-point tracks snap to that point; empty
/// tracks have no position.
pub fn position_at(points: &[Vec3], progress: f32) -> Option<Vec3> {
    match points {
        [] => None,
        [only] => Some(*only),
        _ => {
            let progress = progress.rem_euclid(1.0);
            let scaled = progress * (points.len() - 1) as f32;
            let segment = (scaled.floor() as usize).min(points.len() - 2);
            let blend = scaled - segment as f32;
            Some(points[segment].lerp(points[segment + 1], blend))
        }
    }
}

/// Advance every marker's progress and update its transform.
pub fn advance_markers(mut query: Query<(&mut MarkerTraversal, &mut Transform)>) {
    for (mut traversal, mut transform) in query.iter_mut() {
        traversal.progress = (traversal.progress + traversal.speed).rem_euclid(1.0);
        if let Some(position) = position_at(&traversal.points, traversal.progress) {
            transform.translation = position;
        }
    }
}
