//! Rendering systems for the trajectory scene.
//!
//! Owns the reference bodies, the orbit polylines, and the marker that
//! travels along the deflected track. Camera control lives in [`crate::camera`].

pub mod bodies;
pub mod marker;
pub mod paths;

use bevy::prelude::*;
use bevy::light::GlobalAmbientLight;

pub use self::marker::MarkerTraversal;
pub use self::paths::{ImpactorMarker, OrbitLine, scene_position};

/// Plugin aggregating the scene rendering systems.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_lights, bodies::spawn_reference_bodies))
            .add_systems(
                Update,
                (
                    paths::rebuild_orbit_lines,
                    marker::advance_markers,
                    bodies::spin_reference_body,
                ),
            );
    }
}

/// Sun-style lighting: a point light at the origin plus a dim ambient fill
/// so the night side of the reference body stays legible.
fn setup_lights(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 90.0,
        ..default()
    });
    commands.spawn((
        PointLight {
            color: Color::srgb(1.0, 0.96, 0.88),
            intensity: 2.5e6,
            range: 60.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
}
