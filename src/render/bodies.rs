//! Reference bodies: the Sun at the origin, Earth on its orbit, and a thin
//! ring marking that orbit at 1 AU.
//!
//! These are fixed scenery. Only the asteroid tracks change per scenario.

use bevy::prelude::*;

/// Sun render radius (scene units; 1 unit = 1 AU). Not to scale.
const SUN_RADIUS: f32 = 0.09;

/// Earth render radius. Not to scale either; both bodies are markers.
const EARTH_RADIUS: f32 = 0.035;

/// Earth's orbital radius: the scene unit itself.
const EARTH_ORBIT_RADIUS: f32 = 1.0;

/// Tube radius of the orbit ring.
const RING_THICKNESS: f32 = 0.004;

/// Earth self-rotation rate (radians per second of wall time).
const EARTH_SPIN_RATE: f32 = 0.35;

/// Marker component for the self-rotating reference body.
#[derive(Component)]
pub struct ReferenceBody;

/// Spawn the Sun, Earth, and Earth's orbit ring.
pub fn spawn_reference_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Sun: emissive so it reads as the light source
    let sun_color = Color::srgb(1.0, 0.93, 0.45);
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: sun_color,
            emissive: sun_color.to_linear() * 3.0,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Earth: sits on its ring, spins in place
    commands.spawn((
        ReferenceBody,
        Mesh3d(meshes.add(Sphere::new(EARTH_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.5, 0.8),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_xyz(EARTH_ORBIT_RADIUS, 0.0, 0.0),
    ));

    // Orbit ring: a thin torus in the ecliptic (XZ) plane
    commands.spawn((
        Mesh3d(meshes.add(Torus {
            minor_radius: RING_THICKNESS,
            major_radius: EARTH_ORBIT_RADIUS,
        })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.3, 0.45, 0.65, 0.5),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
}

/// Advance the reference body's self-rotation.
pub fn spin_reference_body(
    time: Res<Time>,
    mut query: Query<&mut Transform, With<ReferenceBody>>,
) {
    for mut transform in query.iter_mut() {
        transform.rotate_y(EARTH_SPIN_RATE * time.delta_secs());
    }
}
