//! Orbit track rebuilds.
//!
//! Each published scenario replaces the drawn tracks wholesale: the previous
//! line and marker entities are despawned and their mesh/material assets
//! removed before the replacements spawn. A scene-graph mutation rather
//! than a property patch, so repeated scenarios never accumulate geometry.

use bevy::prelude::*;
use bevy::mesh::PrimitiveTopology;

use crate::remote::ScenarioReady;
use crate::render::marker::{MarkerTraversal, traversal_speed};
use crate::scenario::PathPoint;
use crate::types::KM_TO_SCENE;

/// Render radius of the travelling impactor marker (scene units).
const MARKER_RADIUS: f32 = 0.022;

/// Marker component for a drawn orbit polyline.
#[derive(Component)]
pub struct OrbitLine;

/// Marker component for the impactor that travels the deflected track.
#[derive(Component)]
pub struct ImpactorMarker;

/// Convert a kilometre path point into scene coordinates.
///
/// The track's orbital plane (x, y) maps to the scene's ground plane
/// (X, Z); the out-of-plane component becomes scene Y. Non-finite
/// coordinates coerce to zero before touching the scene graph.
pub fn scene_position(point: &PathPoint) -> Vec3 {
    let p = point.sanitized();
    Vec3::new(
        (p.x * KM_TO_SCENE) as f32,
        (p.z * KM_TO_SCENE) as f32,
        (p.y * KM_TO_SCENE) as f32,
    )
}

/// Build a line-strip mesh from scene-space points.
fn line_strip_mesh(points: &[Vec3]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
    Mesh::new(PrimitiveTopology::LineStrip, default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

/// Rebuild the orbit lines and marker from the latest published scenario.
///
/// No-op when either track is empty. When several scenarios land in one
/// frame only the newest is drawn; the rest were already stale.
pub fn rebuild_orbit_lines(
    mut commands: Commands,
    mut events: MessageReader<ScenarioReady>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    previous: Query<
        (Entity, &Mesh3d, &MeshMaterial3d<StandardMaterial>),
        Or<(With<OrbitLine>, With<ImpactorMarker>)>,
    >,
) {
    let Some(event) = events.read().last() else {
        return;
    };

    let solution = &event.scenario.orbital_solution;
    if solution.baseline_path.is_empty() || solution.deflected_path.is_empty() {
        return;
    }

    // Dispose the previous generation before building the replacement
    for (entity, mesh, material) in previous.iter() {
        meshes.remove(mesh.0.id());
        materials.remove(material.0.id());
        commands.entity(entity).despawn();
    }

    let baseline: Vec<Vec3> = solution.baseline_path.iter().map(scene_position).collect();
    let deflected: Vec<Vec3> = solution.deflected_path.iter().map(scene_position).collect();

    spawn_orbit_line(
        &mut commands,
        &mut meshes,
        &mut materials,
        &baseline,
        Color::srgba(0.45, 0.55, 0.75, 0.8),
    );
    spawn_orbit_line(
        &mut commands,
        &mut meshes,
        &mut materials,
        &deflected,
        Color::srgba(1.0, 0.62, 0.2, 0.9),
    );

    // Marker starts at the head of the deflected track and carries the
    // whole converted path plus its traversal speed
    let start = deflected[0];
    let speed = traversal_speed(deflected.len());
    let marker_color = Color::srgb(1.0, 0.35, 0.25);
    commands.spawn((
        ImpactorMarker,
        MarkerTraversal {
            points: deflected,
            progress: 0.0,
            speed,
        },
        Mesh3d(meshes.add(Sphere::new(MARKER_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: marker_color,
            emissive: marker_color.to_linear() * 1.5,
            ..default()
        })),
        Transform::from_translation(start),
    ));
}

fn spawn_orbit_line(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    points: &[Vec3],
    color: Color,
) {
    commands.spawn((
        OrbitLine,
        Mesh3d(meshes.add(line_strip_mesh(points))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
    ));
}
