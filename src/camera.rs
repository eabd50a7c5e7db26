//! Orbital camera for the trajectory scene.
//!
//! The viewpoint lives on a spherical rig (radius, polar, azimuth) around a
//! fixed look-at target at the origin. Gestures only ever mutate the rig;
//! the transform is recomputed, and the rig clamped, once per frame after
//! all gesture systems have run, so no sequence of inputs can push the view
//! past the poles or through the scene.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::EguiContexts;

/// Closest allowed viewpoint (scene units; 1 unit = 1 AU).
pub const MIN_RADIUS: f32 = 1.6;

/// Farthest allowed viewpoint.
pub const MAX_RADIUS: f32 = 14.0;

/// Initial rig radius, framing the inner system.
pub const DEFAULT_RADIUS: f32 = 4.2;

/// Margin keeping the polar angle strictly inside (0, π).
/// Stops the view direction from ever aligning with the up axis.
pub const POLAR_MARGIN: f32 = 0.05;

/// Radians of rotation per pixel of pointer drag.
pub const DRAG_SENSITIVITY: f32 = 0.005;

/// Zoom speed multiplier per scroll notch.
pub const ZOOM_SPEED: f32 = 0.1;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Spherical-coordinate camera state around the origin.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    /// Distance from the look-at target.
    pub radius: f32,
    /// Polar angle from the +Y axis, clamped inside (0, π).
    pub polar: f32,
    /// Azimuth angle around the +Y axis.
    pub azimuth: f32,
    /// Set by gesture systems when the rig changed this frame.
    pub dirty: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            polar: 1.1,
            azimuth: 0.6,
            dirty: true,
        }
    }
}

impl CameraRig {
    /// Clamp the rig into its legal band. Applied before every draw, no
    /// matter how far gestures pushed the raw values.
    pub fn clamp(&mut self) {
        self.radius = self.radius.clamp(MIN_RADIUS, MAX_RADIUS);
        self.polar = self
            .polar
            .clamp(POLAR_MARGIN, std::f32::consts::PI - POLAR_MARGIN);
    }

    /// Cartesian camera position for the current spherical state (Y up).
    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vec3::new(
            self.radius * sin_polar * cos_azimuth,
            self.radius * cos_polar,
            self.radius * sin_polar * sin_azimuth,
        )
    }

    /// Apply a pointer drag delta in pixels.
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.azimuth += delta.x * DRAG_SENSITIVITY;
        self.polar -= delta.y * DRAG_SENSITIVITY;
        self.dirty = true;
    }

    /// Apply a scroll-wheel zoom: exponential scaling per notch.
    pub fn apply_zoom(&mut self, scroll: f32) {
        let zoom_factor = 1.0 - scroll * ZOOM_SPEED;
        self.radius *= zoom_factor.max(0.01);
        self.dirty = true;
    }
}

/// Resource tracking an in-progress orbit drag.
///
/// Armed on pointer-down over the viewport (not the UI), disarmed on
/// release. Only an armed drag rotates the rig.
#[derive(Resource, Default)]
pub struct OrbitDragState {
    pub armed: bool,
}

/// Plugin providing the orbital camera.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .init_resource::<OrbitDragState>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (camera_drag, camera_zoom, apply_camera_rig).chain(),
            );
    }
}

/// Spawn the main camera at the rig's starting position.
fn setup_camera(mut commands: Commands, rig: Res<CameraRig>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(rig.position()).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Handle primary-button drags: arm on press, rotate while armed.
fn camera_drag(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut contexts: EguiContexts,
    mut drag_state: ResMut<OrbitDragState>,
    mut rig: ResMut<CameraRig>,
) {
    // A drag that starts on the UI belongs to the UI
    let pointer_over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    if mouse_buttons.just_pressed(MouseButton::Left) && !pointer_over_ui {
        drag_state.armed = true;
    }
    if !mouse_buttons.pressed(MouseButton::Left) {
        drag_state.armed = false;
    }

    if !drag_state.armed || mouse_motion.delta == Vec2::ZERO {
        return;
    }

    rig.apply_drag(mouse_motion.delta);
}

/// Handle scroll-wheel zoom on the rig radius.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut contexts: EguiContexts,
    mut rig: ResMut<CameraRig>,
) {
    if mouse_scroll.delta.y == 0.0 {
        return;
    }

    let pointer_over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);
    if pointer_over_ui {
        return;
    }

    rig.apply_zoom(mouse_scroll.delta.y);
}

/// Clamp the rig and write the camera transform.
///
/// Runs unconditionally every frame: the clamp must hold even when the rig
/// was mutated by something other than the gesture systems.
fn apply_camera_rig(
    mut rig: ResMut<CameraRig>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    rig.clamp();

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    *transform = Transform::from_translation(rig.position()).looking_at(Vec3::ZERO, Vec3::Y);
    rig.dirty = false;
}
