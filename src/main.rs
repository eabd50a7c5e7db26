//! ImpactSim - Interactive Planetary-Impact Simulator
//!
//! A desktop application that renders asteroid impact scenarios in 3D,
//! estimates impact effects with an offline fallback engine, and hosts a
//! timed planetary-defense drill.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use impactsim::camera::OrbitCameraPlugin;
use impactsim::config::Settings;
use impactsim::remote::OrchestratorPlugin;
use impactsim::render::ScenePlugin;
use impactsim::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin::default())
        // Insert settings before the plugins that read them
        .insert_resource(Settings::from_env())
        .add_plugins((OrbitCameraPlugin, ScenePlugin, OrchestratorPlugin, UiPlugin))
        .run();
}
