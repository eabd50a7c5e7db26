//! UI module providing the egui-based interface.
//!
//! Thin glue by design: the control panel collects inputs and fires
//! simulation requests; the readout and defense panels display state owned
//! by the orchestrator and the defense controller.

pub mod controls;
pub mod defense_panel;
pub mod icons;
mod readouts;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use controls::ControlPanelState;
pub use defense_panel::{DefensePanelState, DefenseSession};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlPanelState>()
            .init_resource::<DefensePanelState>()
            .init_resource::<icons::FontsInitialized>()
            .add_systems(Startup, defense_panel::setup_defense)
            // Controller plumbing runs on the plain Update schedule
            .add_systems(
                Update,
                (
                    defense_panel::tick_defense,
                    defense_panel::handle_scenario_for_defense,
                    defense_panel::drain_defense_signals,
                )
                    .chain(),
            )
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    controls::control_panel_system,
                    readouts::readouts_system,
                    defense_panel::defense_panel_system,
                )
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}
