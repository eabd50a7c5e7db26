//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Re-export commonly used icons with semantic names for our app.

/// Simulate/launch icon
pub const SIMULATE: &str = egui_phosphor::regular::ROCKET_LAUNCH;
/// Impact target icon
pub const TARGET: &str = egui_phosphor::regular::CROSSHAIR;
/// Defense mode icon
pub const SHIELD: &str = egui_phosphor::regular::SHIELD;
/// Countdown clock icon
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
/// Success/check icon
pub const SUCCESS: &str = egui_phosphor::regular::CHECK_CIRCLE;
/// Warning/alert icon
pub const WARNING: &str = egui_phosphor::regular::WARNING;
/// Offline/fallback estimate icon
pub const OFFLINE: &str = egui_phosphor::regular::CLOUD_SLASH;
/// Abort/close icon
pub const CLOSE: &str = egui_phosphor::regular::X;
/// Orbit/path icon
pub const ORBIT: &str = egui_phosphor::regular::PATH;
