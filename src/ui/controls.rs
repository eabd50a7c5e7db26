//! Mission control panel: threat parameters, deflection delta-v, and the
//! defense mode buttons.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::estimator::PayloadOverrides;
use crate::remote::SimulateRequested;
use crate::ui::defense_panel::{DefensePanelState, DefenseSession};
use crate::ui::icons;

/// Form state for the mission control panel.
#[derive(Resource, Clone, Debug)]
pub struct ControlPanelState {
    pub diameter_m: f64,
    pub velocity_kms: f64,
    pub delta_v_ms: f64,
    pub impact_lat: f64,
    pub impact_lon: f64,
    pub asteroid_id: String,
}

impl Default for ControlPanelState {
    fn default() -> Self {
        // Mirrors the offline baseline so the first simulate is coherent
        Self {
            diameter_m: 210.0,
            velocity_kms: 21.5,
            delta_v_ms: 0.0,
            impact_lat: 34.05,
            impact_lon: -118.25,
            asteroid_id: "Impactor-2025".to_string(),
        }
    }
}

impl ControlPanelState {
    /// Full payload for a simulation request.
    pub fn payload(&self) -> PayloadOverrides {
        PayloadOverrides {
            diameter_m: Some(self.diameter_m),
            velocity_kms: Some(self.velocity_kms),
            deflection_delta_v: Some(self.delta_v_ms),
            impact_lat: Some(self.impact_lat),
            impact_lon: Some(self.impact_lon),
            asteroid_id: Some(self.asteroid_id.clone()),
        }
    }
}

/// Render the control panel and dispatch simulation requests.
pub fn control_panel_system(
    mut contexts: EguiContexts,
    mut state: ResMut<ControlPanelState>,
    panel: Res<DefensePanelState>,
    mut session: ResMut<DefenseSession>,
    time: Res<Time>,
    mut requests: MessageWriter<SimulateRequested>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::left("mission_controls")
        .default_width(250.0)
        .show(ctx, |ui| {
            ui.heading(format!("{} Impact Parameters", icons::TARGET));
            ui.add_space(4.0);

            // Threat parameters freeze while a defense session is armed;
            // the delta-v stays live, that's the game.
            ui.add_enabled_ui(!panel.inputs_locked, |ui| {
                egui::Grid::new("threat_inputs")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Asteroid");
                        ui.text_edit_singleline(&mut state.asteroid_id);
                        ui.end_row();

                        ui.label("Diameter");
                        ui.add(
                            egui::DragValue::new(&mut state.diameter_m)
                                .speed(5.0)
                                .range(1.0..=10_000.0)
                                .suffix(" m"),
                        );
                        ui.end_row();

                        ui.label("Velocity");
                        ui.add(
                            egui::DragValue::new(&mut state.velocity_kms)
                                .speed(0.2)
                                .range(0.1..=80.0)
                                .suffix(" km/s"),
                        );
                        ui.end_row();

                        ui.label("Impact lat");
                        ui.add(
                            egui::DragValue::new(&mut state.impact_lat)
                                .speed(0.5)
                                .range(-90.0..=90.0)
                                .suffix("°"),
                        );
                        ui.end_row();

                        ui.label("Impact lon");
                        ui.add(
                            egui::DragValue::new(&mut state.impact_lon)
                                .speed(0.5)
                                .range(-180.0..=180.0)
                                .suffix("°"),
                        );
                        ui.end_row();
                    });
            });

            ui.separator();
            ui.label("Deflection Δv");
            ui.add(
                egui::DragValue::new(&mut state.delta_v_ms)
                    .speed(25.0)
                    .range(0.0..=25_000.0)
                    .suffix(" m/s"),
            );
            ui.add_space(6.0);

            if ui
                .button(format!("{} Simulate", icons::SIMULATE))
                .clicked()
            {
                requests.write(SimulateRequested {
                    payload: state.payload(),
                });
            }

            ui.separator();
            ui.heading(format!("{} Planetary Defense", icons::SHIELD));

            if session.controller.is_armed() {
                if ui.button(format!("{} Abort drill", icons::CLOSE)).clicked() {
                    session.controller.cancel();
                }
            } else if ui
                .button(format!("{} Start defense drill", icons::SHIELD))
                .clicked()
            {
                // Arming hands back the fixed threat; submit it undeflected
                // so the session can capture its baseline crater
                let threat = session.controller.start(time.elapsed_secs_f64());
                state.diameter_m = threat.diameter_m;
                state.velocity_kms = threat.velocity_kms;
                state.impact_lat = threat.impact_lat;
                state.impact_lon = threat.impact_lon;
                state.delta_v_ms = 0.0;
                requests.write(SimulateRequested {
                    payload: state.payload(),
                });
            }
        });
}
