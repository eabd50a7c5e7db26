//! Numeric readouts for the scenario currently on display.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::remote::CurrentScenario;
use crate::ui::icons;

/// Render the impact assessment panel.
pub fn readouts_system(mut contexts: EguiContexts, current: Res<CurrentScenario>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("impact_readouts")
        .default_width(230.0)
        .show(ctx, |ui| {
            ui.heading(format!("{} Impact Assessment", icons::ORBIT));
            ui.add_space(4.0);

            let Some(scenario) = &current.scenario else {
                ui.label("Run a simulation to see impact estimates.");
                return;
            };

            if current.offline {
                ui.label(
                    egui::RichText::new(format!("{} Onboard estimate (backend offline)", icons::OFFLINE))
                        .color(egui::Color32::from_rgb(240, 180, 80)),
                );
                ui.add_space(4.0);
            }

            egui::Grid::new("readout_grid")
                .num_columns(2)
                .spacing([12.0, 5.0])
                .show(ui, |ui| {
                    ui.label("Mass");
                    ui.label(format!("{:.3e} kg", scenario.energy.mass_kg));
                    ui.end_row();

                    ui.label("Impact velocity");
                    ui.label(format!(
                        "{:.2} km/s",
                        scenario.energy.effective_velocity_ms / 1000.0
                    ));
                    ui.end_row();

                    ui.label("Energy");
                    ui.label(format!("{:.1} Mt TNT", scenario.energy.energy_mt));
                    ui.end_row();

                    ui.label("Crater");
                    ui.label(format!(
                        "{:.2} km",
                        scenario.impact_effects.crater_diameter_km
                    ));
                    ui.end_row();

                    ui.label("Seismic");
                    ui.label(format!("M {:.1}", scenario.impact_effects.seismic_magnitude));
                    ui.end_row();
                });

            ui.separator();
            ui.label("Closest approach");
            egui::Grid::new("moid_grid")
                .num_columns(2)
                .spacing([12.0, 5.0])
                .show(ui, |ui| {
                    let solution = &scenario.orbital_solution;
                    ui.label("Baseline");
                    ui.label(format!("{:.3e} km", solution.baseline_moid_km));
                    ui.end_row();

                    ui.label("Deflected");
                    ui.label(format!("{:.3e} km", solution.deflected_moid_km));
                    ui.end_row();

                    ui.label("Change");
                    ui.label(format!("{:+.3e} km", solution.moid_change_km));
                    ui.end_row();
                });

            ui.add_space(4.0);
            ui.label(format!(
                "Impact site: {:.2}°, {:.2}°",
                scenario.inputs.impact_lat, scenario.inputs.impact_lon
            ));
        });
}
