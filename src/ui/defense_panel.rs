//! Defense mode glue: Bevy systems driving the controller and the egui
//! panel displaying countdown and resolution messages.
//!
//! The controller itself is pure (see [`crate::defense`]); this module
//! feeds it the frame clock and published scenarios, and drains its
//! observer signals into display state.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::Settings;
use crate::defense::{DefenseController, DefenseObserver, DefenseResolution};
use crate::remote::{CurrentScenario, Orchestrator, ScenarioReady, publish_baseline_view};
use crate::ui::icons;

/// One callback from the controller, buffered for the Bevy side to drain.
#[derive(Clone, Debug, PartialEq)]
pub enum DefenseSignal {
    Locked,
    Unlocked,
    Countdown(f64),
    Hint(String),
    Resolved(DefenseResolution),
    Expired,
}

/// Observer that buffers signals for consumption on the next drain pass.
#[derive(Default)]
pub struct SignalBuffer {
    pub signals: Vec<DefenseSignal>,
}

impl DefenseObserver for SignalBuffer {
    fn lock_inputs(&mut self) {
        self.signals.push(DefenseSignal::Locked);
    }
    fn unlock_inputs(&mut self) {
        self.signals.push(DefenseSignal::Unlocked);
    }
    fn countdown(&mut self, remaining_secs: f64) {
        self.signals.push(DefenseSignal::Countdown(remaining_secs));
    }
    fn hint(&mut self, message: &str) {
        self.signals.push(DefenseSignal::Hint(message.to_string()));
    }
    fn resolve(&mut self, resolution: &DefenseResolution) {
        self.signals.push(DefenseSignal::Resolved(*resolution));
    }
    fn expired(&mut self) {
        self.signals.push(DefenseSignal::Expired);
    }
}

/// The one defense controller instance for this session.
#[derive(Resource)]
pub struct DefenseSession {
    pub controller: DefenseController<SignalBuffer>,
}

/// Severity of the message block under the countdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MessageKind {
    Info,
    Success,
    Failure,
}

/// Display state for the defense panel and the input lock.
#[derive(Resource, Default)]
pub struct DefensePanelState {
    /// Remaining countdown seconds while a session is armed.
    pub countdown_secs: Option<f64>,
    /// Latest hint or resolution message.
    pub message: Option<(MessageKind, String)>,
    /// Whether the threat parameter inputs are frozen.
    pub inputs_locked: bool,
}

/// Create the defense session from settings.
pub fn setup_defense(mut commands: Commands, settings: Res<Settings>) {
    commands.insert_resource(DefenseSession {
        controller: DefenseController::new(settings.defense, SignalBuffer::default()),
    });
}

/// Advance the countdown from the frame clock.
pub fn tick_defense(time: Res<Time>, mut session: ResMut<DefenseSession>) {
    session.controller.tick(time.elapsed_secs_f64());
}

/// Feed published scenarios into the armed session.
///
/// The first undeflected result captures the baseline crater; every later
/// result is judged as a deflection attempt.
pub fn handle_scenario_for_defense(
    mut session: ResMut<DefenseSession>,
    mut scenarios: MessageReader<ScenarioReady>,
) {
    for event in scenarios.read() {
        if !session.controller.is_armed() {
            continue;
        }

        let crater_km = event.scenario.impact_effects.crater_diameter_km;
        let delta_v = event.scenario.inputs.deflection_delta_v;

        if !session.controller.has_baseline() && delta_v <= 0.0 {
            session.controller.record_baseline(crater_km);
            info!("defense baseline captured: {crater_km:.2} km crater");
        } else {
            session.controller.evaluate_attempt(crater_km, delta_v);
        }
    }
}

/// Drain buffered observer signals into display state.
pub fn drain_defense_signals(
    mut session: ResMut<DefenseSession>,
    mut panel: ResMut<DefensePanelState>,
    orchestrator: Res<Orchestrator>,
    mut current: ResMut<CurrentScenario>,
    mut ready: MessageWriter<ScenarioReady>,
) {
    let signals: Vec<DefenseSignal> =
        session.controller.observer.signals.drain(..).collect();

    for signal in signals {
        match signal {
            DefenseSignal::Locked => {
                panel.inputs_locked = true;
                panel.message = None;
            }
            DefenseSignal::Unlocked => {
                panel.inputs_locked = false;
                panel.countdown_secs = None;
            }
            DefenseSignal::Countdown(remaining) => {
                panel.countdown_secs = Some(remaining);
            }
            DefenseSignal::Hint(text) => {
                panel.message = Some((MessageKind::Info, text));
            }
            DefenseSignal::Resolved(resolution) => {
                panel.message = Some(resolution_message(&resolution));
                info!("defense session resolved: {resolution:?}");
            }
            DefenseSignal::Expired => {
                // One final render of the unmitigated track
                publish_baseline_view(&orchestrator, &mut current, &mut ready);
            }
        }
    }
}

fn resolution_message(resolution: &DefenseResolution) -> (MessageKind, String) {
    match resolution {
        DefenseResolution::Success { reduction_pct } => (
            MessageKind::Success,
            format!(
                "{} Deflection successful: crater reduced by {reduction_pct:.0}%",
                icons::SUCCESS
            ),
        ),
        DefenseResolution::Failure { reduction_pct } => (
            MessageKind::Failure,
            format!(
                "{} Not enough: crater only reduced by {reduction_pct:.0}%",
                icons::WARNING
            ),
        ),
        DefenseResolution::Timeout => (
            MessageKind::Failure,
            format!("{} Time's up, the impactor got through", icons::CLOCK),
        ),
    }
}

/// Render the countdown readout and message block.
pub fn defense_panel_system(mut contexts: EguiContexts, panel: Res<DefensePanelState>) {
    if panel.countdown_secs.is_none() && panel.message.is_none() {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("defense_status")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
        .show(ctx, |ui| {
            if let Some(remaining) = panel.countdown_secs {
                ui.label(
                    egui::RichText::new(format!("{} {remaining:.1} s", icons::CLOCK))
                        .size(24.0)
                        .color(if remaining < 3.0 {
                            egui::Color32::from_rgb(240, 90, 70)
                        } else {
                            egui::Color32::from_rgb(240, 210, 100)
                        }),
                );
            }

            if let Some((kind, text)) = &panel.message {
                let color = match kind {
                    MessageKind::Info => egui::Color32::from_rgb(170, 190, 220),
                    MessageKind::Success => egui::Color32::from_rgb(100, 210, 120),
                    MessageKind::Failure => egui::Color32::from_rgb(240, 90, 70),
                };
                ui.label(egui::RichText::new(text).color(color).strong());
            }
        });
}
