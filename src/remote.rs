//! Simulation orchestration and the remote backend client.
//!
//! Form submissions become `SimulateRequested` events. The orchestrator
//! posts them to the scientific backend on the IO task pool; whichever
//! request was issued last wins, and a response that lost the race is
//! discarded as stale. When the backend is unreachable the orchestrator
//! substitutes the offline estimator, deriving from the last known good
//! scenario, and flags the published result as an onboard estimate.

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task, futures_lite::future};
use std::time::Duration;
use thiserror::Error;

use crate::config::Settings;
use crate::estimator::{PayloadOverrides, estimate};
use crate::scenario::{Scenario, ScenarioInputs, offline_baseline};

/// Errors from the remote simulation backend.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Event: the user (or defense mode) asked for a simulation.
#[derive(Message, Clone, Debug, Default)]
pub struct SimulateRequested {
    pub payload: PayloadOverrides,
}

/// Event: a scenario is ready for the renderer, readouts, and defense mode.
#[derive(Message, Clone, Debug)]
pub struct ScenarioReady {
    pub scenario: Scenario,
    /// True when the scenario came from the offline estimator.
    pub offline: bool,
}

/// The scenario currently on display, for the readout panels.
#[derive(Resource, Clone, Debug, Default)]
pub struct CurrentScenario {
    pub scenario: Option<Scenario>,
    pub offline: bool,
}

/// Call the backend's simulate endpoint synchronously.
///
/// Runs on an IO pool thread, never on the main schedule.
pub fn fetch_simulation(
    base_url: &str,
    timeout: Duration,
    inputs: &ScenarioInputs,
) -> Result<Scenario, RemoteError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client
        .post(format!("{base_url}/api/simulate"))
        .json(inputs)
        .send()?;

    if !response.status().is_success() {
        return Err(RemoteError::Status(response.status()));
    }
    Ok(response.json()?)
}

struct PendingRequest {
    generation: u64,
    payload: PayloadOverrides,
    task: Task<Result<Scenario, RemoteError>>,
}

/// Orchestrator state: the fallback template and the in-flight request.
#[derive(Resource)]
pub struct Orchestrator {
    /// Last known good scenario; seeds the estimator when the backend is
    /// down. Starts as the fixed offline baseline and is replaced only by
    /// remote successes; estimator output never templates on itself.
    pub template: Scenario,
    generation: u64,
    pending: Option<PendingRequest>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self {
            template: offline_baseline(),
            generation: 0,
            pending: None,
        }
    }
}

/// Plugin wiring the orchestration events and systems.
pub struct OrchestratorPlugin;

impl Plugin for OrchestratorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Orchestrator>()
            .init_resource::<CurrentScenario>()
            .add_message::<SimulateRequested>()
            .add_message::<ScenarioReady>()
            .add_systems(Update, (submit_simulations, poll_simulations).chain());
    }
}

/// Dispatch the newest simulation request to the backend.
///
/// Only the latest request per frame is sent; replacing the pending slot
/// drops any older in-flight task.
fn submit_simulations(
    settings: Res<Settings>,
    mut orchestrator: ResMut<Orchestrator>,
    mut requests: MessageReader<SimulateRequested>,
) {
    let Some(request) = requests.read().last().cloned() else {
        return;
    };

    orchestrator.generation += 1;
    let generation = orchestrator.generation;

    let mut inputs = orchestrator.template.inputs.clone();
    request.payload.apply(&mut inputs);

    let base_url = settings.backend_url.clone();
    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let task = IoTaskPool::get()
        .spawn(async move { fetch_simulation(&base_url, timeout, &inputs) });

    debug!("simulation request #{generation} dispatched");
    orchestrator.pending = Some(PendingRequest {
        generation,
        payload: request.payload,
        task,
    });
}

/// Poll the in-flight request and publish its scenario.
fn poll_simulations(
    mut orchestrator: ResMut<Orchestrator>,
    mut current: ResMut<CurrentScenario>,
    mut ready: MessageWriter<ScenarioReady>,
) {
    let Some(mut pending) = orchestrator.pending.take() else {
        return;
    };

    let Some(result) = future::block_on(future::poll_once(&mut pending.task)) else {
        // Still in flight
        orchestrator.pending = Some(pending);
        return;
    };

    if pending.generation != orchestrator.generation {
        // A newer request superseded this one while it was in flight
        debug!("discarding stale simulation response #{}", pending.generation);
        return;
    }

    let (scenario, offline) = match result {
        Ok(scenario) => {
            orchestrator.template = scenario.clone();
            (scenario, false)
        }
        Err(err) => {
            warn!("backend unavailable, using onboard estimate: {err}");
            (estimate(&orchestrator.template, &pending.payload), true)
        }
    };

    current.scenario = Some(scenario.clone());
    current.offline = offline;
    ready.write(ScenarioReady { scenario, offline });
}

/// Publish a baseline-only view of the current template.
///
/// Used by defense mode after countdown expiry: one final render with no
/// deflection applied, straight from the estimator. No network round trip.
pub fn publish_baseline_view(
    orchestrator: &Orchestrator,
    current: &mut CurrentScenario,
    ready: &mut MessageWriter<ScenarioReady>,
) {
    let baseline = estimate(
        &orchestrator.template,
        &PayloadOverrides {
            deflection_delta_v: Some(0.0),
            ..PayloadOverrides::default()
        },
    );
    current.scenario = Some(baseline.clone());
    current.offline = true;
    ready.write(ScenarioReady {
        scenario: baseline,
        offline: true,
    });
}
