//! Headless combat encounter.
//!
//! Plays the built-in skirmish to completion and prints the post-combat
//! report as JSON. By default both sides are driven by the built-in intent;
//! with `COMBAT_AUTOPILOT=false` player commands are read from stdin.
mod config;
mod input;
mod logging;
mod presentation;
mod scenario;

use std::sync::Arc;

use anyhow::Result;
use combat_runtime::{
    Collaborators, CombatEvent, CombatHandle, CombatStateMachine, NearestTargetIntent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use config::CliConfig;
use presentation::{TracingMusic, TracingPresentation};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let encounter = scenario::skirmish(config.map_width, config.map_height)?;
    tracing::info!(
        "Starting skirmish on a {}x{} board",
        config.map_width,
        config.map_height
    );

    let mut collaborators = Collaborators::default()
        .with_presentation(Arc::new(TracingPresentation))
        .with_music(Arc::new(TracingMusic));
    if config.autopilot {
        collaborators = collaborators.with_autopilot(Arc::new(NearestTargetIntent));
    }

    let (mut machine, handle) =
        CombatStateMachine::new(encounter, collaborators, config.runtime_config());

    let reporter = tokio::spawn(report_events(handle.clone()));
    tokio::spawn(abort_on_ctrl_c(handle.clone()));
    if !config.autopilot {
        tokio::spawn(read_commands(handle.clone()));
    }

    let summary = machine.run().await?;
    reporter.abort();

    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!("digest: {}", hex::encode(summary.digest));
    Ok(())
}

async fn abort_on_ctrl_c(handle: CombatHandle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("Interrupted, aborting encounter");
        if let Err(e) = handle.abort().await {
            tracing::debug!("Abort not delivered: {}", e);
        }
    }
}

async fn read_commands(handle: CombatHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("Input closed, aborting encounter");
                let _ = handle.abort().await;
                break;
            }
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                let _ = handle.abort().await;
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match input::parse_command(&line) {
            Ok(command) => {
                if handle.send(command).await.is_err() {
                    break;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }
}

async fn report_events(handle: CombatHandle) {
    let mut events = handle.subscribe();
    loop {
        match events.recv().await {
            Ok(event) => print_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Event reporter lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn print_event(event: &CombatEvent) {
    match event {
        CombatEvent::TurnStarted { unit, turn } => println!("turn {turn}: {unit} acts"),
        CombatEvent::AwaitingCommand { unit } => println!("{unit}> "),
        CombatEvent::CommandRejected { reason, .. } => println!("rejected: {reason}"),
        CombatEvent::ActionResolved {
            actor,
            label,
            damage,
        } => {
            let hits: Vec<String> = damage
                .iter()
                .map(|(target, amount)| format!("{target} -{amount}"))
                .collect();
            println!("{actor} uses {label}: [{}]", hits.join(", "));
        }
        CombatEvent::UnitDefeated { unit } => println!("{unit} is defeated"),
        CombatEvent::TensionChanged { tense } => {
            println!("{}", if *tense { "enemies close in" } else { "all quiet" });
        }
        CombatEvent::StateEntered { .. }
        | CombatEvent::TurnFinished { .. }
        | CombatEvent::EncounterEnded { .. } => {}
    }
}
