//! Demo runner: seeds events into an in-memory simulator and prints status.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use event_simulator_core_rs::{Collaborators, Simulator, SimulatorConfig};

mod script;

#[derive(Parser, Debug)]
#[command(name = "event-simulator", about = "Run an event script through the simulator")]
struct Cli {
    /// JSON simulator config
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of events; defaults to the built-in three-event demo
    #[arg(long)]
    script: Option<PathBuf>,

    /// Queue the events without starting the simulator
    #[arg(long)]
    no_start: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("event_simulator_core_rs=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SimulatorConfig::from_json_file(path)?,
        None => SimulatorConfig::default(),
    };
    let events = match &cli.script {
        Some(path) => script::load_events(path)?,
        None => script::demo_events(),
    };

    let mut simulator = Simulator::new(config, Collaborators::in_memory())?;
    if !cli.no_start {
        simulator.start();
    }

    info!(count = events.len(), "seeding events");
    for event in events {
        simulator.enqueue_event(event);
    }

    let status = simulator.status();
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
