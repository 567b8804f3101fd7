#![deny(unsafe_code)]
//! CLI binary for the emergence engine.
//!
//! Subcommands:
//! - `run` — seed a burst, tick the simulation N times, print metrics (or a
//!   full frame snapshot) as JSON or text
//! - `list` — print force, boundary, mode, and metric names

mod error;

use clap::{Parser, Subcommand};
use emergence_core::{
    BoundaryPolicy, ForceKind, FrameSnapshot, HueAffinity, InteractionMode, Simulation,
    SimulationConfig, SpawnOptions,
};
use error::CliError;
use std::process;

#[derive(Parser)]
#[command(name = "emergence", about = "Particle/force simulation engine CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a simulation for N ticks and print metrics.
    Run {
        /// Viewport width.
        #[arg(short = 'W', long, default_value_t = 800.0)]
        width: f64,

        /// Viewport height.
        #[arg(short = 'H', long, default_value_t = 600.0)]
        height: f64,

        /// Number of ticks.
        #[arg(short, long, default_value_t = 300)]
        ticks: u64,

        /// PRNG seed for deterministic runs.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Particle capacity.
        #[arg(short, long, default_value_t = 300)]
        capacity: usize,

        /// Friction coefficient in (0, 1].
        #[arg(short, long, default_value_t = 0.98)]
        friction: f64,

        /// Boundary policy (wrap, bounce, clamp).
        #[arg(short, long, default_value = "wrap")]
        boundary: String,

        /// Connection distance for the proximity graph.
        #[arg(short = 'd', long, default_value_t = 100.0)]
        connection_distance: f64,

        /// Interaction mode held active at the viewport center for the whole
        /// run (idle, spawn, attract, repel, orbit, vortex).
        #[arg(short, long, default_value = "idle")]
        mode: String,

        /// Particles burst from the center before the first tick.
        #[arg(long, default_value_t = 50)]
        burst: usize,

        /// Gate edges on hue affinity instead of proximity alone.
        #[arg(long)]
        hue_affinity: bool,

        /// Extra config overrides as a JSON object (same keys as the
        /// config schema).
        #[arg(long, default_value = "{}")]
        params: String,

        /// Print metrics every N ticks (0 = only after the last tick).
        #[arg(long, default_value_t = 0)]
        every: u64,

        /// Print the full final frame (particles + edges) instead of
        /// metrics only.
        #[arg(long)]
        snapshot: bool,
    },
    /// List forces, boundary policies, interaction modes, and metrics.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let forces: Vec<&str> = ForceKind::ALL.iter().map(|k| k.name()).collect();
            if cli.json {
                let info = serde_json::json!({
                    "forces": forces,
                    "boundaries": BoundaryPolicy::NAMES,
                    "modes": InteractionMode::NAMES,
                    "metrics": ["coherence", "emergence", "entropy"],
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Forces:");
                for name in forces {
                    println!("  {name}");
                }
                println!("Boundary policies:");
                println!("  {}", BoundaryPolicy::NAMES.join(", "));
                println!("Interaction modes:");
                println!("  {}", InteractionMode::NAMES.join(", "));
                println!("Metrics:");
                println!("  coherence, emergence, entropy");
            }
        }
        Command::Run {
            width,
            height,
            ticks,
            seed,
            capacity,
            friction,
            boundary,
            connection_distance,
            mode,
            burst,
            hue_affinity,
            params,
            every,
            snapshot,
        } => {
            let overrides: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let mut config = SimulationConfig {
                width,
                height,
                capacity,
                friction,
                boundary: BoundaryPolicy::from_name(&boundary)?,
                connection_distance,
                ..Default::default()
            };
            if let Some(obj) = overrides.as_object() {
                if !obj.is_empty() {
                    // Flags first, then JSON overrides on top.
                    let mut merged = serde_json::to_value(&config)?;
                    for (k, v) in obj {
                        merged[k.as_str()] = v.clone();
                    }
                    config = SimulationConfig::from_json(&merged)?;
                }
            }

            let mode = InteractionMode::from_name(&mode)?;
            let mut sim = Simulation::new(config, seed)?;
            sim.set_mode(mode);
            sim.set_pointer(width / 2.0, height / 2.0, mode != InteractionMode::Idle);
            if hue_affinity {
                sim.set_scorer(Some(Box::new(HueAffinity)));
            }
            if burst > 0 {
                sim.spawn_burst(width / 2.0, height / 2.0, burst, &SpawnOptions::default());
            }

            for t in 1..=ticks {
                sim.tick()?;
                if every > 0 && t % every == 0 && t != ticks {
                    print_metrics(&sim, cli.json)?;
                }
            }

            if snapshot {
                let frame = FrameSnapshot::capture(&sim);
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                print_metrics(&sim, cli.json)?;
            }
        }
    }

    Ok(())
}

fn print_metrics(sim: &Simulation, json: bool) -> Result<(), CliError> {
    let m = sim.metrics();
    if json {
        let mut v = m.to_json();
        v["tick"] = serde_json::json!(sim.tick_count());
        println!("{}", serde_json::to_string(&v)?);
    } else {
        println!(
            "tick {:>6}  particles {:>4}  edges {:>5}  coherence {:.3} ({})  emergence {:.2} ({})  entropy {:.2} ({})",
            sim.tick_count(),
            m.particle_count,
            m.edge_count,
            m.coherence.value,
            m.coherence.label,
            m.emergence.value,
            m.emergence.label,
            m.entropy.value,
            m.entropy.label,
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
