//! Simscene main entry point.
//!
//! A small framework for real-time 2D simulations written in Rust using:
//! - **raylib** for windowing and graphics
//! - a retained scene tree of drawable and scripted nodes
//! - a signal registry for node-to-node notifications
//!
//! This executable is a launcher for the bundled simulations under
//! [`sims`]: each one builds a scene tree and hands it to [`engine::Engine`].
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- list
//! cargo run --release -- run orbits
//! cargo run --release -- run spiral --record spiral.mp4
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod engine;
mod math;
mod scene;
mod signal;
mod sims;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::engine::Engine;
use crate::engine::config::EngineConfig;
use crate::math::vec3d::Size;

/// Simscene 2D
#[derive(Parser)]
#[command(version, about = "A scene-tree playground for 2D simulations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a simulation by name.
    Run {
        /// Simulation name, as printed by `list`.
        name: String,

        /// Capture the run into a video file.
        /// Optionally provide a path (default: <name>.mp4).
        #[arg(long, value_name = "PATH")]
        record: Option<Option<PathBuf>>,

        /// Keep previous frames instead of clearing each tick.
        #[arg(long)]
        no_clear: bool,

        /// Window width in pixels.
        #[arg(long)]
        width: Option<u32>,

        /// Window height in pixels.
        #[arg(long)]
        height: Option<u32>,

        /// Target ticks per second.
        #[arg(long)]
        fps: Option<u32>,
    },
    /// List the bundled simulations.
    List {
        /// Also print each simulation's summary line.
        #[arg(long, short)]
        verbose: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::List { verbose } => {
            for (name, summary) in sims::catalog() {
                if verbose {
                    println!("{name:12} {summary}");
                } else {
                    println!("{name}");
                }
            }
        }
        Command::Run {
            name,
            record,
            no_clear,
            width,
            height,
            fps,
        } => {
            let mut config = EngineConfig::new();
            config.load_from_file().ok(); // ignore errors, use defaults

            let width = width.unwrap_or(config.window_width);
            let height = height.unwrap_or(config.window_height);
            let fps = fps.unwrap_or(config.target_fps);
            let screen = Size::xy(width as f64, height as f64);

            let Some(sim) = sims::build(&name, screen) else {
                eprintln!("Unknown simulation: {name}");
                eprintln!("Run `simscene list` to see what is available.");
                std::process::exit(1);
            };

            let mut engine = Engine::new(screen)
                .with_frame_rate(fps)
                .with_clear(!no_clear && sim.clear);
            if let Some(maybe_path) = record {
                let path = maybe_path.or_else(|| config.record_path.clone());
                engine = engine.with_record(true, path);
            }
            engine.run(sim.root);
        }
    }
}
