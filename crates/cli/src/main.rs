#![deny(unsafe_code)]
//! CLI binary for the gl-steps demo scenes.
//!
//! Subcommands:
//! - `run <scene>` -- open a window and drive the named scene
//! - `list` -- print available scene names

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use gl_steps_core::{Assets, Runtime, WindowConfig};
use gl_steps_scenes::{list_scenes, SceneId, SceneKind};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "gl-steps", about = "Progressive OpenGL demo scenes")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a window and run a scene until Escape or close.
    Run {
        /// Scene name (see `list`).
        scene: String,

        /// Window width in logical pixels.
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Window height in logical pixels.
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Window title; defaults to the scene name.
        #[arg(long)]
        title: Option<String>,

        /// Directory holding the shaders/ and textures/ subdirectories.
        #[arg(long, default_value = "assets")]
        assets: PathBuf,

        /// Swap buffers without waiting for vertical sync.
        #[arg(long)]
        no_vsync: bool,
    },
    /// List available scenes.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let scenes = list_scenes();
            if cli.json {
                let info = serde_json::json!({ "scenes": scenes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Scenes:");
                for name in scenes {
                    println!("  {name}");
                }
            }
        }
        Command::Run {
            scene,
            width,
            height,
            title,
            assets,
            no_vsync,
        } => {
            let id: SceneId = scene.parse()?;
            let assets = Assets::new(assets);
            let config = WindowConfig {
                title: title.unwrap_or_else(|| format!("gl-steps: {}", id.name())),
                width,
                height,
                vsync: !no_vsync,
            };

            log::info!("running scene '{}'", id.name());
            Runtime::run(config, move |gl| SceneKind::create(id, gl, &assets))?;
        }
    }

    Ok(())
}

fn main() {
    gl_steps_core::logging::init();
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
