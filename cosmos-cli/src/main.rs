mod sandbox_app;

use clap::{Args, Parser, Subcommand};
use cosmos_core::{build_simulation_context, run_headless, SimConfig};
use log::info;
use sandbox_app::SandboxApp;

#[derive(Parser)]
#[command(name = "cosmos")]
#[command(about = "Particle Cosmos - an interactive force-field particle sandbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive sandbox window
    View {
        #[command(flatten)]
        world: WorldArgs,
    },
    /// Run without a window and print the final stats
    Run {
        /// Number of fixed steps to simulate
        #[arg(long, default_value_t = 600)]
        steps: u64,
        #[command(flatten)]
        world: WorldArgs,
    },
}

/// Overrides for the default world configuration
#[derive(Args)]
struct WorldArgs {
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    /// Particle cap
    #[arg(long)]
    max_particles: Option<usize>,
    /// Field cap
    #[arg(long)]
    max_fields: Option<usize>,
    /// Particles scattered at startup
    #[arg(long)]
    initial_particles: Option<usize>,
    /// Chance per step of spawning a particle while below the cap
    #[arg(long)]
    spawn_probability: Option<f64>,
    /// Seed the random stream for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

impl WorldArgs {
    fn into_config(self) -> SimConfig {
        let defaults = SimConfig::default();
        SimConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            max_particles: self.max_particles.unwrap_or(defaults.max_particles),
            max_fields: self.max_fields.unwrap_or(defaults.max_fields),
            initial_particles: self.initial_particles.unwrap_or(defaults.initial_particles),
            spawn_probability: self.spawn_probability.unwrap_or(defaults.spawn_probability),
            seed: self.seed,
            ..defaults
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::View { world } => view(world.into_config()),
        Commands::Run { steps, world } => run(world.into_config(), steps),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: SimConfig, steps: u64) -> Result<(), Box<dyn std::error::Error>> {
    let stats = run_headless(config, steps)?;

    println!("steps = {}", stats.step);
    println!("particles = {}", stats.particles);
    println!("fields = {}", stats.fields);
    for kind in cosmos_core::ParticleKind::ALL {
        println!("  {} = {}", kind.name(), stats.per_kind[kind.index()]);
    }

    Ok(())
}

fn view(config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sim = build_simulation_context(config)?;
    info!(
        "controls: L/R/M click = gravity/repulsion/magnetic, Ctrl+click = explode, \
         Space = burst, Tab = turbulence, 1-4 = kind, [ ] = size, Up/Down = force, C = clear, R = reset"
    );
    let size = [sim.world.config.width, sim.world.config.height + 40.0];

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Particle Cosmos")
            .with_inner_size(size),
        ..Default::default()
    };

    eframe::run_native(
        "Particle Cosmos",
        options,
        Box::new(move |cc| Ok(Box::new(SandboxApp::new(sim, cc)))),
    )?;

    Ok(())
}
