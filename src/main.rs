use clap::{Parser, Subcommand};
use glam::Vec2;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkdrift::canvas::Board;
use inkdrift::models::{EffectParams, EngineConfig};
use inkdrift::rendering;
use inkdrift::services::Clock;
use mono_dither::Bitmap;

#[derive(Parser)]
#[command(name = "inkdrift")]
#[command(about = "Dithering editor core - 1-bit pipeline and a drifting canvas")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dither pipeline on an image file and write a PNG
    Render {
        /// Source image (PNG, JPEG, GIF, WebP, or BMP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Effect: "atkinson", "halftone", or "ascii"
        #[arg(short, long, default_value = "atkinson")]
        effect: String,

        /// Pixel downscale factor (1-20)
        #[arg(short, long, default_value_t = 4)]
        pixel_scale: u32,

        /// Contrast (0.1-3.0); the quantization threshold is 128 / contrast
        #[arg(short, long, default_value_t = 1.0)]
        contrast: f32,

        /// Accent color applied to dark pixels, as #RRGGBB
        #[arg(short, long, default_value = "#000000")]
        accent: String,
    },
    /// Simulate the physics canvas headlessly and report final placements
    Drift {
        /// Number of simulation ticks to run
        #[arg(short, long, default_value_t = 300)]
        ticks: u64,

        /// Number of drifting assets to spawn
        #[arg(short, long, default_value_t = 5)]
        bodies: u32,

        /// Engine config file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a commented engine config template
    Init {
        /// Destination path
        #[arg(short, long, default_value = "inkdrift.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            effect,
            pixel_scale,
            contrast,
            accent,
        }) => run_render_command(&input, &output, &effect, pixel_scale, contrast, &accent),
        Some(Commands::Drift {
            ticks,
            bodies,
            config,
        }) => run_drift_command(ticks, bodies, config).await,
        Some(Commands::Init { output, force }) => run_init_command(&output, force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Dither a single image file to a recolored 1-bit PNG
fn run_render_command(
    input: &Path,
    output: &Path,
    effect: &str,
    pixel_scale: u32,
    contrast: f32,
    accent: &str,
) -> anyhow::Result<()> {
    init_cli_logging();

    let params = EffectParams::parse(effect, pixel_scale, contrast, accent)?;
    let bytes = std::fs::read(input)?;
    let artifact = rendering::process(&bytes, &params)?;
    std::fs::write(output, &artifact.png)?;

    println!(
        "Wrote {} ({}x{} px, {} bytes)",
        output.display(),
        artifact.width,
        artifact.height,
        artifact.png.len()
    );
    Ok(())
}

/// Run the bounded world without a UI attached, for tuning and smoke tests
async fn run_drift_command(ticks: u64, bodies: u32, config: Option<PathBuf>) -> anyhow::Result<()> {
    init_cli_logging();

    let config = EngineConfig::load(config.as_deref());
    let mut board = Board::new(&config);

    for n in 0..bodies {
        let side = 32 + (n as usize % 4) * 16;
        let screen = Vec2::new(
            (n as f32 - bodies as f32 / 2.0) * 150.0,
            (n % 3) as f32 * 120.0 - 120.0,
        );
        let id = board.add_layer(format!("asset-{n}"), Bitmap::new(side, side), screen);
        board.measure_layer(id, Vec2::splat(side as f32));
    }

    let board = Arc::new(Mutex::new(board));
    let clock = Clock::new(Arc::clone(&board), config.world.tick_hz);
    let mut frames = clock.subscribe();
    let handle = clock.spawn();

    // Watch receivers coalesce bursts, so this counts observed frames;
    // stop() reports the exact tick total.
    let mut seen = 0u64;
    while seen < ticks {
        if frames.changed().await.is_err() {
            break;
        }
        seen += 1;
    }
    let ran = handle.stop().await;
    let placements = frames.borrow().clone();

    let board = board.lock().await;
    println!(
        "Simulated {ran} ticks at {} Hz: {} assets, {} bodies in the world\n",
        config.world.tick_hz,
        board.layers.len(),
        board.world.body_count()
    );
    for (id, placement) in &placements {
        println!(
            "  {id}: screen=({:8.2}, {:8.2})  rotation={:7.3} deg",
            placement.screen_position.x, placement.screen_position.y, placement.rotation_degrees
        );
    }
    Ok(())
}

/// Write the commented config template for customization
fn run_init_command(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }
    std::fs::write(output, EngineConfig::TEMPLATE)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("INKDRIFT_CONFIG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Inkdrift v{VERSION} - dithering editor core");
    println!("1-bit Atkinson pipeline with a physics-backed canvas\n");

    println!("Environment Variables:");
    println!(
        "  INKDRIFT_CONFIG = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG        = {}",
        rust_log.as_deref().unwrap_or("(not set)")
    );

    let config = EngineConfig::load(config_file.as_deref().map(Path::new));
    println!("\nEngine Settings:");
    println!(
        "  world    : {}x{} units, walls {} thick, {} Hz",
        config.world.size, config.world.size, config.world.wall_thickness, config.world.tick_hz
    );
    println!(
        "  material : restitution {}, friction {}, air friction {}",
        config.material.restitution, config.material.friction, config.material.air_friction
    );
    println!(
        "  camera   : zoom {} to {} (step {})",
        config.camera.min_zoom, config.camera.max_zoom, config.camera.zoom_step
    );

    println!("\nCommands:");
    println!("  inkdrift render  Dither an image file to a recolored 1-bit PNG");
    println!("  inkdrift drift   Simulate the canvas headlessly");
    println!("  inkdrift init    Write a config template");
    println!("\nRun 'inkdrift <command> --help' for options.");
}

fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkdrift=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}
