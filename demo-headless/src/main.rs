use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ripple_sim_core::{
    unpack_argb, ExecutionMode, FieldStats, Preset, SimulationConfig, WaveSimulation,
};
use serde::Serialize;
use std::error::Error;
use std::f32::consts::TAU;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless ripple simulation with a scripted pointer session
#[derive(Parser, Debug)]
#[command(name = "ripple-sim-demo")]
#[command(about = "2D water ripple simulation without a window", long_about = None)]
struct Args {
    /// Preset (classic, grid, water)
    #[arg(short, long, default_value = "water")]
    preset: String,

    /// JSON configuration file; overrides the preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Grid width in cells (0 = preset size)
    #[arg(long, default_value_t = 0)]
    width: usize,

    /// Grid height in cells (0 = preset size)
    #[arg(long, default_value_t = 0)]
    height: usize,

    /// Per-step damping (0 = preset value)
    #[arg(short, long, default_value_t = 0.0)]
    damping: f32,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Frames between random drops (0 = none)
    #[arg(long, default_value_t = 60)]
    drop_interval: u32,

    /// Frames the scripted pointer spends dragging
    #[arg(long, default_value_t = 120)]
    drag_frames: u32,

    /// Seed for random drops
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Run stencil and refresh passes over the Rayon pool
    #[arg(long)]
    parallel: bool,

    /// Frames between statistics reports
    #[arg(short, long, default_value_t = 60)]
    report_interval: u32,

    /// Write the final frame as a binary PPM image
    #[arg(long)]
    ppm: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

/// Summary printed at the end of a run
#[derive(Debug, Serialize)]
struct Report {
    preset: String,
    width: usize,
    height: usize,
    frames: u32,
    drops: u32,
    peak_energy: f64,
    final_stats: FieldStats,
    elapsed_ms: f64,
    frames_per_second: f64,
}

fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn Error>> {
    let mut config = if let Some(path) = &args.config {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?
    } else {
        let preset = Preset::from_name(&args.preset).ok_or_else(|| {
            format!(
                "Unknown preset '{}', expected one of: classic, grid, water",
                args.preset
            )
        })?;
        preset.config()
    };

    if args.width > 0 {
        config.width = args.width;
    }
    if args.height > 0 {
        config.height = args.height;
    }
    if args.damping > 0.0 {
        config.damping = args.damping;
    }
    if args.parallel {
        config.execution = ExecutionMode::Parallel;
    }
    Ok(config)
}

/// Pointer position on a circle around the grid center at `frame`
fn pointer_at(width: usize, height: usize, frame: u32, drag_frames: u32) -> (i32, i32) {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = cx.min(cy) * 0.5;
    let angle = TAU * frame as f32 / drag_frames.max(1) as f32;
    (
        (cx + radius * angle.cos()) as i32,
        (cy + radius * angle.sin()) as i32,
    )
}

fn write_ppm(path: &Path, sim: &WaveSimulation) -> Result<(), Box<dyn Error>> {
    let frame = sim.frame();
    let file = fs::File::create(path)?;
    let mut out = BufWriter::new(file);
    write!(out, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
    for &pixel in frame.pixels() {
        let [_, r, g, b] = unpack_argb(pixel);
        out.write_all(&[r, g, b])?;
    }
    out.flush()?;
    Ok(())
}

fn print_stats(frame: u32, stats: &FieldStats) {
    println!(
        "[frame {:>5}] energy={:>12.4} peak={:>8.4} active={:>7}",
        frame, stats.energy, stats.peak, stats.active_cells
    );
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut sim = WaveSimulation::new(config)?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let (width, height) = (config.width, config.height);

    println!("=== Ripple Simulation Demo ===\n");
    println!(
        "Grid: {}x{}, damping {:.4}, colors {:?}, mode {:?}",
        width,
        height,
        sim.config().damping,
        config.color_map,
        config.execution
    );
    println!(
        "Running {} frames (drag for {}, random drop every {})\n",
        args.frames, args.drag_frames, args.drop_interval
    );

    let (px, py) = pointer_at(width, height, 0, args.drag_frames);
    sim.press(px, py);

    let start = Instant::now();
    let mut drops = 0;
    let mut peak_energy = 0.0_f64;
    let mut pointer = (px, py);

    for frame in 1..=args.frames {
        if frame <= args.drag_frames {
            let next = pointer_at(width, height, frame, args.drag_frames);
            sim.drag(pointer.0, pointer.1, next.0, next.1);
            pointer = next;
        }
        if args.drop_interval > 0 && frame % args.drop_interval == 0 {
            if let Some((x, y)) = sim.random_drop(&mut rng) {
                drops += 1;
                info!("Frame {}: random drop at ({}, {})", frame, x, y);
            }
        }

        sim.update();

        let stats = sim.stats();
        peak_energy = peak_energy.max(stats.energy);
        if args.report_interval > 0 && frame % args.report_interval == 0 && !args.json {
            print_stats(frame, &stats);
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    let report = Report {
        preset: args
            .config
            .as_ref()
            .map_or_else(|| args.preset.clone(), |p| p.display().to_string()),
        width,
        height,
        frames: args.frames,
        drops,
        peak_energy,
        final_stats: sim.stats(),
        elapsed_ms: elapsed * 1000.0,
        frames_per_second: if elapsed > 0.0 {
            f64::from(args.frames) / elapsed
        } else {
            0.0
        },
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n=== Summary ===");
        println!("Random drops: {}", report.drops);
        println!("Peak energy: {:.4}", report.peak_energy);
        print_stats(args.frames, &report.final_stats);
        println!(
            "Elapsed: {:.1} ms ({:.1} frames/s)",
            report.elapsed_ms, report.frames_per_second
        );
    }

    if let Some(path) = &args.ppm {
        write_ppm(path, &sim)?;
        println!("Final frame written to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
