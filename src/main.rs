//! Photoelectric Effect Simulator
//!
//! Runs the emitter/collector apparatus at a fixed frame rate and reports what
//! the display would show: particle counts, beam color, mean carrier speed and
//! photocurrent.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use photoelectric_physics::beam_rgba;
use photoelectric_simulation::{
    Experiment, ExperimentConfig, PhotoelectricSimulation, SimulationStats,
};

// Slider ranges of the control panel
const WAVELENGTH_RANGE_NM: (f64, f64) = (100.0, 850.0);
const INTENSITY_RANGE: (f64, f64) = (0.0, 100.0);
const STOPPING_VOLTAGE_RANGE: (f64, f64) = (-3.0, 3.0);

#[derive(Parser, Debug)]
#[command(name = "photoelectric", about = "Photoelectric effect simulator")]
struct Args {
    /// Experiment config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metal on the emitter plate
    #[arg(short, long)]
    metal: Option<String>,

    /// Light source
    #[arg(short, long)]
    source: Option<String>,

    /// Wavelength of the light (nm)
    #[arg(short, long)]
    wavelength_nm: Option<f64>,

    /// Light intensity (%)
    #[arg(short, long)]
    intensity: Option<f64>,

    /// Stopping voltage (V)
    #[arg(short = 'v', long, allow_negative_numbers = true)]
    stopping_voltage: Option<f64>,

    /// Number of ticks to run; runs until interrupted when omitted
    #[arg(short = 'n', long)]
    ticks: Option<u64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Run ticks back-to-back instead of at the configured frame rate
    #[arg(long)]
    unpaced: bool,

    /// Print the available metals and sources, then exit
    #[arg(long)]
    list: bool,
}

/// Clamp a control to its slider range, warning when the value had to move
fn clamp_control(name: &str, value: f64, (min, max): (f64, f64)) -> f64 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{} {} outside {}..={}, using {}", name, value, min, max, clamped);
    }
    clamped
}

fn apply_overrides(config: &mut ExperimentConfig, args: &Args) {
    if let Some(metal) = &args.metal {
        config.metal = Some(metal.clone());
    }
    if let Some(source) = &args.source {
        config.source = Some(source.clone());
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }

    let controls = &mut config.controls;
    if let Some(wavelength_nm) = args.wavelength_nm {
        controls.wavelength_nm = wavelength_nm;
    }
    if let Some(intensity) = args.intensity {
        controls.intensity = intensity;
    }
    if let Some(stopping_voltage) = args.stopping_voltage {
        controls.stopping_voltage = stopping_voltage;
    }
    controls.wavelength_nm = clamp_control("Wavelength", controls.wavelength_nm, WAVELENGTH_RANGE_NM);
    controls.intensity = clamp_control("Intensity", controls.intensity, INTENSITY_RANGE);
    controls.stopping_voltage =
        clamp_control("Stopping voltage", controls.stopping_voltage, STOPPING_VOLTAGE_RANGE);
}

fn print_catalogs(experiment: &Experiment) {
    println!("Metals:");
    for metal in experiment.metals.iter() {
        println!(
            "  {:<12} work function {:.4e} J ({:.2} eV)",
            metal.name,
            metal.work_function,
            metal.work_function / photoelectric_physics::ELEMENTARY_CHARGE
        );
    }
    println!("Sources:");
    for source in experiment.sources.iter() {
        println!(
            "  {:<12} {:.0}-{:.0} nm, jitter {}±{} px",
            source.name, source.accepted_min_nm, source.accepted_max_nm, source.mean_offset, source.std_dev
        );
    }
}

fn log_frame(sim: &PhotoelectricSimulation, experiment: &Experiment) {
    let controls = &experiment.controls;
    let [r, g, b, a] = beam_rgba(controls.wavelength, controls.intensity);
    let speed = sim
        .mean_speed()
        .map(|v| format!("{:.0}", v))
        .unwrap_or_else(|| "#######".to_string());
    log::info!(
        "t={:>6.1}s  quanta={:>3}  carriers={:>4}  avg speed={} m/s  photocurrent={}/s  beam=({}, {}, {}, {})",
        sim.elapsed_seconds(),
        sim.quanta().len(),
        sim.carriers().len(),
        speed,
        sim.photocurrent(),
        r,
        g,
        b,
        a
    );
}

fn log_summary(stats: &SimulationStats) {
    log::info!(
        "Done: {} quanta emitted, {} converted, {} absorbed, {} expired, {} carriers collected",
        stats.emitted,
        stats.converted,
        stats.absorbed,
        stats.expired,
        stats.collected
    );
}

fn main() -> anyhow::Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load_from_file(path)
            .with_context(|| format!("loading experiment config {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    apply_overrides(&mut config, &args);

    let experiment = Experiment::from_config(&config)?;
    if args.list {
        print_catalogs(&experiment);
        return Ok(());
    }

    log::info!(
        "Starting photoelectric effect simulation: {} under {} at {:.0} nm, {:.0}%, {:+.1} V",
        experiment.metal().name,
        experiment.source().name,
        config.controls.wavelength_nm,
        config.controls.intensity,
        config.controls.stopping_voltage
    );

    let mut sim = PhotoelectricSimulation::new(config.simulation.clone());
    let tick_rate = sim.params().tick_rate.max(1);
    let frame_budget = Duration::from_secs_f64(1.0 / f64::from(tick_rate));

    let mut last_frame_time = Instant::now();
    loop {
        if args.ticks.is_some_and(|limit| sim.tick_count() >= limit) {
            break;
        }

        sim.tick(experiment.metal(), experiment.source(), &experiment.controls);

        if sim.tick_count() % u64::from(tick_rate) == 0 {
            log_frame(&sim, &experiment);
        }

        if !args.unpaced {
            let elapsed = last_frame_time.elapsed();
            if elapsed < frame_budget {
                thread::sleep(frame_budget - elapsed);
            }
            last_frame_time = Instant::now();
        }
    }

    log_summary(sim.stats());
    Ok(())
}
