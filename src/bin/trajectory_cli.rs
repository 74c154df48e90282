use batted_ball_flight::{
    constants::*, load_hit_records, spray_angle_from_coordinates, ArcControl, FlightSimulator, FlightSummary,
    HitParameters, Integrator, PhysicsConstants, TrajectoryModel, TrajectoryPoint,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use rayon::prelude::*;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trajectory-cli")]
#[command(version = "0.1.0")]
#[command(about = "Batted-ball flight path calculator", long_about = None)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a single hit with drag and lift
    Simulate {
        /// Exit velocity (mph)
        #[arg(short = 's', long)]
        speed: f64,

        /// Launch angle (degrees)
        #[arg(short = 'a', long, default_value = "25.0", allow_negative_numbers = true)]
        angle: f64,

        /// Spray angle (degrees)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        spray: f64,

        /// Spin rate (rpm)
        #[arg(long)]
        spin: Option<f64>,

        /// Integration scheme
        #[arg(long, default_value = "euler")]
        integrator: IntegratorArg,

        /// Time step (seconds)
        #[arg(long, default_value = "0.01")]
        time_step: f64,

        /// Drag coefficient
        #[arg(long, default_value = "0.35")]
        drag_coefficient: f64,

        /// Lift coefficient
        #[arg(long, default_value = "0.2")]
        lift_coefficient: f64,

        /// Maximum number of integration steps
        #[arg(long, default_value = "100000")]
        max_steps: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Show all trajectory points
        #[arg(long)]
        full: bool,
    },

    /// Build the Bezier arc for a single hit
    Arc {
        /// Exit velocity (mph)
        #[arg(short = 's', long)]
        speed: f64,

        /// Launch angle (degrees, 0 falls back to 45)
        #[arg(short = 'a', long, default_value = "0.0", allow_negative_numbers = true)]
        angle: f64,

        /// Hit distance (feet)
        #[arg(short = 'd', long)]
        distance: f64,

        /// Spray angle (degrees); overrides hit coordinates
        #[arg(long, allow_negative_numbers = true)]
        spray: Option<f64>,

        /// Raw hit coordinate X
        #[arg(long, requires = "hc_y")]
        hc_x: Option<f64>,

        /// Raw hit coordinate Y
        #[arg(long, requires = "hc_x")]
        hc_y: Option<f64>,

        /// Number of Bezier segments
        #[arg(long, default_value = "50")]
        steps: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Show all trajectory points
        #[arg(long)]
        full: bool,
    },

    /// Compute trajectories for a JSON file of hit records
    Batch {
        /// JSON array of hit records
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Flight model
        #[arg(short = 'm', long, default_value = "physics")]
        model: ModelArg,

        /// Number of Bezier segments for the arc model
        #[arg(long, default_value = "50")]
        steps: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display model constants
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Euler,
    Rk4,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    Arc,
    Physics,
}

#[derive(Debug, Serialize)]
struct TrajectoryOutput<'a> {
    model: &'a str,
    summary: FlightSummary,
    trajectory: &'a [TrajectoryPoint],
}

#[derive(Debug, Serialize)]
struct BatchEntry {
    index: usize,
    summary: FlightSummary,
    trajectory: Vec<TrajectoryPoint>,
}

fn init_logging(level: &str) -> Result<(), Box<dyn Error>> {
    let level: LevelFilter = level
        .parse()
        .map_err(|e| format!("invalid log level '{}': {}", level, e))?;
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config).map_err(|e| format!("failed to install logger: {}", e))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Simulate {
            speed, angle, spray, spin, integrator, time_step,
            drag_coefficient, lift_coefficient, max_steps, output, full,
        } => {
            let constants = PhysicsConstants {
                drag_coefficient,
                lift_coefficient,
                ..Default::default()
            };
            let mut simulator = FlightSimulator::new(constants)?;
            simulator.set_time_step(time_step)?;
            simulator.set_max_steps(max_steps);
            simulator.set_integrator(match integrator {
                IntegratorArg::Euler => Integrator::Euler,
                IntegratorArg::Rk4 => Integrator::Rk4,
            });

            let mut hit = HitParameters::new(speed, angle, spray);
            hit.spin_rate_rpm = spin;

            let model = TrajectoryModel::Physics(simulator);
            let (points, summary) = model.trajectory_with_summary(&hit)?;
            info!("simulated {} points", points.len());

            display_trajectory(model.name(), &points, &summary, output, full)?;
        },

        Commands::Arc { speed, angle, distance, spray, hc_x, hc_y, steps, output, full } => {
            let spray_deg = match (spray, hc_x, hc_y) {
                (Some(s), _, _) => s,
                (None, Some(x), Some(y)) => spray_angle_from_coordinates(x, y),
                _ => 0.0,
            };
            let hit = HitParameters::new(speed, angle, spray_deg).with_distance(distance);

            let control = ArcControl::from_hit(&hit)?;
            info!(
                "arc apex ({:.1}, {:.1}, {:.1}), end ({:.1}, {:.1}, {:.1})",
                control.apex.x, control.apex.y, control.apex.z, control.end.x, control.end.y, control.end.z
            );

            let model = TrajectoryModel::Arc { steps };
            let (points, summary) = model.trajectory_with_summary(&hit)?;

            display_trajectory(model.name(), &points, &summary, output, full)?;
        },

        Commands::Batch { input, model, steps, output } => {
            let records = load_hit_records(BufReader::new(File::open(&input)?))?;
            let model = match model {
                ModelArg::Arc => TrajectoryModel::Arc { steps },
                ModelArg::Physics => TrajectoryModel::physics(),
            };

            let results: Vec<BatchEntry> = records
                .par_iter()
                .enumerate()
                .filter_map(|(index, record)| {
                    let result = record
                        .to_parameters()
                        .and_then(|hit| model.trajectory_with_summary(&hit));
                    match result {
                        Ok((trajectory, summary)) => Some(BatchEntry { index, summary, trajectory }),
                        Err(e) => {
                            warn!("skipping hit {}: {}", index, e);
                            None
                        }
                    }
                })
                .collect();

            info!("{} of {} hits computed with the {} model", results.len(), records.len(), model.name());
            display_batch(&results, output)?;
        },

        Commands::Info => {
            let c = PhysicsConstants::default();
            println!("╔════════════════════════════════════════╗");
            println!("║       BATTED BALL FLIGHT v0.1.0        ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ PHYSICS MODEL                          ║");
            println!("║ Gravity:           {:>8.3} ft/s²      ║", c.gravity);
            println!("║ Air density:       {:>8.6} slug/ft³ ║", c.air_density);
            println!("║ Drag coefficient:  {:>8.3}            ║", c.drag_coefficient);
            println!("║ Lift coefficient:  {:>8.3}            ║", c.lift_coefficient);
            println!("║ Cross section:     {:>8.5} ft²       ║", c.cross_section_area);
            println!("║ Mass:              {:>8.3} slug       ║", c.mass);
            println!("║ Reference spin:    {:>8.0} rpm        ║", c.reference_spin_rpm);
            println!("║ Release height:    {:>8.2} ft         ║", c.release_height);
            println!("║ Time step:         {:>8.3} s          ║", DEFAULT_TIME_STEP);
            println!("╠════════════════════════════════════════╣");
            println!("║ ARC MODEL                              ║");
            println!("║ Segments:          {:>8}            ║", DEFAULT_ARC_STEPS);
            println!("║ Spray correction:  {:>8.3}            ║", SPRAY_CORRECTION);
            println!("║ Apex factor:       {:>8.3}            ║", APEX_HEIGHT_FACTOR);
            println!("║ Default angle:     {:>8.1} deg        ║", DEFAULT_LAUNCH_ANGLE_DEG);
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_trajectory(
    model: &str,
    points: &[TrajectoryPoint],
    summary: &FlightSummary,
    format: OutputFormat,
    full: bool,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let out = TrajectoryOutput { model, summary: *summary, trajectory: points };
            println!("{}", serde_json::to_string_pretty(&out)?);
        },

        OutputFormat::Csv => {
            println!("index,x,y,z");
            for (i, p) in points.iter().enumerate() {
                println!("{},{:.3},{:.3},{:.3}", i, p.x, p.y, p.z);
            }
        },

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Model:             {:>8}            ║", model);
            println!("║ Hang Time:         {:>8.2} s          ║", summary.hang_time_s);
            println!("║ Max Height:        {:>8.2} ft         ║", summary.max_height_ft);
            println!("║ Carry Distance:    {:>8.2} ft         ║", summary.carry_distance_ft);
            println!("║ Landing X:         {:>8.2} ft         ║", summary.landing.x);
            println!("║ Landing Z:         {:>8.2} ft         ║", summary.landing.z);
            println!("║ Points:            {:>8}            ║", summary.point_count);
            println!("╚════════════════════════════════════════╝");

            let step = if full { 1 } else { (points.len() / 10).max(1) };
            println!("\nTrajectory Points:");
            println!("┌──────────┬──────────┬──────────┬──────────┐");
            println!("│  Index   │  X (ft)  │  Y (ft)  │  Z (ft)  │");
            println!("├──────────┼──────────┼──────────┼──────────┤");
            for (i, p) in points.iter().enumerate() {
                if i % step == 0 || i == points.len() - 1 {
                    println!("│ {:>8} │ {:>8.2} │ {:>8.2} │ {:>8.2} │", i, p.x, p.y, p.z);
                }
            }
            println!("└──────────┴──────────┴──────────┴──────────┘");
        },
    }

    Ok(())
}

fn display_batch(results: &[BatchEntry], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        },

        OutputFormat::Csv => {
            println!("hit,index,x,y,z");
            for entry in results {
                for (i, p) in entry.trajectory.iter().enumerate() {
                    println!("{},{},{:.3},{:.3},{:.3}", entry.index, i, p.x, p.y, p.z);
                }
            }
        },

        OutputFormat::Table => {
            println!("┌──────────┬──────────┬──────────┬──────────┬──────────┐");
            println!("│   Hit    │ Hang (s) │ Peak(ft) │ Carry(ft)│  Points  │");
            println!("├──────────┼──────────┼──────────┼──────────┼──────────┤");
            for entry in results {
                let s = &entry.summary;
                println!("│ {:>8} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8} │",
                    entry.index, s.hang_time_s, s.max_height_ft, s.carry_distance_ft, s.point_count);
            }
            println!("└──────────┴──────────┴──────────┴──────────┴──────────┘");
        },
    }

    Ok(())
}
