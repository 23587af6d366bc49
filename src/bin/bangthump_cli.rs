use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use serde::Serialize;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bang_thump::{
    checked_total_flight_time, find_distance, AcousticConfig, BallisticSample, BangThumpError,
    DistanceSolution, EstimatorConfig, FlightTime, SolverConfig, UnitSystem,
};

#[derive(Parser)]
#[command(name = "bangthump")]
#[command(version)]
#[command(about = "Estimate target distance from bang-thump timing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for target distance from a measured bang-thump interval
    Distance {
        /// Total bang-thump time (seconds)
        #[arg(short = 't', long)]
        time: f64,

        #[command(flatten)]
        sample: SampleArgs,

        #[command(flatten)]
        env: EnvironmentArgs,

        /// Upper bound of the distance search (yards or meters) [default: 5000 yards]
        #[arg(long)]
        max_distance: Option<f64>,

        /// Bisection passes [default: 100]
        #[arg(long)]
        iterations: Option<usize>,

        /// Time tolerance for the early exit (seconds) [default: 1e-6]
        #[arg(long)]
        tolerance: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Show bullet, sound and total time for a known distance
    Time {
        /// Distance to target (yards or meters)
        #[arg(short = 'd', long)]
        distance: f64,

        #[command(flatten)]
        sample: SampleArgs,

        #[command(flatten)]
        env: EnvironmentArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Prompt for the four measurements on stdin
    Prompt,

    /// Display estimator information
    Info,
}

#[derive(Args)]
struct SampleArgs {
    /// Muzzle velocity (ft/s or m/s)
    #[arg(short = 'v', long)]
    muzzle_velocity: f64,

    /// Velocity measured downrange (ft/s or m/s)
    #[arg(short = 'r', long)]
    ref_velocity: f64,

    /// Distance of the downrange measurement (yards or meters)
    #[arg(short = 'R', long)]
    ref_distance: f64,
}

#[derive(Args)]
struct EnvironmentArgs {
    /// Speed of sound (ft/s or m/s) [default: 1100 ft/s]
    #[arg(short = 's', long, conflicts_with = "temperature")]
    speed_of_sound: Option<f64>,

    /// Air temperature (°F); derives the speed of sound
    #[arg(long)]
    temperature: Option<f64>,

    /// Unit system for inputs and reported distance
    #[arg(short = 'u', long, default_value = "imperial")]
    units: UnitSystem,

    /// JSON configuration file with acoustic and solver settings
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct DistanceReport {
    units: UnitSystem,
    total_time_s: f64,
    sample: BallisticSample,
    acoustic: AcousticConfig,
    solver: SolverConfig,
    distance: f64,
    solution: DistanceSolution,
}

#[derive(Serialize)]
struct TimeReport {
    units: UnitSystem,
    distance: f64,
    bullet_time_s: Option<f64>,
    sound_time_s: f64,
    total_time_s: Option<f64>,
}

impl SampleArgs {
    fn to_sample(&self, units: UnitSystem) -> BallisticSample {
        BallisticSample::new(
            units.velocity_to_fps(self.muzzle_velocity),
            units.velocity_to_fps(self.ref_velocity),
            units.distance_to_yards(self.ref_distance),
        )
    }
}

impl EnvironmentArgs {
    // File settings first, then command-line overrides
    fn resolve(&self) -> Result<EstimatorConfig, BangThumpError> {
        let mut config = match &self.config {
            Some(path) => EstimatorConfig::from_json_file(path)?,
            None => EstimatorConfig::default(),
        };

        if let Some(temp_f) = self.temperature {
            config.acoustic = AcousticConfig::from_temperature_f(temp_f);
        } else if let Some(speed) = self.speed_of_sound {
            config.acoustic = AcousticConfig::new(self.units.velocity_to_fps(speed));
        }

        debug!("resolved configuration: {:?}", config);
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Distance {
            time,
            sample,
            env,
            max_distance,
            iterations,
            tolerance,
            output,
        } => {
            let units = env.units;
            let mut config = env.resolve()?;
            if let Some(max) = max_distance {
                config.solver.max_distance_yards = units.distance_to_yards(max);
            }
            if let Some(n) = iterations {
                config.solver.max_iterations = n;
            }
            if let Some(tol) = tolerance {
                config.solver.time_tolerance_s = tol;
            }

            let sample = sample.to_sample(units);
            let solution = find_distance(time, &sample, &config.acoustic, &config.solver)?;

            let report = DistanceReport {
                units,
                total_time_s: time,
                sample,
                acoustic: config.acoustic,
                solver: config.solver,
                distance: units.distance_from_yards(solution.distance_yards),
                solution,
            };
            display_distance_report(&report, output)?;
        }

        Commands::Time {
            distance,
            sample,
            env,
            output,
        } => {
            let units = env.units;
            let config = env.resolve()?;
            let sample = sample.to_sample(units);
            let total = checked_total_flight_time(
                units.distance_to_yards(distance),
                &sample,
                &config.acoustic,
            )?;

            let report = TimeReport {
                units,
                distance,
                bullet_time_s: total.bullet.seconds(),
                sound_time_s: total.sound_seconds,
                total_time_s: total.seconds(),
            };
            display_time_report(&report, total.bullet, output)?;
        }

        Commands::Prompt => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_prompt(&mut stdin.lock(), &mut stdout.lock())?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║   BANG-THUMP DISTANCE ESTIMATOR {:<7}║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Model:                                 ║");
            println!("║ • Linear velocity decay, 1 sample      ║");
            println!("║ • Impact sound return at c (ft/s)      ║");
            println!("║ • Bisection over [0, max distance]     ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Defaults:                              ║");
            println!("║ • Speed of sound:    1100 ft/s         ║");
            println!("║ • Max distance:      5000 yd           ║");
            println!("║ • Passes / tol:      100 / 1e-6 s      ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn read_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &str,
) -> Result<f64, BangThumpError> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let text = line.trim();
    text.parse::<f64>().map_err(|_| BangThumpError::Parse {
        field: field.to_string(),
        input: text.to_string(),
    })
}

fn run_prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<(), BangThumpError> {
    writeln!(output, "=== Bang-Thump Distance Estimator ===")?;
    let total_time = read_value(
        input,
        output,
        "Enter total bang-thump time (seconds): ",
        "total time",
    )?;
    let muzzle_velocity = read_value(
        input,
        output,
        "Enter muzzle velocity (fps): ",
        "muzzle velocity",
    )?;
    let ref_velocity = read_value(
        input,
        output,
        "Enter bullet velocity (fps) at known downrange distance: ",
        "reference velocity",
    )?;
    let ref_distance = read_value(
        input,
        output,
        "Enter the downrange distance (yards) at which that velocity was measured: ",
        "reference distance",
    )?;

    let sample = BallisticSample::new(muzzle_velocity, ref_velocity, ref_distance);
    let solution = find_distance(
        total_time,
        &sample,
        &AcousticConfig::default(),
        &SolverConfig::default(),
    )?;

    writeln!(
        output,
        "\nEstimated distance to target: {:.1} yards",
        solution.distance_yards
    )?;
    Ok(())
}

fn display_distance_report(
    report: &DistanceReport,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => {
            let units = report.units;
            println!("╔════════════════════════════════════════╗");
            println!("║          DISTANCE ESTIMATE             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Bang-thump time:   {:>10.3} s        ║", report.total_time_s);
            let sample = &report.sample;
            let acoustic = &report.acoustic;
            println!("║ Muzzle velocity:   {:>10.1} ft/s     ║", sample.muzzle_velocity_fps);
            println!("║ Ref velocity:      {:>10.1} ft/s     ║", sample.reference_velocity_fps);
            println!("║ Ref distance:      {:>10.1} yd       ║", sample.reference_distance_yards);
            println!("║ Speed of sound:    {:>10.1} ft/s     ║", acoustic.speed_of_sound_fps);
            println!("╠════════════════════════════════════════╣");
            println!("║ Passes used:       {:>10}          ║", report.solution.iterations_used);
            println!("║ Residual:          {:>10.2e} s        ║", report.solution.residual_seconds);
            println!("║ Converged:         {:>10}          ║", report.solution.converged);
            println!("╚════════════════════════════════════════╝");
            println!();
            println!(
                "Estimated distance to target: {:.1} {}",
                report.distance,
                units.distance_label()
            );
            if !report.solution.converged {
                println!(
                    "Warning: no distance within {:.1} {} matches the measured time",
                    units.distance_from_yards(report.solver.max_distance_yards),
                    units.distance_label()
                );
            }
        }
    }

    Ok(())
}

fn display_time_report(
    report: &TimeReport,
    bullet: FlightTime,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => {
            println!(
                "Distance:     {:.1} {}",
                report.distance,
                report.units.distance_label()
            );
            match bullet {
                FlightTime::Valid(t) => println!("Bullet time:  {:.4} s", t),
                FlightTime::Unreachable => {
                    println!("Bullet time:  unreachable (bullet stops short)")
                }
            }
            println!("Sound time:   {:.4} s", report.sound_time_s);
            match report.total_time_s {
                Some(t) => println!("Total time:   {:.4} s", t),
                None => println!("Total time:   n/a"),
            }
        }
    }

    Ok(())
}
