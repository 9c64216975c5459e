use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use regen_brake_calculator::config::load_vehicle_configs;
use regen_brake_calculator::dynamics::{BrakingSchedule, LinearRamp, VehicleParameters};
use regen_brake_calculator::export::{summary, trajectory, writer_for_path};
use regen_brake_calculator::logging::init_logging;
use regen_brake_calculator::plot::render_chart;
use regen_brake_calculator::recovery::EfficiencyCurve;
use regen_brake_calculator::report::{render_summary, run_summary, trajectory_records};
use regen_brake_calculator::scenario::{Scenario, vehicle};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Estimate the energy recovered by regenerative braking"
)]
struct Cli {
    /// Scenario file (YAML or TOML); replaces the vehicle, braking, and horizon flags
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Vehicle catalog: a directory of vehicle files or a YAML list; replaces the vehicle flags
    #[arg(long, conflicts_with = "scenario")]
    vehicles: Option<PathBuf>,

    /// Catalog entry to use (case-insensitive); defaults to the first entry
    #[arg(long, requires = "vehicles")]
    vehicle: Option<String>,

    /// Vehicle mass (kg)
    #[arg(long, default_value_t = 1000.0)]
    mass: f64,

    /// Initial velocity (m/s)
    #[arg(long, default_value_t = 20.0)]
    v0: f64,

    /// Peak braking force at t = 0, ramping linearly to zero at the horizon (N)
    #[arg(long, default_value_t = 3000.0)]
    peak_force: f64,

    /// Aerodynamic drag coefficient
    #[arg(long, default_value_t = 0.3)]
    cd: f64,

    /// Frontal area (m²)
    #[arg(long, default_value_t = 2.2)]
    area: f64,

    /// Road grade in degrees (negative for a downgrade)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    grade_deg: f64,

    /// Rolling-resistance coefficient
    #[arg(long, default_value_t = 0.015)]
    crr: f64,

    /// Simulation horizon (s)
    #[arg(long, default_value_t = 10.0)]
    t_max: f64,

    /// Number of time samples
    #[arg(long, default_value_t = 1000)]
    points: usize,

    /// Efficiency curve coefficient of v²
    #[arg(long, default_value_t = -0.005, allow_hyphen_values = true)]
    eff_a: f64,

    /// Efficiency curve coefficient of v
    #[arg(long, default_value_t = 0.1, allow_hyphen_values = true)]
    eff_b: f64,

    /// Efficiency curve constant term
    #[arg(long, default_value_t = 0.2, allow_hyphen_values = true)]
    eff_c: f64,

    /// Write the trajectory as CSV (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON run summary (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Render a three-panel PNG chart
    #[arg(long)]
    plot: Option<PathBuf>,

    #[arg(long, default_value_t = 1400)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json)?;

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => {
            let mut scenario = scenario_from_flags(&cli);
            if let Some(path) = &cli.vehicles {
                let catalog = load_vehicle_configs(path)?;
                let entry = vehicle::select(&catalog, cli.vehicle.as_deref())?;
                scenario.name = Some(entry.name.clone());
                scenario.vehicle = vehicle::from_config(entry);
            }
            scenario
        }
    };
    let result = scenario.run()?;

    let report = render_summary(&result, Some(scenario.vehicle.mass_kg));
    let stdout_taken = [&cli.csv, &cli.json]
        .iter()
        .any(|p| p.as_deref() == Some(Path::new("-")));
    if stdout_taken {
        eprint!("{report}");
    } else {
        print!("{report}");
    }

    if let Some(path) = &cli.csv {
        let mut writer = writer_for_path(path)?;
        trajectory::write_csv(writer.as_mut(), trajectory_records(&result))?;
    }

    if let Some(path) = &cli.json {
        let mut writer = writer_for_path(path)?;
        summary::write_json(writer.as_mut(), &run_summary(&result, &scenario))?;
    }

    if let Some(path) = &cli.plot {
        render_chart(&result, path, (cli.width, cli.height))?;
        eprintln!("Chart written to {}", path.display());
    }

    Ok(())
}

fn scenario_from_flags(cli: &Cli) -> Scenario {
    Scenario {
        name: None,
        vehicle: VehicleParameters::new(cli.mass, cli.cd, cli.area)
            .with_rolling_resistance(cli.crr)
            .with_grade_degrees(cli.grade_deg),
        initial_velocity_m_s: cli.v0,
        braking: BrakingSchedule::LinearRamp(LinearRamp::new(cli.peak_force, cli.t_max)),
        efficiency: EfficiencyCurve::new(cli.eff_a, cli.eff_b, cli.eff_c),
        t_max_s: cli.t_max,
        points: cli.points,
    }
}
