use std::path::PathBuf;

use clap::{ArgAction, Parser};
use regen_brake_calculator::dynamics::VehicleParameters;
use regen_brake_calculator::export::{sweep, writer_for_path};
use regen_brake_calculator::logging::init_logging;
use regen_brake_calculator::recovery::EfficiencyCurve;
use regen_brake_calculator::sweep::sweep_peak_force;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sweep peak braking force and tabulate recovered energy"
)]
struct Cli {
    /// Peak braking forces to evaluate (N), comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    forces: Vec<f64>,

    #[arg(long, default_value_t = 1000.0)]
    mass: f64,

    #[arg(long, default_value_t = 20.0)]
    v0: f64,

    #[arg(long, default_value_t = 0.3)]
    cd: f64,

    #[arg(long, default_value_t = 2.2)]
    area: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    grade_deg: f64,

    #[arg(long, default_value_t = 0.015)]
    crr: f64,

    #[arg(long, default_value_t = 10.0)]
    t_max: f64,

    #[arg(long, default_value_t = 1000)]
    points: usize,

    /// Output CSV path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, false)?;

    if cli.forces.iter().any(|f| !f.is_finite() || *f < 0.0) {
        return Err(anyhow::anyhow!(
            "Peak braking forces must be non-negative numbers"
        ));
    }

    let params = VehicleParameters::new(cli.mass, cli.cd, cli.area)
        .with_rolling_resistance(cli.crr)
        .with_grade_degrees(cli.grade_deg);
    let points = sweep_peak_force(
        &params,
        cli.v0,
        &cli.forces,
        &EfficiencyCurve::default(),
        cli.t_max,
        cli.points,
    )?;

    let mut writer = writer_for_path(&cli.output)?;
    sweep::write_csv(
        writer.as_mut(),
        points.iter().map(|p| sweep::Record {
            peak_force_n: p.peak_force_n,
            total_energy_j: p.total_energy_j,
            final_velocity_m_s: p.final_velocity_m_s,
        }),
    )?;

    Ok(())
}
