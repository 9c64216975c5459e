//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trajectory {
    use std::io::{self, Write};

    const HEADER: &str = "time_s,velocity_m_s,braking_force_n,efficiency,power_w";

    /// Write the trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One grid sample of a simulated braking run.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub time_s: f64,
        pub velocity_m_s: f64,
        pub braking_force_n: f64,
        pub efficiency: f64,
        pub power_w: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.6},{:.6},{:.3},{:.6},{:.3}",
                self.time_s, self.velocity_m_s, self.braking_force_n, self.efficiency, self.power_w,
            )
        }
    }

    /// Write the header followed by every record, then flush.
    pub fn write_csv<I>(writer: &mut dyn Write, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = Record>,
    {
        write_header(writer)?;
        for record in records {
            record.write_to(writer)?;
        }
        writer.flush()
    }
}

pub mod sweep {
    use std::io::{self, Write};

    const HEADER: &str = "peak_force_n,total_energy_j,final_velocity_m_s";

    /// One row of a peak-force sweep.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub peak_force_n: f64,
        pub total_energy_j: f64,
        pub final_velocity_m_s: f64,
    }

    /// Write the sweep table as CSV, then flush.
    pub fn write_csv<I>(writer: &mut dyn Write, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = Record>,
    {
        writeln!(writer, "{}", HEADER)?;
        for r in records {
            writeln!(
                writer,
                "{:.3},{:.3},{:.6}",
                r.peak_force_n, r.total_energy_j, r.final_velocity_m_s
            )?;
        }
        writer.flush()
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    /// Efficiency coefficients echoed into the summary.
    #[derive(Debug, Clone, Copy, Serialize)]
    pub struct Coefficients {
        pub a: f64,
        pub b: f64,
        pub c: f64,
    }

    /// Scalar results of one simulation run.
    #[derive(Debug, Clone, Serialize)]
    pub struct RunSummary<'a> {
        pub scenario: Option<&'a str>,
        pub mass_kg: f64,
        pub initial_velocity_m_s: f64,
        pub final_velocity_m_s: f64,
        pub horizon_s: f64,
        pub points: usize,
        pub total_energy_j: f64,
        pub total_energy_kj: f64,
        pub peak_power_w: f64,
        pub initial_kinetic_energy_j: f64,
        pub recovery_ratio: f64,
        pub efficiency: Coefficients,
        pub accepted_steps: usize,
        pub rejected_steps: usize,
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json(writer: &mut dyn Write, summary: &RunSummary<'_>) -> io::Result<()> {
        to_writer_pretty(&mut *writer, summary)?;
        writeln!(writer)?;
        writer.flush()
    }
}
