//! Three-panel PNG chart of a simulation run.

use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::simulation::EnergyResult;

const ORANGE: RGBColor = RGBColor(230, 140, 20);

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to prepare output path: {0}")]
    Io(#[from] std::io::Error),
    #[error("drawing failed: {0}")]
    Drawing(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(err.to_string())
    }
}

struct Panel<'a> {
    caption: &'a str,
    y_desc: &'a str,
    label: &'a str,
    values: &'a [f64],
    color: RGBColor,
    fill_label: Option<String>,
}

/// Render velocity, recovered power (filled, annotated with energy), and efficiency stacked vertically.
pub fn render_chart(result: &EnergyResult, output: &Path, size: (u32, u32)) -> Result<(), PlotError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let root = BitMapBackend::new(output, size).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((3, 1));
    let times = result.grid.samples();
    let font = select_font_family();

    let panels = [
        Panel {
            caption: "Velocity over time",
            y_desc: "Velocity (m/s)",
            label: "Velocity (v)",
            values: &result.trajectory.velocity_m_s,
            color: BLUE,
            fill_label: None,
        },
        Panel {
            caption: "Energy recovery over time",
            y_desc: "Power (W)",
            label: "Power (P)",
            values: &result.trajectory.power_w,
            color: ORANGE,
            fill_label: Some(format!("Energy = {:.0} kJ", result.energy_kj())),
        },
        Panel {
            caption: "System efficiency over time",
            y_desc: "Efficiency",
            label: "Efficiency (η)",
            values: &result.trajectory.efficiency,
            color: GREEN,
            fill_label: None,
        },
    ];

    for (area, panel) in areas.iter().zip(panels) {
        draw_panel(area, times, panel, font)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    times: &[f64],
    panel: Panel<'_>,
    font: FontFamily<'static>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let x_max = times.last().copied().unwrap_or(1.0).max(f64::EPSILON);
    let y_peak = panel.values.iter().copied().fold(0.0, f64::max);
    let y_max = if y_peak > 0.0 { y_peak * 1.05 } else { 1.0 };
    let label_font = FontDesc::new(font, 14.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(panel.caption, FontDesc::new(font, 20.0, FontStyle::Bold))
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc(panel.y_desc)
        .label_style(label_font.clone())
        .axis_desc_style(label_font.clone())
        .draw()?;

    let points: Vec<(f64, f64)> = times
        .iter()
        .copied()
        .zip(panel.values.iter().copied())
        .collect();
    let color = panel.color;

    if let Some(fill_label) = panel.fill_label {
        chart
            .draw_series(AreaSeries::new(
                points.iter().copied(),
                0.0,
                color.mix(0.3).filled(),
            ))?
            .label(fill_label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.mix(0.3).filled())
            });
    }

    chart
        .draw_series(LineSeries::new(points, color.stroke_width(2)))?
        .label(panel.label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], color.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;

    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}
