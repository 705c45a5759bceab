//! SVG charts of runtime, speedup and efficiency against process count

use crate::metrics::MetricsTable;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub const RUNTIME_CHART: &str = "runtime_vs_np.svg";
pub const SPEEDUP_CHART: &str = "speedup_vs_np.svg";
pub const EFFICIENCY_CHART: &str = "efficiency_vs_np.svg";

const CHART_SIZE: (u32, u32) = (800, 600);
const X_DESC: &str = "Number of MPI Processes";

/// Paths of the charts written by [`render_charts`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPaths {
    pub runtime: PathBuf,
    pub speedup: PathBuf,
    pub efficiency: PathBuf,
}

struct Series<'a> {
    title: &'a str,
    y_desc: &'a str,
    label: &'a str,
    points: Vec<(f64, f64)>,
    /// Drawn dashed for reference, e.g. ideal speedup
    reference: Option<(&'a str, Vec<(f64, f64)>)>,
}

/// Pad a degenerate or tight range so the plotted points are not on the frame
fn padded_range(values: impl Iterator<Item = f64> + Clone, floor_at_zero: bool) -> (f64, f64) {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = if max > min { max - min } else { max.abs().max(1.0) };
    let lo = if floor_at_zero { 0.0 } else { min - span * 0.1 };
    (lo, max + span * 0.1)
}

fn draw_chart(path: &Path, series: &Series<'_>) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut all_points = series.points.clone();
    if let Some((_, reference)) = &series.reference {
        all_points.extend(reference.iter().copied());
    }
    let (x_lo, x_hi) = padded_range(all_points.iter().map(|p| p.0), false);
    let (y_lo, y_hi) = padded_range(all_points.iter().map(|p| p.1), true);

    let mut chart = ChartBuilder::on(&root)
        .caption(series.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(series.y_desc)
        .draw()?;

    chart
        .draw_series(LineSeries::new(series.points.iter().copied(), &BLUE))?
        .label(series.label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart.draw_series(PointSeries::of_element(
        series.points.iter().copied(),
        4,
        &BLUE,
        &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style.filled()),
    ))?;

    if let Some((label, reference)) = &series.reference {
        chart
            .draw_series(DashedLineSeries::new(
                reference.iter().copied(),
                8,
                6,
                BLACK.into(),
            ))?
            .label(*label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write the three charts to `output_dir`, creating it if needed
pub fn render_charts(table: &MetricsTable, output_dir: &Path) -> Result<ChartPaths> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let np = |n: u32| f64::from(n);
    let rows = table.rows();

    let paths = ChartPaths {
        runtime: output_dir.join(RUNTIME_CHART),
        speedup: output_dir.join(SPEEDUP_CHART),
        efficiency: output_dir.join(EFFICIENCY_CHART),
    };

    draw_chart(
        &paths.runtime,
        &Series {
            title: "MPI Stencil Runtime Scaling",
            y_desc: "Runtime (s)",
            label: "Runtime (s)",
            points: rows
                .iter()
                .map(|r| (np(r.process_count), r.runtime_seconds))
                .collect(),
            reference: None,
        },
    )?;

    draw_chart(
        &paths.speedup,
        &Series {
            title: "MPI Stencil Speedup",
            y_desc: "Speedup",
            label: "Speedup",
            points: rows
                .iter()
                .map(|r| (np(r.process_count), r.speedup))
                .collect(),
            reference: Some((
                "Ideal speedup",
                rows.iter()
                    .map(|r| (np(r.process_count), r.ideal_speedup()))
                    .collect(),
            )),
        },
    )?;

    draw_chart(
        &paths.efficiency,
        &Series {
            title: "MPI Stencil Efficiency",
            y_desc: "Parallel Efficiency",
            label: "Efficiency",
            points: rows
                .iter()
                .map(|r| (np(r.process_count), r.efficiency))
                .collect(),
            reference: None,
        },
    )?;

    tracing::info!("charts saved in {}", output_dir.display());
    Ok(paths)
}
