use crate::workflow::runner::{RcsComparison, TargetReport};
use anyhow::Context;
use ndarray::Array2;
use radarcov::{CoverageGrid, CoverageSample};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Which angles a coverage file carries per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageColumns {
    Azimuth,
    Elevation,
    AzimuthElevation,
}

impl CoverageColumns {
    fn header(&self) -> &'static str {
        match self {
            CoverageColumns::Azimuth => "azimuth_deg,gain_db,max_range_km,status",
            CoverageColumns::Elevation => "elevation_deg,gain_db,max_range_km,status",
            CoverageColumns::AzimuthElevation => {
                "azimuth_deg,elevation_deg,gain_db,max_range_km,status"
            }
        }
    }
}

fn optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", precision, v),
        _ => String::new(),
    }
}

/// Writes coverage rows. Points without a numeric range leave the range
/// column empty and say why in `status`.
pub fn write_coverage<W: Write>(
    writer: &mut W,
    title: &str,
    columns: CoverageColumns,
    samples: &[CoverageSample],
) -> std::io::Result<()> {
    writeln!(writer, "# {}", title)?;
    writeln!(writer, "# {}", columns.header())?;
    for sample in samples {
        let angles = match columns {
            CoverageColumns::Azimuth => format!("{}", sample.azimuth_deg),
            CoverageColumns::Elevation => format!("{}", sample.elevation_deg),
            CoverageColumns::AzimuthElevation => {
                format!("{},{}", sample.azimuth_deg, sample.elevation_deg)
            }
        };
        writeln!(
            writer,
            "{},{},{},{}",
            angles,
            optional(sample.gain_db, 2),
            optional(sample.max_range_km(), 3),
            sample.outcome.label()
        )?;
    }
    Ok(())
}

/// Writes one grid matrix: a header row of elevations, then one row per
/// azimuth. NaN cells are left empty.
pub fn write_grid_matrix<W: Write>(
    writer: &mut W,
    title: &str,
    grid: &CoverageGrid,
    values: &Array2<f64>,
) -> std::io::Result<()> {
    writeln!(writer, "# {}", title)?;
    let header: Vec<String> = grid
        .elevations_deg()
        .iter()
        .map(|el| el.to_string())
        .collect();
    writeln!(writer, "azimuth_deg,{}", header.join(","))?;
    for (azimuth_deg, row) in grid.azimuths_deg().iter().zip(values.rows()) {
        let cells: Vec<String> = row.iter().map(|&v| optional(Some(v), 3)).collect();
        writeln!(writer, "{},{}", azimuth_deg, cells.join(","))?;
    }
    Ok(())
}

pub fn write_targets<W: Write>(writer: &mut W, reports: &[TargetReport]) -> std::io::Result<()> {
    writeln!(writer, "# specific target analysis")?;
    writeln!(
        writer,
        "# target,range_km,azimuth_deg,elevation_deg,rcs_m2,gain_db,received_dbm,snr_db,detectable"
    )?;
    for (index, report) in reports.iter().enumerate() {
        let target = &report.target;
        let budget = match &report.budget {
            Ok(budget) => format!(
                "{:.2},{:.2},{:.2},{}",
                budget.gain_db, budget.received_power_dbm, budget.snr_db, budget.detectable
            ),
            Err(_) => ",,,invalid".to_string(),
        };
        writeln!(
            writer,
            "T{},{:.1},{},{},{},{}",
            index + 1,
            target.range_m / 1000.0,
            target.azimuth_deg,
            target.elevation_deg,
            target.rcs_m2,
            budget
        )?;
    }
    Ok(())
}

pub fn write_rcs_comparison<W: Write>(
    writer: &mut W,
    comparisons: &[RcsComparison],
) -> std::io::Result<()> {
    writeln!(writer, "# maximum range versus rcs")?;
    writeln!(writer, "# azimuth_deg,rcs_m2,max_range_km,status")?;
    for comparison in comparisons {
        for sample in &comparison.samples {
            writeln!(
                writer,
                "{},{},{},{}",
                comparison.azimuth_deg,
                sample.rcs_m2,
                optional(sample.max_range_km(), 1),
                sample.outcome.label()
            )?;
        }
    }
    Ok(())
}

/// Creates `path` (and its parent directories) and hands a buffered writer
/// to `write`.
pub fn write_file<F>(path: &Path, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("creating report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).with_context(|| format!("writing report {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing report {}", path.display()))?;
    Ok(())
}
