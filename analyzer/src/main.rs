use anyhow::Context;
use clap::{Parser, ValueEnum};
use generator::pattern::PatternConfig;
use gui_bridge::bridge::{default_bind_address, CoverageBridge};
use gui_bridge::model::CoverageView;
use report::csv::{
    write_coverage, write_file, write_grid_matrix, write_rcs_comparison, write_targets,
    CoverageColumns,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::AnalysisConfig;
use workflow::runner::{AnalysisReport, Runner};

mod generator;
mod gui_bridge;
mod report;
mod workflow;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PatternKind {
    Constant,
    Gaussian,
    Sinc,
    Table,
}

impl PatternKind {
    fn to_config(self) -> PatternConfig {
        match self {
            PatternKind::Constant => PatternConfig::Constant { offset_db: 0.0 },
            PatternKind::Gaussian => PatternConfig::Gaussian { floor_db: -40.0 },
            PatternKind::Sinc => PatternConfig::Sinc { floor_db: -40.0 },
            PatternKind::Table => PatternConfig::Table {
                azimuth: Vec::new(),
                elevation: Vec::new(),
            },
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Radar detection coverage analysis")]
struct Args {
    /// Load the analysis config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Synthetic antenna pattern when no config file is given
    #[arg(long, value_enum, default_value_t = PatternKind::Gaussian)]
    pattern: PatternKind,
    #[arg(long, default_value_t = 1.0)]
    rcs: f64,
    #[arg(long, default_value_t = 5.0)]
    azimuth_step: f64,
    #[arg(long, default_value_t = 5.0)]
    elevation_step: f64,
    /// Directory receiving the CSV reports
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Evaluate the 2-D grid on all cores
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Keep the HTTP bridge alive after the analysis
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long)]
    bind: Option<SocketAddr>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = args.config {
        AnalysisConfig::load(path)?
    } else {
        AnalysisConfig::from_args(
            args.pattern.to_config(),
            args.rcs,
            args.azimuth_step,
            args.elevation_step,
        )
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.parallel |= args.parallel;

    let runner = Runner::new(config.clone()).context("preparing coverage analysis")?;
    print_radar(&config);

    let report = runner.execute()?;
    print_summary(&report);
    write_reports(&config, &report)?;

    if args.serve {
        let bridge = CoverageBridge::new(
            Arc::new(runner),
            args.bind.unwrap_or_else(default_bind_address),
        );
        bridge.publish(CoverageView::new(Some("2d coverage".to_string()), report.grid))?;
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

fn print_radar(config: &AnalysisConfig) {
    let radar = &config.radar;
    println!("Radar system parameters:");
    println!("  transmit power: {} MW", radar.transmit_power_w / 1.0e6);
    println!("  frequency: {} GHz", radar.frequency_hz / 1.0e9);
    println!("  reference gain: {} dB", radar.reference_gain_db);
    println!("  system loss: {} dB", radar.system_loss_db);
    println!("  detection threshold: {} dB", radar.detection_threshold_db);
}

fn range_text(sample: &radarcov::CoverageSample) -> String {
    match sample.max_range_km() {
        Some(km) => format!("{:.2}", km),
        None => sample.outcome.label().to_string(),
    }
}

fn print_summary(report: &AnalysisReport) {
    println!("\nAzimuth coverage (every 20 deg):");
    for sample in report
        .azimuth_cut
        .iter()
        .filter(|s| s.azimuth_deg.rem_euclid(20.0) == 0.0)
    {
        println!(
            "  az {:>7.1}  gain {:>8}  max range {} km",
            sample.azimuth_deg,
            sample
                .gain_db
                .map(|g| format!("{:.2}", g))
                .unwrap_or_else(|| "-".to_string()),
            range_text(sample)
        );
    }

    let stats = &report.grid_stats;
    println!(
        "\n2-D coverage: {} points, {} valid, {} invalid, {} not detectable, {} above ceiling",
        stats.total, stats.valid, stats.invalid, stats.not_detectable, stats.exceeds_ceiling
    );
    if let (Some(best), Some(worst)) = (&stats.best, &stats.worst) {
        println!(
            "  best {} km at ({}, {}), worst {} km at ({}, {})",
            range_text(best),
            best.azimuth_deg,
            best.elevation_deg,
            range_text(worst),
            worst.azimuth_deg,
            worst.elevation_deg
        );
    }

    let reach = report
        .coverage_grid
        .azimuth_envelope_km()
        .iter()
        .copied()
        .filter(|km| !km.is_nan())
        .fold(f64::NAN, f64::max);
    if !reach.is_nan() {
        println!("  longest reach over any elevation: {:.2} km", reach);
    }

    println!("\nSpecific targets:");
    for (index, target) in report.targets.iter().enumerate() {
        match &target.budget {
            Ok(budget) => println!(
                "  T{} {:.1} km  snr {:.2} dB  received {:.2} dBm  detectable {}",
                index + 1,
                target.target.range_m / 1000.0,
                budget.snr_db,
                budget.received_power_dbm,
                budget.detectable
            ),
            Err(err) => println!("  T{} failed: {}", index + 1, err),
        }
    }

    println!("\nMain beam gain: {:.2} dB", report.main_beam_gain_db);
    for comparison in &report.rcs_comparison {
        let ranges: Vec<String> = comparison
            .samples
            .iter()
            .map(|s| format!("{} m2 -> {}", s.rcs_m2, range_text(s)))
            .collect();
        println!("  az {:>6.1}: {}", comparison.azimuth_deg, ranges.join(", "));
    }
}

fn write_reports(config: &AnalysisConfig, report: &AnalysisReport) -> anyhow::Result<()> {
    let dir = &config.output_dir;
    write_file(&dir.join("azimuth_coverage.csv"), |w| {
        write_coverage(w, "azimuth coverage", CoverageColumns::Azimuth, &report.azimuth_cut)
    })?;
    write_file(&dir.join("elevation_coverage.csv"), |w| {
        write_coverage(
            w,
            "elevation coverage",
            CoverageColumns::Elevation,
            &report.elevation_cut,
        )
    })?;
    write_file(&dir.join("2d_coverage.csv"), |w| {
        write_coverage(
            w,
            "2-D coverage",
            CoverageColumns::AzimuthElevation,
            &report.grid,
        )
    })?;
    write_file(&dir.join("2d_range_matrix.csv"), |w| {
        write_grid_matrix(
            w,
            "maximum range (km), rows azimuth_deg, columns elevation_deg",
            &report.coverage_grid,
            report.coverage_grid.max_range_km(),
        )
    })?;
    write_file(&dir.join("2d_gain_matrix.csv"), |w| {
        write_grid_matrix(
            w,
            "antenna gain (dB), rows azimuth_deg, columns elevation_deg",
            &report.coverage_grid,
            report.coverage_grid.gain_db(),
        )
    })?;
    write_file(&dir.join("targets.csv"), |w| write_targets(w, &report.targets))?;
    write_file(&dir.join("rcs_comparison.csv"), |w| {
        write_rcs_comparison(w, &report.rcs_comparison)
    })?;
    println!("\nReports written to {}", dir.display());
    Ok(())
}
