use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;
use ferry_battery_planner::config::{load_input, save_input};
use ferry_battery_planner::export::{self, chart, summary, trajectory as export_trajectory};
use ferry_battery_planner::planner::{self, from_input};
use ferry_battery_planner::{logging, plan_day};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Size an electric ferry battery and simulate its state of charge over a day"
)]
struct Cli {
    /// Input record (JSON, YAML or TOML by extension)
    #[arg(long)]
    input: PathBuf,

    /// Write the trajectory as CSV (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write summary scalars and chart series as JSON (`-` for stdout)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write only the rounded summary scalars as JSON (`-` for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Write only the chart series as JSON (`-` for stdout)
    #[arg(long)]
    series: Option<PathBuf>,

    /// Re-export the input record as JSON
    #[arg(long)]
    save_input: Option<PathBuf>,

    /// Calendar day for chart timestamps (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Only size the battery, skip the trajectory simulation
    #[arg(long, default_value_t = false)]
    size_only: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let input = load_input(&cli.input)?;

    if let Some(path) = &cli.save_input {
        save_input(path, &input)?;
        tracing::info!(path = %path.display(), "exported input record");
    }

    if cli.size_only {
        let (route, _) = from_input(&input)?;
        let sizing = planner::size(&route)?.rounded();
        println!("=== Battery Sizing ===");
        println!("Ferry            : {}", input.ferry_name);
        println!("Battery capacity : {:.2} kWh", sizing.total_battery_capacity_kwh);
        println!("Buffer capacity  : {:.2} kWh", sizing.buffer_capacity_kwh);
        println!("Per-trip energy  : {:.2} kWh", sizing.per_trip_energy_kwh);
        return Ok(());
    }

    let plan = plan_day(&input)?;
    let sizing = plan.sizing.rounded();

    println!("=== Battery Plan ===");
    println!("Ferry            : {}", plan.ferry_name);
    println!("Battery capacity : {:.2} kWh", sizing.total_battery_capacity_kwh);
    println!("Buffer capacity  : {:.2} kWh", sizing.buffer_capacity_kwh);
    println!("Per-trip energy  : {:.2} kWh", sizing.per_trip_energy_kwh);
    println!(
        "Charging         : {} session(s), {:.2} kWh surplus trimmed",
        plan.trajectory.charge_sessions(),
        plan.trajectory.surplus_trimmed_kwh
    );
    println!();
    for sample in &plan.trajectory.samples {
        println!(
            "{}  {:>10.2} kWh  port {}  {:?}",
            sample.time, sample.battery_capacity_kwh, sample.port, sample.kind
        );
    }

    if let Some(path) = &cli.csv {
        let writer = export::writer_for_path(path)?;
        export_trajectory::write_csv(writer, &plan.trajectory.samples)?;
    }

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    if let Some(path) = &cli.summary {
        let mut writer = export::writer_for_path(path)?;
        summary::write_summary(&mut writer, &plan)?;
        writer.flush()?;
    }

    if let Some(path) = &cli.series {
        let mut writer = export::writer_for_path(path)?;
        chart::write_series(&mut writer, &plan, date)?;
        writer.flush()?;
    }

    if let Some(path) = &cli.report {
        let mut writer = export::writer_for_path(path)?;
        summary::write_report(&mut writer, &plan, date)?;
        writer.flush()?;
    }

    Ok(())
}
