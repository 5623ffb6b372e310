//! Export helpers for chart series, CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write artifact: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

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

pub mod chart {
    use std::io::Write;

    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use ferry_core::ClockTime;
    use ferry_core::units::round2;
    use ferry_planner::DayPlan;
    use serde::Serialize;

    use crate::ExportError;

    const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// One plotted series: parallel x (timestamps) and y (kWh) vectors.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct ChartSeries {
        pub name: String,
        pub x: Vec<String>,
        pub y: Vec<f64>,
    }

    /// Trajectory plus the ceiling and buffer reference lines.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct ChartData {
        pub trajectory: ChartSeries,
        pub ceiling: ChartSeries,
        pub buffer: ChartSeries,
    }

    /// Timestamp of `time` on `date`, rolling into the next day past midnight.
    pub fn timestamp(date: NaiveDate, time: ClockTime) -> NaiveDateTime {
        date.and_time(chrono::NaiveTime::MIN) + Duration::minutes(i64::from(time.minutes()))
    }

    fn format_at(date: NaiveDate, hour: u32, minute: u32, second: u32) -> String {
        date.and_hms_opt(hour, minute, second)
            .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Build the chart series for `plan`, placing every sample on `date`.
    pub fn chart_data(plan: &DayPlan, date: NaiveDate) -> ChartData {
        let samples = &plan.trajectory.samples;
        let trajectory = ChartSeries {
            name: "Battery capacity".to_string(),
            x: samples
                .iter()
                .map(|s| timestamp(date, s.time).format(TIMESTAMP_FORMAT).to_string())
                .collect(),
            y: samples.iter().map(|s| s.battery_capacity_kwh).collect(),
        };

        let ceiling_kwh = plan.ceiling_kwh();
        let ceiling = ChartSeries {
            name: format!(
                "{}% capacity",
                round2(plan.route.max_fast_charging_fraction * 100.0)
            ),
            x: vec![format_at(date, 0, 0, 0), format_at(date, 23, 59, 0)],
            y: vec![ceiling_kwh, ceiling_kwh],
        };

        let buffer_kwh = plan.sizing.rounded().buffer_capacity_kwh;
        let buffer = ChartSeries {
            name: "Buffer capacity".to_string(),
            x: vec![format_at(date, 0, 0, 0), format_at(date, 23, 59, 59)],
            y: vec![buffer_kwh, buffer_kwh],
        };

        ChartData {
            trajectory,
            ceiling,
            buffer,
        }
    }

    /// Write the chart series alone as pretty JSON.
    pub fn write_series<W: Write>(
        writer: W,
        plan: &DayPlan,
        date: NaiveDate,
    ) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(writer, &chart_data(plan, date))?;
        Ok(())
    }
}

pub mod trajectory {
    use std::io::Write;

    use ferry_trajectory::{SampleKind, TrajectorySample};
    use serde::Serialize;

    use crate::ExportError;

    #[derive(Serialize)]
    struct Row {
        time: String,
        battery_capacity_kwh: f64,
        port: u8,
        kind: SampleKind,
    }

    /// Write samples as CSV with a `time,battery_capacity_kwh,port,kind` header.
    pub fn write_csv<W: Write>(writer: W, samples: &[TrajectorySample]) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for sample in samples {
            csv.serialize(Row {
                time: sample.time.to_string(),
                battery_capacity_kwh: sample.battery_capacity_kwh,
                port: sample.port.number(),
                kind: sample.kind,
            })?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub mod summary {
    use std::io::Write;

    use ferry_planner::DayPlan;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use crate::ExportError;
    use crate::chart::{ChartData, chart_data};

    /// Displayed scalars for one plan, rounded to two decimals.
    #[derive(Debug, Clone, Serialize)]
    pub struct PlanSummary<'a> {
        pub ferry_name: &'a str,
        pub battery_capacity_kwh: f64,
        pub buffer_capacity_kwh: f64,
        pub per_trip_energy_kwh: f64,
        pub surplus_trimmed_kwh: f64,
        pub charge_sessions: usize,
    }

    impl<'a> PlanSummary<'a> {
        pub fn from_plan(plan: &'a DayPlan) -> Self {
            let sizing = plan.sizing.rounded();
            Self {
                ferry_name: &plan.ferry_name,
                battery_capacity_kwh: sizing.total_battery_capacity_kwh,
                buffer_capacity_kwh: sizing.buffer_capacity_kwh,
                per_trip_energy_kwh: sizing.per_trip_energy_kwh,
                surplus_trimmed_kwh: plan.trajectory.surplus_trimmed_kwh,
                charge_sessions: plan.trajectory.charge_sessions(),
            }
        }
    }

    #[derive(Serialize)]
    struct Report<'a> {
        #[serde(flatten)]
        summary: PlanSummary<'a>,
        chart: ChartData,
    }

    /// Write the summary scalars as pretty JSON.
    pub fn write_summary<W: Write>(writer: W, plan: &DayPlan) -> Result<(), ExportError> {
        to_writer_pretty(writer, &PlanSummary::from_plan(plan))?;
        Ok(())
    }

    /// Write the summary scalars together with the chart series as pretty JSON.
    pub fn write_report<W: Write>(
        writer: W,
        plan: &DayPlan,
        date: chrono::NaiveDate,
    ) -> Result<(), ExportError> {
        let report = Report {
            summary: PlanSummary::from_plan(plan),
            chart: chart_data(plan, date),
        };
        to_writer_pretty(writer, &report)?;
        Ok(())
    }
}
