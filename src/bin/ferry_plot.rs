use std::fs;
use std::path::PathBuf;

use clap::Parser;
use ferry_battery_planner::config::load_input;
use ferry_battery_planner::trajectory::TrajectorySample;
use ferry_battery_planner::{logging, plan_day};
use plotters::prelude::*;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render the battery capacity trajectory of a planned day as PNG"
)]
struct Cli {
    /// Input record (JSON, YAML or TOML by extension)
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "artifacts/battery.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 700)]
    height: u32,
    /// First hour shown on the time axis
    #[arg(long, default_value_t = 4.0)]
    from_hour: f64,
}

const LAST_HOUR: f64 = 23.0 + 59.0 / 60.0;

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let input = load_input(&cli.input)?;
    let plan = plan_day(&input)?;

    let samples = &plan.trajectory.samples;
    let points: Vec<(f64, f64)> = samples.iter().map(sample_point).collect();
    let ceiling = plan.ceiling_kwh();
    let buffer = plan.sizing.rounded().buffer_capacity_kwh;

    let x_start = cli.from_hour.clamp(0.0, LAST_HOUR - 1.0);
    let x_end = points
        .iter()
        .map(|(x, _)| *x)
        .fold(LAST_HOUR, f64::max);
    let y_top = points
        .iter()
        .map(|(_, y)| *y)
        .fold(ceiling, f64::max)
        * 1.1;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 14.0, FontStyle::Normal);

    let caption = if plan.ferry_name.is_empty() {
        "Battery Capacity Over Time".to_string()
    } else {
        format!("{}: Battery Capacity Over Time", plan.ferry_name)
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, caption_font)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_start..x_end, 0.0..y_top)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Time")
        .y_desc("Battery Capacity (kWh)")
        .label_style(label_font.clone())
        .x_labels(((x_end - x_start).ceil() as usize).max(2))
        .x_label_formatter(&|h| fmt_hour_label(*h))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    let trajectory_color = RGBColor(0, 123, 255);
    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            ShapeStyle::from(&trajectory_color).stroke_width(3),
        ))?
        .label("Battery capacity")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], trajectory_color.stroke_width(3))
        });
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 4, trajectory_color.filled())),
    )?;

    chart
        .draw_series(LineSeries::new(
            vec![(x_start, ceiling), (x_end, ceiling)],
            ShapeStyle::from(&BLACK).stroke_width(2),
        ))?
        .label(format!(
            "{}% capacity",
            (plan.route.max_fast_charging_fraction * 100.0).round()
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            vec![(x_start, buffer), (x_end, buffer)],
            ShapeStyle::from(&RED).stroke_width(2),
        ))?
        .label("Buffer capacity")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    tracing::info!(path = %cli.output.display(), "rendered battery chart");
    Ok(())
}

fn sample_point(sample: &TrajectorySample) -> (f64, f64) {
    (
        f64::from(sample.time.minutes()) / 60.0,
        sample.battery_capacity_kwh,
    )
}

fn fmt_hour_label(hours: f64) -> String {
    let total = (hours * 60.0).round().max(0.0) as u32;
    format!("{:02}:{:02}", (total / 60) % 24, total % 60)
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
