//! Planning façade: validate an input record, size the battery, simulate the day.

pub mod route;

use ferry_config::FerryInput;
use ferry_route::{RouteConfig, Schedule};
use ferry_sizing::{SizingError, SizingResult, size_battery};
use ferry_trajectory::{Trajectory, TrajectoryError, simulate};

pub use route::{InputError, from_input};

/// Everything a front-end needs to present one planned day.
#[derive(Debug, Clone)]
pub struct DayPlan {
    pub ferry_name: String,
    pub route: RouteConfig,
    pub schedule: Schedule,
    /// Unrounded sizing; use [`SizingResult::rounded`] for display.
    pub sizing: SizingResult,
    pub trajectory: Trajectory,
}

impl DayPlan {
    /// Fast-charge ceiling in kWh at display precision.
    pub fn ceiling_kwh(&self) -> f64 {
        self.route.max_fast_charging_fraction * self.sizing.rounded().total_battery_capacity_kwh
    }
}

/// Top-level planning error; each stage aborts before the next one runs.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    #[error("battery sizing failed: {0}")]
    Sizing(#[from] SizingError),
    #[error("trajectory simulation failed: {0}")]
    Trajectory(#[from] TrajectoryError),
}

/// Size the battery for a validated route.
pub fn size(route: &RouteConfig) -> Result<SizingResult, PlanError> {
    Ok(size_battery(route)?)
}

/// Run validation, sizing and simulation for one submitted record.
pub fn plan_day(input: &FerryInput) -> Result<DayPlan, PlanError> {
    let (route, schedule) = from_input(input)?;
    let sizing = size_battery(&route)?;
    let trajectory = simulate(&route, &sizing, &schedule)?;

    tracing::info!(
        ferry = %input.ferry_name,
        samples = trajectory.samples.len(),
        trimmed_kwh = trajectory.surplus_trimmed_kwh,
        "planned day"
    );

    Ok(DayPlan {
        ferry_name: input.ferry_name.clone(),
        route,
        schedule,
        sizing,
        trajectory,
    })
}
