//! Battery state-of-charge trajectory over one operating day.
//!
//! The simulation runs in two stages. [`forward_pass`] walks the sorted
//! schedule, draining one crossing's energy per departure and fast charging
//! whenever the ferry docks at a charger with enough dwell time. Fast
//! charging greedily fills towards the ceiling, so [`correct_surplus`] then
//! walks the result backwards and trims the latest charging sessions until
//! the day ends exactly on the buffer.

pub mod correction;
pub mod forward;

pub use correction::{Correction, anchor_at_midnight, correct_surplus};
pub use forward::{DroppedDeparture, ForwardTrajectory, forward_pass};

use ferry_core::ClockTime;
use ferry_route::{Port, RouteConfig, Schedule, ScheduleEntry};
use ferry_sizing::SizingResult;
use serde::Serialize;
use thiserror::Error;

/// What produced a trajectory sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    /// Start-of-day point that pins the plot to midnight.
    Anchor,
    TripStart,
    TripEnd,
    ChargeEnd,
}

/// Battery state at one instant of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time: ClockTime,
    pub battery_capacity_kwh: f64,
    pub port: Port,
    pub kind: SampleKind,
}

/// Corrected trajectory for a feasible day.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Samples in time order, starting with the midnight anchor.
    pub samples: Vec<TrajectorySample>,
    /// Charge removed from the forward pass by the surplus correction.
    pub surplus_trimmed_kwh: f64,
}

impl Trajectory {
    /// Lowest capacity reached over the day.
    pub fn min_capacity_kwh(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.battery_capacity_kwh)
            .min_by(f64::total_cmp)
    }

    /// Number of fast-charging sessions still present after correction.
    pub fn charge_sessions(&self) -> usize {
        self.samples
            .windows(2)
            .filter(|pair| {
                pair[1].kind == SampleKind::ChargeEnd
                    && pair[1].battery_capacity_kwh > pair[0].battery_capacity_kwh
            })
            .count()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TrajectoryError {
    #[error("schedule has no departures")]
    EmptySchedule,
    #[error(
        "ferry cannot complete the schedule: capacity falls to {final_capacity_kwh:.2} kWh, below the {buffer_kwh:.2} kWh buffer{}",
        stranded_note(.stranded.as_ref())
    )]
    InfeasibleTrajectory {
        final_capacity_kwh: f64,
        buffer_kwh: f64,
        stranded: Option<ScheduleEntry>,
    },
}

fn stranded_note(entry: Option<&ScheduleEntry>) -> String {
    match entry {
        Some(entry) => format!(
            " after the {} departure from port {}",
            entry.departure, entry.port
        ),
        None => String::new(),
    }
}

/// Run both passes and anchor the result at midnight.
///
/// `sizing` is rounded to display precision before use. Fails without a
/// partial result when the schedule is empty or the ferry strands below
/// the buffer.
pub fn simulate(
    route: &RouteConfig,
    sizing: &SizingResult,
    schedule: &Schedule,
) -> Result<Trajectory, TrajectoryError> {
    let sizing = sizing.rounded();
    let forward = forward_pass(route, &sizing, schedule)?;

    if forward.final_capacity_kwh < sizing.buffer_capacity_kwh {
        return Err(TrajectoryError::InfeasibleTrajectory {
            final_capacity_kwh: forward.final_capacity_kwh,
            buffer_kwh: sizing.buffer_capacity_kwh,
            stranded: forward.stranded,
        });
    }

    let correction = correct_surplus(
        &forward.samples,
        sizing.buffer_capacity_kwh,
        route.fast_charging_power_kw,
    )?;

    Ok(Trajectory {
        samples: anchor_at_midnight(correction.samples),
        surplus_trimmed_kwh: correction.trimmed_kwh,
    })
}
