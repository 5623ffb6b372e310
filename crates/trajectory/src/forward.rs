//! Forward pass: drain per crossing, fast charge while docked.

use ferry_core::ClockTime;
use ferry_core::units::{minutes_to_hours, round2};
use ferry_route::{Port, RouteConfig, Schedule, ScheduleEntry};
use ferry_sizing::SizingResult;

use crate::{SampleKind, TrajectoryError, TrajectorySample};

/// A departure that was not sailed because the battery was already below buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroppedDeparture {
    pub entry: ScheduleEntry,
    pub capacity_kwh: f64,
}

/// Uncorrected trajectory produced by [`forward_pass`].
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrajectory {
    pub samples: Vec<TrajectorySample>,
    /// Running capacity after the last departure, including a stranded crossing.
    pub final_capacity_kwh: f64,
    /// First crossing that arrived below buffer, if any.
    pub stranded: Option<ScheduleEntry>,
    pub dropped: Vec<DroppedDeparture>,
}

/// Walk the schedule in time order and record the battery state around every crossing.
///
/// `sizing` is used as given; [`crate::simulate`] rounds it first. A departure
/// taken while the battery is below buffer is dropped: it consumes nothing,
/// emits nothing, and the walk moves on to the next entry.
pub fn forward_pass(
    route: &RouteConfig,
    sizing: &SizingResult,
    schedule: &Schedule,
) -> Result<ForwardTrajectory, TrajectoryError> {
    let entries = schedule.entries();
    if entries.is_empty() {
        return Err(TrajectoryError::EmptySchedule);
    }

    let start = ForwardTrajectory {
        samples: Vec::with_capacity(entries.len() * 3),
        final_capacity_kwh: sizing.total_battery_capacity_kwh,
        stranded: None,
        dropped: Vec::new(),
    };
    let leg = Leg { route, sizing };

    Ok(entries
        .iter()
        .enumerate()
        .fold(start, |state, (idx, entry)| {
            leg.sail(state, entry, entries.get(idx + 1))
        }))
}

/// Per-run constants shared by every crossing.
struct Leg<'a> {
    route: &'a RouteConfig,
    sizing: &'a SizingResult,
}

impl Leg<'_> {
    fn sail(
        &self,
        mut state: ForwardTrajectory,
        entry: &ScheduleEntry,
        next: Option<&ScheduleEntry>,
    ) -> ForwardTrajectory {
        let buffer = self.sizing.buffer_capacity_kwh;
        let capacity = state.final_capacity_kwh;

        if capacity < buffer {
            tracing::warn!(
                departure = %entry.departure,
                port = %entry.port,
                capacity_kwh = capacity,
                "dropping departure, battery below buffer"
            );
            state.dropped.push(DroppedDeparture {
                entry: *entry,
                capacity_kwh: capacity,
            });
            return state;
        }

        state.samples.push(TrajectorySample {
            time: entry.departure,
            battery_capacity_kwh: capacity,
            port: entry.port,
            kind: SampleKind::TripStart,
        });

        let arrival = entry.departure.add_hours(self.route.trip_duration_hours());
        let port = entry.port.other();
        let capacity = round2(capacity - self.sizing.per_trip_energy_kwh);
        state.final_capacity_kwh = capacity;

        if capacity < buffer {
            tracing::warn!(
                departure = %entry.departure,
                capacity_kwh = capacity,
                "crossing ends below buffer"
            );
            state.stranded.get_or_insert(*entry);
            return state;
        }

        state.samples.push(TrajectorySample {
            time: arrival,
            battery_capacity_kwh: capacity,
            port,
            kind: SampleKind::TripEnd,
        });

        if let Some(charged) = self.fast_charge(arrival, capacity, port, next) {
            state.final_capacity_kwh = charged.battery_capacity_kwh;
            state.samples.push(charged);
        }
        state
    }

    /// Charge session between `arrival` and the next scheduled departure, if one is warranted.
    fn fast_charge(
        &self,
        arrival: ClockTime,
        capacity: f64,
        port: Port,
        next: Option<&ScheduleEntry>,
    ) -> Option<TrajectorySample> {
        let route = self.route;
        let power = route.fast_charging_power_kw;
        let ceiling = route.max_fast_charging_fraction * self.sizing.total_battery_capacity_kwh;
        if !route.charges_at(port) || capacity >= ceiling || !(power > 0.0) {
            return None;
        }

        let next = next?;
        let dwell_minutes = arrival.minutes_until(next.departure) as f64;
        if dwell_minutes <= route.min_fast_charge_time_minutes {
            return None;
        }

        let reachable = round2(power * minutes_to_hours(dwell_minutes) + capacity);
        let target = reachable.min(round2(ceiling));
        let added = target - capacity;
        if added <= 0.0 {
            return None;
        }
        let end = arrival.add_hours(added / power);

        tracing::debug!(
            port = %port,
            from = %arrival,
            to = %end,
            added_kwh = added,
            "fast charge session"
        );

        Some(TrajectorySample {
            time: end,
            battery_capacity_kwh: target,
            port,
            kind: SampleKind::ChargeEnd,
        })
    }
}
