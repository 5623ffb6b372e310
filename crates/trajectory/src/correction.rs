//! Backward pass removing charge the day does not need.

use ferry_core::ClockTime;
use ferry_core::units::round2;

use crate::{SampleKind, TrajectoryError, TrajectorySample};

/// Result of [`correct_surplus`].
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub samples: Vec<TrajectorySample>,
    /// Total charge removed across all trimmed sessions.
    pub trimmed_kwh: f64,
}

/// Trim charging sessions, latest first, until the final sample sits on `buffer_kwh`.
///
/// A session is any sample whose capacity rises above its predecessor. Each
/// trim is capped at that session's contribution and shifts every later
/// sample down by the same amount; the session's end time moves earlier to
/// match the smaller charge at `charging_power_kw`. The input is left untouched.
pub fn correct_surplus(
    forward: &[TrajectorySample],
    buffer_kwh: f64,
    charging_power_kw: f64,
) -> Result<Correction, TrajectoryError> {
    let Some(last) = forward.last() else {
        return Err(TrajectoryError::EmptySchedule);
    };

    let surplus = round2(last.battery_capacity_kwh - buffer_kwh);
    if surplus < 0.0 {
        return Err(TrajectoryError::InfeasibleTrajectory {
            final_capacity_kwh: last.battery_capacity_kwh,
            buffer_kwh,
            stranded: None,
        });
    }

    let mut adjusted = forward.to_vec();
    let mut remaining = surplus;

    for i in (1..adjusted.len()).rev() {
        if remaining <= 0.0 {
            break;
        }
        let before = adjusted[i - 1];
        let charge = adjusted[i].battery_capacity_kwh - before.battery_capacity_kwh;
        if charge <= 0.0 {
            continue;
        }

        let trim = charge.min(remaining);
        for sample in &mut adjusted[i..] {
            sample.battery_capacity_kwh = round2(sample.battery_capacity_kwh - trim);
        }
        if charging_power_kw > 0.0 {
            let kept = adjusted[i].battery_capacity_kwh - before.battery_capacity_kwh;
            adjusted[i].time = before.time.add_hours(kept / charging_power_kw);
        }
        remaining = round2(remaining - trim);

        tracing::debug!(
            at = %adjusted[i].time,
            trimmed_kwh = trim,
            remaining_kwh = remaining,
            "trimmed charge session"
        );
    }

    Ok(Correction {
        samples: adjusted,
        trimmed_kwh: round2(surplus - remaining),
    })
}

/// Prepend a midnight sample mirroring the first real sample.
pub fn anchor_at_midnight(samples: Vec<TrajectorySample>) -> Vec<TrajectorySample> {
    let Some(first) = samples.first().copied() else {
        return samples;
    };
    let mut anchored = Vec::with_capacity(samples.len() + 1);
    anchored.push(TrajectorySample {
        time: ClockTime::MIDNIGHT,
        kind: SampleKind::Anchor,
        ..first
    });
    anchored.extend(samples);
    anchored
}
