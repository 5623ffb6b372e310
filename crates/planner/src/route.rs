//! Conversion of the raw input record into typed route parameters and schedule.

use ferry_config::{FerryInput, ScheduleInput};
use ferry_core::ClockTime;
use ferry_core::units::percent_to_fraction;
use ferry_route::{Port, RouteConfig, Schedule, ScheduleEntry};
use thiserror::Error;

/// Reasons an input record cannot be planned.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must lie between 0 and 100 percent, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("maxNonStopTrips must be a whole number of at least 1, got {0}")]
    InvalidTrips(f64),
    #[error("schedule entry {index}: {reason}")]
    InvalidSchedule { index: usize, reason: String },
}

/// Parse and validate every field of `input`.
pub fn from_input(input: &FerryInput) -> Result<(RouteConfig, Schedule), InputError> {
    let engine_capacity_kw = parse_positive("engineCapacity", &input.engine_capacity)?;
    let ferry_speed_knots = parse_positive("ferrySpeed", &input.ferry_speed)?;
    let distance_nm = parse_positive("distance", &input.distance)?;
    let fast_charging_power_kw =
        parse_non_negative("fastChargingPower", &input.fast_charging_power)?;
    let buffer_fraction = parse_percent("bufferCapacity", &input.buffer_capacity)?;
    let max_fast_charging_fraction = parse_percent("maxFastCharging", &input.max_fast_charging)?;
    let max_non_stop_trips = parse_trips(&input.max_non_stop_trips)?;
    let min_fast_charge_time_minutes =
        parse_non_negative("minFastChargeTime", &input.min_fast_charge_time)?;

    let route = RouteConfig {
        engine_capacity_kw,
        ferry_speed_knots,
        distance_nm,
        buffer_fraction,
        max_fast_charging_fraction,
        max_non_stop_trips,
        fast_charging_power_kw,
        min_fast_charge_time_minutes,
        charge_at_port1: input.charge_at_port1,
        charge_at_port2: input.charge_at_port2,
    };

    let entries = input
        .schedules
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_entry(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((route, Schedule::new(entries)))
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_positive(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(InputError::NonPositive { field, value });
    }
    Ok(value)
}

fn parse_non_negative(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let value = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(value)
}

fn parse_percent(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let value = parse_number(field, raw)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(InputError::OutOfRange { field, value });
    }
    Ok(percent_to_fraction(value))
}

fn parse_trips(raw: &str) -> Result<u32, InputError> {
    let value = parse_number("maxNonStopTrips", raw)?;
    if value < 1.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(InputError::InvalidTrips(value));
    }
    Ok(value as u32)
}

fn parse_entry(index: usize, raw: &ScheduleInput) -> Result<ScheduleEntry, InputError> {
    let departure: ClockTime = raw
        .time
        .parse()
        .map_err(|err: ferry_core::time::ClockTimeError| InputError::InvalidSchedule {
            index,
            reason: err.to_string(),
        })?;
    let port = raw
        .port
        .as_number()
        .and_then(Port::from_number)
        .ok_or_else(|| InputError::InvalidSchedule {
            index,
            reason: format!("port must be 1 or 2, got {:?}", raw.port),
        })?;
    Ok(ScheduleEntry { departure, port })
}
