//! Route parameters, charging rules and the day's departure schedule.

use std::fmt;

use ferry_core::ClockTime;
use serde::Serialize;

/// One of the two terminals a ferry shuttles between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Port {
    One,
    Two,
}

impl Port {
    /// The terminal at the opposite end of the crossing.
    pub fn other(self) -> Port {
        match self {
            Port::One => Port::Two,
            Port::Two => Port::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Port::One => 1,
            Port::Two => 2,
        }
    }

    pub fn from_number(n: i64) -> Option<Port> {
        match n {
            1 => Some(Port::One),
            2 => Some(Port::Two),
            _ => None,
        }
    }
}

impl From<Port> for u8 {
    fn from(port: Port) -> u8 {
        port.number()
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Static ferry, route and charging parameters for a single run.
///
/// Percentages are stored as fractions (`0.2` for 20%).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteConfig {
    pub engine_capacity_kw: f64,
    pub ferry_speed_knots: f64,
    pub distance_nm: f64,
    pub buffer_fraction: f64,
    pub max_fast_charging_fraction: f64,
    pub max_non_stop_trips: u32,
    pub fast_charging_power_kw: f64,
    pub min_fast_charge_time_minutes: f64,
    pub charge_at_port1: bool,
    pub charge_at_port2: bool,
}

impl RouteConfig {
    /// Crossing time in hours.
    pub fn trip_duration_hours(&self) -> f64 {
        self.distance_nm / self.ferry_speed_knots
    }

    /// Whether a charger is available at `port`.
    pub fn charges_at(&self, port: Port) -> bool {
        match port {
            Port::One => self.charge_at_port1,
            Port::Two => self.charge_at_port2,
        }
    }
}

/// A scheduled departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub departure: ClockTime,
    pub port: Port,
}

/// The day's departures, always sorted by departure time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schedule(Vec<ScheduleEntry>);

impl Schedule {
    /// Build a schedule from entries in any order.
    ///
    /// The sort is stable, so departures sharing a time keep their input order.
    pub fn new(mut entries: Vec<ScheduleEntry>) -> Self {
        entries.sort_by_key(|entry| entry.departure);
        Self(entries)
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ScheduleEntry> for Schedule {
    fn from_iter<I: IntoIterator<Item = ScheduleEntry>>(iter: I) -> Self {
        Schedule::new(iter.into_iter().collect())
    }
}
