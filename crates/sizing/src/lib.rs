//! Battery sizing from static route and engine parameters.

use ferry_core::units::round2;
use ferry_route::RouteConfig;
use serde::Serialize;
use thiserror::Error;

/// Derived battery dimensions for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizingResult {
    pub total_battery_capacity_kwh: f64,
    pub buffer_capacity_kwh: f64,
    pub per_trip_energy_kwh: f64,
}

impl SizingResult {
    /// The same dimensions at the two-decimal precision they are displayed and simulated at.
    pub fn rounded(&self) -> SizingResult {
        SizingResult {
            total_battery_capacity_kwh: round2(self.total_battery_capacity_kwh),
            buffer_capacity_kwh: round2(self.buffer_capacity_kwh),
            per_trip_energy_kwh: round2(self.per_trip_energy_kwh),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SizingError {
    #[error(
        "cannot size battery: fast-charge ceiling ({max_fast_charging_fraction}) must exceed buffer ({buffer_fraction})"
    )]
    InfeasibleSizing {
        buffer_fraction: f64,
        max_fast_charging_fraction: f64,
    },
    #[error("cannot size battery: a crossing must consume energy, got {per_trip_kwh} kWh")]
    NoTripEnergy { per_trip_kwh: f64 },
    #[error("cannot size battery: {field} evaluated to a non-finite value")]
    NonFinite { field: &'static str },
}

/// Energy to make one crossing: engine power held for the crossing time.
pub fn per_trip_energy_kwh(route: &RouteConfig) -> f64 {
    route.engine_capacity_kw * route.distance_nm / route.ferry_speed_knots
}

/// Size the battery so `max_non_stop_trips` crossings fit between the
/// fast-charge ceiling and the buffer.
pub fn size_battery(route: &RouteConfig) -> Result<SizingResult, SizingError> {
    let window = route.max_fast_charging_fraction - route.buffer_fraction;
    if !(window > 0.0) {
        return Err(SizingError::InfeasibleSizing {
            buffer_fraction: route.buffer_fraction,
            max_fast_charging_fraction: route.max_fast_charging_fraction,
        });
    }

    let per_trip = per_trip_energy_kwh(route);
    if !per_trip.is_finite() {
        return Err(SizingError::NonFinite {
            field: "per-trip energy",
        });
    }
    if per_trip <= 0.0 {
        return Err(SizingError::NoTripEnergy {
            per_trip_kwh: per_trip,
        });
    }
    let total = f64::from(route.max_non_stop_trips) * per_trip / window;
    if !total.is_finite() {
        return Err(SizingError::NonFinite {
            field: "total battery capacity",
        });
    }
    let buffer = total * route.buffer_fraction;

    tracing::info!(
        total_kwh = total,
        buffer_kwh = buffer,
        per_trip_kwh = per_trip,
        "sized battery"
    );

    Ok(SizingResult {
        total_battery_capacity_kwh: total,
        buffer_capacity_kwh: buffer,
        per_trip_energy_kwh: per_trip,
    })
}
