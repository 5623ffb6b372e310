#![allow(dead_code)]

use ferry_battery_planner::config::{FerryInput, PortValue, ScheduleInput};

/// 500 kW, 10 kn, 5 NM crossing sized for four non-stop trips.
pub fn reference_input() -> FerryInput {
    FerryInput {
        ferry_name: "Reference".to_string(),
        engine_capacity: "500".to_string(),
        ferry_speed: "10".to_string(),
        distance: "5".to_string(),
        fast_charging_power: "0".to_string(),
        buffer_capacity: "20".to_string(),
        max_fast_charging: "80".to_string(),
        max_non_stop_trips: "4".to_string(),
        charge_at_port1: false,
        charge_at_port2: false,
        schedules: vec![departure("06:00", 1)],
        min_fast_charge_time: "0".to_string(),
    }
}

/// Two non-stop trips, charging at port 2 only, four hourly departures.
pub fn charging_input() -> FerryInput {
    FerryInput {
        ferry_name: "Harbour Shuttle".to_string(),
        engine_capacity: "500".to_string(),
        ferry_speed: "10".to_string(),
        distance: "5".to_string(),
        fast_charging_power: "600".to_string(),
        buffer_capacity: "30".to_string(),
        max_fast_charging: "80".to_string(),
        max_non_stop_trips: "2".to_string(),
        charge_at_port1: false,
        charge_at_port2: true,
        // deliberately out of order
        schedules: vec![
            departure("09:00", 2),
            departure("06:00", 1),
            departure("08:00", 1),
            departure("07:00", 2),
        ],
        min_fast_charge_time: "10".to_string(),
    }
}

pub fn departure(time: &str, port: u8) -> ScheduleInput {
    ScheduleInput {
        time: time.to_string(),
        port: PortValue::from(port),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
