mod common;

use std::fs;

use common::{charging_input, reference_input};
use ferry_battery_planner::config::{
    PortValue, input_from_json, input_to_json, load_input, save_input,
};
use ferry_battery_planner::planner::{InputError, from_input};
use ferry_battery_planner::route::Port;
use ferry_battery_planner::{PlanError, plan_day};

#[test]
fn export_then_import_reproduces_record() {
    let original = charging_input();
    let json = input_to_json(&original).expect("serialize");
    let restored = input_from_json(&json).expect("deserialize");
    assert_eq!(restored, original);
}

#[test]
fn saved_file_reloads_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("ferryInputData.json");
    let original = reference_input();
    save_input(&path, &original).expect("save");
    assert_eq!(load_input(&path).expect("load"), original);
}

#[test]
fn export_uses_form_field_names() {
    let json = input_to_json(&reference_input()).expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    for key in [
        "ferryName",
        "engineCapacity",
        "ferrySpeed",
        "distance",
        "fastChargingPower",
        "bufferCapacity",
        "maxFastCharging",
        "maxNonStopTrips",
        "chargeAtPort1",
        "chargeAtPort2",
        "schedules",
        "minFastChargeTime",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["schedules"][0]["time"], "06:00");
    assert_eq!(value["schedules"][0]["port"], 1);
}

#[test]
fn numbers_and_text_ports_are_accepted() {
    let json = r#"{
        "ferryName": "Mixed",
        "engineCapacity": 500,
        "ferrySpeed": 10.5,
        "distance": "5",
        "fastChargingPower": "600",
        "bufferCapacity": "20",
        "maxFastCharging": "80",
        "maxNonStopTrips": 4,
        "chargeAtPort1": true,
        "chargeAtPort2": false,
        "schedules": [{ "time": "07:15", "port": "2" }],
        "minFastChargeTime": "15"
    }"#;
    let input = input_from_json(json).expect("parse");
    assert_eq!(input.engine_capacity, "500");
    assert_eq!(input.ferry_speed, "10.5");
    assert_eq!(input.schedules[0].port, PortValue::Text("2".to_string()));

    let (route, schedule) = from_input(&input).expect("valid");
    assert_eq!(route.max_non_stop_trips, 4);
    assert!((route.buffer_fraction - 0.2).abs() < 1e-12);
    assert_eq!(schedule.entries()[0].port, Port::Two);
}

#[test]
fn yaml_and_toml_records_load() {
    let dir = tempfile::tempdir().expect("tempdir");

    let yaml_path = dir.path().join("ferry.yaml");
    fs::write(
        &yaml_path,
        "ferryName: Yaml Ferry\nengineCapacity: 500\nferrySpeed: 10\ndistance: 5\nfastChargingPower: 0\nbufferCapacity: 20\nmaxFastCharging: 80\nmaxNonStopTrips: 4\nschedules:\n  - time: \"06:00\"\n    port: 1\nminFastChargeTime: 0\n",
    )
    .expect("write yaml");
    let yaml = load_input(&yaml_path).expect("yaml");
    assert_eq!(yaml.ferry_name, "Yaml Ferry");
    assert!(!yaml.charge_at_port1);

    let toml_path = dir.path().join("ferry.toml");
    fs::write(
        &toml_path,
        "ferryName = \"Toml Ferry\"\nengineCapacity = \"500\"\nferrySpeed = 10\ndistance = 5\nfastChargingPower = 0\nbufferCapacity = 20\nmaxFastCharging = 80\nmaxNonStopTrips = 4\nminFastChargeTime = 0\n\n[[schedules]]\ntime = \"06:00\"\nport = 1\n",
    )
    .expect("write toml");
    let toml = load_input(&toml_path).expect("toml");
    assert_eq!(toml.engine_capacity, "500");

    let yaml_plan = plan_day(&yaml).expect("yaml plan");
    let toml_plan = plan_day(&toml).expect("toml plan");
    assert_eq!(
        yaml_plan.trajectory.samples,
        toml_plan.trajectory.samples
    );
}

#[test]
fn unparsable_numbers_are_invalid_input() {
    let mut input = reference_input();
    input.engine_capacity = "lots".to_string();
    match plan_day(&input) {
        Err(PlanError::Input(InputError::InvalidNumber { field, value })) => {
            assert_eq!(field, "engineCapacity");
            assert_eq!(value, "lots");
        }
        other => panic!("expected invalid number, got {other:?}"),
    }

    let mut input = reference_input();
    input.min_fast_charge_time = String::new();
    assert!(matches!(
        from_input(&input),
        Err(InputError::InvalidNumber {
            field: "minFastChargeTime",
            ..
        })
    ));
}

#[test]
fn invalid_schedule_entries_name_their_index() {
    let mut input = reference_input();
    input.schedules.push(common::departure("25:00", 1));
    assert!(matches!(
        from_input(&input),
        Err(InputError::InvalidSchedule { index: 1, .. })
    ));

    let mut input = reference_input();
    input.schedules.push(common::departure("10:00", 3));
    assert!(matches!(
        from_input(&input),
        Err(InputError::InvalidSchedule { index: 1, .. })
    ));
}

#[test]
fn trips_and_speed_are_validated() {
    let mut input = reference_input();
    input.max_non_stop_trips = "2.5".to_string();
    assert_eq!(from_input(&input).err(), Some(InputError::InvalidTrips(2.5)));

    let mut input = reference_input();
    input.max_non_stop_trips = "0".to_string();
    assert!(matches!(from_input(&input), Err(InputError::InvalidTrips(_))));

    let mut input = reference_input();
    input.ferry_speed = "0".to_string();
    assert!(matches!(
        from_input(&input),
        Err(InputError::NonPositive {
            field: "ferrySpeed",
            ..
        })
    ));

    let mut input = reference_input();
    input.buffer_capacity = "120".to_string();
    assert!(matches!(
        from_input(&input),
        Err(InputError::OutOfRange {
            field: "bufferCapacity",
            ..
        })
    ));
}

#[test]
fn infeasible_sizing_stops_before_simulation() {
    let mut input = reference_input();
    input.buffer_capacity = "80".to_string();
    assert!(matches!(plan_day(&input), Err(PlanError::Sizing(_))));
}

#[test]
fn non_physical_routes_are_invalid_input() {
    let mut input = reference_input();
    input.engine_capacity = "0".to_string();
    assert!(matches!(
        plan_day(&input),
        Err(PlanError::Input(InputError::NonPositive {
            field: "engineCapacity",
            ..
        }))
    ));

    let mut input = charging_input();
    input.distance = "-5".to_string();
    assert!(matches!(
        from_input(&input),
        Err(InputError::NonPositive {
            field: "distance",
            ..
        })
    ));

    let mut input = charging_input();
    input.fast_charging_power = "-600".to_string();
    assert!(matches!(
        from_input(&input),
        Err(InputError::Negative {
            field: "fastChargingPower",
            ..
        })
    ));

    let mut input = charging_input();
    input.min_fast_charge_time = "-1".to_string();
    assert!(matches!(
        from_input(&input),
        Err(InputError::Negative {
            field: "minFastChargeTime",
            ..
        })
    ));
}

#[test]
fn zero_charger_power_and_dwell_are_allowed() {
    let mut input = charging_input();
    input.fast_charging_power = "0".to_string();
    input.min_fast_charge_time = "0".to_string();
    let (route, _) = from_input(&input).expect("valid");
    assert_eq!(route.fast_charging_power_kw, 0.0);
    assert_eq!(route.min_fast_charge_time_minutes, 0.0);
}
