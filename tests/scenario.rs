use std::fs;

use approx::assert_relative_eq;
use regen_brake_calculator::config::{
    BrakingConfig, ConfigError, load_scenario, load_vehicle_configs,
};
use regen_brake_calculator::dynamics::{BrakingSchedule, ConstantForce, LinearRamp, VehicleParameters};
use regen_brake_calculator::recovery::EfficiencyCurve;
use regen_brake_calculator::scenario::{Scenario, ScenarioError, vehicle};
use regen_brake_calculator::simulate;

#[test]
fn reference_yaml_scenario_round_trips_into_runtime_values() {
    let config = load_scenario("data/scenarios/reference.yaml").expect("reference yaml");
    assert_eq!(config.vehicle.mass_kg, 1000.0);
    assert_eq!(config.braking, BrakingConfig::LinearRamp { peak_force_n: 3000.0 });

    let scenario = Scenario::from_config(&config);
    assert_eq!(scenario.name.as_deref(), Some("Urban stop from 72 km/h"));
    assert_eq!(
        scenario.braking,
        BrakingSchedule::LinearRamp(LinearRamp::new(3000.0, 10.0))
    );
    assert_eq!(scenario.efficiency, EfficiencyCurve::default());
    assert_eq!(scenario.points, 1000);
}

#[test]
fn scenario_run_matches_direct_simulation() {
    let scenario = Scenario::load("data/scenarios/reference.yaml").expect("scenario");
    let from_file = scenario.run().expect("scenario run");
    let direct = simulate(
        &VehicleParameters::new(1000.0, 0.3, 2.2),
        20.0,
        &LinearRamp::new(3000.0, 10.0),
        &EfficiencyCurve::default(),
        10.0,
        1000,
    )
    .expect("direct run");
    assert_relative_eq!(
        from_file.total_energy_j,
        direct.total_energy_j,
        max_relative = 1e-12
    );
}

#[test]
fn toml_scenario_uses_defaults_for_omitted_sections() {
    let scenario = Scenario::load("data/scenarios/downhill.toml").expect("downhill toml");
    assert_eq!(
        scenario.braking,
        BrakingSchedule::Constant(ConstantForce { force_n: 2500.0 })
    );
    assert_eq!(scenario.efficiency, EfficiencyCurve::default());
    assert_relative_eq!(scenario.vehicle.grade_rad, (-4.0f64).to_radians());
    assert_eq!(scenario.vehicle.rolling_resistance_coefficient, 0.015);
    assert_eq!(scenario.vehicle.air_density_kg_m3, 1.225);

    let result = scenario.run().expect("downhill run");
    assert_eq!(result.grid.len(), 600);
    assert!(result.total_energy_j > 0.0);
    assert!(result.trajectory.velocity_m_s.iter().all(|&v| v >= 0.0));
}

#[test]
fn minimal_yaml_scenario_gets_default_horizon_and_efficiency() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("minimal.yaml");
    fs::write(
        &path,
        "vehicle:\n  name: Test\n  mass_kg: 900\n  drag_coefficient: 0.28\n  frontal_area_m2: 2.0\n\
         initial_velocity_m_s: 15\nbraking:\n  type: constant\n  force_n: 1200\n",
    )
    .expect("write yaml");

    let config = load_scenario(&path).expect("minimal yaml");
    assert_eq!(config.horizon.t_max_s, 10.0);
    assert_eq!(config.horizon.points, 1000);
    assert_eq!(config.efficiency.a, -0.005);
    assert!(config.name.is_none());
}

#[test]
fn malformed_scenario_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "initial_velocity_m_s = \"fast\"\n").expect("write toml");
    assert!(matches!(Scenario::load(&path), Err(ScenarioError::Config(_))));
}

#[test]
fn vehicle_catalog_loads_sorted_toml_directory() {
    let catalog = load_vehicle_configs("configs/vehicles").expect("vehicle catalog");
    let names: Vec<_> = catalog.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["Compact EV", "Electric SUV"]);

    let suv = vehicle::select(&catalog, Some("electric suv")).expect("case-insensitive select");
    assert_eq!(suv.mass_kg, 2400.0);
    let params = vehicle::from_config(suv);
    assert_eq!(params.rolling_resistance_coefficient, 0.012);
    assert_eq!(params.grade_rad, 0.0);

    let first = vehicle::select(&catalog, None).expect("default select");
    assert_eq!(first.name, "Compact EV");

    assert!(matches!(
        vehicle::select(&catalog, Some("Truck")),
        Err(ScenarioError::VehicleNotFound(name)) if name == "Truck"
    ));
    assert!(matches!(
        vehicle::select(&[], None),
        Err(ScenarioError::EmptyCatalog)
    ));
}

#[test]
fn vehicle_catalog_mixes_formats_and_rejects_duplicate_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("a_van.yaml"),
        "name: Van\nmass_kg: 2100\ndrag_coefficient: 0.35\nfrontal_area_m2: 3.1\n",
    )
    .expect("write yaml");
    fs::write(
        dir.path().join("b_hatch.toml"),
        "name = \"Hatch\"\nmass_kg = 1150.0\ndrag_coefficient = 0.29\nfrontal_area_m2 = 2.1\n",
    )
    .expect("write toml");
    fs::write(dir.path().join("notes.txt"), "not a vehicle").expect("write notes");

    let catalog = load_vehicle_configs(dir.path()).expect("mixed catalog");
    let names: Vec<_> = catalog.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["Van", "Hatch"]);

    fs::write(
        dir.path().join("c_van.toml"),
        "name = \"VAN\"\nmass_kg = 2000.0\ndrag_coefficient = 0.35\nfrontal_area_m2 = 3.0\n",
    )
    .expect("write duplicate");
    assert!(matches!(
        load_vehicle_configs(dir.path()),
        Err(ConfigError::DuplicateVehicle(name)) if name == "VAN"
    ));
}
