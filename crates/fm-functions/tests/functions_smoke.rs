//! Smoke tests for fm-functions assembled the way the translator does.

use fm_core::units::{electric_field, frequency, length, luminous_intensity, temperature, volume_rate};
use fm_functions::{
    Function, FunctionError, FunctionKind, LightWorkingRange, PluginConfiguration, PluginFunction,
    PumpDirection, PumpPluginFunction, PumpWorkingRange, StirWorkingRange, TruthTable,
    ValvePluginRouteFunction, WorkingRange,
};
use uom::si::frequency::hertz;

#[test]
fn pump_from_block_units() {
    let min = volume_rate(0.5, "ml", "min").unwrap();
    let max = volume_rate(2.0, "ml", "s").unwrap();
    let range = PumpWorkingRange::new(min, max, "pump").unwrap();

    let mut cfg = PluginConfiguration::new("evoprog_pump", "EvoprogV2Pump");
    cfg.insert_param("address", "7").unwrap();
    let pump = PumpPluginFunction::new(cfg, range, true);

    assert_eq!(pump.direction(), PumpDirection::Bidirectional);
    assert_eq!(pump.name(), "evoprog_pump");
    assert_eq!(pump.configuration().param("address"), Some("7"));
    assert!(pump.working_range.contains(volume_rate(1.0, "ml", "s").unwrap()));
}

#[test]
fn valve_table_and_plugin() {
    let mut table = TruthTable::new();
    table.insert(0, vec![[0, 1].into_iter().collect()]).unwrap();
    table.insert(1, vec![[0, 2].into_iter().collect()]).unwrap();

    let valve = ValvePluginRouteFunction::new(PluginConfiguration::new("rotary", "EvoprogValve"));
    assert_eq!(valve.plugin_type(), "EvoprogValve");
    assert_eq!(table.max_pin(), Some(2));
}

#[test]
fn container_functions_carry_ranges() {
    let stir = StirWorkingRange::new(
        frequency(60.0, "rpm").unwrap(),
        frequency(20.0, "Hz").unwrap(),
        "stirer",
    )
    .unwrap();
    assert!((stir.min().get::<hertz>() - 1.0).abs() < 1e-9);

    let light = LightWorkingRange {
        wavelength: WorkingRange::new(length(400.0, "nm").unwrap(), length(700.0, "nm").unwrap(), "wavelength")
            .unwrap(),
        intensity: WorkingRange::new(
            luminous_intensity(0.0, "cd").unwrap(),
            luminous_intensity(5.0, "cd").unwrap(),
            "intensity",
        )
        .unwrap(),
    };

    let functions = [
        Function::Stir(stir),
        Function::Light(light),
        Function::Heat(
            WorkingRange::new(temperature(20.0, "C").unwrap(), temperature(90.0, "C").unwrap(), "heater")
                .unwrap(),
        ),
        Function::Electrophoresis(
            WorkingRange::new(
                electric_field(1.0, "V", "cm").unwrap(),
                electric_field(10.0, "V", "cm").unwrap(),
                "electrophorer",
            )
            .unwrap(),
        ),
        Function::MeasureVolume,
    ];
    let kinds: Vec<FunctionKind> = functions.iter().map(Function::kind).collect();
    assert_eq!(
        kinds,
        vec![
            FunctionKind::Stirer,
            FunctionKind::Light,
            FunctionKind::Heater,
            FunctionKind::Electrophorer,
            FunctionKind::VolumeSensor
        ]
    );
}

#[test]
fn inverted_heater_range_is_rejected() {
    let err = WorkingRange::new(
        temperature(90.0, "C").unwrap(),
        temperature(20.0, "C").unwrap(),
        "heater",
    )
    .unwrap_err();
    assert!(matches!(err, FunctionError::InvalidRange { what: "heater", .. }));
}
