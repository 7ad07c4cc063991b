// fm-core/src/units.rs

use uom::si::f64::{
    ElectricField as UomElectricField, ElectricPotential as UomElectricPotential,
    Frequency as UomFrequency, Length as UomLength, LuminousIntensity as UomLuminousIntensity,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Volume as UomVolume, VolumeRate as UomVolumeRate,
};

use crate::{FmError, FmResult};

// Public canonical unit types (SI, f64)
pub type ElectricField = UomElectricField;
pub type ElectricPotential = UomElectricPotential;
pub type Frequency = UomFrequency;
pub type Length = UomLength;
pub type LuminousIntensity = UomLuminousIntensity;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn ml(v: f64) -> Volume {
    use uom::si::volume::milliliter;
    Volume::new::<milliliter>(v)
}

#[inline]
pub fn ul(v: f64) -> Volume {
    use uom::si::volume::microliter;
    Volume::new::<microliter>(v)
}

#[inline]
pub fn ml_per_s(v: f64) -> VolumeRate {
    use uom::si::volume_rate::milliliter_per_second;
    VolumeRate::new::<milliliter_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

fn unknown(quantity: &'static str, unit: &str) -> FmError {
    FmError::UnknownUnit {
        quantity,
        unit: unit.to_string(),
    }
}

/// Build a volume from a value and a unit name (`l`, `ml`, `ul`, `nl`).
pub fn volume(value: f64, unit: &str) -> FmResult<Volume> {
    use uom::si::volume::{liter, microliter, milliliter, nanoliter};
    match unit.trim() {
        "l" | "L" => Ok(Volume::new::<liter>(value)),
        "ml" | "mL" => Ok(Volume::new::<milliliter>(value)),
        "ul" | "uL" | "µl" | "µL" => Ok(Volume::new::<microliter>(value)),
        "nl" | "nL" => Ok(Volume::new::<nanoliter>(value)),
        other => Err(unknown("volume", other)),
    }
}

/// Build a time span from a value and a unit name (`s`, `ms`, `min`, `h`).
pub fn time(value: f64, unit: &str) -> FmResult<Time> {
    use uom::si::time::{hour, millisecond, minute, second};
    match unit.trim() {
        "s" => Ok(Time::new::<second>(value)),
        "ms" => Ok(Time::new::<millisecond>(value)),
        "min" => Ok(Time::new::<minute>(value)),
        "h" => Ok(Time::new::<hour>(value)),
        other => Err(unknown("time", other)),
    }
}

/// Build a flow rate from a value expressed in `volume_unit / time_unit`.
pub fn volume_rate(value: f64, volume_unit: &str, time_unit: &str) -> FmResult<VolumeRate> {
    let per = time(1.0, time_unit)?;
    Ok(volume(value, volume_unit)? / per)
}

/// Build a frequency from a value and a unit name (`Hz`, `kHz`, `rpm`).
pub fn frequency(value: f64, unit: &str) -> FmResult<Frequency> {
    use uom::si::frequency::{cycle_per_minute, hertz, kilohertz};
    match unit.trim() {
        "Hz" | "hz" => Ok(Frequency::new::<hertz>(value)),
        "kHz" | "khz" => Ok(Frequency::new::<kilohertz>(value)),
        "rpm" | "RPM" => Ok(Frequency::new::<cycle_per_minute>(value)),
        other => Err(unknown("frequency", other)),
    }
}

/// Build a temperature from a value and a unit name (`K`, `C`, `F`).
pub fn temperature(value: f64, unit: &str) -> FmResult<Temperature> {
    use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};
    match unit.trim() {
        "K" => Ok(Temperature::new::<kelvin>(value)),
        "C" | "ºC" | "°C" => Ok(Temperature::new::<degree_celsius>(value)),
        "F" | "ºF" | "°F" => Ok(Temperature::new::<degree_fahrenheit>(value)),
        other => Err(unknown("temperature", other)),
    }
}

/// Build a length from a value and a unit name (`m`, `cm`, `mm`, `um`, `nm`).
pub fn length(value: f64, unit: &str) -> FmResult<Length> {
    use uom::si::length::{centimeter, meter, micrometer, millimeter, nanometer};
    match unit.trim() {
        "m" => Ok(Length::new::<meter>(value)),
        "cm" => Ok(Length::new::<centimeter>(value)),
        "mm" => Ok(Length::new::<millimeter>(value)),
        "um" | "µm" => Ok(Length::new::<micrometer>(value)),
        "nm" => Ok(Length::new::<nanometer>(value)),
        other => Err(unknown("length", other)),
    }
}

/// Build a luminous intensity from a value and a unit name (`cd`, `mcd`).
pub fn luminous_intensity(value: f64, unit: &str) -> FmResult<LuminousIntensity> {
    use uom::si::luminous_intensity::{candela, millicandela};
    match unit.trim() {
        "cd" => Ok(LuminousIntensity::new::<candela>(value)),
        "mcd" => Ok(LuminousIntensity::new::<millicandela>(value)),
        other => Err(unknown("luminous intensity", other)),
    }
}

/// Build an electric potential from a value and a unit name (`V`, `mV`, `kV`).
pub fn electric_potential(value: f64, unit: &str) -> FmResult<ElectricPotential> {
    use uom::si::electric_potential::{kilovolt, millivolt, volt};
    match unit.trim() {
        "V" | "v" => Ok(ElectricPotential::new::<volt>(value)),
        "mV" => Ok(ElectricPotential::new::<millivolt>(value)),
        "kV" => Ok(ElectricPotential::new::<kilovolt>(value)),
        other => Err(unknown("electric potential", other)),
    }
}

/// Build an electric field from a value expressed in `potential_unit / length_unit`.
pub fn electric_field(
    value: f64,
    potential_unit: &str,
    length_unit: &str,
) -> FmResult<ElectricField> {
    let per = length(1.0, length_unit)?;
    Ok(electric_potential(value, potential_unit)? / per)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _v = ml(10.0);
        let _u = ul(5.0);
        let _q = ml_per_s(1.5);
        let _t = s(0.1);
    }

    #[test]
    fn volume_rate_combines_units() {
        use uom::si::volume_rate::milliliter_per_second;
        let rate = volume_rate(60.0, "ml", "min").unwrap();
        let per_s = rate.get::<milliliter_per_second>();
        assert!((per_s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_unit_names_quantity() {
        let err = volume(1.0, "gallons").unwrap_err();
        assert_eq!(
            err,
            FmError::UnknownUnit {
                quantity: "volume",
                unit: "gallons".to_string()
            }
        );
        assert!(err.to_string().contains("volume"));
    }

    #[test]
    fn time_units_do_not_borrow_length_names() {
        assert!(time(1.0, "min").is_ok());
        assert!(time(1.0, "m").is_err());
        assert!(time(1.0, "hr").is_err());
        assert!(length(1.0, "m").is_ok());
    }

    #[test]
    fn temperature_and_field_conversions() {
        use uom::si::electric_field::volt_per_meter;
        use uom::si::thermodynamic_temperature::kelvin;
        let t = temperature(25.0, "C").unwrap();
        assert!((t.get::<kelvin>() - 298.15).abs() < 1e-9);

        let e = electric_field(5.0, "V", "cm").unwrap();
        assert!((e.get::<volt_per_meter>() - 500.0).abs() < 1e-9);
    }
}
