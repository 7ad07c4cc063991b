//! Instrument functions attached to containers.

use core::fmt;
use core::str::FromStr;

use crate::range::{
    CentrifugationWorkingRange, ElectrophoresisWorkingRange, HeaterWorkingRange,
    LightWorkingRange, MeasureFluorescenceWorkingRange, MeasureOdWorkingRange,
    ShakeWorkingRange, StirWorkingRange,
};

/// Closed set of instrument function kinds understood by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionKind {
    Electrophorer,
    Light,
    Heater,
    FluorescenceSensor,
    OdSensor,
    LuminiscenceSensor,
    VolumeSensor,
    TemperatureSensor,
    Stirer,
    Shaker,
    Centrifugator,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; 11] = [
        FunctionKind::Electrophorer,
        FunctionKind::Light,
        FunctionKind::Heater,
        FunctionKind::FluorescenceSensor,
        FunctionKind::OdSensor,
        FunctionKind::LuminiscenceSensor,
        FunctionKind::VolumeSensor,
        FunctionKind::TemperatureSensor,
        FunctionKind::Stirer,
        FunctionKind::Shaker,
        FunctionKind::Centrifugator,
    ];

    /// Tag used for this kind in block documents.
    pub fn tag(self) -> &'static str {
        match self {
            FunctionKind::Electrophorer => "Electrophorer",
            FunctionKind::Light => "Ligth",
            FunctionKind::Heater => "Heater",
            FunctionKind::FluorescenceSensor => "Fluorescence_sensor",
            FunctionKind::OdSensor => "OD_sensor",
            FunctionKind::LuminiscenceSensor => "Luminiscence_sensor",
            FunctionKind::VolumeSensor => "Volume_sensor",
            FunctionKind::TemperatureSensor => "Temperature_sensor",
            FunctionKind::Stirer => "Stirer",
            FunctionKind::Shaker => "Shaker",
            FunctionKind::Centrifugator => "Centrifugator",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FunctionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// An instrument function with its working range, if the kind has one.
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    Electrophoresis(ElectrophoresisWorkingRange),
    Light(LightWorkingRange),
    Heat(HeaterWorkingRange),
    MeasureFluorescence(MeasureFluorescenceWorkingRange),
    MeasureOd(MeasureOdWorkingRange),
    MeasureLuminiscence,
    MeasureVolume,
    MeasureTemperature,
    Stir(StirWorkingRange),
    Shake(ShakeWorkingRange),
    Centrifugate(CentrifugationWorkingRange),
}

impl Function {
    pub fn kind(&self) -> FunctionKind {
        match self {
            Function::Electrophoresis(_) => FunctionKind::Electrophorer,
            Function::Light(_) => FunctionKind::Light,
            Function::Heat(_) => FunctionKind::Heater,
            Function::MeasureFluorescence(_) => FunctionKind::FluorescenceSensor,
            Function::MeasureOd(_) => FunctionKind::OdSensor,
            Function::MeasureLuminiscence => FunctionKind::LuminiscenceSensor,
            Function::MeasureVolume => FunctionKind::VolumeSensor,
            Function::MeasureTemperature => FunctionKind::TemperatureSensor,
            Function::Stir(_) => FunctionKind::Stirer,
            Function::Shake(_) => FunctionKind::Shaker,
            Function::Centrifugate(_) => FunctionKind::Centrifugator,
        }
    }
}
