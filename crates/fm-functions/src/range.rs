//! Working ranges of functions: the closed interval a device can operate in.

use core::fmt::Debug;

use fm_core::units::{ElectricField, Frequency, Length, LuminousIntensity, Temperature, VolumeRate};

use crate::error::{FunctionError, FunctionResult};

/// Closed interval `[min, max]` over a physical quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingRange<Q> {
    min: Q,
    max: Q,
}

impl<Q: PartialOrd + Copy + Debug> WorkingRange<Q> {
    /// Create a range, rejecting `min > max`.
    pub fn new(min: Q, max: Q, what: &'static str) -> FunctionResult<Self> {
        if min > max {
            return Err(FunctionError::InvalidRange {
                what,
                min: format!("{min:?}"),
                max: format!("{max:?}"),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Q {
        self.min
    }

    pub fn max(&self) -> Q {
        self.max
    }

    /// True if `value` lies inside the closed interval.
    pub fn contains(&self, value: Q) -> bool {
        self.min <= value && value <= self.max
    }
}

pub type PumpWorkingRange = WorkingRange<VolumeRate>;
pub type CentrifugationWorkingRange = WorkingRange<Frequency>;
pub type ShakeWorkingRange = WorkingRange<Frequency>;
pub type StirWorkingRange = WorkingRange<Frequency>;
pub type HeaterWorkingRange = WorkingRange<Temperature>;
pub type ElectrophoresisWorkingRange = WorkingRange<ElectricField>;
pub type MeasureOdWorkingRange = WorkingRange<Length>;

/// Light sources have independent wavelength and intensity bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightWorkingRange {
    pub wavelength: WorkingRange<Length>,
    pub intensity: WorkingRange<LuminousIntensity>,
}

/// Fluorescence sensors have independent emission and excitation bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureFluorescenceWorkingRange {
    pub emission: WorkingRange<Length>,
    pub excitation: WorkingRange<Length>,
}
