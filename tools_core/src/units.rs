//! Metric-to-imperial unit conversions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Length,
    Weight,
    Temperature,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Conversion {
    pub input: f64,
    pub input_unit: &'static str,
    pub output: f64,
    pub output_unit: &'static str,
}

pub fn convert(value: f64, kind: UnitKind) -> Conversion {
    match kind {
        UnitKind::Length => Conversion {
            input: value,
            input_unit: "m",
            output: value * 3.28084,
            output_unit: "ft",
        },
        UnitKind::Weight => Conversion {
            input: value,
            input_unit: "kg",
            output: value * 2.20462,
            output_unit: "lbs",
        },
        UnitKind::Temperature => Conversion {
            input: value,
            input_unit: "°C",
            output: value * 9.0 / 5.0 + 32.0,
            output_unit: "°F",
        },
    }
}
