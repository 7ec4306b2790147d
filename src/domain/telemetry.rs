// Live telemetry domain models
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordinal tick of a live series, rendered zero-padded to two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeLabel(u32);

impl TimeLabel {
    pub fn new(tick: u32) -> Self {
        Self(tick)
    }

    /// `None` once the label space is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("time label {0:?} is not a non-negative integer")]
pub struct TimeLabelError(String);

impl FromStr for TimeLabel {
    type Err = TimeLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| TimeLabelError(s.to_string()))
    }
}

impl Serialize for TimeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Water-quality parameters sampled by a pond sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Temperature,
    Ph,
    DissolvedOxygen,
    Tds,
    Turbidity,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Temperature,
        Parameter::Ph,
        Parameter::DissolvedOxygen,
        Parameter::Tds,
        Parameter::Turbidity,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature",
            Parameter::Ph => "pH Level",
            Parameter::DissolvedOxygen => "Dissolved Oxygen",
            Parameter::Tds => "TDS",
            Parameter::Turbidity => "Turbidity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Parameter::Temperature => "°C",
            Parameter::Ph => "",
            Parameter::DissolvedOxygen => "mg/L",
            Parameter::Tds => "ppm",
            Parameter::Turbidity => "NTU",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One sampled instant of pond telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub time_label: TimeLabel,
    pub temperature: f64,
    pub ph: f64,
    pub dissolved_oxygen: f64,
    pub tds: i64,
    pub turbidity: f64,
}

impl Reading {
    /// Next reading in a random walk. `draw` yields uniform values in `[0, 1)`
    /// and is called once per field, in `Parameter::ALL` order. Returns `None`
    /// when the time label cannot advance.
    pub fn successor(&self, jitter: &JitterTable, mut draw: impl FnMut() -> f64) -> Option<Reading> {
        Some(Reading {
            time_label: self.time_label.next()?,
            temperature: jitter.temperature.apply(self.temperature, draw()),
            ph: jitter.ph.apply(self.ph, draw()),
            dissolved_oxygen: jitter.dissolved_oxygen.apply(self.dissolved_oxygen, draw()),
            tds: jitter.tds.apply(self.tds as f64, draw()) as i64,
            turbidity: jitter.turbidity.apply(self.turbidity, draw()),
        })
    }

    #[cfg(test)]
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::Ph => self.ph,
            Parameter::DissolvedOxygen => self.dissolved_oxygen,
            Parameter::Tds => self.tds as f64,
            Parameter::Turbidity => self.turbidity,
        }
    }
}

/// Random-walk step size and display precision for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct JitterSpec {
    pub amplitude: f64,
    pub decimals: u32,
}

impl JitterSpec {
    pub const fn new(amplitude: f64, decimals: u32) -> Self {
        Self {
            amplitude,
            decimals,
        }
    }

    /// Unrounded offset for a unit draw; always within `±amplitude / 2`.
    pub fn offset(&self, unit: f64) -> f64 {
        (unit - 0.5) * self.amplitude
    }

    pub fn apply(&self, previous: f64, unit: f64) -> f64 {
        round_to(previous + self.offset(unit), self.decimals)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JitterTable {
    pub temperature: JitterSpec,
    pub ph: JitterSpec,
    pub dissolved_oxygen: JitterSpec,
    pub tds: JitterSpec,
    pub turbidity: JitterSpec,
}

impl JitterTable {
    pub fn spec(&self, parameter: Parameter) -> &JitterSpec {
        match parameter {
            Parameter::Temperature => &self.temperature,
            Parameter::Ph => &self.ph,
            Parameter::DissolvedOxygen => &self.dissolved_oxygen,
            Parameter::Tds => &self.tds,
            Parameter::Turbidity => &self.turbidity,
        }
    }
}

impl Default for JitterTable {
    fn default() -> Self {
        Self {
            temperature: JitterSpec::new(0.2, 1),
            ph: JitterSpec::new(0.1, 1),
            dissolved_oxygen: JitterSpec::new(0.2, 1),
            tds: JitterSpec::new(5.0, 0),
            turbidity: JitterSpec::new(0.3, 1),
        }
    }
}

/// Round half away from zero to a fixed number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
