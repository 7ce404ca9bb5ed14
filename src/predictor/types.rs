use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One water sample as submitted by the dashboard form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub ph: f64,
    pub turbidity: f64,
    pub temperature: f64,
    pub tds: f64,
}

impl PredictionRequest {
    /// Names of the fields that fall outside the ranges the form accepts.
    /// The relay only logs these; it never rejects a request over them.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        let checks = [
            ("ph", self.ph, 0.0, 14.0),
            ("turbidity", self.turbidity, 0.0, 10_000.0),
            ("temperature", self.temperature, 0.0, 50.0),
            ("tds", self.tds, 0.0, 50_000.0),
        ];

        checks
            .into_iter()
            .filter(|(_, value, min, max)| !(*min..=*max).contains(value))
            .map(|(name, ..)| name)
            .collect()
    }
}

/// Classification written to stdout by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub wqi_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl PredictionResult {
    pub fn assessment(&self) -> Assessment {
        self.wqi_class
            .parse::<WqiClass>()
            .map(Assessment::from)
            .unwrap_or(Assessment::Unsafe)
    }

    /// The label `class_index` points at, when it disagrees with `wqi_class`.
    pub fn index_mismatch(&self) -> Option<WqiClass> {
        let expected = WqiClass::from_index(self.class_index?)?;
        (expected.as_str() != self.wqi_class).then_some(expected)
    }
}

/// Labels the scorer emits, in class-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WqiClass {
    Excellent,
    Good,
    Avg,
    Medium,
    Poor,
}

impl WqiClass {
    pub const ALL: [WqiClass; 5] = [
        WqiClass::Excellent,
        WqiClass::Good,
        WqiClass::Avg,
        WqiClass::Medium,
        WqiClass::Poor,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Avg => "Avg",
            Self::Medium => "Medium",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for WqiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WqiClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| format!("Unknown WQI class: '{}'", s))
    }
}

/// The three presentation states a dashboard renders for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Favorable,
    Cautionary,
    Unsafe,
}

impl Assessment {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Favorable => "Water quality is optimal for all uses.",
            Self::Cautionary => "Water quality is acceptable but needs monitoring.",
            Self::Unsafe => "Water quality is unsafe. Immediate action required!",
        }
    }
}

impl From<WqiClass> for Assessment {
    fn from(class: WqiClass) -> Self {
        match class {
            WqiClass::Excellent => Self::Favorable,
            WqiClass::Good | WqiClass::Avg => Self::Cautionary,
            WqiClass::Medium | WqiClass::Poor => Self::Unsafe,
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Favorable => "favorable",
            Self::Cautionary => "cautionary",
            Self::Unsafe => "unsafe",
        };
        f.write_str(name)
    }
}
