use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// History length accepted by the chart endpoint's `range` parameter.
///
/// Deserializes through [`FromStr`], so codes are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[default]
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub fn code(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Period::OneDay),
            "5d" => Ok(Period::FiveDays),
            "1mo" => Ok(Period::OneMonth),
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            "2y" => Ok(Period::TwoYears),
            "5y" => Ok(Period::FiveYears),
            "10y" => Ok(Period::TenYears),
            "ytd" => Ok(Period::YearToDate),
            "max" => Ok(Period::Max),
            other => Err(format!("unknown period code '{}'", other)),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Bar size requested from the chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    pub fn code(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" | "d" | "daily" => Ok(Interval::Daily),
            "1wk" | "w" | "weekly" => Ok(Interval::Weekly),
            "1mo" | "m" | "monthly" => Ok(Interval::Monthly),
            other => Err(format!("unknown interval code '{}'", other)),
        }
    }
}

impl TryFrom<String> for Interval {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
