//! Length units and conversion to the server's canonical millimeters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Display unit chosen by the client. The server always works in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[serde(alias = "in")]
    Inches,
    #[default]
    #[serde(alias = "millimeters")]
    Mm,
}

impl Units {
    /// Convert a length in this unit to millimeters.
    pub fn to_mm(&self, value: f64) -> f64 {
        match self {
            Units::Inches => value * MM_PER_INCH,
            Units::Mm => value,
        }
    }

    /// Convert a length in millimeters to this unit.
    pub fn from_mm(&self, value: f64) -> f64 {
        match self {
            Units::Inches => value / MM_PER_INCH,
            Units::Mm => value,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Units::Inches => "in",
            Units::Mm => "mm",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(Units::Inches),
            "mm" | "millimeter" | "millimeters" => Ok(Units::Mm),
            other => Err(format!("Unknown units '{}' (expected 'in' or 'mm')", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_round_trip() {
        for v in [0.0, 1.0, -3.75, 0.001, 1234.5] {
            let back = Units::Inches.from_mm(Units::Inches.to_mm(v));
            assert!((back - v).abs() < 1e-12, "{} -> {}", v, back);
        }
        assert_eq!(Units::Inches.to_mm(1.0), 25.4);
        assert_eq!(Units::Inches.from_mm(25.4), 1.0);
    }

    #[test]
    fn test_mm_is_identity() {
        for v in [0.0, 1.0, -3.75, 1e-9, f64::MAX] {
            assert_eq!(Units::Mm.to_mm(v), v);
            assert_eq!(Units::Mm.from_mm(v), v);
        }
    }

    #[test]
    fn test_suffix_and_display() {
        assert_eq!(Units::Inches.suffix(), "in");
        assert_eq!(Units::Mm.to_string(), "mm");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("in".parse::<Units>(), Ok(Units::Inches));
        assert_eq!(" Inches ".parse::<Units>(), Ok(Units::Inches));
        assert_eq!("MM".parse::<Units>(), Ok(Units::Mm));
        assert!("furlongs".parse::<Units>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Units::Inches).unwrap(), r#""inches""#);
        let parsed: Units = serde_json::from_str(r#""in""#).unwrap();
        assert_eq!(parsed, Units::Inches);
        let parsed: Units = serde_json::from_str(r#""millimeters""#).unwrap();
        assert_eq!(parsed, Units::Mm);
    }
}
