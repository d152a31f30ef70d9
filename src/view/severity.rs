//! Per-pollutant severity bands.

use serde::Serialize;

/// Color-coded severity derived from a pollutant's sub-index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// 0-50, green
    Good,
    /// 51-100, yellow
    Satisfactory,
    /// 101-200, orange
    Moderate,
    /// 201-300, red
    Poor,
    /// above 300, purple
    Severe,
}

impl Severity {
    /// Band a sub-index.
    ///
    /// Bands are closed on their upper bound, so a fractional value such as
    /// 50.5 belongs to the next band up.
    pub fn from_sub_index(si: f64) -> Self {
        if si <= 50.0 {
            Severity::Good
        } else if si <= 100.0 {
            Severity::Satisfactory
        } else if si <= 200.0 {
            Severity::Moderate
        } else if si <= 300.0 {
            Severity::Poor
        } else {
            Severity::Severe
        }
    }

    /// Hex color used for the card accent
    pub fn hex(&self) -> &'static str {
        match self {
            Severity::Good => "#00E400",
            Severity::Satisfactory => "#FFFF00",
            Severity::Moderate => "#FF7E00",
            Severity::Poor => "#FF0000",
            Severity::Severe => "#8F3F97",
        }
    }

    /// Plain color name
    pub fn color_name(&self) -> &'static str {
        match self {
            Severity::Good => "green",
            Severity::Satisfactory => "yellow",
            Severity::Moderate => "orange",
            Severity::Poor => "red",
            Severity::Severe => "purple",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Good => "Good",
            Severity::Satisfactory => "Satisfactory",
            Severity::Moderate => "Moderate",
            Severity::Poor => "Poor",
            Severity::Severe => "Very Poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let cases = [
            (0.0, "green"),
            (50.0, "green"),
            (51.0, "yellow"),
            (100.0, "yellow"),
            (101.0, "orange"),
            (200.0, "orange"),
            (201.0, "red"),
            (300.0, "red"),
            (301.0, "purple"),
            (500.0, "purple"),
        ];
        for (si, expected) in cases {
            assert_eq!(Severity::from_sub_index(si).color_name(), expected, "si = {}", si);
        }
    }

    #[test]
    fn test_every_integer_lands_in_exactly_its_band() {
        for si in 0..=600u32 {
            let sev = Severity::from_sub_index(si as f64);
            let expected = match si {
                0..=50 => Severity::Good,
                51..=100 => Severity::Satisfactory,
                101..=200 => Severity::Moderate,
                201..=300 => Severity::Poor,
                _ => Severity::Severe,
            };
            assert_eq!(sev, expected, "si = {}", si);
        }
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(Severity::from_sub_index(50.5), Severity::Satisfactory);
        assert_eq!(Severity::from_sub_index(100.2), Severity::Moderate);
        assert_eq!(Severity::from_sub_index(-3.0), Severity::Good);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Severity::Good.hex(), "#00E400");
        assert_eq!(Severity::Severe.hex(), "#8F3F97");
    }
}
