use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EcoError, Result};

/// The five environmental indicators, in their fixed record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDimension {
    LandUse,
    GhgEmissions,
    AcidifyingEmissions,
    EutrophyingEmissions,
    WaterUse,
}

impl ImpactDimension {
    pub const ALL: [ImpactDimension; 5] = [
        ImpactDimension::LandUse,
        ImpactDimension::GhgEmissions,
        ImpactDimension::AcidifyingEmissions,
        ImpactDimension::EutrophyingEmissions,
        ImpactDimension::WaterUse,
    ];

    /// Position of this dimension in an impact record.
    pub fn index(self) -> usize {
        match self {
            ImpactDimension::LandUse => 0,
            ImpactDimension::GhgEmissions => 1,
            ImpactDimension::AcidifyingEmissions => 2,
            ImpactDimension::EutrophyingEmissions => 3,
            ImpactDimension::WaterUse => 4,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ImpactDimension::LandUse => "land_use",
            ImpactDimension::GhgEmissions => "ghg_emissions",
            ImpactDimension::AcidifyingEmissions => "acidifying_emissions",
            ImpactDimension::EutrophyingEmissions => "eutrophying_emissions",
            ImpactDimension::WaterUse => "water_use",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImpactDimension::LandUse => "Land use",
            ImpactDimension::GhgEmissions => "GHG emissions",
            ImpactDimension::AcidifyingEmissions => "Acidifying emissions",
            ImpactDimension::EutrophyingEmissions => "Eutrophying emissions",
            ImpactDimension::WaterUse => "Water use",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ImpactDimension::LandUse => "square meters",
            ImpactDimension::GhgEmissions => "kg CO2 eq.",
            ImpactDimension::AcidifyingEmissions => "g SO2 eq.",
            ImpactDimension::EutrophyingEmissions => "g PO43- eq.",
            ImpactDimension::WaterUse => "L",
        }
    }
}

/// Absolute and relative tolerance pair for approximate float comparison.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    pub absolute: f64,
    pub relative: f64,
}

impl Tolerance {
    /// Tolerance used when comparing impact vectors.
    pub const IMPACT: Tolerance = Tolerance {
        absolute: 1e-6,
        relative: 1e-10,
    };

    /// Tolerance used when checking calorie totals.
    pub const KCAL: Tolerance = Tolerance {
        absolute: 1e-6,
        relative: 1e-3,
    };
}

/// True if `a` and `b` are within the absolute tolerance, or within the
/// relative tolerance scaled by the larger magnitude.
pub fn approx_equal(a: f64, b: f64, tol: Tolerance) -> bool {
    let diff = (a - b).abs();
    diff <= tol.absolute || diff <= tol.relative * a.abs().max(b.abs())
}

/// Five-dimensional environmental impact, per retail unit or aggregated.
///
/// All comparisons are component-wise: `all_lt` holds only if every one of the
/// five components is strictly lower. Arithmetic returns new values.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImpactVector {
    values: [f64; 5],
}

impl ImpactVector {
    pub fn new(
        land_use: f64,
        ghg_emissions: f64,
        acidifying_emissions: f64,
        eutrophying_emissions: f64,
        water_use: f64,
    ) -> Self {
        Self {
            values: [
                land_use,
                ghg_emissions,
                acidifying_emissions,
                eutrophying_emissions,
                water_use,
            ],
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_array(values: [f64; 5]) -> Self {
        Self { values }
    }

    pub fn to_array(&self) -> [f64; 5] {
        self.values
    }

    pub fn get(&self, dim: ImpactDimension) -> f64 {
        self.values[dim.index()]
    }

    pub fn land_use(&self) -> f64 {
        self.values[0]
    }

    pub fn ghg_emissions(&self) -> f64 {
        self.values[1]
    }

    pub fn acidifying_emissions(&self) -> f64 {
        self.values[2]
    }

    pub fn eutrophying_emissions(&self) -> f64 {
        self.values[3]
    }

    pub fn water_use(&self) -> f64 {
        self.values[4]
    }

    /// Element-wise sum.
    pub fn add(&self, other: &ImpactVector) -> ImpactVector {
        self.zip_with(other, |a, b| a + b)
    }

    /// Element-wise difference.
    pub fn subtract(&self, other: &ImpactVector) -> ImpactVector {
        self.zip_with(other, |a, b| a - b)
    }

    /// Every component multiplied by `factor` (a quantity in retail units).
    pub fn scale(&self, factor: f64) -> ImpactVector {
        ImpactVector {
            values: self.values.map(|v| v * factor),
        }
    }

    pub fn approx_eq(&self, other: &ImpactVector, tol: Tolerance) -> bool {
        self.all_pairs(other, |a, b| approx_equal(a, b, tol))
    }

    /// Approximate equality with [`Tolerance::IMPACT`].
    pub fn approx_eq_default(&self, other: &ImpactVector) -> bool {
        self.approx_eq(other, Tolerance::IMPACT)
    }

    pub fn all_le(&self, other: &ImpactVector) -> bool {
        self.all_pairs(other, |a, b| a <= b)
    }

    pub fn all_lt(&self, other: &ImpactVector) -> bool {
        self.all_pairs(other, |a, b| a < b)
    }

    pub fn all_ge(&self, other: &ImpactVector) -> bool {
        self.all_pairs(other, |a, b| a >= b)
    }

    pub fn all_gt(&self, other: &ImpactVector) -> bool {
        self.all_pairs(other, |a, b| a > b)
    }

    pub fn is_non_negative(&self) -> bool {
        self.values.iter().all(|v| *v >= 0.0)
    }

    /// Serialize as five lines, one float per line, in record order.
    pub fn to_record(&self) -> String {
        let mut out = String::new();
        for v in &self.values {
            out.push_str(&v.to_string());
            out.push('\n');
        }
        out
    }

    /// Parse the five-line record format. Only the first token of each line is read.
    pub fn from_record(text: &str) -> Result<ImpactVector> {
        let mut values = [0.0; 5];
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        for (i, dim) in ImpactDimension::ALL.iter().enumerate() {
            let line = lines.next().ok_or_else(|| {
                EcoError::InvalidInput(format!("impact record is missing {}", dim.label()))
            })?;
            let token = line.split_whitespace().next().unwrap_or_default();
            values[i] = token.parse()?;
        }

        Ok(ImpactVector { values })
    }

    fn zip_with(&self, other: &ImpactVector, f: impl Fn(f64, f64) -> f64) -> ImpactVector {
        let mut values = [0.0; 5];
        for (i, slot) in values.iter_mut().enumerate() {
            *slot = f(self.values[i], other.values[i]);
        }
        ImpactVector { values }
    }

    fn all_pairs(&self, other: &ImpactVector, pred: impl Fn(f64, f64) -> bool) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| pred(*a, *b))
    }
}

impl fmt::Display for ImpactVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1}, {:.1}, {:.1}, {:.1}]",
            self.values[0], self.values[1], self.values[2], self.values[3], self.values[4]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImpactVector {
        ImpactVector::new(1.5, 25.0, 5.0, 10.0, 2000.0)
    }

    #[test]
    fn test_add_subtract_roundtrip() {
        let a = sample();
        let b = ImpactVector::new(3.0, 20.0, 3.0, 11.0, 1800.0);
        let sum = a.add(&b);
        assert_eq!(sum.to_array(), [4.5, 45.0, 8.0, 21.0, 3800.0]);
        assert!(sum.subtract(&b).approx_eq_default(&a));
    }

    #[test]
    fn test_comparisons_are_componentwise() {
        let a = sample();
        let mut bigger = a.to_array();
        bigger[4] += 1.0;
        let b = ImpactVector::from_array(bigger);

        // Equal in four dimensions: not strictly lower
        assert!(a.all_le(&b));
        assert!(!a.all_lt(&b));
        assert!(b.all_ge(&a));
        assert!(!b.all_gt(&a));

        assert!(a.all_le(&a));
        assert!(!a.all_lt(&a));
    }

    #[test]
    fn test_mixed_comparison_is_neither() {
        let a = ImpactVector::new(1.0, 5.0, 1.0, 1.0, 1.0);
        let b = ImpactVector::new(2.0, 4.0, 2.0, 2.0, 2.0);
        assert!(!a.all_le(&b));
        assert!(!a.all_ge(&b));
    }

    #[test]
    fn test_approx_equal_tolerances() {
        assert!(approx_equal(1.0, 1.0 + 5e-7, Tolerance::IMPACT));
        assert!(!approx_equal(1.0, 1.0 + 5e-6, Tolerance::IMPACT));
        // Relative branch for large magnitudes
        assert!(approx_equal(1e8, 1e8 + 1e-3, Tolerance::IMPACT));
        assert!(approx_equal(720.0, 720.5, Tolerance::KCAL));
        assert!(!approx_equal(720.0, 722.0, Tolerance::KCAL));
    }

    #[test]
    fn test_record_roundtrip() {
        let a = ImpactVector::new(2.0, 1.5, 7.0, 7.0, 1000.0);
        let text = a.to_record();
        assert_eq!(text.lines().count(), 5);
        assert_eq!(text.lines().next(), Some("2"));
        let parsed = ImpactVector::from_record(&text).unwrap();
        assert!(parsed.approx_eq_default(&a));
    }

    #[test]
    fn test_record_too_short() {
        let result = ImpactVector::from_record("1.0\n2.0\n");
        assert!(matches!(result, Err(EcoError::InvalidInput(_))));
    }

    #[test]
    fn test_scale() {
        let scaled = sample().scale(0.5);
        assert_eq!(scaled.water_use(), 1000.0);
        assert_eq!(scaled.land_use(), 0.75);
    }
}
