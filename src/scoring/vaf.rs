use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::{GeneralCharacteristic, CHARACTERISTIC_COUNT, MAX_DEGREE};

/// Lowest possible adjustment factor (all characteristics rated 0).
pub const MIN_VAF: f64 = 0.65;

/// Highest possible adjustment factor (all characteristics rated 5).
pub const MAX_VAF: f64 = 1.35;

/// Total degree of influence over a full set of fourteen characteristics.
pub fn total_degree_of_influence(
    characteristics: &[GeneralCharacteristic],
) -> Result<u32, ValidationError> {
    if characteristics.len() != CHARACTERISTIC_COUNT {
        return Err(ValidationError::CharacteristicCount {
            expected: CHARACTERISTIC_COUNT,
            actual: characteristics.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut total = 0u32;
    for c in characteristics {
        if !seen.insert(c.kind) {
            return Err(ValidationError::DuplicateCharacteristic {
                characteristic: c.kind.key().to_string(),
            });
        }
        if c.degree_of_influence > MAX_DEGREE {
            return Err(ValidationError::DegreeOutOfRange {
                characteristic: c.kind.key().to_string(),
                value: c.degree_of_influence as i64,
            });
        }
        total += c.degree_of_influence as u32;
    }
    Ok(total)
}

/// Value Adjustment Factor: `total × 0.01 + 0.65`.
///
/// Evaluated as `(total + 65) / 100` so the result is the closest double to
/// the exact two-decimal value (0.65, 0.90, 1.35, ...).
pub fn compute_vaf(characteristics: &[GeneralCharacteristic]) -> Result<f64, ValidationError> {
    let total = total_degree_of_influence(characteristics)?;
    Ok((total + 65) as f64 / 100.0)
}

/// Apply the adjustment factor and round to two decimals, half away from zero.
pub fn adjusted_total(unadjusted: u32, vaf: f64) -> f64 {
    round2(unadjusted as f64 * vaf)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_characteristics, CharacteristicKind};
    use proptest::prelude::*;

    fn all_rated(degree: u8) -> Vec<GeneralCharacteristic> {
        CharacteristicKind::ALL
            .iter()
            .map(|&kind| GeneralCharacteristic {
                kind,
                degree_of_influence: degree,
            })
            .collect()
    }

    #[test]
    fn test_vaf_all_zero() {
        assert_eq!(compute_vaf(&all_rated(0)).unwrap(), 0.65);
    }

    #[test]
    fn test_vaf_all_five() {
        assert_eq!(compute_vaf(&all_rated(5)).unwrap(), 1.35);
    }

    #[test]
    fn test_vaf_defaults() {
        assert_eq!(compute_vaf(&default_characteristics()).unwrap(), 0.90);
    }

    #[test]
    fn test_vaf_wrong_count() {
        let mut chars = default_characteristics();
        chars.pop();
        assert_eq!(
            compute_vaf(&chars).unwrap_err(),
            ValidationError::CharacteristicCount {
                expected: 14,
                actual: 13
            }
        );
        assert!(compute_vaf(&[]).is_err());
    }

    #[test]
    fn test_vaf_duplicate_kind() {
        let mut chars = default_characteristics();
        chars[1].kind = CharacteristicKind::DataCommunications;
        assert_eq!(
            compute_vaf(&chars).unwrap_err(),
            ValidationError::DuplicateCharacteristic {
                characteristic: "data_communications".to_string()
            }
        );
    }

    #[test]
    fn test_vaf_degree_out_of_range() {
        let mut chars = default_characteristics();
        chars[3].degree_of_influence = 6;
        assert!(matches!(
            compute_vaf(&chars),
            Err(ValidationError::DegreeOutOfRange { value: 6, .. })
        ));
    }

    #[test]
    fn test_adjusted_total_example() {
        assert_eq!(adjusted_total(23, 0.90), 20.70);
    }

    #[test]
    fn test_adjusted_total_zero() {
        assert_eq!(adjusted_total(0, 0.65), 0.0);
        assert_eq!(adjusted_total(0, 1.35), 0.0);
    }

    #[test]
    fn test_adjusted_total_rounds_to_two_decimals() {
        assert_eq!(adjusted_total(1, 0.456), 0.46);
        assert_eq!(adjusted_total(1, 0.454), 0.45);
        assert_eq!(adjusted_total(3, 1.0 / 3.0), 1.0);
    }

    #[test]
    fn test_vaf_is_repeatable() {
        let chars = default_characteristics();
        assert_eq!(compute_vaf(&chars).unwrap(), compute_vaf(&chars).unwrap());
    }

    proptest! {
        #[test]
        fn prop_vaf_within_bounds(degrees in proptest::collection::vec(0u8..=5, 14)) {
            let chars: Vec<GeneralCharacteristic> = CharacteristicKind::ALL
                .iter()
                .zip(degrees.iter())
                .map(|(&kind, &d)| GeneralCharacteristic { kind, degree_of_influence: d })
                .collect();
            let vaf = compute_vaf(&chars).unwrap();
            prop_assert!(vaf >= MIN_VAF && vaf <= MAX_VAF);

            let sum: u32 = degrees.iter().map(|&d| d as u32).sum();
            prop_assert!((vaf - (sum as f64 * 0.01 + 0.65)).abs() < 1e-9);
        }
    }
}
