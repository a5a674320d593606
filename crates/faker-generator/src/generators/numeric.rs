//! Numeric value generators.

use super::GenerationError;
use faker_core::FieldValue;
use rand::Rng;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(
    rng: &mut R,
    min: i64,
    max: i64,
) -> Result<FieldValue, GenerationError> {
    if min > max {
        return Err(GenerationError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(FieldValue::Int(rng.gen_range(min..=max)))
}

/// Generate a random float in the given range (inclusive).
///
/// Both ends and the span between them must be finite.
pub fn generate_float_range<R: Rng>(
    rng: &mut R,
    min: f64,
    max: f64,
) -> Result<FieldValue, GenerationError> {
    let sampleable = min.is_finite()
        && max.is_finite()
        && min <= max
        && ((max - min) / (1.0 - f64::EPSILON)).is_finite();
    if !sampleable {
        return Err(GenerationError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(FieldValue::Float(rng.gen_range(min..=max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_int_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_int_range(&mut rng, 100, 101).unwrap();
            if let FieldValue::Int(v) = value {
                assert!((100..=101).contains(&v));
            } else {
                panic!("Expected Int value");
            }
        }
    }

    #[test]
    fn test_generate_int_range_single_point() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_int_range(&mut rng, 7, 7).unwrap(), FieldValue::Int(7));

        let value = generate_int_range(&mut rng, i64::MIN, i64::MAX).unwrap();
        assert!(matches!(value, FieldValue::Int(_)));
    }

    #[test]
    fn test_reversed_int_range_is_an_error() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            generate_int_range(&mut rng, 10, 1),
            Err(GenerationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_generate_float_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_float_range(&mut rng, 0.0, 100.0).unwrap();
            if let FieldValue::Float(v) = value {
                assert!((0.0..=100.0).contains(&v));
            } else {
                panic!("Expected Float value");
            }
        }

        assert_eq!(
            generate_float_range(&mut rng, 2.5, 2.5).unwrap(),
            FieldValue::Float(2.5)
        );
    }

    #[test]
    fn test_unsampleable_float_range_is_an_error() {
        let mut rng = StdRng::seed_from_u64(42);

        for (min, max) in [(1.0, 0.0), (-1e308, 1e308), (f64::NAN, 1.0), (0.0, f64::INFINITY)] {
            assert!(
                matches!(
                    generate_float_range(&mut rng, min, max),
                    Err(GenerationError::InvalidRange { .. })
                ),
                "{min}..={max} should be rejected"
            );
        }
    }
}
