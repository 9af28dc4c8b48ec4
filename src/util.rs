use ark_ff::Zero;

use crate::error::{FasError, Result};
use crate::group::{Point, Scalar};

/// Eager length check at an API boundary. Nothing is padded or truncated.
pub fn ensure_len<T>(what: &'static str, v: &[T], expected: usize) -> Result<()> {
    if v.len() != expected {
        return Err(FasError::DimensionMismatch {
            what,
            expected,
            actual: v.len(),
        });
    }
    Ok(())
}

/// Lift a dense vector of non-negative integers into the scalar field.
pub fn scalars_from_u64(values: &[u64]) -> Vec<Scalar> {
    values.iter().map(|&v| Scalar::from(v)).collect()
}

/// `<x, y> mod n`
pub fn field_inner_product(x: &[Scalar], y: &[Scalar]) -> Result<Scalar> {
    ensure_len("inner product operand", y, x.len())?;
    Ok(x.iter()
        .zip(y.iter())
        .fold(Scalar::zero(), |acc, (a, b)| acc + (*a) * (*b)))
}

/// Sequential `Σ coeffs[i]·points[i]`. See [`crate::parallel::WorkerPool`]
/// for the fanned-out version.
pub fn linear_combination(points: &[Point], coeffs: &[Scalar]) -> Result<Point> {
    ensure_len("coefficient vector", coeffs, points.len())?;
    Ok(points
        .iter()
        .zip(coeffs.iter())
        .fold(Point::zero(), |acc, (p, c)| acc + *p * *c))
}

/// `v ‖ [last]`, the augmented vector of length `v.len() + 1`.
pub fn augment(v: &[Scalar], last: Scalar) -> Vec<Scalar> {
    let mut out = Vec::with_capacity(v.len() + 1);
    out.extend_from_slice(v);
    out.push(last);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::mul_generator;

    #[test]
    fn inner_product_of_small_vectors() {
        let x = scalars_from_u64(&[2, 5, 7]);
        let y = scalars_from_u64(&[1, 1, 1]);
        assert_eq!(field_inner_product(&x, &y).unwrap(), Scalar::from(14u64));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let x = scalars_from_u64(&[1, 2]);
        let y = scalars_from_u64(&[1, 2, 3]);
        let err = field_inner_product(&x, &y).unwrap_err();
        assert!(matches!(
            err,
            FasError::DimensionMismatch { expected: 2, actual: 3, .. }
        ));
    }

    #[test]
    fn linear_combination_matches_scalar_sum() {
        let points: Vec<Point> = scalars_from_u64(&[3, 4, 5]).iter().map(mul_generator).collect();
        let coeffs = scalars_from_u64(&[1, 2, 3]);
        // 3 + 8 + 15
        assert_eq!(
            linear_combination(&points, &coeffs).unwrap(),
            mul_generator(&Scalar::from(26u64))
        );
    }

    #[test]
    fn augment_appends_one_coordinate() {
        let v = scalars_from_u64(&[9, 8]);
        let a = augment(&v, Scalar::zero());
        assert_eq!(a.len(), 3);
        assert_eq!(a[2], Scalar::zero());
        assert_eq!(a[..2], v[..]);
    }
}
