//! Relative-tolerance comparison used to check that the exact, approximate and
//! SIMD paths agree.
//!
//! Two values are equal when `|x - y| / max(|x|, |y|, EPSILON_FLOOR) < tolerance`.
//! The floor keeps the ratio bounded when both values are close to zero.

/// Denominator floor for the relative error.
pub const EPSILON_FLOOR: f32 = 1e-9;

/// Loose tolerance for approximate exp against the exact exponential.
pub const APPROX_TOLERANCE: f32 = 1e-4;

/// Tight tolerance for paths that run identical arithmetic (SIMD vs scalar).
pub const EXACT_TOLERANCE: f32 = 1e-6;

/// Worst-case relative error of the approximate exp over the normal f32
/// range, with headroom for f32 rounding in the surrounding arithmetic.
pub const APPROX_MAX_RELATIVE_ERROR: f32 = 1.5e-4;

/// Relative error of `x` against `y` with the denominator floor applied.
#[inline]
pub fn relative_error(x: f32, y: f32) -> f32 {
    let size = x.abs().max(y.abs()).max(EPSILON_FLOOR);
    (x - y).abs() / size
}

/// `true` when `x` and `y` are equal within `tolerance` relative error.
///
/// NaN never compares equal.
#[inline]
pub fn almost_eq(x: f32, y: f32, tolerance: f32) -> bool {
    relative_error(x, y) < tolerance
}

/// A comparator bound to one tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlmostEqual {
    pub tolerance: f32,
}

impl AlmostEqual {
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    pub fn approx() -> Self {
        Self::new(APPROX_TOLERANCE)
    }

    pub fn exact() -> Self {
        Self::new(EXACT_TOLERANCE)
    }

    #[inline]
    pub fn eq(&self, x: f32, y: f32) -> bool {
        almost_eq(x, y, self.tolerance)
    }

    /// `true` when both slices have the same length and every pair is equal.
    pub fn all_eq(&self, a: &[f32], b: &[f32]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.eq(x, y))
    }

    pub fn first_mismatch(&self, a: &[f32], b: &[f32]) -> Option<Mismatch> {
        first_mismatch(a, b, self.tolerance)
    }
}

/// The first disagreeing pair found by [`first_mismatch`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mismatch {
    Length { left: usize, right: usize },
    Value {
        index: usize,
        left: f32,
        right: f32,
        relative_error: f32,
    },
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mismatch::Length { left, right } => {
                write!(f, "length mismatch: {} vs {}", left, right)
            }
            Mismatch::Value {
                index,
                left,
                right,
                relative_error,
            } => write!(
                f,
                "value mismatch at {}: {} vs {} (relative error {:.3e})",
                index, left, right, relative_error
            ),
        }
    }
}

/// Finds the first index where `a` and `b` differ by `tolerance` or more.
pub fn first_mismatch(a: &[f32], b: &[f32], tolerance: f32) -> Option<Mismatch> {
    if a.len() != b.len() {
        return Some(Mismatch::Length {
            left: a.len(),
            right: b.len(),
        });
    }

    a.iter()
        .zip(b)
        .enumerate()
        .find(|(_, (&x, &y))| !almost_eq(x, y, tolerance))
        .map(|(index, (&left, &right))| Mismatch::Value {
            index,
            left,
            right,
            relative_error: relative_error(left, right),
        })
}

/// Panics with the first mismatch if `a` and `b` are not equal within `tolerance`.
#[track_caller]
pub fn assert_all_almost_eq(a: &[f32], b: &[f32], tolerance: f32) {
    if let Some(mismatch) = first_mismatch(a, b, tolerance) {
        panic!("slices differ (tolerance {:.1e}): {}", tolerance, mismatch);
    }
}
