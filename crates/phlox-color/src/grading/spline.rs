//! Cubic smoothing spline fitted to sparse control points.
//!
//! The fit first tries a single least-squares cubic polynomial over all
//! control points. If its sum of squared residuals is within the smoothing
//! factor, that cubic is the result; with exactly four points it always
//! interpolates them. Otherwise it falls back to the Reinsch form of the
//! natural cubic smoothing spline. For knots `x₀ < … < xₙ` with
//! observations `yᵢ`, that spline `f` minimizes
//!
//! ```text
//! Σ (yᵢ − f(xᵢ))² + λ ∫ f''(x)² dx
//! ```
//!
//! # Algorithm
//! With `g` the fitted knot values and `γ` the second derivatives at the
//! interior knots (zero at both ends):
//! ```text
//! (R + λ QᵀQ) γ = Qᵀ y
//! g = y − λ Q γ
//! residual(λ) = ‖λ Q γ‖²
//! ```
//! `R` is tridiagonal and `QᵀQ` pentadiagonal, so the system is solved with
//! a bandwidth-2 Cholesky factorization. The residual grows monotonically
//! with λ, which is found by bisection on `ln λ` so that the residual equals
//! the requested smoothing factor.
//!
//! # Reference
//! - Dierckx, P. (1975) — An algorithm for smoothing, differentiation and
//!   integration of experimental data using spline functions
//! - Reinsch, C. H. (1967) — Smoothing by spline functions
//! - Green & Silverman (1994) — Nonparametric Regression and GLMs, ch. 2

use crate::error::FitError;

/// Minimum number of control points for a cubic fit.
pub const MIN_POINTS: usize = 4;

/// Bisection bounds on `ln λ`.
const LN_LAMBDA_MIN: f64 = -30.0;
const LN_LAMBDA_MAX: f64 = 60.0;
const BISECTION_STEPS: usize = 100;

/// A fitted cubic smoothing spline.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingSpline {
    knots: Vec<f64>,
    shape: Shape,
    residual: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    /// One cubic over the whole domain, in `t = (x − center) / half`.
    Cubic {
        center: f64,
        half: f64,
        coeffs: [f64; 4],
    },
    /// Natural spline through the knots.
    Natural {
        values: Vec<f64>,
        /// Second derivative at every knot; zero at both ends.
        second: Vec<f64>,
        lambda: f64,
    },
}

impl SmoothingSpline {
    /// Fit a spline whose sum of squared residuals at the control points
    /// does not exceed `smoothing`.
    ///
    /// `xs` must be strictly increasing and both slices must hold at least
    /// [`MIN_POINTS`] finite values.
    pub fn fit(xs: &[f64], ys: &[f64], smoothing: f64) -> Result<Self, FitError> {
        validate(xs, ys, smoothing)?;

        let cubic = fit_cubic(xs, ys)?;
        if xs.len() == MIN_POINTS || cubic.residual <= smoothing {
            tracing::debug!(
                residual = cubic.residual,
                points = xs.len(),
                "fitted least-squares cubic"
            );
            return Ok(cubic);
        }

        let system = System::new(xs, ys);
        if smoothing == 0.0 {
            return system.solve(0.0).map(|sol| sol.into_spline(xs));
        }

        let mut lo = LN_LAMBDA_MIN;
        let mut hi = LN_LAMBDA_MAX;
        let mut best = system.solve(lo.exp())?;
        if best.residual >= smoothing {
            tracing::warn!(
                residual = best.residual,
                smoothing,
                "smoothing factor below the minimum-λ residual, using minimum smoothing"
            );
            return Ok(best.into_spline(xs));
        }

        for _ in 0..BISECTION_STEPS {
            let mid = 0.5 * (lo + hi);
            let sol = system.solve(mid.exp())?;
            if sol.residual > smoothing {
                hi = mid;
            } else {
                lo = mid;
                best = sol;
            }
            if hi - lo < 1e-10 {
                break;
            }
        }

        tracing::debug!(
            lambda = best.lambda,
            residual = best.residual,
            points = xs.len(),
            "fitted smoothing spline"
        );
        Ok(best.into_spline(xs))
    }

    /// Evaluate the spline at `x`.
    ///
    /// A single cubic extends as-is beyond the knots; a natural spline
    /// extrapolates linearly.
    pub fn evaluate(&self, x: f64) -> f64 {
        match &self.shape {
            Shape::Cubic {
                center,
                half,
                coeffs,
            } => {
                let t = (x - center) / half;
                coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
            }
            Shape::Natural { values, second, .. } => {
                evaluate_natural(&self.knots, values, second, x)
            }
        }
    }

    /// Smoothing weight λ selected by the fit, or `None` when a single
    /// cubic already met the smoothing factor.
    pub fn lambda(&self) -> Option<f64> {
        match self.shape {
            Shape::Cubic { .. } => None,
            Shape::Natural { lambda, .. } => Some(lambda),
        }
    }

    /// Sum of squared residuals at the control points.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }
}

fn evaluate_natural(xs: &[f64], g: &[f64], gam: &[f64], x: f64) -> f64 {
    let n = xs.len() - 1;

    if x <= xs[0] {
        let h = xs[1] - xs[0];
        let slope = (g[1] - g[0]) / h - h * gam[1] / 6.0;
        return g[0] + slope * (x - xs[0]);
    }
    if x >= xs[n] {
        let h = xs[n] - xs[n - 1];
        let slope = (g[n] - g[n - 1]) / h + h * gam[n - 1] / 6.0;
        return g[n] + slope * (x - xs[n]);
    }

    // Binary search for the segment containing x
    let mut lo = 0;
    let mut hi = n;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let h = xs[hi] - xs[lo];
    let dl = x - xs[lo];
    let dr = xs[hi] - x;
    (dr * g[lo] + dl * g[hi]) / h
        - dl * dr / 6.0 * ((1.0 + dl / h) * gam[hi] + (1.0 + dr / h) * gam[lo])
}

/// Least-squares cubic through all points, solved from the 4×4 normal
/// equations over `x` rescaled onto [-1, 1].
fn fit_cubic(xs: &[f64], ys: &[f64]) -> Result<SmoothingSpline, FitError> {
    let center = 0.5 * (xs[0] + xs[xs.len() - 1]);
    let half = 0.5 * (xs[xs.len() - 1] - xs[0]);

    let mut a = [[0.0_f64; 4]; 4];
    let mut b = [0.0_f64; 4];
    for (x, y) in xs.iter().zip(ys) {
        let t = (x - center) / half;
        let powers = [1.0, t, t * t, t * t * t];
        for i in 0..4 {
            b[i] += powers[i] * y;
            for j in 0..4 {
                a[i][j] += powers[i] * powers[j];
            }
        }
    }

    let coeffs = solve_dense4(a, b)?;
    let residual = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| {
            let t = (x - center) / half;
            let fx = coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c);
            (fx - y).powi(2)
        })
        .sum();

    Ok(SmoothingSpline {
        knots: xs.to_vec(),
        shape: Shape::Cubic {
            center,
            half,
            coeffs,
        },
        residual,
    })
}

/// Gaussian elimination with partial pivoting on a 4×4 system.
fn solve_dense4(mut a: [[f64; 4]; 4], mut b: [f64; 4]) -> Result<[f64; 4], FitError> {
    for col in 0..4 {
        let pivot = (col..4)
            .max_by(|&p, &q| a[p][col].abs().total_cmp(&a[q][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-300 || !a[pivot][col].is_finite() {
            return Err(FitError::NotPositiveDefinite);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..4 {
            let f = a[row][col] / a[col][col];
            for k in col..4 {
                a[row][k] -= f * a[col][k];
            }
            b[row] -= f * b[col];
        }
    }

    let mut x = [0.0; 4];
    for i in (0..4).rev() {
        let sum: f64 = (i + 1..4).map(|k| a[i][k] * x[k]).sum();
        x[i] = (b[i] - sum) / a[i][i];
    }
    Ok(x)
}

fn validate(xs: &[f64], ys: &[f64], smoothing: f64) -> Result<(), FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    let got = xs.len();
    if got < MIN_POINTS {
        return Err(FitError::TooFewPoints {
            required: MIN_POINTS,
            got,
        });
    }
    if !smoothing.is_finite() || smoothing < 0.0 {
        return Err(FitError::InvalidSmoothing(smoothing));
    }
    for (index, (x, y)) in xs.iter().zip(ys).enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(FitError::NonFinite { index });
        }
        if index > 0 && *x <= xs[index - 1] {
            return Err(FitError::NotIncreasing { index });
        }
    }
    Ok(())
}

/// The λ-independent parts of the Reinsch system.
struct System<'a> {
    ys: &'a [f64],
    /// Column `j` of `Q` has entries at rows `j`, `j+1`, `j+2`.
    q: Vec<[f64; 3]>,
    /// Diagonal and first off-diagonal of `R`.
    r: Vec<[f64; 2]>,
    qty: Vec<f64>,
}

struct Solution {
    values: Vec<f64>,
    second: Vec<f64>,
    lambda: f64,
    residual: f64,
}

impl<'a> System<'a> {
    fn new(xs: &[f64], ys: &'a [f64]) -> Self {
        let n = xs.len() - 1;
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        let q: Vec<[f64; 3]> = (0..n - 1)
            .map(|j| {
                let a = 1.0 / h[j];
                let b = 1.0 / h[j + 1];
                [a, -a - b, b]
            })
            .collect();
        let r: Vec<[f64; 2]> = (0..n - 1)
            .map(|j| [(h[j] + h[j + 1]) / 3.0, h[j + 1] / 6.0])
            .collect();
        let qty = q
            .iter()
            .enumerate()
            .map(|(j, c)| c[0] * ys[j] + c[1] * ys[j + 1] + c[2] * ys[j + 2])
            .collect();

        Self { ys, q, r, qty }
    }

    fn solve(&self, lambda: f64) -> Result<Solution, FitError> {
        let m = self.q.len();
        let q = &self.q;

        // Lower band of A = R + λ QᵀQ: band[i][d] = A(i, i - d)
        let band: Vec<[f64; 3]> = (0..m)
            .map(|i| {
                let qtq = q[i][0].powi(2) + q[i][1].powi(2) + q[i][2].powi(2);
                let diag = self.r[i][0] + lambda * qtq;
                let off1 = if i >= 1 {
                    self.r[i - 1][1] + lambda * (q[i - 1][1] * q[i][0] + q[i - 1][2] * q[i][1])
                } else {
                    0.0
                };
                let off2 = if i >= 2 {
                    lambda * q[i - 2][2] * q[i][0]
                } else {
                    0.0
                };
                [diag, off1, off2]
            })
            .collect();

        let gamma = solve_banded_cholesky(&band, &self.qty)?;

        // Qγ, one entry per knot
        let mut q_gamma = vec![0.0; m + 2];
        for (j, c) in q.iter().enumerate() {
            q_gamma[j] += c[0] * gamma[j];
            q_gamma[j + 1] += c[1] * gamma[j];
            q_gamma[j + 2] += c[2] * gamma[j];
        }

        let values: Vec<f64> = self
            .ys
            .iter()
            .zip(&q_gamma)
            .map(|(y, qg)| y - lambda * qg)
            .collect();
        let residual = q_gamma.iter().map(|qg| (lambda * qg).powi(2)).sum();

        let mut second = Vec::with_capacity(m + 2);
        second.push(0.0);
        second.extend_from_slice(&gamma);
        second.push(0.0);

        Ok(Solution {
            values,
            second,
            lambda,
            residual,
        })
    }
}

impl Solution {
    fn into_spline(self, xs: &[f64]) -> SmoothingSpline {
        SmoothingSpline {
            knots: xs.to_vec(),
            shape: Shape::Natural {
                values: self.values,
                second: self.second,
                lambda: self.lambda,
            },
            residual: self.residual,
        }
    }
}

/// Solve `A x = b` for symmetric positive definite `A` with bandwidth 2,
/// given as its lower band (`band[i][d] = A(i, i - d)`).
fn solve_banded_cholesky(band: &[[f64; 3]], b: &[f64]) -> Result<Vec<f64>, FitError> {
    let m = band.len();
    // l[i][d] = L(i, i - d)
    let mut l = vec![[0.0_f64; 3]; m];

    for i in 0..m {
        for j in i.saturating_sub(2)..=i {
            let mut sum = band[i][i - j];
            for k in i.saturating_sub(2)..j {
                sum -= l[i][i - k] * l[j][j - k];
            }
            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return Err(FitError::NotPositiveDefinite);
                }
                l[i][0] = sum.sqrt();
            } else {
                l[i][i - j] = sum / l[j][0];
            }
        }
    }

    // Forward: L z = b
    let mut z = vec![0.0; m];
    for i in 0..m {
        let mut sum = b[i];
        for k in i.saturating_sub(2)..i {
            sum -= l[i][i - k] * z[k];
        }
        z[i] = sum / l[i][0];
    }

    // Backward: Lᵀ x = z
    let mut x = vec![0.0; m];
    for i in (0..m).rev() {
        let mut sum = z[i];
        for k in (i + 1)..(i + 3).min(m) {
            sum -= l[k][k - i] * x[k];
        }
        x[i] = sum / l[i][0];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_banded_cholesky_matches_known_solution() {
        // A = [[4,1,0],[1,4,1],[0,1,4]], x = [1,2,3] → b = [6,12,14]
        let band = [[4.0, 0.0, 0.0], [4.0, 1.0, 0.0], [4.0, 1.0, 0.0]];
        let x = solve_banded_cholesky(&band, &[6.0, 12.0, 14.0]).unwrap();
        for (got, want) in x.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < EPSILON, "{got} vs {want}");
        }
    }

    #[test]
    fn test_four_points_give_interpolating_cubic() {
        let xs = [0.0, 64.0, 192.0, 255.0];
        let ys = [0.0, 32.0, 224.0, 255.0];
        let spline = SmoothingSpline::fit(&xs, &ys, 1.0).unwrap();
        assert_eq!(spline.lambda(), None);
        assert!(spline.residual() < EPSILON);
        for (x, y) in xs.iter().zip(ys) {
            assert!((spline.evaluate(*x) - y).abs() < EPSILON);
        }
        // Values of the unique cubic through the four points.
        for (x, want) in [(32.0, 3.930), (100.0, 82.369), (230.0, 254.196)] {
            let got = spline.evaluate(x);
            assert!((got - want).abs() < 1e-3, "x={x}: {got} vs {want}");
        }
    }

    #[test]
    fn test_cubic_data_stays_cubic() {
        let xs = [0.0, 30.0, 90.0, 150.0, 255.0];
        let f = |x: f64| 1e-5 * x * x * x - 2e-3 * x * x + 0.9 * x + 5.0;
        let ys: Vec<f64> = xs.iter().map(|x| f(*x)).collect();
        let spline = SmoothingSpline::fit(&xs, &ys, 1.0).unwrap();
        assert_eq!(spline.lambda(), None);
        for x in [-10.0, 12.0, 200.0, 300.0] {
            assert!((spline.evaluate(x) - f(x)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_smoothing_interpolates() {
        let xs = [0.0, 64.0, 128.0, 192.0, 255.0];
        let ys = [0.0, 40.0, 140.0, 200.0, 255.0];
        let spline = SmoothingSpline::fit(&xs, &ys, 0.0).unwrap();
        for (x, y) in xs.iter().zip(ys) {
            assert!((spline.evaluate(*x) - y).abs() < EPSILON);
        }
        assert!(spline.residual() < EPSILON);
    }

    #[test]
    fn test_linear_data_is_reproduced() {
        let xs = [0.0, 50.0, 100.0, 180.0, 255.0];
        let ys: Vec<f64> = xs.iter().map(|x| 0.5 * x + 10.0).collect();
        let spline = SmoothingSpline::fit(&xs, &ys, 1.0).unwrap();
        for x in [0.0, 25.0, 77.0, 200.0, 255.0] {
            assert!((spline.evaluate(x) - (0.5 * x + 10.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_residual_meets_smoothing_factor() {
        let xs = [0.0, 40.0, 90.0, 150.0, 200.0, 255.0];
        let ys = [0.0, 70.0, 60.0, 180.0, 170.0, 255.0];
        let spline = SmoothingSpline::fit(&xs, &ys, 1.0).unwrap();
        assert!(
            (spline.residual() - 1.0).abs() < 1e-3,
            "residual {}",
            spline.residual()
        );
        assert!(spline.lambda().is_some_and(|l| l > 0.0));
    }

    #[test]
    fn test_rejects_too_few_points() {
        let err = SmoothingSpline::fit(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], 1.0).unwrap_err();
        assert_eq!(err, FitError::TooFewPoints { required: 4, got: 3 });
    }

    #[test]
    fn test_rejects_non_increasing_x() {
        let err = SmoothingSpline::fit(&[0.0, 10.0, 10.0, 20.0], &[0.0, 1.0, 2.0, 3.0], 1.0)
            .unwrap_err();
        assert_eq!(err, FitError::NotIncreasing { index: 2 });
    }

    #[test]
    fn test_rejects_nan() {
        let err = SmoothingSpline::fit(&[0.0, 1.0, 2.0, 3.0], &[0.0, f64::NAN, 2.0, 3.0], 1.0)
            .unwrap_err();
        assert_eq!(err, FitError::NonFinite { index: 1 });
    }

    #[test]
    fn test_natural_extrapolation_is_linear() {
        let xs = [10.0, 60.0, 120.0, 200.0, 250.0];
        let ys = [20.0, 80.0, 130.0, 210.0, 215.0];
        let spline = SmoothingSpline::fit(&xs, &ys, 0.0).unwrap();
        assert!(spline.lambda().is_some());
        let a = spline.evaluate(0.0);
        let b = spline.evaluate(5.0);
        let c = spline.evaluate(10.0);
        assert!(((b - a) - (c - b)).abs() < EPSILON);
    }
}
