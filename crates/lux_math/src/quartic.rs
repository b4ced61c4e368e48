//! Closed-form polynomial roots.
//!
//! Quartics are solved with Ferrari's method: the depressed quartic is split
//! into two quadratics using the largest real root of its resolvent cubic.
//! The quadratics are solved in complex arithmetic so all four roots are
//! reported, real or not. Callers decide what counts as real via [`is_real`].

use num_complex::Complex64;

/// Imaginary parts below this (relative to the real part) are rounding noise.
const IMAGINARY_TOLERANCE: f64 = 1e-6;

/// Resolvent roots below this (relative to the coefficients) are treated as zero.
const DEGENERATE_RESOLVENT: f64 = 1e-12;

/// All four roots of a·x⁴ + b·x³ + c·x² + d·x + e = 0.
///
/// `a` must be nonzero; the ray tracer always passes |direction|⁴ here.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> [Complex64; 4] {
    // Monic form
    let (b, c, d, e) = (b / a, c / a, d / a, e / a);

    // Depressed quartic y⁴ + p·y² + q·y + r with x = y - b/4
    let shift = 0.25 * b;
    let b2 = b * b;
    let p = c - 0.375 * b2;
    let q = b2 * b / 8.0 - 0.5 * b * c + d;
    let r = -3.0 * b2 * b2 / 256.0 + b2 * c / 16.0 - 0.25 * b * d + e;

    // Resolvent cubic 8m³ + 8p·m² + (2p² - 8r)·m - q² = 0, in monic form
    let m = largest_real_cubic_root(p, 0.25 * p * p - r, -0.125 * q * q);

    // m is only zero when q is, in which case the quartic is biquadratic
    let scale = p.abs().max(r.abs().sqrt()).max(1.0);
    let roots = if m <= DEGENERATE_RESOLVENT * scale {
        // y⁴ + p·y² + r = 0
        let [u0, u1] = solve_quadratic(Complex64::new(p, 0.0), Complex64::new(r, 0.0));
        let (y0, y1) = (u0.sqrt(), u1.sqrt());
        [y0, -y0, y1, -y1]
    } else {
        let s = Complex64::new(2.0 * m, 0.0).sqrt();
        let half_p_m = Complex64::new(0.5 * p + m, 0.0);
        let skew = q / (2.0 * s);
        let [y0, y1] = solve_quadratic(-s, half_p_m + skew);
        let [y2, y3] = solve_quadratic(s, half_p_m - skew);
        [y0, y1, y2, y3]
    };

    roots.map(|y| y - shift)
}

/// Whether a complex root is real up to rounding noise.
#[inline]
pub fn is_real(root: Complex64) -> bool {
    root.im.abs() <= IMAGINARY_TOLERANCE * root.re.abs().max(1.0)
}

/// Roots of y² + b·y + c = 0.
fn solve_quadratic(b: Complex64, c: Complex64) -> [Complex64; 2] {
    let sqrt_disc = (b * b - 4.0 * c).sqrt();
    [(-b - sqrt_disc) * 0.5, (-b + sqrt_disc) * 0.5]
}

/// Largest real root of m³ + a·m² + b·m + c = 0.
fn largest_real_cubic_root(a: f64, b: f64, c: f64) -> f64 {
    // Depressed cubic t³ + p·t + q with m = t - a/3
    let a3 = a / 3.0;
    let p = b - a * a3;
    let q = a3 * (2.0 * a3 * a3 - b) + c;

    let half_q = 0.5 * q;
    let third_p = p / 3.0;
    let disc = half_q * half_q + third_p * third_p * third_p;

    let t = if disc > 0.0 {
        // One real root (Cardano)
        let sqrt_disc = disc.sqrt();
        (-half_q + sqrt_disc).cbrt() + (-half_q - sqrt_disc).cbrt()
    } else {
        // Three real roots (trigonometric form); k = 0 is the largest
        let radius = (-third_p).max(0.0).sqrt();
        if radius == 0.0 {
            0.0
        } else {
            let cos_arg = (-half_q / (radius * radius * radius)).clamp(-1.0, 1.0);
            2.0 * radius * (cos_arg.acos() / 3.0).cos()
        }
    };

    t - a3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_real_parts(roots: [Complex64; 4]) -> Vec<f64> {
        let mut re: Vec<f64> = roots.iter().map(|r| r.re).collect();
        re.sort_by(|a, b| a.total_cmp(b));
        re
    }

    #[test]
    fn test_four_distinct_real_roots() {
        // (x-1)(x-2)(x-3)(x-4)
        let roots = solve_quartic(1.0, -10.0, 35.0, -50.0, 24.0);
        assert!(roots.iter().all(|&r| is_real(r)));
        for (got, want) in sorted_real_parts(roots).iter().zip([1.0, 2.0, 3.0, 4.0]) {
            assert!((got - want).abs() < 1e-8, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_all_complex_roots() {
        // x⁴ + 1 has roots (±1 ± i)/√2
        let roots = solve_quartic(1.0, 0.0, 0.0, 0.0, 1.0);
        for root in roots {
            assert!(!is_real(root));
            assert!((root.norm() - 1.0).abs() < 1e-9);
            assert!((root.im.abs() - 0.5_f64.sqrt()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_biquadratic() {
        // (x² - 1)(x² - 4) = x⁴ - 5x² + 4
        let roots = solve_quartic(1.0, 0.0, -5.0, 0.0, 4.0);
        assert!(roots.iter().all(|&r| is_real(r)));
        for (got, want) in sorted_real_parts(roots).iter().zip([-2.0, -1.0, 1.0, 2.0]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_real_two_complex() {
        // (x - 1)(x - 3)(x² + 1) = x⁴ - 4x³ + 4x² - 4x + 3
        let roots = solve_quartic(1.0, -4.0, 4.0, -4.0, 3.0);
        let mut real: Vec<f64> = roots.iter().filter(|r| is_real(**r)).map(|r| r.re).collect();
        real.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(real.len(), 2);
        assert!((real[0] - 1.0).abs() < 1e-8);
        assert!((real[1] - 3.0).abs() < 1e-8);
    }

    #[test]
    fn test_scaled_leading_coefficient() {
        let roots = solve_quartic(2.0, -20.0, 70.0, -100.0, 48.0);
        assert!((sorted_real_parts(roots)[0] - 1.0).abs() < 1e-8);
    }
}
