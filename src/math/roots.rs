//! Closed-form root extraction for low-degree polynomials in Bernstein form.
//!
//! Bernstein coefficients are the control values of a Bezier curve along one
//! axis, so a curve's hodograph coordinates (or the signed distances of its
//! control points from a line) can be passed in directly.

use std::f64::consts::TAU;

use super::interpolate::clamp;
use super::ROOT_EPSILON;

/// Roots that fall this far outside `[0, 1]` are still accepted and clamped.
const ROOT_TOLERANCE: f64 = 1e-7;

/// Returns the real roots of a linear or quadratic polynomial in Bernstein form.
///
/// `coeffs` holds 2 coefficients (linear) or 3 (quadratic), typically the
/// control values of a derivative along one axis. The roots are NOT
/// restricted to `[0, 1]`; callers filter them. Any other coefficient count
/// yields no roots.
///
/// A discriminant within [`ROOT_EPSILON`] of zero is treated as a repeated
/// root, and a quadratic whose leading coefficient vanishes degrades to the
/// linear solution.
#[must_use]
pub fn droots(coeffs: &[f64]) -> Vec<f64> {
    match *coeffs {
        [a, b] => linear_root(a, b).into_iter().collect(),
        [a, b, c] => quadratic_roots(a, b, c),
        _ => Vec::new(),
    }
}

/// Returns the roots in `[0, 1]` of a polynomial of degree 1 to 3 in Bernstein form.
///
/// Roots are sorted ascending and deduplicated. Coefficients that are exactly
/// zero at either end produce exact roots at `0` or `1`. A polynomial that is
/// identically zero has no isolated roots and yields an empty list.
#[must_use]
pub fn bernstein_roots(coeffs: &[f64]) -> Vec<f64> {
    if coeffs.len() < 2 || coeffs.len() > 4 || coeffs.iter().all(|c| *c == 0.0) {
        return Vec::new();
    }

    let mut roots = Vec::new();
    let mut poly = coeffs.to_vec();

    // Factor out exact roots at the endpoints: p(t) = t * r(t) or (1 - t) * q(t).
    while poly.len() > 1 && poly[0] == 0.0 {
        roots.push(0.0);
        poly = deflate_start(&poly);
    }
    while poly.len() > 1 && poly[poly.len() - 1] == 0.0 {
        roots.push(1.0);
        poly = deflate_end(&poly);
    }

    let interior = match *poly.as_slice() {
        [a, b] => linear_root(a, b).into_iter().collect(),
        [a, b, c] => quadratic_roots(a, b, c),
        [a, b, c, d] => cubic_roots(a, b, c, d),
        _ => Vec::new(),
    };

    roots.extend(
        interior
            .into_iter()
            .filter(|t| t.is_finite() && *t >= -ROOT_TOLERANCE && *t <= 1.0 + ROOT_TOLERANCE)
            .map(|t| clamp(t, 0.0, 1.0)),
    );

    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() <= ROOT_TOLERANCE);
    roots
}

/// Divides a Bernstein polynomial with `c[0] == 0` by `t`.
#[allow(clippy::cast_precision_loss)]
fn deflate_start(coeffs: &[f64]) -> Vec<f64> {
    let n = (coeffs.len() - 1) as f64;
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| c * n / i as f64)
        .collect()
}

/// Divides a Bernstein polynomial with `c[n] == 0` by `1 - t`.
#[allow(clippy::cast_precision_loss)]
fn deflate_end(coeffs: &[f64]) -> Vec<f64> {
    let n = coeffs.len() - 1;
    coeffs[..n]
        .iter()
        .enumerate()
        .map(|(i, c)| c * n as f64 / (n - i) as f64)
        .collect()
}

/// Root of `a(1 - t) + b t`.
fn linear_root(a: f64, b: f64) -> Option<f64> {
    if a == b {
        None
    } else {
        Some(a / (a - b))
    }
}

/// Roots of `a(1 - t)^2 + 2b t(1 - t) + c t^2`.
fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let scale = a.abs().max(b.abs()).max(c.abs());
    let d = a - 2.0 * b + c;

    if d.abs() <= ROOT_EPSILON * scale {
        // Linear in disguise: a + 2(b - a)t.
        if a == b {
            return Vec::new();
        }
        return vec![a / (2.0 * (a - b))];
    }

    let discriminant = b * b - a * c;
    if discriminant.abs() <= ROOT_EPSILON * scale * scale {
        return vec![(a - b) / d];
    }
    if discriminant < 0.0 {
        return Vec::new();
    }

    let m1 = discriminant.sqrt();
    let m2 = a - b;
    vec![(m2 - m1) / d, (m2 + m1) / d]
}

/// Roots of the cubic Bernstein polynomial with coefficients `p0..p3`.
fn cubic_roots(p0: f64, p1: f64, p2: f64, p3: f64) -> Vec<f64> {
    // Power basis: a3 t^3 + a2 t^2 + a1 t + a0
    let a3 = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let a2 = 3.0 * p0 - 6.0 * p1 + 3.0 * p2;
    let a1 = -3.0 * p0 + 3.0 * p1;
    let a0 = p0;

    let scale = a0.abs().max(a1.abs()).max(a2.abs()).max(a3.abs());
    if a3.abs() <= ROOT_EPSILON * scale {
        return power_quadratic_roots(a2, a1, a0, scale);
    }

    let a = a2 / a3;
    let b = a1 / a3;
    let c = a0 / a3;

    let p = (3.0 * b - a * a) / 3.0;
    let q = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 27.0;
    let q2 = q / 2.0;
    let p3 = p / 3.0;
    let discriminant = q2 * q2 + p3 * p3 * p3;
    let shift = a / 3.0;

    let disc_scale = (q2 * q2).max((p3 * p3 * p3).abs());
    let roots = if discriminant.abs() <= ROOT_EPSILON * disc_scale {
        let u1 = (-q2).cbrt();
        vec![2.0 * u1 - shift, -u1 - shift]
    } else if discriminant < 0.0 {
        let mp3 = -p3;
        let r = (mp3 * mp3 * mp3).sqrt();
        let cos_phi = clamp(-q / (2.0 * r), -1.0, 1.0);
        let phi = cos_phi.acos();
        let t1 = 2.0 * r.cbrt();
        vec![
            t1 * (phi / 3.0).cos() - shift,
            t1 * ((phi + TAU) / 3.0).cos() - shift,
            t1 * ((phi + 2.0 * TAU) / 3.0).cos() - shift,
        ]
    } else {
        let sd = discriminant.sqrt();
        let u1 = (-q2 + sd).cbrt();
        let v1 = (q2 + sd).cbrt();
        vec![u1 - v1 - shift]
    };

    roots
        .into_iter()
        .map(|t| polish_cubic(a3, a2, a1, a0, t))
        .collect()
}

/// Roots of `a t^2 + b t + c` in power basis.
fn power_quadratic_roots(a: f64, b: f64, c: f64, scale: f64) -> Vec<f64> {
    if a.abs() <= ROOT_EPSILON * scale {
        if b == 0.0 {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant.abs() <= ROOT_EPSILON * scale * scale {
        return vec![-b / (2.0 * a)];
    }
    if discriminant < 0.0 {
        return Vec::new();
    }

    // Numerically stable form; avoids cancellation between -b and the root.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    if q == 0.0 {
        return vec![0.0];
    }
    vec![q / a, c / q]
}

/// A couple of Newton steps, kept only while they reduce the residual.
fn polish_cubic(a3: f64, a2: f64, a1: f64, a0: f64, t: f64) -> f64 {
    let eval = |t: f64| ((a3 * t + a2) * t + a1) * t + a0;
    let slope = |t: f64| (3.0 * a3 * t + 2.0 * a2) * t + a1;

    let mut best = t;
    let mut residual = eval(t).abs();
    for _ in 0..2 {
        let d = slope(best);
        if d == 0.0 || residual == 0.0 {
            break;
        }
        let next = best - eval(best) / d;
        let next_residual = eval(next).abs();
        if !next.is_finite() || next_residual >= residual {
            break;
        }
        best = next;
        residual = next_residual;
    }
    best
}
