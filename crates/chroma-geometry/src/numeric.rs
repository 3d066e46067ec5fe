// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Numeric Canonicalizer
// ─────────────────────────────────────────────────────────────────────
//! Deterministic rounding and angle-wrapping primitives.
//!
//! `quantize` is the reproducibility contract the whole kernel rests
//! on: two independent implementations fed identical inputs must
//! produce bit-identical outputs.

use std::f64::consts::{PI, TAU};

/// Width of the tie window around an exact .5 fraction, scaled by the
/// input magnitude.
const TIE_EPS: f64 = 1e-12;

/// Scaled magnitude beyond which f64 can no longer represent a
/// fractional part; quantization is a no-op there.
const INTEGER_LIMIT: f64 = 4.5e15;

/// Round `x` to `dp` decimal places, half to even.
///
/// The value is scaled by `10^dp` and rounded to an integer with
/// banker's rounding; fractions within a `1e-12` window (relative to
/// the input magnitude) of an exact tie are treated as ties despite
/// float noise. Idempotent:
/// `quantize(quantize(x, dp), dp) == quantize(x, dp)`.
/// Non-finite inputs pass through unchanged.
pub fn quantize(x: f64, dp: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scale = 10f64.powi(dp as i32);
    let scaled = x * scale;
    if scaled.abs() >= INTEGER_LIMIT {
        return x;
    }
    let floor = scaled.floor();
    let frac = scaled - floor;
    let eps = TIE_EPS * x.abs().max(1.0);

    let rounded = if (frac - 0.5).abs() <= eps {
        // Exact tie: pick the even neighbour.
        if floor.rem_euclid(2.0) < 0.5 {
            floor
        } else {
            floor + 1.0
        }
    } else if frac > 0.5 {
        floor + 1.0
    } else {
        floor
    };

    rounded / scale
}

/// Quantize each coordinate of a triple independently.
pub fn quantize3(v: [f64; 3], dp: u32) -> [f64; 3] {
    [quantize(v[0], dp), quantize(v[1], dp), quantize(v[2], dp)]
}

/// `|x - y| <= tol`.
#[inline]
pub fn approx_equal(x: f64, y: f64, tol: f64) -> bool {
    (x - y).abs() <= tol
}

/// Wrap an angle (radians) to the canonical half-open interval [-π, π).
///
/// Uses an IEEE-remainder reduction (round-half-to-even quotient), then
/// explicitly maps the `+π` boundary to `-π`. Idempotent by
/// construction.
pub fn clamp_angle_pi(h: f64) -> f64 {
    let mut wrapped = h - (h / TAU).round_ties_even() * TAU;
    if approx_equal(wrapped, PI, 1e-15) || wrapped > PI {
        wrapped = -PI;
    }
    if wrapped < -PI {
        wrapped += TAU;
    }
    if wrapped >= PI {
        wrapped -= TAU;
    }
    wrapped
}

/// `a / b`, or `default` when `b == 0`.
#[inline]
pub fn safe_div(a: f64, b: f64, default: f64) -> f64 {
    if b == 0.0 {
        default
    } else {
        a / b
    }
}
