// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — OKLab/OKLCh Codec
// ─────────────────────────────────────────────────────────────────────
//! Cartesian↔cylindrical conversion with canonical rounding.
//!
//! Policy: zero chroma yields hue 0, never NaN, so hue is always a
//! well-defined, comparable value.

use chroma_types::{OKLCh, OKLab};

use crate::numeric::{clamp_angle_pi, quantize};

/// Convert OKLab (L, a, b) to OKLCh (L, C, h) with the hue wrapped to
/// [-π, π). All three outputs are quantized independently.
pub fn to_oklch(p: OKLab, dp: u32) -> OKLCh {
    let c = p.a.hypot(p.b);
    let h = if c == 0.0 {
        // Hue undefined on the gray axis; canonical h = 0.
        0.0
    } else {
        clamp_angle_pi(p.b.atan2(p.a))
    };
    OKLCh {
        l: quantize(p.l, dp),
        c: quantize(c, dp),
        h: quantize(h, dp),
    }
}

/// Convert OKLCh back to OKLab via `a = C·cos h`, `b = C·sin h` after
/// canonicalizing the hue.
pub fn from_oklch(p: OKLCh, dp: u32) -> OKLab {
    let h = clamp_angle_pi(p.h);
    OKLab {
        l: quantize(p.l, dp),
        a: quantize(p.c * h.cos(), dp),
        b: quantize(p.c * h.sin(), dp),
    }
}

/// Canonicalization near the gray axis: when both `|a|` and `|b|` fall
/// below `tol`, snap to exactly `a = b = 0` so repeated round-trips
/// cannot drift the axis toward non-zero noise.
pub fn gray_axis_bias(p: OKLab, tol: f64, dp: u32) -> OKLab {
    if p.a.abs() <= tol && p.b.abs() <= tol {
        OKLab {
            l: quantize(p.l, dp),
            a: 0.0,
            b: 0.0,
        }
    } else {
        OKLab {
            l: quantize(p.l, dp),
            a: quantize(p.a, dp),
            b: quantize(p.b, dp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_zero_chroma_hue_is_zero() {
        let lch = to_oklch(OKLab::new(0.5, 0.0, 0.0), 12);
        assert_eq!(lch.c, 0.0);
        assert_eq!(lch.h, 0.0);
    }

    #[test]
    fn test_chroma_is_hypot() {
        let lch = to_oklch(OKLab::new(0.5, 0.3, 0.4), 12);
        assert!((lch.c - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_hue_quadrants() {
        let east = to_oklch(OKLab::new(0.5, 0.2, 0.0), 12);
        assert!(east.h.abs() < 1e-12);
        let north = to_oklch(OKLab::new(0.5, 0.0, 0.2), 12);
        assert!((north.h - PI / 2.0).abs() < 1e-9);
        let west = to_oklch(OKLab::new(0.5, -0.2, 0.0), 12);
        // atan2(0, -0.2) = +π, which canonicalizes to -π.
        assert!((west.h - (-PI)).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let points = [
            OKLab::new(0.5, 0.3, 0.2),
            OKLab::new(0.7, -0.1, 0.25),
            OKLab::new(0.2, -0.05, -0.3),
            OKLab::new(0.9, 0.001, 0.001),
        ];
        for p in points {
            let back = from_oklch(to_oklch(p, 12), 12);
            assert!((back.l - p.l).abs() < 1e-9, "{p:?} -> {back:?}");
            assert!((back.a - p.a).abs() < 1e-9, "{p:?} -> {back:?}");
            assert!((back.b - p.b).abs() < 1e-9, "{p:?} -> {back:?}");
        }
    }

    #[test]
    fn test_from_oklch_wraps_hue() {
        // h = 3π is the same direction as -π.
        let p = from_oklch(OKLCh::new(0.5, 0.2, 3.0 * PI), 12);
        let q = from_oklch(OKLCh::new(0.5, 0.2, -PI), 12);
        assert_eq!(p, q);
    }

    #[test]
    fn test_gray_axis_bias_snaps() {
        let p = gray_axis_bias(OKLab::new(0.5, 1e-13, -1e-13), 1e-12, 12);
        assert_eq!(p.a, 0.0);
        assert_eq!(p.b, 0.0);
        assert_eq!(p.l, 0.5);
    }

    #[test]
    fn test_gray_axis_bias_leaves_chromatic_points() {
        let p = gray_axis_bias(OKLab::new(0.5, 0.1, -1e-13), 1e-12, 12);
        assert!((p.a - 0.1).abs() < 1e-12);
    }
}
