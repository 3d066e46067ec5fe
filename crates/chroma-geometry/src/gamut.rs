// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Gamut Envelope & Radial Projection
// ─────────────────────────────────────────────────────────────────────
//! Smooth chroma envelope over (L, h) and the radial-clamp projection
//! that pulls out-of-gamut points back inside it.
//!
//! The envelope is not a colorimetric gamut boundary; it is a smooth
//! L- and h-dependent bound chosen so projection stays deterministic
//! and hue-invariance is testable. Mid lightness allows the most
//! chroma, tapering toward L = 0 and L = 1, with a gentle sinusoidal
//! hue ripple to avoid degeneracy.

use chroma_types::{OKLCh, OKLab};

use crate::codec::{from_oklch, gray_axis_bias, to_oklch};

const BASE_PEAK: f64 = 0.35;
const BASE_FLOOR: f64 = 0.05;
const RIPPLE_AMP: f64 = 0.03;
const RIPPLE_FREQ: f64 = 3.0;

/// Maximum allowable chroma at the given lightness and hue.
pub fn max_chroma(l: f64, h: f64) -> f64 {
    let base = BASE_PEAK * (1.0 - (2.0 * l - 1.0).abs()) + BASE_FLOOR;
    let ripple = RIPPLE_AMP * (RIPPLE_FREQ * h).sin();
    (base + ripple).max(0.0)
}

/// Whether `p` lies inside the envelope, up to `tol`.
pub fn contains(p: OKLab, tol: f64, dp: u32) -> bool {
    let lch = to_oklch(p, dp);
    lch.c <= max_chroma(lch.l, lch.h) + tol
}

/// Radial-clamp projection into the envelope:
/// 1. clamp L to [0, 1]
/// 2. convert to OKLCh
/// 3. clamp C to `max_chroma(L, h)`
/// 4. convert back, apply gray-axis bias, quantize
///
/// The result is always in-domain: L bounded, chroma within the
/// envelope, and therefore a, b within the space box.
pub fn project_radial_clamp(p: OKLab, tol: f64, dp: u32) -> OKLab {
    let bounded = OKLab::new(p.l.clamp(0.0, 1.0), p.a, p.b);
    let lch = to_oklch(bounded, dp);
    let c = lch.c.min(max_chroma(lch.l, lch.h));
    let projected = from_oklch(OKLCh::new(lch.l, c, lch.h), dp);
    gray_axis_bias(projected, tol, dp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_peaks_at_mid_lightness() {
        assert!(max_chroma(0.5, 0.0) > max_chroma(0.1, 0.0));
        assert!(max_chroma(0.5, 0.0) > max_chroma(0.9, 0.0));
    }

    #[test]
    fn test_envelope_non_negative() {
        for i in 0..=20 {
            let l = i as f64 / 20.0;
            for j in -10..=10 {
                let h = j as f64 * 0.3;
                assert!(max_chroma(l, h) >= 0.0, "l={l} h={h}");
            }
        }
    }

    #[test]
    fn test_gray_point_inside() {
        assert!(contains(OKLab::new(0.5, 0.0, 0.0), 1e-12, 12));
    }

    #[test]
    fn test_saturated_point_outside() {
        assert!(!contains(OKLab::new(0.5, 0.9, 0.0), 1e-12, 12));
    }

    #[test]
    fn test_projection_is_inside() {
        let raw = OKLab::new(0.5, 0.9, -0.4);
        let projected = project_radial_clamp(raw, 1e-12, 12);
        assert!(contains(projected, 1e-9, 12), "{projected:?}");
    }

    #[test]
    fn test_projection_preserves_hue() {
        let raw = OKLab::new(0.5, 0.6, 0.6);
        let projected = project_radial_clamp(raw, 1e-12, 12);
        let h_raw = to_oklch(raw, 12).h;
        let h_proj = to_oklch(projected, 12).h;
        assert!((h_raw - h_proj).abs() < 1e-6, "{h_raw} vs {h_proj}");
    }

    #[test]
    fn test_projection_clamps_lightness() {
        let projected = project_radial_clamp(OKLab::new(1.4, 0.0, 0.0), 1e-12, 12);
        assert_eq!(projected.l, 1.0);
        let projected = project_radial_clamp(OKLab::new(-0.2, 0.0, 0.0), 1e-12, 12);
        assert_eq!(projected.l, 0.0);
    }

    #[test]
    fn test_projection_fixed_point_inside() {
        // A point already inside projects to (a quantization of) itself.
        let p = OKLab::new(0.5, 0.1, 0.05);
        let projected = project_radial_clamp(p, 1e-12, 12);
        assert!((projected.l - p.l).abs() < 1e-9);
        assert!((projected.a - p.a).abs() < 1e-9);
        assert!((projected.b - p.b).abs() < 1e-9);
    }

    #[test]
    fn test_projection_idempotent() {
        let raw = OKLab::new(0.6, 0.8, -0.7);
        let once = project_radial_clamp(raw, 1e-12, 12);
        let twice = project_radial_clamp(once, 1e-12, 12);
        assert_eq!(once, twice);
    }
}
