// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — OKLab Point Types
// ─────────────────────────────────────────────────────────────────────
//! Value types for the two OKLab coordinate systems.
//!
//! `OKLab` is the Cartesian form (lightness + two opponent axes);
//! `OKLCh` is the cylindrical form (lightness, chroma, hue). Both are
//! immutable `Copy` values; serde field names match the CGIR wire
//! format (`L`, `a`, `b` / `L`, `C`, `h`).

use serde::{Deserialize, Serialize};

/// A point in Cartesian OKLab space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OKLab {
    /// Lightness, valid range [0, 1].
    #[serde(rename = "L")]
    pub l: f64,
    /// Green-red opponent axis, valid range [-1, 1].
    pub a: f64,
    /// Blue-yellow opponent axis, valid range [-1, 1].
    pub b: f64,
}

impl OKLab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// The achromatic origin (black, on the gray axis).
    pub const fn origin() -> Self {
        Self { l: 0.0, a: 0.0, b: 0.0 }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    pub fn from_array(v: [f64; 3]) -> Self {
        Self { l: v[0], a: v[1], b: v[2] }
    }

    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }
}

/// A point in cylindrical OKLCh space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OKLCh {
    /// Lightness, shared with the Cartesian form.
    #[serde(rename = "L")]
    pub l: f64,
    /// Chroma: radial magnitude in the ab-plane, ≥ 0.
    #[serde(rename = "C")]
    pub c: f64,
    /// Hue angle in radians, canonical interval [-π, π).
    pub h: f64,
}

impl OKLCh {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.c.is_finite() && self.h.is_finite()
    }
}
