// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Ground Space Abstraction
// ─────────────────────────────────────────────────────────────────────
//! The ground-space capability trait and its OKLab implementation.
//!
//! A ground space is anything offering a distance metric, a convex mix,
//! and a domain test over its carrier type. The OKLab space is the one
//! production implementation; tests substitute their own.

use chroma_types::{ChromaResult, OKLab};

use chroma_geometry::mixing::mix_points;

/// Capability set for a perceptual ground space.
pub trait GroundSpace: Send + Sync {
    /// Carrier type for points in the space.
    type Point: Clone;

    /// Distance metric between two points, ≥ 0.
    fn distance(&self, a: &Self::Point, b: &Self::Point) -> f64;

    /// Convex combination of points with (unnormalized) weights.
    fn mix(&self, points: &[Self::Point], weights: &[f64]) -> ChromaResult<Self::Point>;

    /// Whether the point lies in the space's valid domain.
    fn validate(&self, point: &Self::Point) -> bool;
}

/// Cartesian OKLab space with bounds `L ∈ [0,1]`, `a, b ∈ [-1,1]`.
#[derive(Debug, Clone)]
pub struct OKLabSpace {
    /// Decimal places for the quantized mix results.
    pub quantize_dp: u32,
}

impl Default for OKLabSpace {
    fn default() -> Self {
        Self { quantize_dp: 12 }
    }
}

impl OKLabSpace {
    pub fn new(quantize_dp: u32) -> Self {
        Self { quantize_dp }
    }
}

impl GroundSpace for OKLabSpace {
    type Point = OKLab;

    /// Perceptual distance: Euclidean over (L, a, b).
    fn distance(&self, a: &OKLab, b: &OKLab) -> f64 {
        let dl = a.l - b.l;
        let da = a.a - b.a;
        let db = a.b - b.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    fn mix(&self, points: &[OKLab], weights: &[f64]) -> ChromaResult<OKLab> {
        mix_points(points, weights, self.quantize_dp)
    }

    fn validate(&self, point: &OKLab) -> bool {
        (0.0..=1.0).contains(&point.l)
            && (-1.0..=1.0).contains(&point.a)
            && (-1.0..=1.0).contains(&point.b)
    }
}
