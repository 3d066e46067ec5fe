// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Runtime Verification Layer
// ─────────────────────────────────────────────────────────────────────
//! Executable checks for the metric and convexity axioms the formal
//! proof layer states for ground spaces.
//!
//! The proof layer is a one-time specification oracle: these checks
//! encode its axioms as runtime assertions over caller-supplied sample
//! points, so a deterministic build can be diffed against
//! proof-extracted reference vectors without invoking a proof checker.
//! Every check fails loudly with a `PropertyViolation`; none passes
//! silently.

use chroma_types::{ChromaError, ChromaResult, OKLab};

use chroma_geometry::mixing::{normalize_weights, MixInput};

use crate::space::{GroundSpace, OKLabSpace};

/// Verification layer over a ground space.
pub struct Verifier<'s, S: GroundSpace> {
    space: &'s S,
}

impl<'s, S: GroundSpace> Verifier<'s, S>
where
    S::Point: std::fmt::Debug,
{
    pub fn new(space: &'s S) -> Self {
        Self { space }
    }

    /// ∀ x, y: d(x, y) ≥ 0, over all ordered pairs of the sample.
    pub fn verify_distance_nonnegativity(&self, points: &[S::Point]) -> ChromaResult<()> {
        for x in points {
            for y in points {
                let d = self.space.distance(x, y);
                if d < 0.0 {
                    return Err(ChromaError::property(
                        "distance_nonnegativity",
                        format!("d({x:?}, {y:?}) = {d} < 0"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// ∀ x: d(x, x) ≤ tol.
    pub fn verify_distance_reflexivity(&self, points: &[S::Point], tol: f64) -> ChromaResult<()> {
        for x in points {
            let d = self.space.distance(x, x);
            if d.abs() > tol {
                return Err(ChromaError::property(
                    "distance_reflexivity",
                    format!("d({x:?}, {x:?}) = {d} exceeds tolerance {tol}"),
                ));
            }
        }
        Ok(())
    }

    /// The mix of the sample validates in the space (closure).
    pub fn verify_mix_closure(&self, points: &[S::Point], weights: &[f64]) -> ChromaResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        let mixed = self.space.mix(points, weights).map_err(|e| {
            ChromaError::property("mix_closure", format!("mix operation failed: {e}"))
        })?;
        if !self.space.validate(&mixed) {
            return Err(ChromaError::property(
                "mix_closure",
                format!("mix result {mixed:?} is not valid in the space"),
            ));
        }
        Ok(())
    }

    /// Normalized weights sum to 1 within `tol` when any input weight
    /// is positive.
    pub fn verify_mix_convexity(
        &self,
        points: &[S::Point],
        weights: &[f64],
        tol: f64,
    ) -> ChromaResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        if !weights.iter().any(|&w| w > 0.0) {
            return Ok(());
        }
        let inputs: Vec<MixInput> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| MixInput::new(format!("s{i}"), OKLab::origin(), w))
            .collect();
        let sum: f64 = normalize_weights(inputs, 12)
            .iter()
            .map(|iw| iw.weight)
            .sum();
        if (sum - 1.0).abs() > tol.max(1e-9) {
            return Err(ChromaError::property(
                "mix_convexity",
                format!("normalized weights sum to {sum}, expected 1"),
            ));
        }
        Ok(())
    }
}

/// OKLab-specific verification on top of the general checks.
pub struct OKLabVerifier<'s> {
    space: &'s OKLabSpace,
}

impl<'s> OKLabVerifier<'s> {
    pub fn new(space: &'s OKLabSpace) -> Self {
        Self { space }
    }

    /// L ∈ [0, 1], a, b ∈ [-1, 1]; reports the offending coordinate.
    pub fn verify_bounds(&self, points: &[OKLab]) -> ChromaResult<()> {
        for p in points {
            if !(0.0..=1.0).contains(&p.l) {
                return Err(ChromaError::property(
                    "oklab_bounds",
                    format!("L = {} out of [0, 1]", p.l),
                ));
            }
            if !(-1.0..=1.0).contains(&p.a) {
                return Err(ChromaError::property(
                    "oklab_bounds",
                    format!("a = {} out of [-1, 1]", p.a),
                ));
            }
            if !(-1.0..=1.0).contains(&p.b) {
                return Err(ChromaError::property(
                    "oklab_bounds",
                    format!("b = {} out of [-1, 1]", p.b),
                ));
            }
        }
        Ok(())
    }

    /// Closure plus bounds on the mix result.
    pub fn verify_mixing_properties(&self, colors: &[OKLab], weights: &[f64]) -> ChromaResult<()> {
        let verifier = Verifier::new(self.space);
        verifier.verify_mix_closure(colors, weights)?;
        let mixed = self.space.mix(colors, weights)?;
        self.verify_bounds(&[mixed])
    }
}

/// Run the full verification suite for a space over sample points.
pub fn verify_space_consistency<S>(space: &S, points: &[S::Point], tol: f64) -> ChromaResult<()>
where
    S: GroundSpace,
    S::Point: std::fmt::Debug,
{
    let verifier = Verifier::new(space);
    verifier.verify_distance_nonnegativity(points)?;
    verifier.verify_distance_reflexivity(points, tol)?;
    if points.len() >= 2 {
        let weights = vec![1.0 / points.len() as f64; points.len()];
        verifier.verify_mix_closure(points, &weights)?;
        verifier.verify_mix_convexity(points, &weights, tol)?;
    }
    Ok(())
}
