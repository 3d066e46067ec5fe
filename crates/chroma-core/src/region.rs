// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Geometric Regions
// ─────────────────────────────────────────────────────────────────────
//! Tagged region variants over a ground space.
//!
//! `Spherical` exposes a center for fallback ranking; `Predicate`
//! wraps an arbitrary containment function and exposes none. The
//! capability split is a pattern match, not a runtime probe.

use crate::space::GroundSpace;

/// Containment predicate for arbitrary regions.
pub type ContainsFn<P> = Box<dyn Fn(&P) -> bool + Send + Sync>;

/// A geometric region in a ground space.
pub enum Region<P> {
    /// Ball of `radius` around `center` under the space's metric.
    Spherical { center: P, radius: f64 },
    /// Arbitrary containment function; no center capability.
    Predicate(ContainsFn<P>),
}

impl<P> Region<P> {
    /// Ball constructor.
    pub fn sphere(center: P, radius: f64) -> Self {
        Self::Spherical { center, radius }
    }

    /// Predicate constructor.
    pub fn predicate(f: impl Fn(&P) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Box::new(f))
    }

    /// Whether `point` is contained in this region.
    pub fn contains<S>(&self, space: &S, point: &P) -> bool
    where
        S: GroundSpace<Point = P>,
    {
        match self {
            Self::Spherical { center, radius } => space.distance(center, point) <= *radius,
            Self::Predicate(f) => f(point),
        }
    }

    /// The region's center, when it exposes one.
    pub fn center(&self) -> Option<&P> {
        match self {
            Self::Spherical { center, .. } => Some(center),
            Self::Predicate(_) => None,
        }
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for Region<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spherical { center, radius } => f
                .debug_struct("Spherical")
                .field("center", center)
                .field("radius", radius)
                .finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
