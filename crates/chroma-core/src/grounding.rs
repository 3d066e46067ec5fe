// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Grounding Index
// ─────────────────────────────────────────────────────────────────────
//! Insertion-ordered symbol→region registry with classification and
//! similarity queries.
//!
//! The registry is a plain vector of bindings: iteration order equals
//! insertion order, and re-binding a symbol updates its region in
//! place. This ordering is load-bearing — `nearest_symbol` tie-breaks
//! and verification determinism depend on it.

use std::sync::Arc;

use chroma_types::{ChromaError, ChromaResult};

use crate::region::Region;
use crate::space::GroundSpace;

/// Symbol→region mapping over one shared ground space.
pub struct Grounding<S: GroundSpace> {
    space: Arc<S>,
    bindings: Vec<(String, Region<S::Point>)>,
}

impl<S: GroundSpace> Grounding<S> {
    /// Create an empty grounding over a shared space.
    pub fn new(space: Arc<S>) -> Self {
        Self {
            space,
            bindings: Vec::new(),
        }
    }

    /// The space this grounding is defined over.
    pub fn space(&self) -> &S {
        &self.space
    }

    /// Bind a symbol to a region, replacing any prior binding without
    /// changing its position in iteration order.
    pub fn bind_region(&mut self, symbol: impl Into<String>, region: Region<S::Point>) {
        let symbol = symbol.into();
        match self.bindings.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, slot)) => *slot = region,
            None => self.bindings.push((symbol, region)),
        }
    }

    /// The region bound to `symbol`.
    pub fn get_region(&self, symbol: &str) -> ChromaResult<&Region<S::Point>> {
        self.bindings
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, r)| r)
            .ok_or_else(|| ChromaError::SymbolNotFound(symbol.to_string()))
    }

    /// Classify a point.
    ///
    /// Returns the first symbol (insertion order) whose region contains
    /// the point. When none contains it, falls back to the symbol whose
    /// region center is closest under the space metric; regions without
    /// a center are skipped, and equal distances resolve to the symbol
    /// encountered first. `None` when no region qualifies.
    pub fn nearest_symbol(&self, point: &S::Point) -> Option<&str> {
        for (symbol, region) in &self.bindings {
            if region.contains(self.space.as_ref(), point) {
                return Some(symbol.as_str());
            }
        }

        let mut nearest: Option<(&str, f64)> = None;
        for (symbol, region) in &self.bindings {
            let Some(center) = region.center() else {
                continue;
            };
            let dist = self.space.distance(point, center);
            match nearest {
                Some((_, best)) if dist >= best => {}
                _ => nearest = Some((symbol.as_str(), dist)),
            }
        }
        nearest.map(|(symbol, _)| symbol)
    }

    /// Similarity between two bound symbols: `1 / (1 + d)` over their
    /// region centers, or `0.0` when either region exposes no center.
    pub fn similarity(&self, symbol_a: &str, symbol_b: &str) -> ChromaResult<f64> {
        let region_a = self.get_region(symbol_a)?;
        let region_b = self.get_region(symbol_b)?;
        match (region_a.center(), region_b.center()) {
            (Some(ca), Some(cb)) => Ok(1.0 / (1.0 + self.space.distance(ca, cb))),
            _ => Ok(0.0),
        }
    }

    /// Bound symbols in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(s, _)| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::OKLabSpace;
    use chroma_types::OKLab;

    fn make_grounding() -> Grounding<OKLabSpace> {
        Grounding::new(Arc::new(OKLabSpace::default()))
    }

    #[test]
    fn test_bind_and_get() {
        let mut g = make_grounding();
        g.bind_region("danger", Region::sphere(OKLab::new(0.5, 0.3, 0.2), 0.1));
        assert!(g.get_region("danger").is_ok());
    }

    #[test]
    fn test_get_unbound_fails() {
        let g = make_grounding();
        let err = g.get_region("missing").unwrap_err();
        assert!(matches!(err, ChromaError::SymbolNotFound(_)));
    }

    #[test]
    fn test_rebind_keeps_position() {
        let mut g = make_grounding();
        g.bind_region("first", Region::sphere(OKLab::new(0.2, 0.0, 0.0), 0.05));
        g.bind_region("second", Region::sphere(OKLab::new(0.8, 0.0, 0.0), 0.05));
        g.bind_region("first", Region::sphere(OKLab::new(0.3, 0.0, 0.0), 0.05));
        let order: Vec<&str> = g.symbols().collect();
        assert_eq!(order, vec!["first", "second"]);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_nearest_symbol_containment_hit() {
        let mut g = make_grounding();
        let center = OKLab::new(0.5, 0.1, 0.2);
        g.bind_region("target", Region::sphere(center, 0.1));
        assert_eq!(g.nearest_symbol(&center), Some("target"));
    }

    #[test]
    fn test_nearest_symbol_first_containment_wins() {
        let mut g = make_grounding();
        // Overlapping spheres both containing the probe point.
        g.bind_region("early", Region::sphere(OKLab::new(0.5, 0.0, 0.0), 0.3));
        g.bind_region("late", Region::sphere(OKLab::new(0.55, 0.0, 0.0), 0.3));
        assert_eq!(g.nearest_symbol(&OKLab::new(0.52, 0.0, 0.0)), Some("early"));
    }

    #[test]
    fn test_nearest_symbol_center_fallback() {
        let mut g = make_grounding();
        g.bind_region("near", Region::sphere(OKLab::new(0.4, 0.0, 0.0), 0.01));
        g.bind_region("far", Region::sphere(OKLab::new(0.9, 0.0, 0.0), 0.01));
        // Outside both; closer to "near".
        assert_eq!(g.nearest_symbol(&OKLab::new(0.5, 0.0, 0.0)), Some("near"));
    }

    #[test]
    fn test_nearest_symbol_tie_breaks_by_insertion_order() {
        let mut g = make_grounding();
        g.bind_region("left", Region::sphere(OKLab::new(0.4, 0.0, 0.0), 0.01));
        g.bind_region("right", Region::sphere(OKLab::new(0.6, 0.0, 0.0), 0.01));
        // Equidistant from both centers.
        assert_eq!(g.nearest_symbol(&OKLab::new(0.5, 0.0, 0.0)), Some("left"));
    }

    #[test]
    fn test_nearest_symbol_skips_centerless_regions() {
        let mut g = make_grounding();
        g.bind_region("pred", Region::predicate(|p: &OKLab| p.l > 0.9));
        g.bind_region("ball", Region::sphere(OKLab::new(0.4, 0.0, 0.0), 0.01));
        assert_eq!(g.nearest_symbol(&OKLab::new(0.5, 0.0, 0.0)), Some("ball"));
    }

    #[test]
    fn test_nearest_symbol_no_match() {
        let mut g = make_grounding();
        g.bind_region("pred", Region::predicate(|p: &OKLab| p.l > 0.9));
        assert_eq!(g.nearest_symbol(&OKLab::new(0.5, 0.0, 0.0)), None);
        let empty = make_grounding();
        assert_eq!(empty.nearest_symbol(&OKLab::new(0.5, 0.0, 0.0)), None);
    }

    #[test]
    fn test_similarity_identical_centers() {
        let mut g = make_grounding();
        let c = OKLab::new(0.5, 0.1, 0.2);
        g.bind_region("color", Region::sphere(c, 0.1));
        let sim = g.similarity("color", "color").unwrap();
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_symmetric_and_bounded() {
        let mut g = make_grounding();
        g.bind_region("a", Region::sphere(OKLab::new(0.5, 0.1, 0.2), 0.1));
        g.bind_region("b", Region::sphere(OKLab::new(0.6, -0.1, 0.1), 0.1));
        let ab = g.similarity("a", "b").unwrap();
        let ba = g.similarity("b", "a").unwrap();
        assert_eq!(ab, ba);
        assert!(ab > 0.0 && ab < 1.0);
    }

    #[test]
    fn test_similarity_centerless_is_zero() {
        let mut g = make_grounding();
        g.bind_region("ball", Region::sphere(OKLab::new(0.5, 0.1, 0.2), 0.1));
        g.bind_region("pred", Region::predicate(|p: &OKLab| p.l > 0.5));
        assert_eq!(g.similarity("ball", "pred").unwrap(), 0.0);
    }

    #[test]
    fn test_similarity_unbound_fails() {
        let mut g = make_grounding();
        g.bind_region("a", Region::sphere(OKLab::new(0.5, 0.1, 0.2), 0.1));
        assert!(matches!(
            g.similarity("a", "ghost").unwrap_err(),
            ChromaError::SymbolNotFound(_)
        ));
    }

    #[test]
    fn test_shared_space_across_groundings() {
        let space = Arc::new(OKLabSpace::default());
        let mut g1 = Grounding::new(Arc::clone(&space));
        let mut g2 = Grounding::new(space);
        g1.bind_region("x", Region::sphere(OKLab::new(0.5, 0.0, 0.0), 0.1));
        g2.bind_region("y", Region::sphere(OKLab::new(0.6, 0.0, 0.0), 0.1));
        assert_eq!(g1.len(), 1);
        assert_eq!(g2.len(), 1);
    }
}
