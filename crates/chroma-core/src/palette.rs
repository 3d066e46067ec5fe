// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Canonical Anchor Palette
// ─────────────────────────────────────────────────────────────────────
//! Canonical OKLab anchors for common semantic concepts and primary
//! hues, and a helper to install them as spherical regions.
//!
//! These are catalogued constants for design-system and test use, not
//! colorimetric measurements.

use chroma_types::OKLab;

use crate::grounding::Grounding;
use crate::region::Region;
use crate::space::OKLabSpace;

/// Default region radius for palette bindings.
pub const DEFAULT_ANCHOR_RADIUS: f64 = 0.15;

/// Semantic concept anchors.
pub const SEMANTIC_ANCHORS: [(&str, OKLab); 5] = [
    ("danger", OKLab::new(0.5, 0.3, 0.2)),    // reddish
    ("warning", OKLab::new(0.7, 0.1, 0.3)),   // orangeish
    ("success", OKLab::new(0.6, -0.2, 0.2)),  // greenish
    ("info", OKLab::new(0.5, -0.1, -0.3)),    // blueish
    ("neutral", OKLab::new(0.7, 0.0, 0.0)),   // gray axis
];

/// Primary hue anchors.
pub const HUE_ANCHORS: [(&str, OKLab); 5] = [
    ("red", OKLab::new(0.5, 0.3, 0.2)),
    ("blue", OKLab::new(0.4, -0.1, -0.3)),
    ("green", OKLab::new(0.6, -0.2, 0.2)),
    ("yellow", OKLab::new(0.8, 0.1, 0.2)),
    ("purple", OKLab::new(0.4, 0.1, -0.2)),
];

/// Bind every semantic anchor as a spherical region of `radius`.
pub fn bind_semantic_palette(grounding: &mut Grounding<OKLabSpace>, radius: f64) {
    for (symbol, center) in SEMANTIC_ANCHORS {
        grounding.bind_region(symbol, Region::sphere(center, radius));
    }
}
