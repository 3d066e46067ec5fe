// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Grounding Core
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Symbol grounding over a perceptual space: the space capability
//! trait, geometric regions, the insertion-ordered grounding index,
//! and the runtime property-verification layer.
//!
//! # Determinism Invariants
//!
//! 1. **Iteration order is part of the contract**: the grounding index
//!    iterates bound symbols in insertion order. Re-binding a symbol
//!    replaces its region without moving it. Classification tie-breaks
//!    depend on this.
//!
//! 2. **Regions are explicit variants**: containment and the optional
//!    center capability resolve by pattern match, never by runtime
//!    attribute probing.
//!
//! 3. **Verification never passes silently**: every check either
//!    returns `Ok(())` or a `PropertyViolation` naming the property
//!    and the offending sample.

pub mod grounding;
pub mod palette;
pub mod region;
pub mod space;
pub mod verify;

pub use grounding::Grounding;
pub use palette::{bind_semantic_palette, DEFAULT_ANCHOR_RADIUS, HUE_ANCHORS, SEMANTIC_ANCHORS};
pub use region::Region;
pub use space::{GroundSpace, OKLabSpace};
pub use verify::{verify_space_consistency, OKLabVerifier, Verifier};
