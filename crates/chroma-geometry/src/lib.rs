// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Geometry Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Deterministic geometry primitives for the Chroma kernel.
//!
//! Everything here is bit-reproducible across hosts: identical inputs
//! must produce identical outputs down to the last bit, because the
//! verification and compare tooling diffs serialized traces byte by
//! byte.
//!
//! # Determinism Invariants
//!
//! 1. **All rounding is round-half-to-even** at a declared number of
//!    decimal places, with a relative tie window absorbing float noise.
//! 2. **Hue is always a defined value**: zero chroma canonicalizes to
//!    hue 0, and every hue is wrapped to `[-π, π)` before use.
//! 3. **Summation order is fixed**: weighted sums run in the stable
//!    `(id, original index)` order, never in map-iteration order.

pub mod codec;
pub mod gamut;
pub mod mixing;
pub mod numeric;

pub use codec::{from_oklch, gray_axis_bias, to_oklch};
pub use gamut::{max_chroma, project_radial_clamp};
pub use mixing::{mix_inputs, mix_points, normalize_weights, MixInput};
pub use numeric::{approx_equal, clamp_angle_pi, quantize, safe_div};
