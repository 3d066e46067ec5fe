// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Grounding Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Chroma grounding kernel — the deterministic symbol-grounding and
//! color-mixing engine over OKLab.

pub mod config;
pub mod error;
pub mod point;

pub use config::SimConfig;
pub use error::{ChromaError, ChromaResult};
pub use point::{OKLCh, OKLab};
