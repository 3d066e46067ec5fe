// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — CGIR Simulation Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Deterministic CGIR trace processing: document model, validation,
//! the discrete-time simulation engine, and NNLS mixing attribution.
//!
//! # Determinism Invariants
//!
//! 1. **Validation is all-or-nothing**: a document either passes the
//!    full structural check or fails with every violated pointer
//!    listed. The engine never sees a partially valid document.
//!
//! 2. **Fatal means no trajectory**: a dangling id or unsupported kind
//!    aborts before step 0; there are no partial results.
//!
//! 3. **Byte reproducibility**: two runs with identical document,
//!    `steps`, and `dt` serialize to identical bytes. Everything is
//!    quantized, every iteration order is declared, and the only
//!    cancellation mechanism is the `steps` budget.

pub mod attribution;
pub mod document;
pub mod engine;
pub mod validate;

pub use attribution::{attribute, attribute_event, nnls, Attribution};
pub use document::{
    Event, GeometricIntent, Interaction, MixEvent, Operator, SpaceDef, StateVar, TraceDocument,
};
pub use engine::{EventOutcome, SimulationEngine, SimulationStep, SimulationTrace};
pub use validate::validate_document;
