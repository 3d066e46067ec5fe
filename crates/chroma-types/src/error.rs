// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Grounding Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Chroma kernel failures.
///
/// Every core operation fails fast with one of these variants; there
/// are no sentinel return values. The single deliberate non-error is a
/// mixing result leaving the space's domain during simulation, which
/// is recorded as `reachable = false` on the event instead.
#[derive(Error, Debug)]
pub enum ChromaError {
    /// Malformed or schema-invalid CGIR document. Carries every
    /// violated pointer, not just the first.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A point failed the space's `validate()` gate.
    #[error("domain error: {0}")]
    Domain(String),

    /// Queried symbol has no bound region.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// A runtime verification assertion failed.
    #[error("property violated: {property}: {detail}")]
    PropertyViolation { property: String, detail: String },

    /// Dangling id reference or unknown space/interaction kind.
    #[error("simulation error: {0}")]
    Simulation(String),

    /// Empty or mismatched-length mixing input.
    #[error("degenerate mix: {0}")]
    ArithmeticDegenerate(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

pub type ChromaResult<T> = Result<T, ChromaError>;

impl ChromaError {
    /// Shorthand for a single-property violation.
    pub fn property(property: &str, detail: impl Into<String>) -> Self {
        Self::PropertyViolation {
            property: property.to_string(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_joins_pointers() {
        let err = ChromaError::Validation(vec![
            "state[0].id: bad".to_string(),
            "events[1].time: negative".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("state[0].id"));
        assert!(msg.contains("events[1].time"));
    }

    #[test]
    fn test_property_shorthand() {
        let err = ChromaError::property("mix_closure", "point left the box");
        assert!(err.to_string().contains("mix_closure"));
        assert!(err.to_string().contains("point left the box"));
    }
}
