// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{ChromaError, ChromaResult};

/// Runtime configuration for trace simulation and quantization policy.
///
/// The `steps` budget is the only cancellation mechanism the kernel
/// offers; a host needing wall-clock limits must impose them outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of discrete simulation steps.
    /// Default: 100.
    pub steps: usize,

    /// Step duration; simulation time is `step * dt`.
    /// Default: 0.01.
    pub dt: f64,

    /// Decimal places for the deterministic rounding policy.
    /// Default: 12.
    pub quantize_dp: u32,

    /// Snap tolerance for the gray-axis canonicalization.
    /// Default: 1e-12.
    pub gray_tol: f64,

    /// Tolerance for verification-layer equality checks.
    /// Default: 1e-12.
    pub verify_tol: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            steps: 100,
            dt: 0.01,
            quantize_dp: 12,
            gray_tol: 1e-12,
            verify_tol: 1e-12,
        }
    }
}

impl SimConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> ChromaResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ChromaError::Config(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if self.quantize_dp > 15 {
            return Err(ChromaError::Config(format!(
                "quantize_dp must be <= 15, got {}",
                self.quantize_dp
            )));
        }
        if self.gray_tol < 0.0 || !self.gray_tol.is_finite() {
            return Err(ChromaError::Config(format!(
                "gray_tol must be finite and >= 0, got {}",
                self.gray_tol
            )));
        }
        if self.verify_tol < 0.0 || !self.verify_tol.is_finite() {
            return Err(ChromaError::Config(format!(
                "verify_tol must be finite and >= 0, got {}",
                self.verify_tol
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> ChromaResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ChromaError::Config(format!("JSON parse error: {e}")))
    }
}
