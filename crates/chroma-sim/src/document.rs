// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — CGIR Document Model
// ─────────────────────────────────────────────────────────────────────
//! Serde model of the CGIR trace document: spaces, state variables,
//! interactions, operators, and timed events.
//!
//! Events are a discriminated union of typed geometric intents and
//! legacy mixing records; `serde(untagged)` resolves them by shape
//! (intents carry `kind`, legacy records carry `mixing`).

use serde::{Deserialize, Serialize};

use chroma_types::{ChromaError, ChromaResult, OKLab};

/// Geometric manifold declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceDef {
    pub id: String,
    /// One of: riemannian, discrete, statistical.
    pub kind: String,
    pub dim: u32,
    pub coords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
}

/// State variable living on a declared space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateVar {
    pub id: String,
    pub space: String,
    /// One of: point, vector, field, neuron.
    pub kind: String,
    pub value: OKLab,
}

/// Parameters of an interaction; `target` names the state variable a
/// convex_mix writes to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
}

/// Energy term or coupling between state variables, applied once per
/// simulation step in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub space: String,
    /// One of: convex_mix, quadratic_potential, constraint, coupling.
    pub kind: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub params: InteractionParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<String>,
}

/// Canonical geometric operator declaration (carried through the
/// document; not executed by this engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub space: String,
    pub kind: String,
    pub backend: String,
    /// Backend-specific parameters, carried verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

/// Typed intent for a geometric operation at a scheduled time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometricIntent {
    pub time: f64,
    /// One of: state_injection, boundary_update, topology_intent,
    /// operator_step, metric_update.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<IntentParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<OKLab>,
}

/// One weighted source of a legacy mixing event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixSource {
    pub source: SourceRef,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mixing {
    pub inputs: Vec<MixSource>,
}

/// Legacy mixing event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixEvent {
    #[serde(default)]
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub mixing: Mixing,
}

/// Timed event: a typed intent or a legacy mixing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Event {
    Intent(GeometricIntent),
    Legacy(MixEvent),
}

impl Event {
    pub fn time(&self) -> f64 {
        match self {
            Self::Intent(i) => i.time,
            Self::Legacy(m) => m.time,
        }
    }
}

/// Top-level CGIR trace document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDocument {
    pub cgir_version: String,
    #[serde(default)]
    pub spaces: Vec<SpaceDef>,
    #[serde(default)]
    pub state: Vec<StateVar>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub operators: Vec<Operator>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl TraceDocument {
    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> ChromaResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ChromaError::Validation(vec![format!("document: {e}")]))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ChromaResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChromaError::Validation(vec![format!("document: {e}")]))
    }
}

/// Shared test fixture: a small but complete trace document.
#[cfg(test)]
pub(crate) const SAMPLE_TRACE: &str = r#"{
        "cgir_version": "0.1.0",
        "spaces": [
            {"id": "oklab", "kind": "riemannian", "dim": 3, "coords": "OKLab", "metric": "oklab_canonical"}
        ],
        "state": [
            {"id": "hot_concept", "space": "oklab", "kind": "neuron", "value": {"L": 0.7, "a": 0.2, "b": 0.3}},
            {"id": "cold_concept", "space": "oklab", "kind": "neuron", "value": {"L": 0.5, "a": -0.1, "b": -0.3}},
            {"id": "composed", "space": "oklab", "kind": "neuron", "value": {"L": 0.6, "a": 0.05, "b": 0.0}}
        ],
        "interactions": [
            {"id": "temperature_blend", "space": "oklab", "kind": "convex_mix",
             "inputs": ["hot_concept", "cold_concept"],
             "params": {"target": "composed", "weights": [1.0, 1.0]}}
        ],
        "events": [
            {"time": 0.0, "kind": "state_injection", "space": "oklab", "target": "composed",
             "params": {"value": {"L": 0.6, "a": 0.05, "b": 0.02}}},
            {"time": 0.02, "target": "composed",
             "mixing": {"inputs": [
                 {"source": {"id": "hot_concept"}, "weight": 2.0},
                 {"source": {"id": "cold_concept"}, "weight": 1.0}
             ]}}
        ]
    }"#;
