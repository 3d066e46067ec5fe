// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Deterministic Simulation Engine
// ─────────────────────────────────────────────────────────────────────
//! Discrete-time CGIR trace processor.
//!
//! Per step `0..steps-1` at `t = step·dt`:
//!   1. Append a state snapshot to the trajectory.
//!   2. Apply every interaction once, in declaration order.
//!   3. Apply every due event in `(time, declaration order)`, tagging
//!      each with a reachability flag and, when the candidate point
//!      leaves the domain, a radially projected replacement.
//!
//! All reference resolution happens in `SimulationEngine::new`; a
//! dangling id or unsupported space kind aborts before any trajectory
//! exists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use chroma_types::{ChromaError, ChromaResult, OKLab, SimConfig};

use chroma_geometry::gamut;
use chroma_geometry::mixing::{mix_inputs, normalize_weights, MixInput};
use chroma_geometry::numeric::quantize;

use chroma_core::{GroundSpace, OKLabSpace};

use crate::document::{Event, TraceDocument};
use crate::validate::validate_document;

/// Snapshot of one state variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableState {
    pub id: String,
    pub value: OKLab,
}

/// One trajectory entry: the full state at the start of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStep {
    pub step: usize,
    pub time: f64,
    /// Variables in declaration order.
    pub state: Vec<VariableState>,
}

/// Normalized contribution recorded for a legacy mixing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAlpha {
    pub id: String,
    pub alpha: f64,
}

/// Outcome of one applied point-producing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// Index of the event in the document's declaration order.
    pub index: usize,
    /// Step at which the event fired.
    pub step: usize,
    /// Scheduled event time.
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Candidate point before any projection.
    pub raw: OKLab,
    /// Point actually written (equals `raw` when reachable).
    pub projected: OKLab,
    /// Whether `raw` was already inside the space's domain.
    pub reachable: bool,
    /// Normalized input weights, for legacy mixing events.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub canonical_alpha: Vec<CanonicalAlpha>,
}

/// Full result of one `run()` invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTrace {
    pub steps: Vec<SimulationStep>,
    pub events: Vec<EventOutcome>,
}

impl SimulationTrace {
    pub fn to_json(&self) -> ChromaResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChromaError::Simulation(format!("trace serialization: {e}")))
    }
}

#[derive(Debug)]
enum InteractionKind {
    ConvexMix,
    /// Declared extension point (quadratic_potential, constraint,
    /// coupling): carried through the document, not executed.
    Extension,
}

#[derive(Debug)]
struct ResolvedInteraction {
    id: String,
    kind: InteractionKind,
    inputs: Vec<usize>,
    weights: Vec<f64>,
    target: usize,
}

#[derive(Debug)]
enum ResolvedEvent {
    Injection {
        target: usize,
        value: OKLab,
    },
    Mix {
        target: Option<usize>,
        sources: Vec<(usize, f64)>,
    },
    /// Extension intents: applied as no-ops.
    Extension {
        kind: String,
    },
}

/// Deterministic trace simulator over one validated document.
#[derive(Debug)]
pub struct SimulationEngine {
    config: SimConfig,
    space: OKLabSpace,
    var_ids: Vec<String>,
    initial: Vec<OKLab>,
    interactions: Vec<ResolvedInteraction>,
    events: Vec<(f64, ResolvedEvent)>,
    /// Event indices in (time, declaration order).
    schedule: Vec<usize>,
}

impl SimulationEngine {
    /// Validate the document and resolve every reference up front.
    pub fn new(doc: &TraceDocument, config: SimConfig) -> ChromaResult<Self> {
        config.validate()?;
        validate_document(doc)?;

        let mut var_index: HashMap<&str, usize> = HashMap::new();
        for (i, var) in doc.state.iter().enumerate() {
            var_index.insert(var.id.as_str(), i);
        }
        let mut space_index: HashMap<&str, usize> = HashMap::new();
        for (i, space) in doc.spaces.iter().enumerate() {
            space_index.insert(space.id.as_str(), i);
        }

        let resolve_var = |pointer: &str, id: &str| -> ChromaResult<usize> {
            var_index.get(id).copied().ok_or_else(|| {
                ChromaError::Simulation(format!("{pointer}: undeclared state variable {id:?}"))
            })
        };
        let resolve_space = |pointer: &str, id: &str| -> ChromaResult<usize> {
            let ix = space_index.get(id).copied().ok_or_else(|| {
                ChromaError::Simulation(format!("{pointer}: undeclared space {id:?}"))
            })?;
            let def = &doc.spaces[ix];
            if def.kind != "riemannian" || def.coords != "OKLab" {
                return Err(ChromaError::Simulation(format!(
                    "{pointer}: space {id:?} has unsupported kind/coords {}/{}",
                    def.kind, def.coords
                )));
            }
            Ok(ix)
        };

        for (i, var) in doc.state.iter().enumerate() {
            resolve_space(&format!("state[{i}].space"), &var.space)?;
        }

        let mut interactions = Vec::with_capacity(doc.interactions.len());
        for (i, inter) in doc.interactions.iter().enumerate() {
            resolve_space(&format!("interactions[{i}].space"), &inter.space)?;
            let kind = match inter.kind.as_str() {
                "convex_mix" => InteractionKind::ConvexMix,
                "quadratic_potential" | "constraint" | "coupling" => InteractionKind::Extension,
                other => {
                    return Err(ChromaError::Simulation(format!(
                        "interactions[{i}].kind: unknown interaction kind {other:?}"
                    )))
                }
            };
            let mut inputs = Vec::with_capacity(inter.inputs.len());
            for (j, input) in inter.inputs.iter().enumerate() {
                inputs.push(resolve_var(&format!("interactions[{i}].inputs[{j}]"), input)?);
            }
            let weights = match &inter.params.weights {
                Some(ws) => ws.clone(),
                None => vec![1.0; inputs.len()],
            };
            let target = match &inter.params.target {
                Some(t) => resolve_var(&format!("interactions[{i}].params.target"), t)?,
                // Validation guarantees a target for convex_mix;
                // extension kinds never dereference this.
                None => 0,
            };
            interactions.push(ResolvedInteraction {
                id: inter.id.clone(),
                kind,
                inputs,
                weights,
                target,
            });
        }

        let mut events = Vec::with_capacity(doc.events.len());
        for (i, event) in doc.events.iter().enumerate() {
            let resolved = match event {
                Event::Intent(intent) => {
                    if let Some(space) = &intent.space {
                        resolve_space(&format!("events[{i}].space"), space)?;
                    }
                    match intent.kind.as_str() {
                        "state_injection" => {
                            let target_id = intent.target.as_deref().unwrap_or_default();
                            let target =
                                resolve_var(&format!("events[{i}].target"), target_id)?;
                            let value = intent
                                .params
                                .as_ref()
                                .and_then(|p| p.value)
                                .ok_or_else(|| {
                                    ChromaError::Simulation(format!(
                                        "events[{i}].params.value: state_injection requires a value"
                                    ))
                                })?;
                            ResolvedEvent::Injection { target, value }
                        }
                        _ => ResolvedEvent::Extension {
                            kind: intent.kind.clone(),
                        },
                    }
                }
                Event::Legacy(mix) => {
                    let target = match &mix.target {
                        Some(t) => Some(resolve_var(&format!("events[{i}].target"), t)?),
                        None => None,
                    };
                    let mut sources = Vec::with_capacity(mix.mixing.inputs.len());
                    for (j, input) in mix.mixing.inputs.iter().enumerate() {
                        let ix = resolve_var(
                            &format!("events[{i}].mixing.inputs[{j}].source.id"),
                            &input.source.id,
                        )?;
                        sources.push((ix, input.weight));
                    }
                    ResolvedEvent::Mix { target, sources }
                }
            };
            events.push((event.time(), resolved));
        }

        // (time, declaration order): stable sort keeps declaration
        // order among equal times.
        let mut schedule: Vec<usize> = (0..events.len()).collect();
        schedule.sort_by(|&a, &b| events[a].0.total_cmp(&events[b].0));

        let dp = config.quantize_dp;
        let space = OKLabSpace::new(dp);
        let mut initial = Vec::with_capacity(doc.state.len());
        for (i, var) in doc.state.iter().enumerate() {
            let value = OKLab {
                l: quantize(var.value.l, dp),
                a: quantize(var.value.a, dp),
                b: quantize(var.value.b, dp),
            };
            if !space.validate(&value) {
                return Err(ChromaError::Domain(format!(
                    "state[{i}].value: {value:?} outside the OKLab domain"
                )));
            }
            initial.push(value);
        }
        let var_ids: Vec<String> = doc.state.iter().map(|v| v.id.clone()).collect();

        Ok(Self {
            space,
            config,
            var_ids,
            initial,
            interactions,
            events,
            schedule,
        })
    }

    /// Whether a candidate point lies in the simulation domain: inside
    /// the space box and the chroma envelope.
    fn in_domain(&self, p: &OKLab) -> bool {
        self.space.validate(p)
            && gamut::contains(*p, self.config.gray_tol, self.config.quantize_dp)
    }

    /// Run the full trace. Identical inputs produce byte-identical
    /// serialized trajectories.
    pub fn run(&self) -> ChromaResult<SimulationTrace> {
        let dp = self.config.quantize_dp;
        let mut state = self.initial.clone();
        let mut applied = vec![false; self.events.len()];
        let mut trajectory = Vec::with_capacity(self.config.steps);
        let mut outcomes = Vec::new();

        for step in 0..self.config.steps {
            let time = quantize(step as f64 * self.config.dt, dp);

            trajectory.push(SimulationStep {
                step,
                time,
                state: self
                    .var_ids
                    .iter()
                    .zip(&state)
                    .map(|(id, value)| VariableState {
                        id: id.clone(),
                        value: *value,
                    })
                    .collect(),
            });

            for inter in &self.interactions {
                match inter.kind {
                    InteractionKind::ConvexMix => {
                        let inputs: Vec<MixInput> = inter
                            .inputs
                            .iter()
                            .zip(&inter.weights)
                            .map(|(&ix, &w)| {
                                MixInput::new(self.var_ids[ix].clone(), state[ix], w)
                            })
                            .collect();
                        state[inter.target] = mix_inputs(inputs, dp)?;
                    }
                    InteractionKind::Extension => {
                        log::debug!("interaction {}: extension kind, skipped", inter.id);
                    }
                }
            }

            for &ev in &self.schedule {
                if applied[ev] || self.events[ev].0 > time {
                    continue;
                }
                applied[ev] = true;
                if let Some(outcome) = self.apply_event(ev, step, &mut state)? {
                    outcomes.push(outcome);
                }
            }
        }

        Ok(SimulationTrace {
            steps: trajectory,
            events: outcomes,
        })
    }

    fn apply_event(
        &self,
        index: usize,
        step: usize,
        state: &mut [OKLab],
    ) -> ChromaResult<Option<EventOutcome>> {
        let dp = self.config.quantize_dp;
        let (scheduled, event) = &self.events[index];

        let (raw, target, canonical_alpha) = match event {
            ResolvedEvent::Injection { target, value } => {
                let raw = OKLab {
                    l: quantize(value.l, dp),
                    a: quantize(value.a, dp),
                    b: quantize(value.b, dp),
                };
                (raw, Some(*target), Vec::new())
            }
            ResolvedEvent::Mix { target, sources } => {
                let inputs: Vec<MixInput> = sources
                    .iter()
                    .map(|&(ix, w)| MixInput::new(self.var_ids[ix].clone(), state[ix], w))
                    .collect();
                let raw = mix_inputs(inputs.clone(), dp)?;
                let alphas = normalize_weights(inputs, dp)
                    .into_iter()
                    .map(|iw| CanonicalAlpha {
                        id: iw.id,
                        alpha: iw.weight,
                    })
                    .collect();
                (raw, *target, alphas)
            }
            ResolvedEvent::Extension { kind } => {
                log::debug!("event {index}: extension intent {kind:?}, skipped");
                return Ok(None);
            }
        };

        let reachable = self.in_domain(&raw);
        let projected = if reachable {
            raw
        } else {
            gamut::project_radial_clamp(raw, self.config.gray_tol, dp)
        };

        if let Some(ix) = target {
            state[ix] = projected;
        }

        Ok(Some(EventOutcome {
            index,
            step,
            time: *scheduled,
            target: target.map(|ix| self.var_ids[ix].clone()),
            raw,
            projected,
            reachable,
            canonical_alpha,
        }))
    }
}
