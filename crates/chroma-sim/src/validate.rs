// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — CGIR Document Validation
// ─────────────────────────────────────────────────────────────────────
//! Structural validation of CGIR trace documents, equivalent to the
//! versioned JSON Schema: identifier grammar, kind enums, shape and
//! finiteness requirements.
//!
//! Collects EVERY violation as a dotted pointer string and returns the
//! complete list in one `ChromaError::Validation`, so tooling can show
//! the whole report instead of the first failure. Cross-reference
//! resolution (dangling ids, unsupported space kinds) is the
//! simulation engine's job and fails fatally there.

use chroma_types::{ChromaError, ChromaResult};

use crate::document::{Event, TraceDocument};

pub const SPACE_KINDS: [&str; 3] = ["riemannian", "discrete", "statistical"];
pub const STATE_KINDS: [&str; 4] = ["point", "vector", "field", "neuron"];
pub const INTERACTION_KINDS: [&str; 4] =
    ["convex_mix", "quadratic_potential", "constraint", "coupling"];
pub const INTENT_KINDS: [&str; 5] = [
    "state_injection",
    "boundary_update",
    "topology_intent",
    "operator_step",
    "metric_update",
];

/// Identifier grammar: `^[a-z][a-z0-9_.-]{2,63}$`.
pub fn is_valid_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    if !(3..=64).contains(&bytes.len()) {
        return false;
    }
    if !bytes[0].is_ascii_lowercase() {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, b'_' | b'.' | b'-'))
}

fn check_id(errors: &mut Vec<String>, pointer: &str, id: &str) {
    if !is_valid_id(id) {
        errors.push(format!(
            "{pointer}: id {id:?} does not match ^[a-z][a-z0-9_.-]{{2,63}}$"
        ));
    }
}

fn check_kind(errors: &mut Vec<String>, pointer: &str, kind: &str, allowed: &[&str]) {
    if !allowed.contains(&kind) {
        errors.push(format!("{pointer}: kind {kind:?} not one of {allowed:?}"));
    }
}

fn check_duplicates<'a>(
    errors: &mut Vec<String>,
    section: &str,
    ids: impl Iterator<Item = &'a str>,
) {
    let mut seen: Vec<&str> = Vec::new();
    for (i, id) in ids.enumerate() {
        if seen.contains(&id) {
            errors.push(format!("{section}[{i}].id: duplicate id {id:?}"));
        } else {
            seen.push(id);
        }
    }
}

/// Validate a CGIR document, returning every violation at once.
pub fn validate_document(doc: &TraceDocument) -> ChromaResult<()> {
    let mut errors: Vec<String> = Vec::new();

    if doc.cgir_version.is_empty() {
        errors.push("cgir_version: must be non-empty".to_string());
    }

    for (i, space) in doc.spaces.iter().enumerate() {
        check_id(&mut errors, &format!("spaces[{i}].id"), &space.id);
        check_kind(&mut errors, &format!("spaces[{i}].kind"), &space.kind, &SPACE_KINDS);
        if space.dim == 0 {
            errors.push(format!("spaces[{i}].dim: must be >= 1"));
        }
        if space.coords.is_empty() {
            errors.push(format!("spaces[{i}].coords: must be non-empty"));
        }
    }
    check_duplicates(&mut errors, "spaces", doc.spaces.iter().map(|s| s.id.as_str()));

    for (i, var) in doc.state.iter().enumerate() {
        check_id(&mut errors, &format!("state[{i}].id"), &var.id);
        check_kind(&mut errors, &format!("state[{i}].kind"), &var.kind, &STATE_KINDS);
        if !var.value.is_finite() {
            errors.push(format!("state[{i}].value: coordinates must be finite"));
        }
    }
    check_duplicates(&mut errors, "state", doc.state.iter().map(|v| v.id.as_str()));

    for (i, inter) in doc.interactions.iter().enumerate() {
        check_id(&mut errors, &format!("interactions[{i}].id"), &inter.id);
        check_kind(
            &mut errors,
            &format!("interactions[{i}].kind"),
            &inter.kind,
            &INTERACTION_KINDS,
        );
        if inter.kind == "convex_mix" {
            if inter.inputs.is_empty() {
                errors.push(format!(
                    "interactions[{i}].inputs: convex_mix requires a non-empty input list"
                ));
            }
            if inter.params.target.is_none() {
                errors.push(format!(
                    "interactions[{i}].params.target: convex_mix requires a target"
                ));
            }
            if let Some(weights) = &inter.params.weights {
                if weights.len() != inter.inputs.len() {
                    errors.push(format!(
                        "interactions[{i}].params.weights: length {} does not match inputs length {}",
                        weights.len(),
                        inter.inputs.len()
                    ));
                }
                for (j, w) in weights.iter().enumerate() {
                    if !w.is_finite() {
                        errors.push(format!(
                            "interactions[{i}].params.weights[{j}]: not finite"
                        ));
                    }
                }
            }
        }
    }
    check_duplicates(
        &mut errors,
        "interactions",
        doc.interactions.iter().map(|x| x.id.as_str()),
    );

    for (i, event) in doc.events.iter().enumerate() {
        let time = event.time();
        if !time.is_finite() || time < 0.0 {
            errors.push(format!("events[{i}].time: must be finite and >= 0, got {time}"));
        }
        match event {
            Event::Intent(intent) => {
                check_kind(
                    &mut errors,
                    &format!("events[{i}].kind"),
                    &intent.kind,
                    &INTENT_KINDS,
                );
                if intent.kind == "state_injection" {
                    if intent.target.is_none() {
                        errors.push(format!(
                            "events[{i}].target: state_injection requires a target"
                        ));
                    }
                    let value = intent.params.as_ref().and_then(|p| p.value);
                    match value {
                        None => errors.push(format!(
                            "events[{i}].params.value: state_injection requires a value"
                        )),
                        Some(v) if !v.is_finite() => errors.push(format!(
                            "events[{i}].params.value: coordinates must be finite"
                        )),
                        Some(_) => {}
                    }
                }
            }
            Event::Legacy(mix) => {
                if mix.mixing.inputs.is_empty() {
                    errors.push(format!(
                        "events[{i}].mixing.inputs: must be a non-empty array"
                    ));
                }
                for (j, input) in mix.mixing.inputs.iter().enumerate() {
                    // Negative weights are canonicalized at run time;
                    // only non-finite values are structural errors.
                    if !input.weight.is_finite() {
                        errors.push(format!(
                            "events[{i}].mixing.inputs[{j}].weight: not finite"
                        ));
                    }
                }
            }
        }
    }

    for (i, op) in doc.operators.iter().enumerate() {
        check_id(&mut errors, &format!("operators[{i}].id"), &op.id);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ChromaError::Validation(errors))
    }
}
