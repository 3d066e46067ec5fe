// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — NNLS Mixing Attribution
// ─────────────────────────────────────────────────────────────────────
//! Recovers plausible mixing-weight provenance for an observed mixed
//! color: solve `argmin_{α ≥ 0} ‖Σ_i α_i·input_i − target‖²` over a
//! candidate set stable-sorted by id.
//!
//! The solver is a small Lawson-Hanson active-set NNLS with a fixed
//! convergence tolerance and deterministic tie-breaks (lowest index
//! wins), so attribution results reproduce bit-for-bit across hosts.

use serde::{Deserialize, Serialize};

use chroma_types::{ChromaError, ChromaResult, OKLab};

use chroma_geometry::numeric::quantize;

use crate::document::{Event, TraceDocument};

/// Fixed convergence tolerance for the active-set loop.
const NNLS_TOL: f64 = 1e-10;

/// One candidate's recovered contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaEntry {
    pub id: String,
    /// Raw nonnegative least-squares coefficient.
    pub alpha: f64,
    /// Sum-normalized coefficient (uniform fallback when all zero).
    pub alpha_normalized: f64,
}

/// Attribution result for one target point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Entries in stable `(id, original index)` order.
    pub entries: Vec<AlphaEntry>,
    /// `‖Σ α_i·input_i − target‖₂`.
    pub residual_norm: f64,
    /// Sum of raw alphas before normalization.
    pub sum_alpha: f64,
    /// True when a positive sum was normalized to 1; false when the
    /// uniform fallback was used.
    pub normalized: bool,
}

/// Solve `argmin_{x ≥ 0} ‖A·x − b‖₂` for a 3-row system.
///
/// `columns` are the 3-vectors of A; returns `(x, residual_norm)`.
/// Lawson-Hanson active-set: repeatedly move the most promising
/// passive index into the active set, solving the unconstrained
/// subproblem by normal equations, backing off along the feasible
/// segment when a coefficient would go negative.
pub fn nnls(columns: &[[f64; 3]], b: [f64; 3]) -> (Vec<f64>, f64) {
    let n = columns.len();
    let mut x = vec![0.0f64; n];
    let mut passive = vec![false; n];
    // 3·n outer iterations is far beyond what a 3-row system needs.
    let max_outer = 3 * n.max(1);

    for _ in 0..max_outer {
        // Gradient w = Aᵀ(b − A·x).
        let r = residual(columns, &x, b);
        let mut best: Option<(usize, f64)> = None;
        for (j, col) in columns.iter().enumerate() {
            if passive[j] {
                continue;
            }
            let w = dot3(col, &r);
            match best {
                Some((_, bw)) if w <= bw => {}
                _ => best = Some((j, w)),
            }
        }
        let Some((j, w)) = best else { break };
        if w <= NNLS_TOL {
            break;
        }
        passive[j] = true;

        // Inner loop: solve on the passive set, back off until the
        // passive solution is strictly positive.
        loop {
            let idx: Vec<usize> = (0..n).filter(|&k| passive[k]).collect();
            let Some(z) = solve_normal_equations(columns, &idx, b) else {
                // Singular subproblem: drop the newest index and stop
                // growing the passive set in this direction.
                passive[j] = false;
                break;
            };
            if z.iter().all(|&v| v > NNLS_TOL) {
                for (k, &ix) in idx.iter().enumerate() {
                    x[ix] = z[k];
                }
                break;
            }
            // Feasible step length toward z.
            let mut alpha = f64::INFINITY;
            for (k, &ix) in idx.iter().enumerate() {
                if z[k] <= NNLS_TOL {
                    let denom = x[ix] - z[k];
                    if denom > 0.0 {
                        alpha = alpha.min(x[ix] / denom);
                    }
                }
            }
            if !alpha.is_finite() {
                log::warn!("nnls: non-finite step length, aborting inner loop");
                break;
            }
            for (k, &ix) in idx.iter().enumerate() {
                x[ix] += alpha * (z[k] - x[ix]);
            }
            for &ix in &idx {
                if x[ix] <= NNLS_TOL {
                    x[ix] = 0.0;
                    passive[ix] = false;
                }
            }
        }
    }

    let r = residual(columns, &x, b);
    let res_norm = (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt();
    (x, res_norm)
}

fn dot3(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn residual(columns: &[[f64; 3]], x: &[f64], b: [f64; 3]) -> [f64; 3] {
    let mut r = b;
    for (col, &xi) in columns.iter().zip(x) {
        r[0] -= xi * col[0];
        r[1] -= xi * col[1];
        r[2] -= xi * col[2];
    }
    r
}

/// Solve `(AᵀA)·z = Aᵀb` restricted to `idx` columns by Gaussian
/// elimination with partial pivoting. `None` when the subproblem is
/// numerically singular.
fn solve_normal_equations(columns: &[[f64; 3]], idx: &[usize], b: [f64; 3]) -> Option<Vec<f64>> {
    let k = idx.len();
    let mut g = vec![vec![0.0f64; k + 1]; k];
    for (row, &i) in idx.iter().enumerate() {
        for (col, &j) in idx.iter().enumerate() {
            g[row][col] = dot3(&columns[i], &columns[j]);
        }
        g[row][k] = dot3(&columns[i], &b);
    }

    for col in 0..k {
        let pivot_row = (col..k)
            .max_by(|&a, &b| g[a][col].abs().total_cmp(&g[b][col].abs()))?;
        if g[pivot_row][col].abs() < 1e-12 {
            return None;
        }
        g.swap(col, pivot_row);
        for row in (col + 1)..k {
            let factor = g[row][col] / g[col][col];
            for c in col..=k {
                g[row][c] -= factor * g[col][c];
            }
        }
    }

    let mut z = vec![0.0f64; k];
    for row in (0..k).rev() {
        let mut acc = g[row][k];
        for col in (row + 1)..k {
            acc -= g[row][col] * z[col];
        }
        z[row] = acc / g[row][row];
    }
    Some(z)
}

/// Attribute `target` to nonnegative contributions from `candidates`.
///
/// Candidates are stable-sorted by `(id, original index)` before
/// solving, so duplicate ids and host hash orders cannot perturb the
/// result. Raw alphas and the residual are quantized at `dp`.
pub fn attribute(candidates: &[(String, OKLab)], target: OKLab, dp: u32) -> ChromaResult<Attribution> {
    if candidates.is_empty() {
        return Err(ChromaError::ArithmeticDegenerate(
            "cannot attribute against an empty candidate set".to_string(),
        ));
    }

    let mut ordered: Vec<(usize, &(String, OKLab))> = candidates.iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| a.0.cmp(&b.0).then(ia.cmp(ib)));

    let columns: Vec<[f64; 3]> = ordered.iter().map(|(_, (_, p))| p.to_array()).collect();
    let (alpha, residual_norm) = nnls(&columns, target.to_array());

    let sum_alpha: f64 = alpha.iter().sum();
    let normalized = sum_alpha > 0.0;
    let n = alpha.len();
    let entries: Vec<AlphaEntry> = ordered
        .iter()
        .zip(&alpha)
        .map(|((_, (id, _)), &a)| AlphaEntry {
            id: id.clone(),
            alpha: quantize(a, dp),
            alpha_normalized: if normalized {
                quantize(a / sum_alpha, dp)
            } else {
                quantize(1.0 / n as f64, dp)
            },
        })
        .collect();

    Ok(Attribution {
        entries,
        residual_norm: quantize(residual_norm, dp),
        sum_alpha: quantize(sum_alpha, dp),
        normalized,
    })
}

/// Attribute a legacy mixing event of `doc` against its declared
/// inputs, using the event target variable's declared value as the
/// observation.
pub fn attribute_event(doc: &TraceDocument, event_index: usize, dp: u32) -> ChromaResult<Attribution> {
    let event = doc.events.get(event_index).ok_or_else(|| {
        ChromaError::Simulation(format!("events[{event_index}]: no such event"))
    })?;
    let Event::Legacy(mix) = event else {
        return Err(ChromaError::Simulation(format!(
            "events[{event_index}]: attribution requires a legacy mixing event"
        )));
    };

    let lookup = |id: &str| -> ChromaResult<OKLab> {
        doc.state
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.value)
            .ok_or_else(|| {
                ChromaError::Simulation(format!(
                    "events[{event_index}]: undeclared state variable {id:?}"
                ))
            })
    };

    let candidates: Vec<(String, OKLab)> = mix
        .mixing
        .inputs
        .iter()
        .map(|input| Ok((input.source.id.clone(), lookup(&input.source.id)?)))
        .collect::<ChromaResult<_>>()?;

    let target_id = mix.target.as_deref().ok_or_else(|| {
        ChromaError::Simulation(format!(
            "events[{event_index}]: attribution requires an event target"
        ))
    })?;
    let target = lookup(target_id)?;

    attribute(&candidates, target, dp)
}
