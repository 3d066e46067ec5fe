// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Convex Mixing Engine
// ─────────────────────────────────────────────────────────────────────
//! Deterministic weight normalization and convex combination.
//!
//! Normalization fixes an implementation-independent total order by
//! stable-sorting inputs on `(id, original index)` before summing, so
//! duplicate ids and float accumulation order cannot vary between
//! hosts. Callers must not assume positional correspondence between
//! the input list and the normalized output.

use serde::{Deserialize, Serialize};

use chroma_types::{ChromaError, ChromaResult, OKLab};

use crate::numeric::quantize;

/// One weighted input to a mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixInput {
    pub id: String,
    pub color: OKLab,
    pub weight: f64,
}

impl MixInput {
    pub fn new(id: impl Into<String>, color: OKLab, weight: f64) -> Self {
        Self {
            id: id.into(),
            color,
            weight,
        }
    }
}

/// Clamp, sort, normalize, and quantize a weight list in place.
///
/// Negative and non-finite weights clamp to 0. When the clamped sum is
/// positive each weight divides by it; otherwise the zeros stay as
/// they are.
fn normalize_weight_values(weights: &mut [f64], dp: u32) {
    for w in weights.iter_mut() {
        if !w.is_finite() || *w < 0.0 {
            *w = 0.0;
        }
    }
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        for w in weights.iter_mut() {
            *w /= sum;
        }
    }
    for w in weights.iter_mut() {
        *w = quantize(*w, dp);
    }
}

/// Deterministically normalize mix inputs.
///
/// Guarantees: all output weights are ≥ 0; if any input weight was
/// positive the outputs sum to 1 within quantization tolerance; the
/// output order is ascending `(id, original index)`, not input order.
pub fn normalize_weights(inputs: Vec<MixInput>, dp: u32) -> Vec<MixInput> {
    let mut indexed: Vec<(usize, MixInput)> = inputs.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| a.id.cmp(&b.id).then(ia.cmp(ib)));

    let mut weights: Vec<f64> = indexed.iter().map(|(_, iw)| iw.weight).collect();
    normalize_weight_values(&mut weights, dp);

    indexed
        .into_iter()
        .zip(weights)
        .map(|((_, iw), w)| MixInput { weight: w, ..iw })
        .collect()
}

/// Convex mix of id-keyed inputs in normalized `(id, index)` order.
pub fn mix_inputs(inputs: Vec<MixInput>, dp: u32) -> ChromaResult<OKLab> {
    if inputs.is_empty() {
        return Err(ChromaError::ArithmeticDegenerate(
            "cannot mix an empty input list".to_string(),
        ));
    }
    let normed = normalize_weights(inputs, dp);
    let (mut l, mut a, mut b) = (0.0, 0.0, 0.0);
    for iw in &normed {
        l += iw.weight * iw.color.l;
        a += iw.weight * iw.color.a;
        b += iw.weight * iw.color.b;
    }
    Ok(OKLab {
        l: quantize(l, dp),
        a: quantize(a, dp),
        b: quantize(b, dp),
    })
}

/// Positional convex mix: points and weights as parallel lists,
/// summation in input order.
///
/// Fails with `ArithmeticDegenerate` on an empty or mismatched-length
/// input. Closure — a mix of valid points validating — is checked by
/// the verification layer, not assumed here.
pub fn mix_points(points: &[OKLab], weights: &[f64], dp: u32) -> ChromaResult<OKLab> {
    if points.is_empty() {
        return Err(ChromaError::ArithmeticDegenerate(
            "cannot mix an empty point list".to_string(),
        ));
    }
    if points.len() != weights.len() {
        return Err(ChromaError::ArithmeticDegenerate(format!(
            "points and weights must have the same length ({} vs {})",
            points.len(),
            weights.len()
        )));
    }
    let mut ws = weights.to_vec();
    normalize_weight_values(&mut ws, dp);
    let (mut l, mut a, mut b) = (0.0, 0.0, 0.0);
    for (p, w) in points.iter().zip(&ws) {
        l += w * p.l;
        a += w * p.a;
        b += w * p.b;
    }
    Ok(OKLab {
        l: quantize(l, dp),
        a: quantize(a, dp),
        b: quantize(b, dp),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str, weight: f64) -> MixInput {
        MixInput::new(id, OKLab::new(0.5, 0.0, 0.0), weight)
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let normed = normalize_weights(vec![input("a", 2.0), input("b", 1.0), input("c", 1.0)], 12);
        let sum: f64 = normed.iter().map(|iw| iw.weight).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_clamps_negatives() {
        let normed = normalize_weights(vec![input("a", -3.0), input("b", 1.0)], 12);
        assert_eq!(normed[0].weight, 0.0);
        assert_eq!(normed[1].weight, 1.0);
    }

    #[test]
    fn test_normalize_all_zero_stays_zero() {
        let normed = normalize_weights(vec![input("a", 0.0), input("b", -1.0)], 12);
        assert!(normed.iter().all(|iw| iw.weight == 0.0));
    }

    #[test]
    fn test_normalize_sorts_by_id() {
        let normed = normalize_weights(vec![input("zeta", 1.0), input("alpha", 1.0)], 12);
        assert_eq!(normed[0].id, "alpha");
        assert_eq!(normed[1].id, "zeta");
    }

    #[test]
    fn test_normalize_duplicate_ids_keep_input_order() {
        let mut first = input("dup", 1.0);
        first.color = OKLab::new(0.1, 0.0, 0.0);
        let mut second = input("dup", 3.0);
        second.color = OKLab::new(0.9, 0.0, 0.0);
        let normed = normalize_weights(vec![first, second], 12);
        assert_eq!(normed[0].color.l, 0.1);
        assert_eq!(normed[1].color.l, 0.9);
        assert!((normed[0].weight - 0.25).abs() < 1e-9);
        assert!((normed[1].weight - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_mix_two_to_one_ratio() {
        let points = [OKLab::new(0.4, 0.1, 0.2), OKLab::new(0.8, -0.1, -0.2)];
        let mixed = mix_points(&points, &[2.0, 1.0], 12).unwrap();
        // 2/3 · 0.4 + 1/3 · 0.8, quantized at 12 decimals.
        assert_eq!(mixed.l, 0.533333333333);
    }

    #[test]
    fn test_mix_single_point_identity() {
        let p = OKLab::new(0.5, 0.1, 0.2);
        let mixed = mix_points(&[p], &[1.0], 12).unwrap();
        assert_eq!(mixed, p);
    }

    #[test]
    fn test_mix_empty_fails() {
        let err = mix_points(&[], &[], 12).unwrap_err();
        assert!(matches!(err, ChromaError::ArithmeticDegenerate(_)));
    }

    #[test]
    fn test_mix_length_mismatch_fails() {
        let err = mix_points(&[OKLab::origin()], &[0.5, 0.5], 12).unwrap_err();
        assert!(matches!(err, ChromaError::ArithmeticDegenerate(_)));
    }

    #[test]
    fn test_mix_all_zero_weights_yields_origin() {
        let points = [OKLab::new(0.4, 0.1, 0.2), OKLab::new(0.8, -0.1, -0.2)];
        let mixed = mix_points(&points, &[0.0, 0.0], 12).unwrap();
        assert_eq!(mixed, OKLab::origin());
    }

    #[test]
    fn test_mix_inputs_matches_positional() {
        let inputs = vec![
            MixInput::new("a", OKLab::new(0.4, 0.1, 0.2), 2.0),
            MixInput::new("b", OKLab::new(0.8, -0.1, -0.2), 1.0),
        ];
        let via_inputs = mix_inputs(inputs, 12).unwrap();
        let via_points = mix_points(
            &[OKLab::new(0.4, 0.1, 0.2), OKLab::new(0.8, -0.1, -0.2)],
            &[2.0, 1.0],
            12,
        )
        .unwrap();
        assert_eq!(via_inputs, via_points);
    }
}
