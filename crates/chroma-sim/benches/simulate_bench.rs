// ─────────────────────────────────────────────────────────────────────
// Anulum Chroma — Simulation Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for trace simulation and attribution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chroma_sim::{attribute, SimulationEngine, TraceDocument};
use chroma_types::{OKLab, SimConfig};

fn make_trace(n_vars: usize) -> TraceDocument {
    let mut state = String::new();
    let mut inputs = String::new();
    for i in 0..n_vars {
        let l = (i + 1) as f64 / (n_vars + 1) as f64;
        state.push_str(&format!(
            r#"{{"id": "nvar{i:02}", "space": "oklab", "kind": "neuron",
                "value": {{"L": {l}, "a": 0.05, "b": -0.05}}}},"#
        ));
        inputs.push_str(&format!(r#""nvar{i:02}","#));
    }
    let json = format!(
        r#"{{
            "cgir_version": "0.1.0",
            "spaces": [{{"id": "oklab", "kind": "riemannian", "dim": 3, "coords": "OKLab"}}],
            "state": [{state}
                {{"id": "mixed_out", "space": "oklab", "kind": "neuron",
                  "value": {{"L": 0.5, "a": 0.0, "b": 0.0}}}}],
            "interactions": [
                {{"id": "blend_all", "space": "oklab", "kind": "convex_mix",
                  "inputs": [{}],
                  "params": {{"target": "mixed_out"}}}}
            ],
            "events": [
                {{"time": 0.0, "kind": "state_injection", "space": "oklab", "target": "mixed_out",
                  "params": {{"value": {{"L": 0.6, "a": 0.05, "b": 0.02}}}}}}
            ]
        }}"#,
        inputs.trim_end_matches(','),
    );
    TraceDocument::from_json(&json).unwrap()
}

fn bench_simulate_10_steps(c: &mut Criterion) {
    let doc = make_trace(8);
    let config = SimConfig { steps: 10, ..Default::default() };
    let engine = SimulationEngine::new(&doc, config).unwrap();
    c.bench_function("simulate_8vars_10steps", |b| {
        b.iter(|| black_box(&engine).run())
    });
}

fn bench_simulate_100_steps(c: &mut Criterion) {
    let doc = make_trace(8);
    let config = SimConfig { steps: 100, ..Default::default() };
    let engine = SimulationEngine::new(&doc, config).unwrap();
    c.bench_function("simulate_8vars_100steps", |b| {
        b.iter(|| black_box(&engine).run())
    });
}

fn bench_simulate_1000_steps(c: &mut Criterion) {
    let doc = make_trace(8);
    let config = SimConfig { steps: 1000, ..Default::default() };
    let engine = SimulationEngine::new(&doc, config).unwrap();
    c.bench_function("simulate_8vars_1000steps", |b| {
        b.iter(|| black_box(&engine).run())
    });
}

fn bench_attribution_8_candidates(c: &mut Criterion) {
    let candidates: Vec<(String, OKLab)> = (0..8)
        .map(|i| {
            (
                format!("nvar{i:02}"),
                OKLab::new((i + 1) as f64 / 9.0, 0.05, -0.05),
            )
        })
        .collect();
    let target = OKLab::new(0.55, 0.05, -0.05);
    c.bench_function("attribute_8_candidates", |b| {
        b.iter(|| attribute(black_box(&candidates), black_box(target), 12))
    });
}

criterion_group!(
    benches,
    bench_simulate_10_steps,
    bench_simulate_100_steps,
    bench_simulate_1000_steps,
    bench_attribution_8_candidates,
);
criterion_main!(benches);
