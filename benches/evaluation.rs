//! Guardrail Evaluation Benchmark (Criterion)
//!
//! Measures the full pipeline (normalize, match, resolve) and the
//! match-and-resolve step on pre-normalized data.

use ai_guardrail_engine::api::normalize_inputs;
use ai_guardrail_engine::core::{match_policies, resolve};
use ai_guardrail_engine::policy::normalize_policies;
use ai_guardrail_engine::{evaluate, Action};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

const RISKS: [&str; 4] = ["medical", "legal", "financial", "self_harm"];
const ACTIONS: [&str; 4] = ["allow", "sanitize", "escalate", "block"];

/// Sample policies spread across the risk categories.
fn sample_policies(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": format!("policy-{}", i),
                "risk": RISKS[i % RISKS.len()],
                "allowed_actions": [ACTIONS[i % ACTIONS.len()], ACTIONS[(i + 1) % ACTIONS.len()]],
                "min_confidence": (i % 10) as f64 / 10.0
            })
        })
        .collect()
}

/// Sample inputs with varying confidence.
fn sample_inputs(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": format!("R{}", i),
                "risk": RISKS[i % RISKS.len()],
                "confidence": (i % 100) as f64 / 100.0,
                "ai_output": "Explain the side effects of ibuprofen."
            })
        })
        .collect()
}

fn benchmark_pipeline(c: &mut Criterion) {
    let inputs = sample_inputs(100);

    let mut group = c.benchmark_group("pipeline");

    for policy_count in [1, 5, 10, 20, 50].iter() {
        let policies = sample_policies(*policy_count);

        group.bench_with_input(
            BenchmarkId::new("policies", policy_count),
            &(&policies, &inputs),
            |b, (pol, inp)| {
                b.iter(|| std::hint::black_box(evaluate(pol, inp, Action::Block)));
            },
        );
    }

    group.finish();
}

fn benchmark_match_and_resolve(c: &mut Criterion) {
    let policies = normalize_policies(&sample_policies(50));
    let inputs = normalize_inputs(&sample_inputs(100));

    c.bench_function("match_and_resolve", |b| {
        b.iter(|| {
            for input in &inputs {
                let trace = match_policies(input, &policies);
                std::hint::black_box(resolve(input, trace, Action::Block));
            }
        });
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_match_and_resolve);

criterion_main!(benches);
