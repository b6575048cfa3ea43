use std::collections::HashSet;
use std::thread;

mod common;

use blake3::Hasher;
use common::*;
use ibd_hmm::{IbdParameters, LikelihoodEvaluator, LogLikelihood};

fn fixture() -> LikelihoodEvaluator {
    evaluator(
        &[[0, 1], [1, 1], [2, 2], [0, 0], [1, 0]],
        &[
            [0.5, 0.5, 0.0],
            [0.3, 0.7, 0.0],
            [0.2, 0.3, 0.5],
            [0.9, 0.1, 0.0],
            [0.4, 0.4, 0.2],
        ],
        &[1.0e5, 3.0e5, f64::INFINITY, 2.5e4, 0.0],
        0.01,
    )
}

fn fingerprint(eval: &LikelihoodEvaluator, params: IbdParameters) -> blake3::Hash {
    let mut hasher = Hasher::new();
    for step in eval.trace(params).expect("feasible") {
        hasher.update(&(step.site as u64).to_le_bytes());
        for value in [
            step.predictive.not_ibd,
            step.predictive.ibd,
            step.emission.non_ibd,
            step.emission.ibd,
            step.marginal,
        ] {
            hasher.update(&value.to_bits().to_le_bytes());
        }
        if let Some(filter) = step.filter {
            hasher.update(&filter.ibd.to_bits().to_le_bytes());
        }
    }
    hasher.finalize()
}

#[test]
fn forward_trace_is_deterministic() {
    init_tracing();
    let params = IbdParameters::new(2.0, 0.2);

    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        fingerprints.insert(fingerprint(&fixture(), params));
    }

    assert_eq!(fingerprints.len(), 1, "traces diverged across runs");
}

#[test]
fn concurrent_proposals_match_sequential_evaluation() {
    init_tracing();
    let eval = fixture();
    let proposals: Vec<IbdParameters> = (0..32)
        .map(|i| IbdParameters::new(0.25 * i as f64, (i as f64 / 31.0).min(1.0)))
        .collect();
    let sequential: Vec<LogLikelihood> = proposals
        .iter()
        .map(|&params| eval.log_likelihood(params))
        .collect();

    let concurrent: Vec<LogLikelihood> = thread::scope(|scope| {
        let handles: Vec<_> = proposals
            .chunks(8)
            .map(|chunk| {
                let eval = &eval;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&params| eval.log_likelihood(params))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("worker finished"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn evaluator_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LikelihoodEvaluator>();
}
