// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Concurrently running contexts never observe each other's stubs.
#![allow(clippy::unwrap_used)]

use std::sync::Barrier;
use std::thread;

use serde_json::json;
use understudy_core::{ConfigurationError, Error, HarnessConfig, Payload, Seam, StubContext};
use understudy_dry_tests::init_test_tracing;

fn lookup() -> Seam {
    Seam::new("Directory", "lookup", 1, |_| Ok(json!("real"))).unwrap()
}

#[test]
fn sibling_context_without_stubs_sees_nothing_registered() {
    init_test_tracing();
    let seam = lookup();
    let barrier = Barrier::new(2);

    thread::scope(|s| {
        let a = s.spawn(|| {
            let ctx = StubContext::new();
            ctx.stub(seam.key().clone(), vec![3.into()], json!("x")).unwrap();
            barrier.wait();
            seam.call(&ctx, &[json!(3)])
        });
        let b = s.spawn(|| {
            let ctx = StubContext::new();
            barrier.wait();
            ctx.consume_stub(seam.key(), &[json!(3)])
        });
        assert_eq!(a.join().unwrap(), Ok(json!("x")));
        assert_eq!(
            b.join().unwrap(),
            Err(Error::NoStubsRegistered { key: seam.key().clone() })
        );
    });
}

#[test]
fn same_seam_answers_differently_per_context() {
    let seam = lookup();
    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let seam = &seam;
                s.spawn(move || {
                    let ctx = StubContext::with_config(HarnessConfig::strict());
                    ctx.stub(seam.key().clone(), vec![json!("who").into()], json!(i))
                        .unwrap();
                    let answers: Vec<_> = (0..50)
                        .map(|_| seam.call(&ctx, &[json!("who")]).unwrap())
                        .collect();
                    (i, answers, ctx.call_count(seam.key()))
                })
            })
            .collect();
        for handle in handles {
            let (i, answers, calls) = handle.join().unwrap();
            assert!(answers.iter().all(|a| *a == json!(i)));
            assert_eq!(calls, 50);
        }
    });
}

#[test]
fn unstubbed_context_passes_through_while_sibling_is_stubbed() {
    let seam = lookup();
    let stubbed = StubContext::new();
    let plain = StubContext::new();
    stubbed
        .stub(seam.key().clone(), vec![understudy_core::ArgSpec::Any], json!("fake"))
        .unwrap();
    assert_eq!(seam.call(&stubbed, &[json!(1)]), Ok(json!("fake")));
    assert_eq!(seam.call(&plain, &[json!(1)]), Ok(json!("real")));
}

#[test]
fn calculator_from_a_sibling_context_cannot_be_bound() {
    let seam = lookup();
    let a = StubContext::new();
    let b = StubContext::with_config(HarnessConfig::strict());
    a.add_stub(
        seam.key().clone(),
        vec![understudy_core::ArgSpec::Any],
        Payload::Return(json!("from a")),
    );
    let from_a = a.make_calculator(seam.key().clone(), 1).unwrap();

    assert_eq!(
        b.bind("Directory", "lookup", 1, from_a),
        Err(ConfigurationError::ForeignCalculator { key: seam.key().clone() })
    );
    assert_eq!(
        seam.call(&b, &[json!(3)]),
        Err(Error::NoStubsRegistered { key: seam.key().clone() })
    );
}
