//! Parameterized tests for arity-based notifier dispatch

use std::cell::RefCell;
use std::rc::Rc;

use expect_support::core::services::dispatch;
use expect_support::{Arity, Failure, Notifier, Notify, NotifyResult, Options, with_failure_notifier};
use serde_json::json;
use test_case::test_case;

use crate::common::{ExpectationNotMet, failure};

/// Records the options each call received
struct Recorder {
    declared: Option<Arity>,
    seen: Rc<RefCell<Vec<Options>>>,
}

impl Notify for Recorder {
    fn arity(&self) -> Option<Arity> {
        self.declared
    }

    fn notify(&self, _failure: Failure, options: &Options) -> NotifyResult {
        self.seen.borrow_mut().push(options.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    UnaryClosure,
    BinaryClosure,
    DeclaredUnaryObject,
    DeclaredVariadicObject,
    UndeclaredObject,
}

fn build(kind: Kind, seen: &Rc<RefCell<Vec<Options>>>) -> Notifier {
    let sink = Rc::clone(seen);
    match kind {
        Kind::UnaryClosure => Notifier::unary(move |_| {
            sink.borrow_mut().push(Options::new());
            Ok(())
        }),
        Kind::BinaryClosure => Notifier::binary(move |_, options| {
            sink.borrow_mut().push(options.clone());
            Ok(())
        }),
        Kind::DeclaredUnaryObject => Notifier::object(Recorder {
            declared: Some(Arity::Exactly(1)),
            seen: sink,
        }),
        Kind::DeclaredVariadicObject => Notifier::object(Recorder {
            declared: Some(Arity::AtLeast(1)),
            seen: sink,
        }),
        Kind::UndeclaredObject => Notifier::object(Recorder {
            declared: None,
            seen: sink,
        }),
    }
}

fn sample_options() -> Options {
    let mut options = Options::new();
    options.insert("opt".to_string(), json!(1));
    options
}

#[test_case(Kind::UnaryClosure, Arity::Exactly(1), false ; "unary closure drops options")]
#[test_case(Kind::BinaryClosure, Arity::Exactly(2), true ; "binary closure gets options")]
#[test_case(Kind::DeclaredUnaryObject, Arity::Exactly(1), false ; "declared unary object drops options")]
#[test_case(Kind::DeclaredVariadicObject, Arity::AtLeast(1), true ; "variadic object gets options")]
#[test_case(Kind::UndeclaredObject, Arity::Exactly(2), true ; "undeclared object uses entry point arity")]
fn options_delivery(kind: Kind, arity: Arity, receives_options: bool) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let notifier = build(kind, &seen);
    assert_eq!(notifier.arity(), arity);

    dispatch(&notifier, failure(1, 2), &sample_options()).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    let expected = if receives_options { sample_options() } else { Options::new() };
    assert_eq!(seen[0], expected);
}

#[test_case(Options::new() ; "without options")]
#[test_case(sample_options() ; "with options")]
fn raise_primitive_only_gets_failure(options: Options) {
    let err = dispatch(&Notifier::Raise, failure(7, 8), &options).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ExpectationNotMet>(),
        Some(&ExpectationNotMet { expected: 7, actual: 8 })
    );
    // Routed through the two-argument path, the options would become the message
    assert_eq!(err.to_string(), "expected 7, got 8");
    assert_eq!(err.chain().count(), 1);
}

#[test]
fn unary_notifier_gets_the_failure_itself() {
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let notifier = Notifier::unary(move |failure| {
        *sink.borrow_mut() = failure.downcast_ref::<ExpectationNotMet>().cloned();
        Ok(())
    });

    with_failure_notifier(notifier, || {
        expect_support::notify_failure(failure(1, 2), &sample_options())
    })
    .unwrap();

    assert_eq!(*seen.borrow(), Some(ExpectationNotMet { expected: 1, actual: 2 }));
}
