use std::panic::panic_any;

use enwrap::{
    declare_errors, extra, wrap, BacktraceMode, ErrorCallback, ErrorKind, Thrown, WrapConfig,
};


declare_errors! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Input {
        BadInput => "bad-input",
    }
}

declare_errors! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Validate {
        Bad => "bad",
        OutOfRange { min: i32, max: i32 } => "out-of-range",
    }
}

#[test]
fn success_is_returned_unchanged() {
    let add = wrap(|_: ErrorCallback, (a, b): (i32, i32)| Ok(a + b));

    assert_eq!(add.call((1, 2)).unwrap(), 3);
    assert_eq!(add.call((-4, 4)).unwrap(), 0);
}

#[test]
fn zero_argument_functions_take_unit() {
    let answer = wrap(|_: ErrorCallback, ()| Ok("forty-two"));

    assert_eq!(answer.call(()).unwrap(), "forty-two");
}

#[test]
fn declared_error_carries_message_and_extra_data() {
    let check = wrap(|err: ErrorCallback<Validate>, x: i32| {
        if x < 0 {
            return err.fail_with(Validate::Bad, extra!({ "field": "x" }));
        }
        Ok(x)
    });

    let failure = check.call(-1).unwrap_err();
    assert_eq!(failure.message(), "bad");
    assert!(!failure.was_thrown());
    assert_eq!(failure.kind(), &ErrorKind::Declared(Validate::Bad));
    assert_eq!(failure.extra_data().unwrap().get("field").and_then(|v| v.as_str()), Some("x"));
    assert!(!failure.origin().was_thrown());
}

#[test]
fn declared_error_from_a_zero_argument_function() {
    let reject = wrap(|err: ErrorCallback<Input>, ()| {
        err.fail_with::<()>(Input::BadInput, extra!({ "field": "x" }))
    });

    let failure = reject.call(()).unwrap_err();
    assert_eq!(failure.message(), "bad-input");
    assert!(!failure.was_thrown());
    assert_eq!(failure.extra_data().unwrap().to_json(), serde_json::json!({ "field": "x" }));
}

#[test]
fn declared_error_without_extra_data_has_none() {
    let check = wrap(|err: ErrorCallback<Validate>, ()| err.fail::<()>(Validate::Bad));

    let failure = check.call(()).unwrap_err();
    assert!(failure.extra_data().is_none());
    assert!(failure.origin().extra_data().is_empty());
}

#[test]
fn tag_fields_and_explicit_extra_data_are_merged() {
    let check = wrap(|err: ErrorCallback<Validate>, x: i32| {
        err.fail_with::<()>(
            Validate::OutOfRange { min: 0, max: 10 },
            extra!({ "max": 99, "value": x }),
        )
    });

    let failure = check.call(12).unwrap_err();
    let data = failure.extra_data().unwrap();
    assert_eq!(failure.message(), "out-of-range");
    assert_eq!(data.get("min").and_then(|v| v.as_i64()), Some(0));
    assert_eq!(data.get("max").and_then(|v| v.as_i64()), Some(99));
    assert_eq!(data.get("value").and_then(|v| v.as_i64()), Some(12));
}

#[test]
fn panic_with_string_is_thrown() {
    let boom = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic!("boom") });

    let failure = boom.call(()).unwrap_err();
    assert_eq!(failure.message(), "boom");
    assert!(failure.was_thrown());
    assert_eq!(failure.kind(), &ErrorKind::Thrown);
    assert!(failure.extra_data().is_none());
}

#[test]
fn panic_with_formatted_string_is_thrown() {
    let boom = wrap(|_: ErrorCallback, id: u32| -> Result<(), _> { panic!("no row {id}") });

    assert_eq!(boom.call(7).unwrap_err().message(), "no row 7");
}

#[test]
fn panic_with_non_string_payload_is_normalized() {
    let number = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic_any(404_u16) });
    assert_eq!(number.call(()).unwrap_err().message(), "404");

    let json = wrap(|_: ErrorCallback, ()| -> Result<(), _> {
        panic_any(serde_json::json!({ "code": 7, "reason": "gone" }))
    });
    assert_eq!(json.call(()).unwrap_err().message(), r#"{"code":7,"reason":"gone"}"#);

    let opaque = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic_any(vec![1, 2, 3]) });
    assert_eq!(opaque.call(()).unwrap_err().message(), "Box<dyn Any>");
}

#[test]
fn panic_with_empty_string_is_padded() {
    let empty = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic_any(String::new()) });

    let failure = empty.call(()).unwrap_err();
    assert_eq!(failure.message(), "e");
    assert!(failure.was_thrown());
}

#[test]
fn panic_with_thrown_payload_keeps_message() {
    let raise = wrap(|_: ErrorCallback, ()| -> Result<(), _> {
        panic_any(Thrown::from_display("already normalized"))
    });

    assert_eq!(raise.call(()).unwrap_err().message(), "already normalized");
}

#[test]
fn question_mark_on_foreign_error_is_thrown() {
    let parse = wrap(|_: ErrorCallback<Validate>, text: &str| Ok(text.parse::<i32>()?));

    assert_eq!(parse.call("12").unwrap(), 12);

    let failure = parse.call("twelve").unwrap_err();
    assert!(failure.was_thrown());
    assert_eq!(failure.message(), "invalid digit found in string");
    assert!(failure.declared().is_none());

    let source = failure.origin().thrown_source().unwrap();
    assert!(source.downcast_ref::<std::num::ParseIntError>().is_some());
}

#[test]
fn declared_error_location_is_the_callback_line() {
    let line = line!() + 2;
    let check = wrap(|err: ErrorCallback<Validate>, ()| {
        err.fail::<()>(Validate::Bad)
    });

    let failure = check.call(()).unwrap_err();
    let location = failure.origin().location();
    assert_eq!(location.line(), line);
    assert!(location.file().replace('\\', "/").ends_with("tests/wrap/mod.rs"));
}

#[test]
fn thrown_error_location_is_the_panic_line() {
    let line = line!() + 3;
    let boom = wrap(|_: ErrorCallback, depth: u32| -> Result<(), _> {
        let _ = depth;
        panic!("boom")
    });

    let failure = boom.call(0).unwrap_err();
    let location = failure.origin().location();
    assert_eq!(location.line(), line);
    assert!(location.file().replace('\\', "/").ends_with("tests/wrap/mod.rs"));
}

#[track_caller]
fn fail_in_helper(code: u32) -> u32 {
    panic!("helper failed with {code}")
}

#[test]
fn panic_in_a_track_caller_helper_points_at_the_helper_call() {
    let line = line!() + 1;
    let run = wrap(|_: ErrorCallback, code: u32| Ok(fail_in_helper(code)));

    let failure = run.call(3).unwrap_err();
    assert_eq!(failure.message(), "helper failed with 3");
    assert_eq!(failure.origin().location().line(), line);
}

#[test]
fn nested_wrapped_calls_report_their_own_panic_sites() {
    let inner_line = line!() + 1;
    let inner = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic!("inner") });
    let outer_line = line!() + 4;
    let outer = wrap(|_: ErrorCallback, ()| -> Result<(), _> {
        let failure = inner.call(()).unwrap_err();
        assert_eq!(failure.origin().location().line(), inner_line);
        panic!("outer")
    });

    let failure = outer.call(()).unwrap_err();
    assert_eq!(failure.message(), "outer");
    assert_eq!(failure.origin().location().line(), outer_line);
}

#[test]
fn calls_are_independent() {
    let check = wrap(|err: ErrorCallback<Validate>, x: i32| {
        if x % 2 == 1 {
            return err.fail(Validate::Bad);
        }
        Ok(x / 2)
    });

    let outcomes: Vec<_> = (0..4).map(|x| check.call(x)).collect();
    assert_eq!(outcomes[0].as_ref().unwrap(), &0);
    assert_eq!(outcomes[1].as_ref().unwrap_err().message(), "bad");
    assert_eq!(outcomes[2].as_ref().unwrap(), &1);
    assert_eq!(outcomes[3].as_ref().unwrap_err().message(), "bad");
}

#[test]
fn captured_state_is_visible_to_the_body() {
    let limit = 10;
    let clamp = wrap(move |err: ErrorCallback<Validate>, x: i32| {
        if x > limit {
            return err.fail_with(Validate::OutOfRange { min: 0, max: limit }, extra!({ "x": x }));
        }
        Ok(x)
    });

    let failure = clamp.call(11).unwrap_err();
    assert_eq!(failure.extra_data().unwrap().get("max").and_then(|v| v.as_i64()), Some(10));
}

#[test]
fn error_callback_reports_the_wrapped_config() {
    let config = WrapConfig::new().backtrace(BacktraceMode::Off).capture_span(false);
    let inspect = wrap(|err: ErrorCallback, ()| Ok(*err.config())).with_config(config);

    assert_eq!(inspect.call(()).unwrap(), config);
    assert_eq!(inspect.config(), &config);
}
