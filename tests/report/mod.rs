use enwrap::{declare_errors, extra, wrap, ErrorCallback};
use serde_json::json;

declare_errors! {
    #[derive(Debug)]
    pub enum Checkout {
        Declined => "declined",
    }
}

#[test]
fn report_splits_declared_errors() {
    let pay = wrap(|err: ErrorCallback<Checkout>, user_id: u64| {
        err.fail_with::<()>(Checkout::Declined, extra!({ "user_id": user_id }))
    });
    let failure = pay.call(123).unwrap_err();
    let report = failure.report();

    assert_eq!(report.message, "declined");
    assert_eq!(report.extra_data.and_then(|d| d.get("user_id")?.as_u64()), Some(123));
    assert_eq!(report.error_object.message(), "declined");
    assert!(std::ptr::eq(report.error_object, failure.origin()));
}

#[test]
fn report_of_thrown_error_has_no_extra_data() {
    let boom = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic!("disk full") });
    let failure = boom.call(()).unwrap_err();
    let report = failure.report();

    assert_eq!(report.message, "disk full");
    assert!(report.extra_data.is_none());
    assert!(report.error_object.was_thrown());
}

#[test]
fn report_serializes_to_json() {
    let pay = wrap(|err: ErrorCallback<Checkout>, ()| {
        err.fail_with::<()>(Checkout::Declined, extra!({ "amount": 12.5 }))
    });
    let failure = pay.call(()).unwrap_err();
    let json = serde_json::to_value(failure.report()).unwrap();

    assert_eq!(json["message"], json!("declined"));
    assert_eq!(json["was_thrown"], json!(false));
    assert_eq!(json["extra_data"], json!({ "amount": 12.5 }));

    let location = json["location"].as_str().unwrap();
    assert!(location.contains("mod.rs:"));
}

#[test]
fn report_serializes_missing_extra_data_as_null() {
    let boom = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic!("x") });
    let failure = boom.call(()).unwrap_err();
    let json = serde_json::to_value(failure.report()).unwrap();

    assert_eq!(json["extra_data"], serde_json::Value::Null);
    assert_eq!(json["was_thrown"], json!(true));
}
