//! Integration tests for async wrapped functions.

mod guarded;

use std::future::Ready;
use std::time::Duration;

use enwrap::prelude_async::*;
use enwrap::{BacktraceMode, ErrorsOf, SuccessOf};

declare_errors! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Lookup {
        NotFound { id: u32 } => "not-found",
    }
}

#[tokio::test]
async fn success_resolves_unchanged() {
    let add = wrap_async(|_: ErrorCallback, (a, b): (i32, i32)| async move { Ok(a + b) });

    assert_eq!(add.call((1, 2)).await.unwrap(), 3);
}

#[tokio::test]
async fn declared_error_resolves_with_extra_data() {
    let find = wrap_async(|err: ErrorCallback<Lookup>, id: u32| async move {
        if id == 0 {
            return err.fail_with(Lookup::NotFound { id }, extra!({ "table": "users" }));
        }
        Ok(format!("user-{id}"))
    });

    assert_eq!(find.call(7).await.unwrap(), "user-7");

    let failure = find.call(0).await.unwrap_err();
    assert_eq!(failure.message(), "not-found");
    assert!(!failure.was_thrown());
    let data = failure.extra_data().unwrap();
    assert_eq!(data.get("id").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(data.get("table").and_then(|v| v.as_str()), Some("users"));
}

#[tokio::test]
async fn panic_inside_the_future_is_thrown() {
    let boom = wrap_async(|_: ErrorCallback, ()| async move {
        tokio::task::yield_now().await;
        if true {
            panic!("boom");
        }
        Ok(())
    });

    let failure = boom.call(()).await.unwrap_err();
    assert_eq!(failure.message(), "boom");
    assert!(failure.was_thrown());
}

#[tokio::test]
async fn panic_inside_the_future_reports_the_panic_line() {
    let line = line!() + 4;
    let boom = wrap_async(|_: ErrorCallback, attempts: u32| async move {
        tokio::task::yield_now().await;
        if attempts > 0 {
            panic!("gave up after {attempts}");
        }
        Ok(())
    });

    let failure = boom.call(2).await.unwrap_err();
    assert_eq!(failure.message(), "gave up after 2");
    assert_eq!(failure.origin().location().line(), line);
    let file = failure.origin().location().file().replace('\\', "/");
    assert!(file.ends_with("tests/async_ext/mod.rs"), "got {file}");
}

#[tokio::test]
async fn panic_before_the_future_is_built_is_thrown() {
    let early = wrap_async(|_: ErrorCallback, ()| -> Ready<Result<(), TaggedError>> {
        panic!("too early")
    });

    let failure = early.call(()).await.unwrap_err();
    assert_eq!(failure.message(), "too early");
    assert!(failure.was_thrown());
}

#[tokio::test]
async fn question_mark_inside_the_future_is_thrown() {
    let parse = wrap_async(|_: ErrorCallback<Lookup>, text: String| async move {
        let n: u32 = text.parse()?;
        Ok(n)
    });

    assert_eq!(parse.call("5".to_owned()).await.unwrap(), 5);
    let failure = parse.call("five".to_owned()).await.unwrap_err();
    assert!(failure.was_thrown());
    assert!(failure.declared().is_none());
}

#[tokio::test]
async fn question_mark_inside_the_future_follows_the_config() {
    let parse = wrap_async(|_: ErrorCallback, text: String| async move {
        tokio::task::yield_now().await;
        Ok(text.parse::<u32>()?)
    })
    .with_config(WrapConfig::new().backtrace(BacktraceMode::Force));

    let failure = parse.call("five".to_owned()).await.unwrap_err();
    assert!(failure.origin().stack().is_some());
}

#[tokio::test]
async fn awaits_other_wrapped_functions() {
    let fetch = wrap_async(|err: ErrorCallback<Lookup>, id: u32| async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        err.fail::<String>(Lookup::NotFound { id })
    });
    let load = wrap_async(|_: ErrorCallback<Lookup>, id: u32| {
        let pending = fetch.call(id);
        async move {
            let name = pending.await?;
            Ok(name.len())
        }
    });

    let failure = load.call(4).await.unwrap_err();
    assert_eq!(failure.declared(), Some(&Lookup::NotFound { id: 4 }));
}

#[tokio::test]
async fn result_shape_of_async_functions() {
    fn success_type<W, Fut, T, K>(_: &W) -> Option<SuccessOf<W, u32>>
    where
        W: WrappedFn<u32, Success = T, Declared = K, Output = Fut>,
        K: ErrorTag,
    {
        None
    }

    async fn first_error<W, Fut, T, K>(function: &W) -> Option<ErrorsOf<W, u32>>
    where
        W: WrappedFn<u32, Success = T, Declared = K, Output = Fut>,
        Fut: std::future::Future<Output = Result<T, TaggedError<K>>>,
        K: ErrorTag,
    {
        function.invoke(0).await.err()
    }

    let find = wrap_async(|err: ErrorCallback<Lookup>, id: u32| async move {
        if id == 0 {
            return err.fail(Lookup::NotFound { id });
        }
        Ok(id)
    });

    let none: Option<u32> = success_type(&find);
    assert!(none.is_none());

    let failure: TaggedError<Lookup> = first_error(&find).await.unwrap();
    assert_eq!(failure.message(), "not-found");
}

#[tokio::test]
async fn guarded_futures_can_be_spawned() {
    let double = wrap_async(|_: ErrorCallback, n: u64| async move { Ok(n * 2) });

    let handle = tokio::spawn(double.call(21));
    assert_eq!(handle.await.unwrap().unwrap(), 42);
}
