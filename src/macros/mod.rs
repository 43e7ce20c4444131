//! Macros for declaring error sets and attaching extra data.
//!
//! - [`macro@crate::declare_errors`] - Declares an enum of error tags, each with a
//!   fixed message, and implements [`ErrorTag`](crate::ErrorTag) for it. Messages are
//!   checked at compile time: they must be non-empty and unique.
//! - [`macro@crate::extra`] - Builds [`ExtraData`](crate::ExtraData) with JSON object
//!   syntax.
//!
//! # Examples
//!
//! ```
//! use enwrap::{declare_errors, extra, wrap, ErrorCallback, ErrorTag};
//!
//! declare_errors! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum SignupError {
//!         /// The address is already registered.
//!         Taken => "taken",
//!         BadInput { field: String } => "bad-input",
//!     }
//! }
//!
//! assert_eq!(SignupError::Taken.message(), "taken");
//!
//! let signup = wrap(|err: ErrorCallback<SignupError>, email: &str| {
//!     if !email.contains('@') {
//!         return err.fail_with(SignupError::BadInput { field: "email".into() }, extra!({ "len": email.len() }));
//!     }
//!     Ok(email.to_owned())
//! });
//!
//! let failure = signup.call("nope").unwrap_err();
//! assert_eq!(failure.message(), "bad-input");
//! let data = failure.extra_data().unwrap();
//! assert_eq!(data.get("field").and_then(|v| v.as_str()), Some("email"));
//! assert_eq!(data.get("len").and_then(|v| v.as_u64()), Some(4));
//! ```
//!
//! An empty message can never be raised, so declaring one is rejected:
//!
//! ```rust,compile_fail
//! enwrap::declare_errors! {
//!     pub enum Broken {
//!         Nothing => "",
//!     }
//! }
//! ```
//!
//! A message identifies exactly one tag:
//!
//! ```rust,compile_fail
//! enwrap::declare_errors! {
//!     pub enum Broken {
//!         First => "dup",
//!         Second { id: u32 } => "dup",
//!     }
//! }
//! ```
//!
//! That includes the messages of embedded sets:
//!
//! ```rust,compile_fail
//! enwrap::declare_errors! {
//!     pub enum FetchError {
//!         Timeout { after_ms: u64 } => "timeout",
//!     }
//! }
//!
//! enwrap::declare_errors! {
//!     pub enum LoadError {
//!         Fetch(FetchError),
//!         Timeout => "timeout",
//!     }
//! }
//! ```

#[doc(hidden)]
pub use serde_json as __serde_json;

/// Declares an error set.
///
/// Three kinds of variants are accepted:
///
/// - `Name => "message"` - a plain tag;
/// - `Name { field: Type, .. } => "message"` - a tag whose fields become its extra
///   data (every field type must implement `serde::Serialize`);
/// - `Name(Other)` - embeds another declared set. Message and extra data are taken
///   from the inner tag, and `From<Other>` is implemented so inner failures can be
///   widened with [`TaggedError::widen`](crate::TaggedError::widen). The inner
///   messages must not collide with any other message of the set.
///
/// Attributes and doc comments on the enum and on variants are kept.
///
/// # Examples
///
/// ```
/// use enwrap::{declare_errors, ErrorTag};
///
/// declare_errors! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum DbError {
///         Unavailable => "db-unavailable",
///     }
/// }
///
/// declare_errors! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum UserError {
///         Db(DbError),
///         NotFound { id: u64 } => "user-not-found",
///     }
/// }
///
/// let wide = UserError::from(DbError::Unavailable);
/// assert_eq!(wide.message(), "db-unavailable");
///
/// let missing = UserError::NotFound { id: 9 };
/// assert_eq!(missing.extra_data().unwrap().get("id").and_then(|v| v.as_u64()), Some(9));
/// ```
#[macro_export]
macro_rules! declare_errors {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {}
    ) => {
        $(#[$meta])*
        $vis enum $name {}

        impl $crate::ErrorTag for $name {
            fn message(&self) -> &'static str {
                match *self {}
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($body:tt)+ }
    ) => {
        $crate::__declare_errors! {
            @munch
            head: [$(#[$meta])* $vis enum $name],
            name: $name,
            variants: [],
            messages: [],
            message_arms: [],
            extra_arms: [],
            forwards: [],
            rest: [$($body)+]
        }
    };
}

/// Internal muncher for [`declare_errors!`].
#[macro_export]
#[doc(hidden)]
macro_rules! __declare_errors {
    // Every variant consumed: emit the enum, its `ErrorTag` impl and the checks.
    // Forwarded sets contribute their messages, so a collision across them is rejected.
    (
        @munch
        head: [$($head:tt)*],
        name: $name:ident,
        variants: [$($variants:tt)*],
        messages: [$($messages:tt)*],
        message_arms: [$($message_arms:tt)*],
        extra_arms: [$($extra_arms:tt)*],
        forwards: [$(($fvariant:ident, $finner:ty))*],
        rest: []
    ) => {
        $($head)* {
            $($variants)*
        }

        impl $crate::ErrorTag for $name {
            const MESSAGES: &'static [&'static str] = &$crate::macros::__concat_messages::<
                {
                    $crate::macros::__count_messages(&[
                        &[$($messages)*] $(, <$finner as $crate::ErrorTag>::MESSAGES)*
                    ])
                },
            >(&[&[$($messages)*] $(, <$finner as $crate::ErrorTag>::MESSAGES)*]);

            fn message(&self) -> &'static str {
                match self {
                    $($message_arms)*
                }
            }

            fn extra_data(&self) -> ::core::option::Option<$crate::ExtraData> {
                match self {
                    $($extra_arms)*
                }
            }
        }

        const _: () = $crate::macros::__check_messages(<$name as $crate::ErrorTag>::MESSAGES);

        $(
            impl ::core::convert::From<$finner> for $name {
                #[inline]
                fn from(inner: $finner) -> Self {
                    $name::$fvariant(inner)
                }
            }
        )*
    };

    // `Name => "message"`
    (
        @munch
        head: [$($head:tt)*],
        name: $name:ident,
        variants: [$($variants:tt)*],
        messages: [$($messages:tt)*],
        message_arms: [$($message_arms:tt)*],
        extra_arms: [$($extra_arms:tt)*],
        forwards: [$($forwards:tt)*],
        rest: [
            $(#[$vmeta:meta])*
            $variant:ident => $msg:literal
            $(, $($rest:tt)*)?
        ]
    ) => {
        $crate::__declare_errors! {
            @munch
            head: [$($head)*],
            name: $name,
            variants: [$($variants)* $(#[$vmeta])* $variant,],
            messages: [$($messages)* $msg,],
            message_arms: [$($message_arms)* $name::$variant => $msg,],
            extra_arms: [$($extra_arms)* $name::$variant => ::core::option::Option::None,],
            forwards: [$($forwards)*],
            rest: [$($($rest)*)?]
        }
    };

    // `Name { field: Type } => "message"`
    (
        @munch
        head: [$($head:tt)*],
        name: $name:ident,
        variants: [$($variants:tt)*],
        messages: [$($messages:tt)*],
        message_arms: [$($message_arms:tt)*],
        extra_arms: [$($extra_arms:tt)*],
        forwards: [$($forwards:tt)*],
        rest: [
            $(#[$vmeta:meta])*
            $variant:ident { $($field:ident : $fty:ty),* $(,)? } => $msg:literal
            $(, $($rest:tt)*)?
        ]
    ) => {
        $crate::__declare_errors! {
            @munch
            head: [$($head)*],
            name: $name,
            variants: [$($variants)* $(#[$vmeta])* $variant { $($field: $fty),* },],
            messages: [$($messages)* $msg,],
            message_arms: [$($message_arms)* $name::$variant { .. } => $msg,],
            extra_arms: [
                $($extra_arms)*
                $name::$variant { $($field),* } => $crate::ExtraData::from_fields([
                    $((::core::stringify!($field), $crate::macros::__field_value($field))),*
                ]),
            ],
            forwards: [$($forwards)*],
            rest: [$($($rest)*)?]
        }
    };

    // `Name(Other)`
    (
        @munch
        head: [$($head:tt)*],
        name: $name:ident,
        variants: [$($variants:tt)*],
        messages: [$($messages:tt)*],
        message_arms: [$($message_arms:tt)*],
        extra_arms: [$($extra_arms:tt)*],
        forwards: [$($forwards:tt)*],
        rest: [
            $(#[$vmeta:meta])*
            $variant:ident ( $inner:ty )
            $(, $($rest:tt)*)?
        ]
    ) => {
        $crate::__declare_errors! {
            @munch
            head: [$($head)*],
            name: $name,
            variants: [$($variants)* $(#[$vmeta])* $variant($inner),],
            messages: [$($messages)*],
            message_arms: [$($message_arms)* $name::$variant(inner) => $crate::ErrorTag::message(inner),],
            extra_arms: [$($extra_arms)* $name::$variant(inner) => $crate::ErrorTag::extra_data(inner),],
            forwards: [$($forwards)* ($variant, $inner)],
            rest: [$($($rest)*)?]
        }
    };
}

/// Builds [`ExtraData`](crate::ExtraData) from JSON object syntax.
///
/// Accepts the same input as `serde_json::json!`. A non-object value is stored under
/// the key `"value"`.
///
/// # Examples
///
/// ```
/// use enwrap::extra;
///
/// let user_id = 42;
/// let data = extra!({ "user_id": user_id, "roles": ["admin"] });
/// assert_eq!(data.get("user_id").and_then(|v| v.as_i64()), Some(42));
/// assert_eq!(data.to_string(), r#"{"roles":["admin"],"user_id":42}"#);
/// ```
#[macro_export]
macro_rules! extra {
    ($($json:tt)+) => {
        $crate::ExtraData::from_json($crate::macros::__serde_json::json!($($json)+))
    };
}

#[doc(hidden)]
pub const fn __count_messages(parts: &[&[&str]]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < parts.len() {
        count += parts[i].len();
        i += 1;
    }
    count
}

/// Flattens the messages of a set and of its embedded sets, in declaration order.
#[doc(hidden)]
pub const fn __concat_messages<const N: usize>(parts: &[&[&'static str]]) -> [&'static str; N] {
    let mut out = [""; N];
    let mut n = 0;
    let mut i = 0;
    while i < parts.len() {
        let mut j = 0;
        while j < parts[i].len() {
            out[n] = parts[i][j];
            n += 1;
            j += 1;
        }
        i += 1;
    }
    out
}

/// Compile-time validation of declared messages.
#[doc(hidden)]
pub const fn __check_messages(messages: &[&str]) {
    let mut i = 0;
    while i < messages.len() {
        assert!(!messages[i].is_empty(), "declared error messages must not be empty");
        let mut j = i + 1;
        while j < messages.len() {
            assert!(!str_eq(messages[i], messages[j]), "declared error messages must be unique");
            j += 1;
        }
        i += 1;
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Converts a tag field to JSON. A field that cannot be represented (a map with
/// non-string keys, a failing `Serialize` impl) is kept as a marker string carrying
/// the serializer's error.
#[doc(hidden)]
pub fn __field_value<T>(value: &T) -> serde_json::Value
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_value(value)
        .unwrap_or_else(|err| serde_json::Value::String(format!("<unserializable: {err}>")))
}
