//! Convenience macros for the startup definition table.
//!
//! Applications consume this crate by declaring a fixed table of
//! `(code, status, template)` triples once, at package level, then reusing
//! those definitions from request-handling code. [`define_error_codes!`]
//! generates that table as `LazyLock` statics; [`args!`] builds the
//! heterogeneous argument lists [`with_args`](crate::Error::with_args)
//! consumes.

/// Define a table of error definitions as `pub static` items.
///
/// Each entry expands to a `std::sync::LazyLock<Error>` constructed with
/// [`Error::new`](crate::Error::new), so a duplicate code panics with the
/// registry's message at first touch of the definition.
///
/// Registration happens lazily on first dereference. To keep duplicate
/// detection at startup (and to register everything before
/// [`seal`](crate::seal)), force each definition during initialization:
/// `LazyLock::force(&NOT_FOUND);`.
///
/// # Example
///
/// ```rust
/// use gateway_errors::define_error_codes;
///
/// define_error_codes! {
///     USER_NOT_FOUND   = (100, 404, "No such user %v"),
///     USER_SUSPENDED   = (101, 403, "User %v is suspended"),
///     UPSTREAM_TIMEOUT = (102, 504, "Upstream timed out"),
/// }
///
/// assert_eq!(USER_NOT_FOUND.status_code(), 404);
/// assert_eq!(USER_SUSPENDED.with_arg("ada").to_string(), "101 - User ada is suspended");
/// ```
#[macro_export]
macro_rules! define_error_codes {
    ($( $(#[$meta:meta])* $name:ident = ($code:expr, $status:expr, $template:expr) ),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub static $name: ::std::sync::LazyLock<$crate::Error> =
                ::std::sync::LazyLock::new(|| $crate::Error::new($code, $status, $template));
        )+
    };
}

/// Build a `[FormatArg; N]` list from mixed-type expressions.
///
/// # Example
///
/// ```rust
/// use gateway_errors::{args, CodeRegistry, Error};
///
/// let mut registry = CodeRegistry::new();
/// let err = Error::new_in(&mut registry, 7, 400, "Invalid %v on line %v").unwrap();
///
/// let bound = err.with_args(args!["username", 42]);
/// assert_eq!(bound.message(), "Invalid username on line 42");
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$( $crate::FormatArg::from($arg) ),*]
    };
}
