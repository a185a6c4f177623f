//! # Gateway Errors
//!
//! Registry-backed error codes for service boundaries.
//!
//! ## Design Philosophy
//!
//! 1. **Codes are allocated once** - a process-wide registry rejects
//!    duplicates at startup, when the mistake is cheap to fix
//! 2. **Definitions are values** - a definition carries its code, an
//!    HTTP-equivalent status, and a message template; binding arguments
//!    copies, never mutates
//! 3. **Propagation stays idiomatic** - layers wrap failures with context
//!    through the standard `source()` chain
//! 4. **The boundary recovers structure** - a bounded chain walk hands the
//!    response writer back the code, status, and rendered message
//!
//! ## Quick Start
//!
//! ```rust
//! use gateway_errors::{define_error_codes, resolve_coded, Wrapped};
//!
//! define_error_codes! {
//!     INVALID_FIELD = (4, 400, "Invalid %v"),
//! }
//!
//! fn find_user(name: &str) -> Result<(), Wrapped> {
//!     // The repository layer binds arguments and adds its context.
//!     Err(Wrapped::new("repo", INVALID_FIELD.with_arg(name.to_string())))
//! }
//!
//! fn handle_request() -> (u16, String) {
//!     match find_user("username").map_err(|e| Wrapped::new("service", e)) {
//!         Ok(()) => (200, String::from("ok")),
//!         Err(err) => match resolve_coded(&err) {
//!             // Structured error found: answer with its status and message.
//!             Some(coded) => (coded.status_code(), coded.message().into_owned()),
//!             // Plain failure: generic response, chain stays internal.
//!             None => (500, String::from("internal error")),
//!         },
//!     }
//! }
//!
//! assert_eq!(handle_request(), (400, String::from("Invalid username")));
//! ```
//!
//! ## Consuming Pattern
//!
//! Applications declare a fixed table of definitions at startup
//! ([`define_error_codes!`]), force and [`seal`] the registry before
//! serving traffic, wrap failures on the way up ([`Wrapped`]), and call
//! [`resolve`] / [`resolve_coded`] exactly once at the outermost layer.
//! Wrapping context is diagnostics; only the coded error's status and
//! message are meant for clients.
//!
//! ## Concurrency
//!
//! Registration is expected during single-threaded startup; the registry
//! `Mutex` makes stray late registrations defined (and, after sealing,
//! failed) rather than racy. Definitions are immutable after construction
//! and safe to share across threads; [`Error::with_args`] produces new
//! values instead of mutating shared ones.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::fmt;
use std::result;

use smallvec::SmallVec;

pub mod chain;
pub mod convenience;
pub mod registry;
pub mod template;

pub use chain::{resolve, resolve_coded, Wrapped, MAX_CHAIN_DEPTH};
pub use registry::{seal, CodeRegistry, RegistryError};
pub use template::FormatArg;

/// Type alias for Results carrying a coded [`Error`].
pub type Result<T> = result::Result<T, Error>;

// ============================================================================
// Coded Error Value
// ============================================================================

/// A structured error: unique code, HTTP-equivalent status code, message
/// template, and bound arguments.
///
/// Definitions are created once (claiming their code in a registry) and
/// then treated as immutable; call sites derive concrete instances with
/// [`with_arg`](Self::with_arg) / [`with_args`](Self::with_args), which
/// copy and extend without touching the receiver. The type implements
/// [`std::error::Error`], so instances drop into any error chain and come
/// back out through [`resolve_coded`].
///
/// # Construction Tiers
///
/// - [`Error::new`] - process registry, panics on duplicate/sealed.
///   Registration failures are configuration mistakes; aborting at startup
///   is the contract.
/// - [`Error::try_new`] - process registry, returns `Result`.
/// - [`Error::new_in`] - caller-owned [`CodeRegistry`], returns `Result`.
///
/// # Example
///
/// ```rust
/// use gateway_errors::Error;
///
/// let err = Error::new(3, 400, "Invalid %v").with_arg("username");
/// assert_eq!(err.code(), 3);
/// assert_eq!(err.status_code(), 400);
/// assert_eq!(err.message(), "Invalid username");
/// assert_eq!(err.to_string(), "3 - Invalid username");
/// ```
#[must_use = "errors should be handled or returned"]
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: u32,
    status_code: u16,
    template: Cow<'static, str>,
    args: SmallVec<[FormatArg; 2]>,
}

impl Error {
    /// Create a definition against the process-wide registry.
    ///
    /// # Panics
    ///
    /// Panics if `code` is already registered, or if the registry has been
    /// [`seal`]ed. Both indicate a configuration mistake that must surface
    /// at startup, not a runtime condition.
    pub fn new(code: u32, status_code: u16, template: impl Into<Cow<'static, str>>) -> Self {
        match Self::try_new(code, status_code, template) {
            Ok(err) => err,
            Err(reg_err) => panic!("gateway_errors: {}", reg_err),
        }
    }

    /// Create a definition against the process-wide registry, without
    /// panicking.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCode`] or [`RegistryError::Sealed`].
    pub fn try_new(
        code: u32,
        status_code: u16,
        template: impl Into<Cow<'static, str>>,
    ) -> result::Result<Self, RegistryError> {
        registry::with_process_registry(|reg| Self::new_in(reg, code, status_code, template))
    }

    /// Create a definition against a caller-owned registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCode`] or [`RegistryError::Sealed`].
    pub fn new_in(
        registry: &mut CodeRegistry,
        code: u32,
        status_code: u16,
        template: impl Into<Cow<'static, str>>,
    ) -> result::Result<Self, RegistryError> {
        registry.register(code)?;
        Ok(Self {
            code,
            status_code,
            template: template.into(),
            args: SmallVec::new(),
        })
    }

    /// The globally unique numeric code.
    #[inline]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// The HTTP-equivalent status code. Stored verbatim; neither validated
    /// nor unique.
    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The raw message template, placeholders intact.
    #[inline]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The arguments bound so far, in binding order.
    #[inline]
    pub fn args(&self) -> &[FormatArg] {
        &self.args
    }

    /// The rendered message.
    ///
    /// With no bound arguments the template is returned verbatim (borrowed,
    /// placeholders untouched); otherwise `%v` placeholders are substituted
    /// positionally. See [`template`](crate::template) for the mismatch
    /// behavior.
    #[inline]
    pub fn message(&self) -> Cow<'_, str> {
        template::render(&self.template, &self.args)
    }

    /// Return a copy of this definition with `arg` appended to its
    /// argument sequence. The receiver is unchanged.
    pub fn with_arg(&self, arg: impl Into<FormatArg>) -> Self {
        let mut derived = self.clone();
        derived.args.push(arg.into());
        derived
    }

    /// Return a copy of this definition with `args` appended to its
    /// argument sequence - appended, not replaced, so layers can bind
    /// incrementally. The receiver is unchanged.
    ///
    /// Use the [`args!`](crate::args) macro for mixed-type lists.
    pub fn with_args<I>(&self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FormatArg>,
    {
        let mut derived = self.clone();
        derived.args.extend(args.into_iter().map(Into::into));
        derived
    }
}

impl fmt::Display for Error {
    /// Formats as `"<code> - <message>"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.message())
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Test Support
// ============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicU32, Ordering};

    // High range keeps generated codes clear of the literal codes unit
    // tests register against the process registry.
    static NEXT_CODE: AtomicU32 = AtomicU32::new(0x4000_0000);

    /// A code no other test in this binary has claimed.
    pub(crate) fn unique_code() -> u32 {
        NEXT_CODE.fetch_add(1, Ordering::Relaxed)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::test_support::unique_code;

    #[test]
    fn display_pairs_code_and_message() {
        let mut registry = CodeRegistry::new();
        let err = Error::new_in(&mut registry, 4, 400, "Invalid %v").unwrap();

        assert_eq!(err.to_string(), "4 - Invalid %v");
        assert_eq!(
            err.with_arg("username").to_string(),
            "4 - Invalid username"
        );
    }

    #[test]
    fn accessors_return_stored_fields() {
        let mut registry = CodeRegistry::new();
        let err = Error::new_in(&mut registry, 21, 404, "No such %v").unwrap();

        assert_eq!(err.code(), 21);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.template(), "No such %v");
        assert!(err.args().is_empty());
    }

    #[test]
    fn message_without_args_is_borrowed_template() {
        let mut registry = CodeRegistry::new();
        let err = Error::new_in(&mut registry, 1, 500, "literal %v stays").unwrap();

        let message = err.message();
        assert_eq!(message, "literal %v stays");
        assert!(matches!(message, Cow::Borrowed(_)));
    }

    #[test]
    fn with_arg_does_not_mutate_the_receiver() {
        let mut registry = CodeRegistry::new();
        let base = Error::new_in(&mut registry, 2, 400, "Invalid %v").unwrap();

        let first = base.with_arg("username");
        let second = base.with_arg("password");

        assert_eq!(base.message(), "Invalid %v");
        assert_eq!(first.message(), "Invalid username");
        assert_eq!(second.message(), "Invalid password");
    }

    #[test]
    fn with_args_appends_across_layers() {
        let mut registry = CodeRegistry::new();
        let base = Error::new_in(&mut registry, 3, 400, "Invalid %v in %v").unwrap();

        // One layer binds the field, a later layer binds the location.
        let partial = base.with_arg("username");
        let full = partial.with_args(["login form"]);

        assert_eq!(partial.message(), "Invalid username in %!v(MISSING)");
        assert_eq!(full.message(), "Invalid username in login form");
        assert_eq!(full.args().len(), 2);
    }

    #[test]
    fn derived_copies_share_code_and_status() {
        let mut registry = CodeRegistry::new();
        let base = Error::new_in(&mut registry, 5, 403, "Denied %v").unwrap();
        let bound = base.with_arg("root");

        assert_eq!(bound.code(), base.code());
        assert_eq!(bound.status_code(), base.status_code());
        // Deriving claims no new registry entry.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn process_registry_accepts_distinct_codes() {
        let a = Error::try_new(unique_code(), 500, "a").unwrap();
        let b = Error::try_new(unique_code(), 500, "b").unwrap();
        assert_ne!(a.code(), b.code());
    }

    #[test]
    fn process_registry_rejects_duplicates() {
        let code = unique_code();
        let _first = Error::try_new(code, 500, "first").unwrap();

        let second = Error::try_new(code, 400, "second");
        assert_eq!(second.unwrap_err(), RegistryError::DuplicateCode { code });
    }

    #[test]
    #[should_panic(expected = "duplicate error code")]
    fn panicking_constructor_aborts_on_duplicate() {
        let code = unique_code();
        let _first = Error::new(code, 500, "first");
        let _second = Error::new(code, 400, "second");
    }

    #[test]
    fn coded_errors_work_as_std_errors() {
        let mut registry = CodeRegistry::new();
        let err = Error::new_in(&mut registry, 6, 502, "upstream %v down").unwrap();
        let boxed: Box<dyn std::error::Error> = Box::new(err.with_arg("billing"));

        assert_eq!(boxed.to_string(), "6 - upstream billing down");
        assert!(boxed.source().is_none());
    }
}
