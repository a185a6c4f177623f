//! Code registry - enforces process-wide uniqueness of error codes.
//!
//! Every [`Error`](crate::Error) constructed through the crate claims its
//! numeric code here first. A code can be claimed exactly once for the
//! lifetime of the registry; a second claim is a configuration mistake, not
//! a runtime condition, and the panicking constructors treat it as fatal.
//!
//! # Registration Contract
//!
//! 1. All registration happens during application startup, before request
//!    handling begins.
//! 2. After startup, call [`seal`] (or [`CodeRegistry::seal`] on an owned
//!    registry). Any later `register` call fails with
//!    [`RegistryError::Sealed`], turning "please don't register at runtime"
//!    from a comment into an enforced contract.
//! 3. The process-wide registry sits behind a `Mutex`, so even unsealed
//!    concurrent registration is defined behavior rather than a race.
//!
//! # Owned vs Process-Wide
//!
//! [`CodeRegistry`] is an ordinary value with no hidden state. Libraries and
//! tests can own one and construct definitions against it via
//! [`Error::new_in`](crate::Error::new_in); applications that want the
//! package-level-static consuming pattern use the process-wide registry
//! through [`Error::new`](crate::Error::new) / [`Error::try_new`](crate::Error::try_new).

use std::collections::HashSet;
use std::fmt;
use std::sync::{LazyLock, Mutex, PoisonError};

// ============================================================================
// Registry Errors
// ============================================================================

/// Registration failure.
///
/// `DuplicateCode` indicates two definitions claimed the same code;
/// `Sealed` indicates a registration attempt after the startup barrier.
/// Both are configuration-time failures: the panicking construction tier
/// aborts on them, the checked tier surfaces them for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The code is already claimed by an earlier definition.
    DuplicateCode {
        /// The contested code.
        code: u32,
    },
    /// The registry was sealed before this registration attempt.
    Sealed {
        /// The code that was being registered.
        code: u32,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCode { code } => {
                write!(f, "duplicate error code {}", code)
            }
            Self::Sealed { code } => {
                write!(f, "registry sealed, cannot register error code {}", code)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

// ============================================================================
// Code Registry
// ============================================================================

/// Set of error codes already claimed, plus the startup seal.
///
/// The registry only grows: there is no removal, and no public
/// query-by-code beyond the membership check `register` performs
/// internally. Definitions live for the registry's lifetime.
///
/// # Example
///
/// ```rust
/// use gateway_errors::{CodeRegistry, Error};
///
/// let mut registry = CodeRegistry::new();
/// let not_found = Error::new_in(&mut registry, 40, 404, "No such %v").unwrap();
///
/// // The same code cannot be claimed twice.
/// assert!(Error::new_in(&mut registry, 40, 410, "Gone").is_err());
///
/// registry.seal();
/// assert!(Error::new_in(&mut registry, 41, 500, "Oops").is_err());
/// # let _ = not_found;
/// ```
#[derive(Debug, Default)]
pub struct CodeRegistry {
    codes: HashSet<u32>,
    sealed: bool,
}

impl CodeRegistry {
    /// Create an empty, unsealed registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            codes: HashSet::new(),
            sealed: false,
        }
    }

    /// Claim `code`, failing if it is already claimed or the registry is
    /// sealed.
    pub fn register(&mut self, code: u32) -> Result<(), RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed { code });
        }
        if !self.codes.insert(code) {
            return Err(RegistryError::DuplicateCode { code });
        }
        Ok(())
    }

    /// Close the registry. Every subsequent `register` fails with
    /// [`RegistryError::Sealed`].
    ///
    /// Sealing is idempotent and cannot be undone.
    #[inline]
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the registry has been sealed.
    #[inline]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of codes claimed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no codes have been claimed yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, code: u32) -> bool {
        self.codes.contains(&code)
    }
}

// ============================================================================
// Process-Wide Registry
// ============================================================================

static PROCESS_REGISTRY: LazyLock<Mutex<CodeRegistry>> =
    LazyLock::new(|| Mutex::new(CodeRegistry::new()));

/// Run `f` against the process-wide registry.
///
/// A poisoned lock is recovered rather than propagated: the registry's
/// invariants hold across panics (insert-or-fail leaves no partial state).
pub(crate) fn with_process_registry<R>(f: impl FnOnce(&mut CodeRegistry) -> R) -> R {
    let mut guard = PROCESS_REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Seal the process-wide registry.
///
/// Call once at the end of application startup, after every
/// [`Error::new`](crate::Error::new) table has been built (force any
/// `LazyLock` definitions first, see
/// [`define_error_codes!`](crate::define_error_codes)). From then on,
/// [`Error::try_new`](crate::Error::try_new) returns
/// [`RegistryError::Sealed`] and [`Error::new`](crate::Error::new) panics.
pub fn seal() {
    with_process_registry(CodeRegistry::seal);
}

// ============================================================================
// Tests
// ============================================================================
