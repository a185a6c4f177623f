//! Message templates - positional `%v` substitution with typed arguments.
//!
//! Templates are ordinary strings with `%v` placeholders, filled
//! positionally from an ordered argument list. `%%` renders a literal `%`;
//! any other `%`-sequence passes through unchanged.
//!
//! # Mismatch Behavior
//!
//! Placeholder/argument-count mismatches are rendered best-effort rather
//! than failed hard, since `message()` runs at response-writing time:
//!
//! - A `%v` with no remaining argument renders as `%!v(MISSING)`.
//! - Surplus arguments are appended as ` %!(EXTRA a, b)`.
//!
//! Both markers are part of the contract and pinned by tests.
//!
//! # No-Argument Fast Path
//!
//! With an empty argument list the template is returned verbatim, borrowed,
//! placeholders included. A definition whose template contains literal `%v`
//! text renders unprocessed until arguments are bound.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

/// Marker rendered for a `%v` with no matching argument.
const MISSING_MARKER: &str = "%!v(MISSING)";

/// One bound template argument.
///
/// The argument list is typed rather than `dyn Display`, which keeps
/// definitions `Clone` + `Send` + `Sync` and makes the accepted value
/// shapes explicit at the API surface. `From` impls cover the scalar and
/// string types call sites actually pass.
///
/// # Example
///
/// ```rust
/// use gateway_errors::FormatArg;
///
/// assert_eq!(FormatArg::from("username").to_string(), "username");
/// assert_eq!(FormatArg::from(42).to_string(), "42");
/// assert_eq!(FormatArg::from(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Single character.
    Char(char),
    /// String, borrowed when 'static.
    Str(Cow<'static, str>),
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Uint(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Char(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
        }
    }
}

macro_rules! format_arg_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for FormatArg {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

format_arg_from!(Int: i8, i16, i32, i64);
format_arg_from!(Uint: u8, u16, u32, u64);
format_arg_from!(Float: f32, f64);
format_arg_from!(Bool: bool);
format_arg_from!(Char: char);
format_arg_from!(Str: &'static str, String, Cow<'static, str>);

impl From<isize> for FormatArg {
    #[inline]
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for FormatArg {
    #[inline]
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

/// Render `template`, substituting `%v` placeholders positionally from
/// `args`.
///
/// Returns borrowed input when `args` is empty; allocates otherwise.
pub(crate) fn render<'t>(template: &'t str, args: &[FormatArg]) -> Cow<'t, str> {
    if args.is_empty() {
        return Cow::Borrowed(template);
    }

    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next = 0usize;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        if let Some(after) = tail.strip_prefix('%') {
            out.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix('v') {
            match args.get(next) {
                Some(arg) => {
                    // Writing into a String cannot fail.
                    let _ = write!(out, "{}", arg);
                    next += 1;
                }
                None => out.push_str(MISSING_MARKER),
            }
            rest = after;
        } else {
            // Unrecognized verb, pass the '%' through untouched.
            out.push('%');
            rest = tail;
        }
    }
    out.push_str(rest);

    if next < args.len() {
        out.push_str(" %!(EXTRA ");
        for (i, arg) in args[next..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", arg);
        }
        out.push(')');
    }

    Cow::Owned(out)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[FormatArg]) -> Vec<FormatArg> {
        list.to_vec()
    }

    #[test]
    fn bare_placeholder_becomes_the_argument() {
        let rendered = render("%v", &args(&[FormatArg::from("username")]));
        assert_eq!(rendered, "username");
    }

    #[test]
    fn empty_args_return_template_verbatim() {
        let rendered = render("Invalid %v on line %v", &[]);
        assert_eq!(rendered, "Invalid %v on line %v");
        assert!(matches!(rendered, Cow::Borrowed(_)));
    }

    #[test]
    fn placeholders_fill_in_order() {
        let rendered = render(
            "Invalid %v on line %v",
            &args(&[FormatArg::from("username"), FormatArg::from(42)]),
        );
        assert_eq!(rendered, "Invalid username on line 42");
    }

    #[test]
    fn double_percent_is_literal() {
        let rendered = render("100%% of %v", &args(&[FormatArg::from("requests")]));
        assert_eq!(rendered, "100% of requests");
    }

    #[test]
    fn unrecognized_verbs_pass_through() {
        let rendered = render("%d and %v", &args(&[FormatArg::from(7)]));
        assert_eq!(rendered, "%d and 7");
    }

    #[test]
    fn trailing_percent_survives() {
        let rendered = render("ratio %v%", &args(&[FormatArg::from(99)]));
        assert_eq!(rendered, "ratio 99%");
    }

    #[test]
    fn missing_argument_renders_marker() {
        let rendered = render("Invalid %v at %v", &args(&[FormatArg::from("user")]));
        assert_eq!(rendered, "Invalid user at %!v(MISSING)");
    }

    #[test]
    fn extra_arguments_are_appended() {
        let rendered = render(
            "Invalid %v",
            &args(&[FormatArg::from("user"), FormatArg::from(1), FormatArg::from(2)]),
        );
        assert_eq!(rendered, "Invalid user %!(EXTRA 1, 2)");
    }

    #[test]
    fn scalar_conversions_display_plainly() {
        assert_eq!(FormatArg::from(-3i32).to_string(), "-3");
        assert_eq!(FormatArg::from(3usize).to_string(), "3");
        assert_eq!(FormatArg::from(2.5f64).to_string(), "2.5");
        assert_eq!(FormatArg::from('x').to_string(), "x");
        assert_eq!(FormatArg::from(String::from("owned")).to_string(), "owned");
    }

    #[test]
    fn unicode_templates_render_intact() {
        let rendered = render("ошибка: %v 🔥", &args(&[FormatArg::from("пользователь")]));
        assert_eq!(rendered, "ошибка: пользователь 🔥");
    }
}
