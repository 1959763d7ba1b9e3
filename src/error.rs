// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

/// The error type.
///
/// Every value of this type is an argument parsing error: callers that
/// need to know "was this a parse error?" only need to check the type
/// (for example with `downcast_ref::<argsieve::Error>()` on a boxed error).
///
/// Programmer errors (badly registered fields) are not represented here:
/// they panic while the name table is being built.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// User specified an option that was not registered (strict mode only).
    ///
    /// The value is the option spelling including the leading dashes.
    #[error("argument parsing error: unknown option {0}")]
    UnknownOption(String),

    /// An option that requires a value was the last argument.
    #[error("argument parsing error: missing value for {0}")]
    MissingValue(String),

    /// The value given for an option could not be decoded.
    #[error("argument parsing error: invalid value for {flag}: {cause}")]
    InvalidValue {
        /// Option spelling including the leading dashes.
        flag: String,
        /// Display text of the decode failure, unmodified.
        cause: String,
    },

    /// A positional argument appeared before the `--` delimiter when
    /// [Config::require_positional_delimiter()](crate::Config::require_positional_delimiter)
    /// is set.
    #[error("argument parsing error: positional argument {0:?} not allowed before \"--\" delimiter")]
    PositionalBeforeDelimiter(String),
}

impl Error {
    /// Always `true`: every [Error] is an argument parsing error.
    ///
    /// Provided for callers that prefer an explicit predicate to matching
    /// on the type.
    pub fn is_parse(&self) -> bool {
        true
    }

    /// The option spelling the error refers to, if any.
    ///
    /// ```rust
    /// # struct NoOptions;
    /// # impl argsieve::Options for NoOptions {
    /// #     fn register<'a>(&'a mut self, _fields: &mut argsieve::Fields<'a>) {}
    /// # }
    /// let err = argsieve::parse(&mut NoOptions, &["--force"], None).unwrap_err();
    /// assert_eq!(err.flag(), Some("--force"));
    ///
    /// let err = argsieve::parse(&mut NoOptions, &["-f"], None).unwrap_err();
    /// assert_eq!(err.flag(), Some("-f"));
    /// ```
    pub fn flag(&self) -> Option<&str> {
        match self {
            Error::UnknownOption(flag) | Error::MissingValue(flag) => Some(flag.as_str()),
            Error::InvalidValue { flag, .. } => Some(flag.as_str()),
            Error::PositionalBeforeDelimiter(_) => None,
        }
    }
}

/// Failure returned by a [DecodeText](crate::DecodeText) implementation.
///
/// Anything convertible into a boxed error works, including plain strings:
///
/// ```rust
/// # use argsieve::DecodeError;
/// let err: DecodeError = "bad value".into();
/// assert_eq!(err.to_string(), "bad value");
/// ```
pub type DecodeError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        #[derive(Debug)]
        struct TestData {
            error: Error,
            display: &'static str,
        }

        let tests = &[
            TestData {
                error: Error::UnknownOption("--unknown-flag".into()),
                display: "argument parsing error: unknown option --unknown-flag",
            },
            TestData {
                error: Error::MissingValue("-c".into()),
                display: "argument parsing error: missing value for -c",
            },
            TestData {
                error: Error::InvalidValue {
                    flag: "--level".into(),
                    cause: "unknown log level: \"loud\"".into(),
                },
                display: "argument parsing error: invalid value for --level: unknown log level: \"loud\"",
            },
            TestData {
                error: Error::PositionalBeforeDelimiter("file".into()),
                display: "argument parsing error: positional argument \"file\" not allowed before \"--\" delimiter",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(d.error.to_string(), d.display, "{}", msg);
            assert!(d.error.is_parse(), "{}", msg);
        }
    }

    #[test]
    fn test_error_flag() {
        assert_eq!(Error::UnknownOption("-x".into()).flag(), Some("-x"));
        assert_eq!(Error::MissingValue("--config".into()).flag(), Some("--config"));
        assert_eq!(
            Error::InvalidValue {
                flag: "-l".into(),
                cause: "nope".into()
            }
            .flag(),
            Some("-l")
        );
        assert_eq!(Error::PositionalBeforeDelimiter("a".into()).flag(), None);
    }

    #[test]
    fn test_boxed_error_downcast() {
        let boxed: Box<dyn std::error::Error> = Box::new(Error::MissingValue("-c".into()));

        let err = boxed.downcast_ref::<Error>();
        assert!(err.is_some());
        assert!(err.map(Error::is_parse).unwrap_or(false));

        let other: Box<dyn std::error::Error> = "something else".into();
        assert!(other.downcast_ref::<Error>().is_none());
    }
}
