// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Command-line argument parsing that separates known options from
//! unknown ones.
//!
//! This crate is designed for CLI wrapper programs that need to intercept
//! some options while passing the others through to an underlying command.
//! It can also be used as a simple strict parser for standalone programs.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Examples](#examples)
//! * [Details](#details)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! There are two parsing functions:
//!
//! - [sift()] sets the known options and returns the unknown options
//!   ("remaining" arguments) and the positional arguments separately, so the
//!   unknown options can be forwarded to another command.
//!
//! - [parse()] is "strict mode": any unknown option is an error. Only the
//!   positional arguments are returned.
//!
//! Known options are those registered by a type implementing the [Options]
//! trait.
//!
//! # Quickstart
//!
//! 1. Create a `struct` type to hold the values of your options.
//!
//!    ```rust
//!    #[derive(Clone, Debug, Default)]
//!    struct MyOptions {
//!        config: String,
//!        verbose: bool,
//!    }
//!    ```
//!
//! 1. Implement the [Options] trait for the `struct`, adding a [Field] for
//!    each member that can be set from the command line.
//!
//!    As a minimum, each field needs either a short name (single character)
//!    or a long name. Names are specified without leading dashes.
//!
//!    ```rust
//!    # use argsieve::{Field, Fields, Options};
//!    #
//!    # #[derive(Clone, Debug, Default)]
//!    # struct MyOptions {
//!    #     config: String,
//!    #     verbose: bool,
//!    # }
//!    #
//!    impl Options for MyOptions {
//!        fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
//!            // Support "-c <value>", "--config <value>" and "--config=<value>".
//!            fields.add(Field::text(&mut self.config).short('c').long("config"));
//!
//!            // Support "-v" and "--verbose" flags.
//!            fields.add(Field::flag(&mut self.verbose).short('v').long("verbose"));
//!        }
//!    }
//!    ```
//!
//! 1. Call [sift()] (or [parse()]) with the command-line arguments. Use
//!    [get_args()] to obtain them without the program name.
//!
//!    ```rust
//!    # use argsieve::{Field, Fields, Options};
//!    #
//!    # #[derive(Clone, Debug, Default)]
//!    # struct MyOptions {
//!    #     config: String,
//!    #     verbose: bool,
//!    # }
//!    #
//!    # impl Options for MyOptions {
//!    #     fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
//!    #         fields.add(Field::text(&mut self.config).short('c').long("config"));
//!    #         fields.add(Field::flag(&mut self.verbose).short('v').long("verbose"));
//!    #     }
//!    # }
//!    #
//!    # fn main() -> argsieve::Result<()> {
//!    let mut opts = MyOptions::default();
//!
//!    let args = ["-v", "--config", "app.yaml", "file1.txt", "file2.txt"];
//!
//!    let sifted = argsieve::sift(&mut opts, &args, &[], None)?;
//!
//!    assert_eq!(opts.config, "app.yaml");
//!    assert!(opts.verbose);
//!    assert!(sifted.remaining.is_empty());
//!    assert_eq!(sifted.positional, vec!["file1.txt", "file2.txt"]);
//!    # Ok(())
//!    # }
//!    ```
//!
//! # Examples
//!
//! A wrapper that handles `-d` itself and forwards everything else. The
//! unknown options `-L` and `--unknown` take a value, so they are listed as
//! passthrough options to keep their values with them:
//!
//! ```rust
//! use argsieve::{Field, Fields, Options};
//!
//! #[derive(Debug, Default)]
//! struct WrapperOptions {
//!     debug: bool,
//! }
//!
//! impl Options for WrapperOptions {
//!     fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
//!         fields.add(Field::flag(&mut self.debug).short('d').long("debug"));
//!     }
//! }
//!
//! fn main() -> argsieve::Result<()> {
//!     let mut opts = WrapperOptions::default();
//!
//!     let args = ["-d", "-L", "8080:localhost:80", "--unknown", "value", "target"];
//!
//!     let sifted = argsieve::sift(&mut opts, &args, &["-L", "--unknown"], None)?;
//!
//!     assert!(opts.debug);
//!     assert_eq!(sifted.remaining, vec!["-L", "8080:localhost:80", "--unknown", "value"]);
//!     assert_eq!(sifted.positional, vec!["target"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! A custom option type, decoded with the [DecodeText] trait:
//!
//! ```rust
//! use argsieve::{DecodeError, DecodeText, Field, Fields, Options};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct LogLevel(String);
//!
//! impl DecodeText for LogLevel {
//!     fn decode_text(&mut self, text: &str) -> Result<(), DecodeError> {
//!         match text {
//!             "info" | "debug" | "error" => self.0 = text.into(),
//!             _ => return Err(format!("unknown log level: {:?}", text).into()),
//!         }
//!
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct MyOptions {
//!     level: LogLevel,
//!     verbose: bool,
//! }
//!
//! impl Options for MyOptions {
//!     fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
//!         fields.add(Field::value(&mut self.level).short('l').long("level"));
//!         fields.add(Field::flag(&mut self.verbose).short('v'));
//!     }
//! }
//!
//! let mut opts = MyOptions::default();
//!
//! assert!(argsieve::parse(&mut opts, &["-v", "--level", "debug"], None).is_ok());
//! assert_eq!(opts.level, LogLevel("debug".into()));
//!
//! let err = argsieve::parse(&mut opts, &["-lloud"], None).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "argument parsing error: invalid value for -l: unknown log level: \"loud\""
//! );
//! ```
//!
//! For further examples, try out the programs in the `demos/` directory:
//!
//! ```bash
//! $ cargo run --example wrapper -- -d --region eu-west-1 -L 8080:localhost:80 ssh host
//! $ cargo run --example strict -- -f --output result.txt -- input.txt
//! $ cargo run --example custom-type -- --level debug --timeout 30s
//! ```
//!
//! # Details
//!
//! ## Supported option formats
//!
//! - Short options: `-v`, `-r value`, `-rvalue`, `-vdr value` (bundled
//!   flags, where only the last option in the bundle may take a value).
//! - Long options: `--verbose`, `--region value`, `--region=value`.
//! - `--` ends option parsing: all arguments that follow are positional
//!   (even if they start with `-`!). The `--` itself is not returned.
//! - A lone `-` is a positional argument.
//!
//! Option values are taken verbatim, so a value may start with a dash
//! (`-c -v` sets `c` to `-v`). This is how `getopt(3)` behaves.
//!
//! ## Supported field types
//!
//! | Constructor          | Field type                     | Behaviour |
//! |----------------------|--------------------------------|-----------|
//! | [Field::flag()]      | `bool`                         | Set to `true` when specified (no value). |
//! | [Field::text()]      | `String`                       | Value stored verbatim. |
//! | [Field::value()]     | `T: DecodeText`                | Value decoded by [DecodeText::decode_text()]. |
//! | [Field::optional()]  | `Option<T>`, `T: DecodeText + Default` | `None` until specified, then `Some` if decoding succeeds. |
//!
//! If an option is specified more than once, the last value wins.
//!
//! ## Unknown options
//!
//! With [sift()], unknown options are returned in [Sifted::remaining] in
//! the order they were found, spelled exactly as specified:
//!
//! - An unknown option listed in the `passthrough` slice takes the
//!   following argument as its value (unless the value was attached, as in
//!   `--name=value` or `-xvalue`).
//! - Any other unknown option is returned on its own; an argument following
//!   it is treated normally.
//!
//! With [parse()], an unknown option is an [Error::UnknownOption].
//!
//! ## Settings
//!
//! Both functions accept an optional [Config]:
//!
//! - [Config::require_positional_delimiter()]: positional arguments must
//!   follow `--`.
//! - [Config::stop_at_first_positional()]: the first positional argument
//!   ends option parsing. Any `--` after that argument is returned as a
//!   positional argument.
//!
//! ## Errors
//!
//! Parsing stops at the first error. Every error returned is an [Error],
//! which can be checked with [Error::is_parse()] or by downcasting a boxed
//! error. No partial results are returned on error, although options set
//! before the error was found keep their values.
//!
//! Registering a long name containing `=` (such as `.long("name=value")`)
//! is a programming error and panics, since it can never be matched.
//!
//! # Limitations
//!
//! - Option names cannot be abbreviated (`--verb` does not match
//!   `--verbose`).
//! - No help or usage text is generated.
//! - Options cannot accept multiple values.
//! - Options with optional values are not supported.
//! - An unknown short option in a bundle ends the bundle:
//!
//!   **Example:** if `-x` is unknown and not a passthrough option, `-xvd`
//!   returns `-x` as remaining and `v` and `d` are ignored.

mod error;
mod fields;
mod sieve;
mod value;

pub use error::{DecodeError, Error, Result};
pub use fields::{Field, Fields, Options};
pub use sieve::{get_args, parse, sift, Config, Sifted};
pub use value::{DecodeText, Need};
