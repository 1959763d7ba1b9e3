// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::HashSet;
use std::env;

use log::{debug, trace};

use crate::error::{DecodeError, Error, Result};
use crate::fields::{Fields, Options};
use crate::value::Need;

const OPT_PREFIX: char = '-';

/// Special argument that is silently consumed and used to denote the end of
/// all options; all arguments that follow are considered to be positional
/// arguments (even if they start with `-`!)
///
/// See: `getopt(3)`.
const END_OF_OPTIONS: &str = "--";
const LONG_OPT_PREFIX: &str = END_OF_OPTIONS;

/// Separates a long option name from an inline value (`--name=value`).
const LONG_OPT_VALUE_SEPARATOR: char = '=';

/// Settings used to control the parsers behaviour.
///
/// Pass `None` to [sift()] or [parse()] to use the defaults (all settings
/// disabled).
#[derive(Clone, Copy, Debug, Eq, Ord, PartialOrd, Default, PartialEq)]
pub struct Config {
    /// If set, positional arguments must appear after the `--` delimiter.
    require_positional_delimiter: bool,

    /// If set, the first positional argument ends option parsing.
    stop_at_first_positional: bool,
}

impl Config {
    /// Create a new settings object.
    pub fn new() -> Self {
        Config::default()
    }

    /// Require all positional arguments to be specified after the `--`
    /// delimiter. A positional argument found before `--` is an error
    /// ([Error::PositionalBeforeDelimiter]).
    ///
    /// # Example
    ///
    /// ```text
    /// -v filename      # error: positional before "--"
    /// -v -- filename   # OK: positional after delimiter
    /// ```
    pub fn require_positional_delimiter(self) -> Self {
        Config {
            require_positional_delimiter: true,
            ..self
        }
    }

    /// Stop parsing options at the first positional argument: it, and all
    /// arguments that follow it, are returned as positional arguments even
    /// if they look like options.
    ///
    /// This is useful for wrappers of the form `wrapper [FLAGS] command
    /// [ARGS..]` where the flags after `command` belong to that command.
    pub fn stop_at_first_positional(self) -> Self {
        Config {
            stop_at_first_positional: true,
            ..self
        }
    }
}

/// The output of [sift()].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sifted {
    /// Unknown options (and, for passthrough options, their values) in the
    /// order they were specified.
    pub remaining: Vec<String>,

    /// Positional (non-option) arguments in the order they were specified.
    /// The `--` delimiter is never included, but once
    /// [Config::stop_at_first_positional()] has ended option parsing, a
    /// later `--` is an ordinary positional argument.
    pub positional: Vec<String>,
}

/// Get a list of all command-line arguments specified to the program with
/// the program name (the first argument) removed.
///
/// # Note
///
/// Suitable for passing to [sift()] or [parse()].
pub fn get_args() -> Vec<String> {
    env::args().skip(1).collect()
}

/// Extract known options from `args` into `target`, returning unknown
/// options and positional arguments separately.
///
/// This is the function to use for CLI wrapper programs: options
/// registered by `target` are handled, everything else is returned in
/// [Sifted::remaining] so it can be forwarded to another command.
///
/// # Arguments
///
/// - `target`: The options to set.
/// - `args`: The command-line arguments (without the program name).
/// - `passthrough`: Unknown options that consume a value, specified with
///   their leading dashes (for example `"-x"` or `"--unknown"`). Without
///   this hint, the value of an unknown option would be treated as a
///   positional argument.
/// - `config`: Optional settings.
///
/// # Example
///
/// ```rust
/// use argsieve::{Field, Fields, Options};
///
/// #[derive(Debug, Default)]
/// struct MyOptions {
///     config: String,
/// }
///
/// impl Options for MyOptions {
///     fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
///         fields.add(Field::text(&mut self.config).short('c').long("config"));
///     }
/// }
///
/// let mut opts = MyOptions::default();
/// let args = ["-c", "app.yaml", "-x", "extra-value", "target"];
///
/// // -x takes a value, so list it as a passthrough option
/// let sifted = argsieve::sift(&mut opts, &args, &["-x"], None).unwrap();
///
/// assert_eq!(opts.config, "app.yaml");
/// assert_eq!(sifted.remaining, vec!["-x", "extra-value"]);
/// assert_eq!(sifted.positional, vec!["target"]);
/// ```
pub fn sift<O, S>(
    target: &mut O,
    args: &[S],
    passthrough: &[&str],
    config: Option<Config>,
) -> Result<Sifted>
where
    O: Options + ?Sized,
    S: AsRef<str>,
{
    let mut sieve = Sieve::new(Fields::from_options(target), config.unwrap_or_default());

    sieve.passthrough = passthrough.iter().map(|p| p.to_string()).collect();

    sieve.run(args)
}

/// Parse `args` into `target` in strict mode, returning only the
/// positional arguments.
///
/// Unlike [sift()], any unknown option is an error
/// ([Error::UnknownOption]). Use this for standalone programs where all
/// options are known.
///
/// # Example
///
/// ```rust
/// use argsieve::{Error, Field, Fields, Options};
///
/// #[derive(Debug, Default)]
/// struct MyOptions {
///     output: String,
///     force: bool,
/// }
///
/// impl Options for MyOptions {
///     fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
///         fields.add(Field::text(&mut self.output).short('o').long("output"));
///         fields.add(Field::flag(&mut self.force).short('f').long("force"));
///     }
/// }
///
/// let mut opts = MyOptions::default();
///
/// let files = argsieve::parse(&mut opts, &["-f", "--output", "result.txt", "input.txt"], None);
/// assert_eq!(files, Ok(vec!["input.txt".to_string()]));
/// assert_eq!(opts.output, "result.txt");
/// assert!(opts.force);
///
/// let result = argsieve::parse(&mut opts, &["--unknown-flag"], None);
/// assert_eq!(result, Err(Error::UnknownOption("--unknown-flag".into())));
/// ```
pub fn parse<O, S>(target: &mut O, args: &[S], config: Option<Config>) -> Result<Vec<String>>
where
    O: Options + ?Sized,
    S: AsRef<str>,
{
    let mut sieve = Sieve::new(Fields::from_options(target), config.unwrap_or_default());

    sieve.strict = true;

    sieve.run(args).map(|sifted| sifted.positional)
}

/// Scan state for a single call to [sift()] or [parse()].
#[derive(Debug)]
struct Sieve<'a> {
    fields: Fields<'a>,

    /// Unknown options that consume a value (with leading dashes).
    passthrough: HashSet<String>,

    remaining: Vec<String>,
    positional: Vec<String>,

    /// If set, unknown options are an error.
    strict: bool,

    config: Config,

    /// Set once `--` has been found.
    delimiter_seen: bool,
}

impl<'a> Sieve<'a> {
    fn new(fields: Fields<'a>, config: Config) -> Self {
        Sieve {
            fields,
            passthrough: HashSet::new(),
            remaining: Vec::new(),
            positional: Vec::new(),
            strict: false,
            config,
            delimiter_seen: false,
        }
    }

    fn run<S>(mut self, args: &[S]) -> Result<Sifted>
    where
        S: AsRef<str>,
    {
        let mut tokens = args.iter().map(AsRef::<str>::as_ref);

        while let Some(arg) = tokens.next() {
            trace!("sieve: arg: {:?}", arg);

            if arg == END_OF_OPTIONS {
                self.delimiter_seen = true;

                debug!("sieve: end of options");

                // The delimiter itself is not returned.
                self.positional.extend(tokens.by_ref().map(String::from));
            } else if arg.starts_with(LONG_OPT_PREFIX) {
                self.handle_long(arg, &mut tokens)?;
            } else if arg.starts_with(OPT_PREFIX) && arg.len() > 1 {
                self.handle_short(arg, &mut tokens)?;
            } else {
                if self.config.require_positional_delimiter && !self.delimiter_seen {
                    return Err(Error::PositionalBeforeDelimiter(arg.into()));
                }

                self.positional.push(arg.into());

                if self.config.stop_at_first_positional {
                    debug!("sieve: stopping at first positional argument {:?}", arg);

                    self.positional.extend(tokens.by_ref().map(String::from));
                }
            }
        }

        Ok(Sifted {
            remaining: self.remaining,
            positional: self.positional,
        })
    }

    /// Store `value` for a registered option, converting a decode failure
    /// into an [Error::InvalidValue] for `flag`.
    fn set(&mut self, name: &str, flag: &str, value: &str) -> Result<()> {
        self.fields
            .bind(name, value)
            .map(|_| ())
            .map_err(|e: DecodeError| Error::InvalidValue {
                flag: flag.into(),
                cause: e.to_string(),
            })
    }

    /// Handle `--name` and `--name=value`.
    fn handle_long<'s, I>(&mut self, arg: &'s str, tokens: &mut I) -> Result<()>
    where
        I: Iterator<Item = &'s str>,
    {
        let body = &arg[LONG_OPT_PREFIX.len()..];

        let (name, inline_value) = match body.find(LONG_OPT_VALUE_SEPARATOR) {
            Some(i) => (&body[..i], Some(&body[i + 1..])),
            None => (body, None),
        };

        let flag = format!("{}{}", LONG_OPT_PREFIX, name);

        let need = match self.fields.needs(name) {
            Some(need) => need,
            None => return self.handle_unknown_long(arg, flag, inline_value.is_some(), tokens),
        };

        if need == Need::Nothing {
            // Any inline value is ignored for flags.
            return self.set(name, &flag, "");
        }

        let value = match inline_value {
            Some(value) => value,
            None => tokens.next().ok_or_else(|| Error::MissingValue(flag.clone()))?,
        };

        self.set(name, &flag, value)
    }

    fn handle_unknown_long<'s, I>(
        &mut self,
        arg: &'s str,
        flag: String,
        has_inline_value: bool,
        tokens: &mut I,
    ) -> Result<()>
    where
        I: Iterator<Item = &'s str>,
    {
        if self.strict {
            return Err(Error::UnknownOption(flag));
        }

        self.remaining.push(arg.into());

        if !has_inline_value && self.passthrough.contains(&flag) {
            if let Some(value) = tokens.next() {
                self.remaining.push(value.into());
            }
        }

        debug!("sieve: forwarding unknown option {:?}", flag);

        Ok(())
    }

    /// Handle `-x`, `-xvalue` and bundled flags such as `-xyz`.
    fn handle_short<'s, I>(&mut self, arg: &'s str, tokens: &mut I) -> Result<()>
    where
        I: Iterator<Item = &'s str>,
    {
        let cluster = &arg[OPT_PREFIX.len_utf8()..];

        for (i, option) in cluster.char_indices() {
            let name = option.to_string();
            let tail = &cluster[i + option.len_utf8()..];
            let flag = format!("{}{}", OPT_PREFIX, option);

            let need = match self.fields.needs(&name) {
                Some(need) => need,
                None => {
                    self.handle_unknown_short(flag, tail, tokens)?;

                    // A non-empty tail belongs to the unknown option.
                    if !tail.is_empty() {
                        return Ok(());
                    }

                    continue;
                }
            };

            if need == Need::Nothing {
                self.set(&name, &flag, "")?;
                continue;
            }

            let value = if !tail.is_empty() {
                tail
            } else {
                tokens.next().ok_or_else(|| Error::MissingValue(flag.clone()))?
            };

            return self.set(&name, &flag, value);
        }

        Ok(())
    }

    fn handle_unknown_short<'s, I>(&mut self, flag: String, tail: &str, tokens: &mut I) -> Result<()>
    where
        I: Iterator<Item = &'s str>,
    {
        if self.strict {
            return Err(Error::UnknownOption(flag));
        }

        debug!("sieve: forwarding unknown option {:?}", flag);

        if !self.passthrough.contains(&flag) {
            // Any tail is dropped: it is not reparsed as further options.
            self.remaining.push(flag);
            return Ok(());
        }

        if !tail.is_empty() {
            self.remaining.push(format!("{}{}", flag, tail));
            return Ok(());
        }

        self.remaining.push(flag);

        if let Some(value) = tokens.next() {
            self.remaining.push(value.into());
        }

        Ok(())
    }
}
