// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing how to decode option values into your own types.
use std::time::Duration;

use argsieve::{DecodeError, DecodeText, Field, Fields, Options, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
enum LogLevel {
    Info,
    Debug,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl DecodeText for LogLevel {
    fn decode_text(&mut self, text: &str) -> std::result::Result<(), DecodeError> {
        *self = match text {
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "error" => LogLevel::Error,
            _ => return Err(format!("unknown log level: {:?}", text).into()),
        };

        Ok(())
    }
}

/// A duration specified as a number followed by a unit ("30s", "5m").
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Timeout(Duration);

impl DecodeText for Timeout {
    fn decode_text(&mut self, text: &str) -> std::result::Result<(), DecodeError> {
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("missing unit in {:?}", text))?;

        let (number, unit) = text.split_at(split);

        let number: u64 = number.parse()?;

        let scale: u64 = match unit {
            "s" => 1,
            "m" => 60,
            "h" => 60 * 60,
            _ => return Err(format!("unknown unit {:?}", unit).into()),
        };

        let secs = number
            .checked_mul(scale)
            .ok_or_else(|| format!("timeout too large: {:?}", text))?;

        self.0 = Duration::from_secs(secs);

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
struct MyOptions {
    level: LogLevel,

    // None unless "--timeout" is specified.
    timeout: Option<Timeout>,
}

impl Options for MyOptions {
    fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
        fields.add(Field::value(&mut self.level).short('l').long("level"));
        fields.add(Field::optional(&mut self.timeout).short('t').long("timeout"));
    }
}

fn main() -> Result<()> {
    let mut opts = MyOptions::default();

    let positional = argsieve::parse(&mut opts, &argsieve::get_args(), None)?;

    println!("INFO: level: {:?}", opts.level);

    match opts.timeout {
        Some(Timeout(duration)) => println!("INFO: timeout: {:?}", duration),
        None => println!("INFO: no timeout"),
    }

    println!("INFO: positional arguments: {:?}", positional);

    Ok(())
}
