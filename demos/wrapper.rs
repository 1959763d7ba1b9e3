// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example of a wrapper program: it handles a few options itself and
/// shows the command line it would forward to the wrapped command.
use argsieve::{Field, Fields, Options, Result};

/// Options shared with other wrappers.
#[derive(Clone, Debug, Default)]
struct Common {
    debug: bool,
    dry_run: bool,
}

impl Options for Common {
    fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
        fields.add(Field::flag(&mut self.debug).short('d').long("debug"));
        fields.add(Field::flag(&mut self.dry_run).short('n').long("dry-run"));
    }
}

/// The options this wrapper handles.
#[derive(Clone, Debug, Default)]
struct WrapperOptions {
    common: Common,
    region: String,
    profile: Option<String>,
}

impl Options for WrapperOptions {
    fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
        // The embedded options are flattened: "-d", not "--common-d".
        self.common.register(fields);

        fields.add(Field::text(&mut self.region).short('r').long("region"));
        fields.add(Field::optional(&mut self.profile).long("profile"));
    }
}

/// Options of the wrapped command that take a value. Without these, the
/// value would be treated as a positional argument.
const PASSTHROUGH: &[&str] = &["-L", "-R", "-i", "--identity"];

fn main() -> Result<()> {
    let mut opts = WrapperOptions::default();

    let args = argsieve::get_args();

    let sifted = argsieve::sift(&mut opts, &args, PASSTHROUGH, None)?;

    println!("INFO: options: {:?}", opts);
    println!("INFO: forwarded options: {:?}", sifted.remaining);
    println!("INFO: positional arguments: {:?}", sifted.positional);

    let mut command = sifted.remaining;
    command.extend(sifted.positional);

    println!("INFO: would run: {:?}", command);

    Ok(())
}
