// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example of a standalone program where every option is known and
/// the input files must follow "--".
use argsieve::{Config, Field, Fields, Options};

#[derive(Clone, Debug, Default)]
struct MyOptions {
    output: String,
    force: bool,
}

impl Options for MyOptions {
    fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
        fields.add(Field::text(&mut self.output).short('o').long("output"));
        fields.add(Field::flag(&mut self.force).short('f').long("force"));
    }
}

fn main() {
    let mut opts = MyOptions::default();

    let config = Config::new().require_positional_delimiter();

    let files = match argsieve::parse(&mut opts, &argsieve::get_args(), Some(config)) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("usage: strict [-f] [-o <output>] -- <file>..");
            std::process::exit(1);
        }
    };

    println!("INFO: output: {:?}", opts.output);
    println!("INFO: force: {}", opts.force);
    println!("INFO: files: {:?}", files);
}
