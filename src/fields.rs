// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::DecodeError;
use crate::value::{DecodeText, Need, Target};

/// Trait implemented by a type whose fields are set from the command line.
///
/// The implementation adds one [Field] per bindable member. Nested option
/// types are flattened into the same set of names by calling their own
/// `register()` method: there is no namespace prefix.
///
/// # Example
///
/// ```rust
/// use argsieve::{Field, Fields, Options};
///
/// #[derive(Debug, Default)]
/// struct Common {
///     verbose: bool,
/// }
///
/// impl Options for Common {
///     fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
///         fields.add(Field::flag(&mut self.verbose).short('v').long("verbose"));
///     }
/// }
///
/// #[derive(Debug, Default)]
/// struct MyOptions {
///     common: Common,
///     region: String,
/// }
///
/// impl Options for MyOptions {
///     fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
///         fields.add(Field::text(&mut self.region).short('r').long("region"));
///         self.common.register(fields);
///     }
/// }
///
/// let mut opts = MyOptions::default();
///
/// let positional = argsieve::parse(&mut opts, &["-v", "--region=eu-west-1", "cmd"], None).unwrap();
///
/// assert!(opts.common.verbose);
/// assert_eq!(opts.region, "eu-west-1");
/// assert_eq!(positional, vec!["cmd"]);
/// ```
pub trait Options {
    /// Add a [Field] to `fields` for each member that can be set from the
    /// command line.
    fn register<'a>(&'a mut self, fields: &mut Fields<'a>);
}

/// Declaration of a single bindable field: the storage location and the
/// names the option can be specified with.
///
/// A field needs a short name, a long name, or both. Names are given
/// without leading dashes.
///
/// Any character is a valid short name, including `-` and `=` (matched by
/// `-v-` and `-=`). A long name may start with a dash: `.long("-x")` is
/// matched by `---x`.
///
/// # Panics
///
/// A long name containing `=` can never match, since `=` separates an
/// inline value from the name. Setting one is a programming error and
/// panics.
pub struct Field<'a> {
    short: Option<char>,
    long: Option<String>,
    target: Target<'a>,
}

impl<'a> Field<'a> {
    fn new(target: Target<'a>) -> Self {
        Field {
            short: None,
            long: None,
            target,
        }
    }

    /// A boolean flag: set to `true` when the option is specified.
    pub fn flag(field: &'a mut bool) -> Self {
        Field::new(Target::Flag(field))
    }

    /// An option whose value is stored verbatim.
    pub fn text(field: &'a mut String) -> Self {
        Field::new(Target::Text(field))
    }

    /// An option whose value is decoded in place by the field's
    /// [DecodeText] implementation.
    pub fn value<T>(field: &'a mut T) -> Self
    where
        T: DecodeText + 'a,
    {
        Field::new(Target::Decode(field))
    }

    /// An option that leaves the field as `None` until it is specified.
    ///
    /// When the option is found, a `T::default()` value is decoded and the
    /// field is set to `Some` only if decoding succeeds.
    pub fn optional<T>(field: &'a mut Option<T>) -> Self
    where
        T: DecodeText + Default + 'a,
    {
        Field::new(Target::Optional(field))
    }

    /// Specify the single character short name (`-x`).
    pub fn short(self, short: char) -> Self {
        Field {
            short: Some(short),
            ..self
        }
    }

    /// Specify the long name (`--name`).
    ///
    /// An empty name is the same as not specifying a long name.
    pub fn long(self, long: &str) -> Self {
        if long.contains('=') {
            panic!("argsieve: invalid long option name {:?}", long);
        }

        let long = if long.is_empty() {
            None
        } else {
            Some(long.into())
        };

        Field { long, ..self }
    }

    /// Returns the requirement for the option.
    ///
    /// ```rust
    /// use argsieve::{Field, Need};
    ///
    /// let mut verbose = false;
    /// assert_eq!(Field::flag(&mut verbose).short('v').needs(), Need::Nothing);
    ///
    /// let mut region = String::new();
    /// assert_eq!(Field::text(&mut region).short('r').needs(), Need::Argument);
    /// ```
    pub fn needs(&self) -> Need {
        self.target.needs()
    }
}

impl<'a> fmt::Debug for Field<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Field")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("target", &self.target)
            .finish()
    }
}

/// A registered field that has at least one name.
#[derive(Debug)]
struct Binding<'a> {
    target: Target<'a>,
}

/// The set of registered fields, indexed by option name.
///
/// Both the short and long name of a [Field] refer to the same entry, so
/// specifying either updates the same storage.
///
/// The table can be inspected, for example to check that an [Options]
/// implementation registers the expected names:
///
/// ```rust
/// use argsieve::{Field, Fields, Need};
///
/// let mut verbose = false;
/// let mut config = String::new();
///
/// let mut fields = Fields::new();
/// assert!(fields.is_empty());
///
/// fields.add(Field::flag(&mut verbose).short('v').long("verbose"));
/// fields.add(Field::text(&mut config).long("config"));
///
/// // "v", "verbose" and "config"
/// assert_eq!(fields.len(), 3);
/// assert!(fields.exists("verbose"));
/// assert!(!fields.exists("--verbose"));
/// assert_eq!(fields.needs("v"), Some(Need::Nothing));
/// assert_eq!(fields.needs("config"), Some(Need::Argument));
/// assert_eq!(fields.needs("c"), None);
/// ```
#[derive(Debug, Default)]
pub struct Fields<'a> {
    bindings: Vec<Binding<'a>>,

    /// - name: option name without dashes.
    /// - value: index into `bindings`.
    names: HashMap<String, usize>,
}

impl<'a> Fields<'a> {
    /// Create an empty set of fields.
    pub fn new() -> Self {
        Fields {
            bindings: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Build the set of fields for `target`.
    pub(crate) fn from_options<O>(target: &'a mut O) -> Self
    where
        O: Options + ?Sized,
    {
        let mut fields = Fields::new();

        target.register(&mut fields);

        fields
    }

    /// Register a single field.
    ///
    /// A field with neither a short nor a long name is ignored. If a name
    /// is already registered, the new field replaces the old one for that
    /// name.
    pub fn add(&mut self, field: Field<'a>) {
        if field.short.is_none() && field.long.is_none() {
            debug!("ignoring unnamed field: {:?}", field);
            return;
        }

        let index = self.bindings.len();

        if let Some(short) = field.short {
            self.names.insert(short.to_string(), index);
        }

        if let Some(long) = field.long {
            self.names.insert(long, index);
        }

        self.bindings.push(Binding {
            target: field.target,
        });
    }

    /// Returns the number of option names registered.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no option names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Determine if an option with the specified name (without dashes)
    /// has been registered.
    pub fn exists(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Returns the requirement for the named option, or [None] if the
    /// option is not registered.
    pub fn needs(&self, name: &str) -> Option<Need> {
        self.names
            .get(name)
            .map(|&index| self.bindings[index].target.needs())
    }

    /// Store `value` into the field registered for `name`.
    ///
    /// Returns `Ok(false)` if `name` is not registered.
    pub(crate) fn bind(&mut self, name: &str, value: &str) -> Result<bool, DecodeError> {
        let index = match self.names.get(name) {
            Some(&index) => index,
            None => return Ok(false),
        };

        self.bindings[index].target.bind(value)?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::tests::Level;

    #[derive(Debug, Default)]
    struct Inner {
        debug: bool,
        level: Level,
    }

    impl Options for Inner {
        fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
            fields.add(Field::flag(&mut self.debug).short('d').long("debug"));
            fields.add(Field::value(&mut self.level).long("level"));
        }
    }

    #[derive(Debug, Default)]
    struct Outer {
        inner: Inner,
        config: String,
        verbose: bool,
        timeout: Option<Level>,
        untagged: String,
    }

    impl Options for Outer {
        fn register<'a>(&'a mut self, fields: &mut Fields<'a>) {
            fields.add(Field::text(&mut self.config).short('c').long("config"));
            fields.add(Field::flag(&mut self.verbose).short('v'));
            fields.add(Field::optional(&mut self.timeout).short('t').long(""));
            fields.add(Field::text(&mut self.untagged));
            self.inner.register(fields);
        }
    }

    #[test]
    fn test_fields() {
        let new_fields = Fields::new();
        let def_fields = Fields::default();

        assert_eq!(new_fields.len(), 0);
        assert!(new_fields.is_empty());
        assert_eq!(new_fields.len(), def_fields.len());

        let mut b = false;
        let mut fields = Fields::new();

        fields.add(Field::flag(&mut b).short('b').long("bool"));
        assert_eq!(fields.len(), 2);
        assert!(!fields.is_empty());
        assert!(fields.exists("b"));
        assert!(fields.exists("bool"));
        assert!(!fields.exists("-b"));
        assert!(!fields.exists("--bool"));
        assert_eq!(fields.needs("b"), Some(Need::Nothing));
        assert_eq!(fields.needs("x"), None);
    }

    #[test]
    fn test_from_options() {
        let mut opts = Outer::default();

        let fields = Fields::from_options(&mut opts);

        // c, config, v, t, d, debug, level (the unnamed field is skipped)
        assert_eq!(fields.len(), 7);

        for name in &["c", "config", "v", "t", "d", "debug", "level"] {
            assert!(fields.exists(name), "name: {:?}", name);
        }

        assert_eq!(fields.needs("config"), Some(Need::Argument));
        assert_eq!(fields.needs("v"), Some(Need::Nothing));
        assert_eq!(fields.needs("t"), Some(Need::Argument));
        assert_eq!(fields.needs("debug"), Some(Need::Nothing));
        assert_eq!(fields.needs("level"), Some(Need::Argument));

        // An empty long name means "no long name"
        assert!(!fields.exists(""));
    }

    #[test]
    fn test_bind_aliases() {
        let mut opts = Outer::default();

        let mut fields = Fields::from_options(&mut opts);

        assert!(matches!(fields.bind("c", "short.yaml"), Ok(true)));
        assert!(matches!(fields.bind("config", "long.yaml"), Ok(true)));
        assert!(matches!(fields.bind("d", ""), Ok(true)));
        assert!(matches!(fields.bind("level", "error"), Ok(true)));
        assert!(matches!(fields.bind("nope", "x"), Ok(false)));
        assert!(fields.bind("t", "bogus").is_err());

        drop(fields);

        // Both names refer to the same storage
        assert_eq!(opts.config, "long.yaml");
        assert!(opts.inner.debug);
        assert!(!opts.verbose);
        assert_eq!(opts.inner.level, Level::Error);
        assert_eq!(opts.timeout, None);
        assert_eq!(opts.untagged, "");
    }

    #[test]
    fn test_duplicate_name_replaces() {
        let mut first = String::new();
        let mut second = String::new();

        let mut fields = Fields::new();
        fields.add(Field::text(&mut first).short('x'));
        fields.add(Field::text(&mut second).short('x'));

        assert!(matches!(fields.bind("x", "value"), Ok(true)));

        drop(fields);

        assert_eq!(first, "");
        assert_eq!(second, "value");
    }

    #[test]
    fn test_field() {
        let mut b = false;
        let field = Field::flag(&mut b).short('v').long("verbose");

        assert_eq!(field.short, Some('v'));
        assert_eq!(field.long, Some("verbose".to_string()));
        assert_eq!(field.needs(), Need::Nothing);

        let mut s = String::new();
        let field = Field::text(&mut s).long("name");

        assert_eq!(field.short, None);
        assert_eq!(field.needs(), Need::Argument);

        let mut s = String::new();
        let field = Field::text(&mut s).short('人');

        assert_eq!(field.short, Some('人'));
    }

    #[test]
    fn test_field_punctuation_names() {
        let mut dash = false;
        let mut equals = false;
        let mut long = false;

        let mut fields = Fields::new();
        fields.add(Field::flag(&mut dash).short('-'));
        fields.add(Field::flag(&mut equals).short('='));
        fields.add(Field::flag(&mut long).long("-x"));

        assert_eq!(fields.len(), 3);

        for name in &["-", "=", "-x"] {
            assert!(fields.exists(name), "name: {:?}", name);
        }
    }

    #[test]
    #[should_panic(expected = "invalid long option name")]
    fn test_field_bad_long_equals() {
        let mut s = String::new();
        let _ = Field::text(&mut s).long("name=value");
    }
}
