// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use crate::error::DecodeError;

/// Used to specify whether an option is a "stand-alone" flag option
/// (needs no value), or whether it requires an option argument.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy)]
pub enum Need {
    /// Option is stand-alone (no argument required).
    Nothing,
    /// Option needs an argument.
    Argument,
}

impl Default for Need {
    fn default() -> Self {
        Need::Nothing
    }
}

/// Trait that a field type must implement to be bound with
/// [Field::value()](crate::Field::value) or
/// [Field::optional()](crate::Field::optional).
///
/// The option value is passed as raw text; the implementation either
/// updates `self` or fails with a descriptive cause. The cause's display
/// text is reported to the caller unmodified, wrapped in
/// [Error::InvalidValue](crate::Error::InvalidValue).
///
/// # Notes
///
/// - The parser does not roll back a failed decode: if `decode_text()`
///   partially updates `self` before failing, the partial state remains.
///   Fields bound with [Field::optional()](crate::Field::optional) are
///   never touched by a failed decode.
///
/// # Example
///
/// ```rust
/// use argsieve::{DecodeError, DecodeText};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Port(u16);
///
/// impl DecodeText for Port {
///     fn decode_text(&mut self, text: &str) -> Result<(), DecodeError> {
///         self.0 = text.parse()?;
///         Ok(())
///     }
/// }
///
/// let mut port = Port::default();
/// assert!(port.decode_text("8080").is_ok());
/// assert_eq!(port, Port(8080));
/// assert!(port.decode_text("http").is_err());
/// ```
pub trait DecodeText {
    /// Decode `text` into `self`.
    fn decode_text(&mut self, text: &str) -> Result<(), DecodeError>;
}

impl DecodeText for String {
    fn decode_text(&mut self, text: &str) -> Result<(), DecodeError> {
        *self = text.into();

        Ok(())
    }
}

/// A field slot that starts absent and is only filled by a successful
/// decode.
pub(crate) trait Slot {
    fn fill(&mut self, text: &str) -> Result<(), DecodeError>;
}

impl<T> Slot for Option<T>
where
    T: DecodeText + Default,
{
    fn fill(&mut self, text: &str) -> Result<(), DecodeError> {
        let mut value = T::default();

        value.decode_text(text)?;

        *self = Some(value);

        Ok(())
    }
}

/// Where (and how) an option's value is stored.
pub(crate) enum Target<'a> {
    Flag(&'a mut bool),
    Text(&'a mut String),
    Decode(&'a mut dyn DecodeText),
    Optional(&'a mut dyn Slot),
}

impl<'a> Target<'a> {
    pub(crate) fn needs(&self) -> Need {
        match self {
            Target::Flag(_) => Need::Nothing,
            _ => Need::Argument,
        }
    }

    /// Store `text` into the bound field.
    ///
    /// For flags, `text` is ignored.
    pub(crate) fn bind(&mut self, text: &str) -> Result<(), DecodeError> {
        match self {
            Target::Flag(flag) => **flag = true,
            Target::Text(s) => **s = text.into(),
            Target::Decode(value) => value.decode_text(text)?,
            Target::Optional(slot) => slot.fill(text)?,
        }

        Ok(())
    }
}

impl<'a> fmt::Debug for Target<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self {
            Target::Flag(_) => "flag",
            Target::Text(_) => "text",
            Target::Decode(_) => "decode",
            Target::Optional(_) => "optional",
        };

        write!(f, "Target: {}", kind)
    }
}
