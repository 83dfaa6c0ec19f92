// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Untyped call arguments as handed over by the host environment.

use std::fmt;

use crate::{
    error::{Error, Result},
    handle::NativeToken,
    native_string::NativeString,
};

/// Type tag of a host value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Symbol,
    Object,
    Function,
    External,
    BigInt,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Symbol => "symbol",
            ValueKind::Object => "object",
            ValueKind::Function => "function",
            ValueKind::External => "external",
            ValueKind::BigInt => "bigint",
        };
        f.write_str(name)
    }
}

/// A single argument. Only strings and numbers carry a payload, everything else is
/// rejected by the adapters and therefore only needs its type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Number(f64),
    Other(ValueKind),
}

impl ArgValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ArgValue::String(_) => ValueKind::String,
            ArgValue::Number(_) => ValueKind::Number,
            ArgValue::Other(kind) => *kind,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_owned())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Number(value)
    }
}

impl From<ValueKind> for ArgValue {
    fn from(kind: ValueKind) -> Self {
        ArgValue::Other(kind)
    }
}

/// Arguments of one call. Owned by that call only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    values: Vec<ArgValue>,
}

impl CallArgs {
    pub fn new(values: Vec<ArgValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fails unless at least `required.len()` arguments were supplied.
    pub fn require(&self, function: &'static str, required: &'static [&'static str]) -> Result<()> {
        if self.values.len() < required.len() {
            return Err(Error::MissingArguments {
                function,
                params: required,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Decodes a required string argument into a NUL-terminated buffer.
    pub fn string(&self, index: usize, name: &'static str) -> Result<NativeString> {
        match self.values.get(index) {
            Some(ArgValue::String(value)) => Ok(NativeString::new(value)),
            other => Err(Self::type_error(name, ValueKind::String, other)),
        }
    }

    /// Reinterprets a required numeric argument as an opaque native token.
    pub fn number(&self, index: usize, name: &'static str) -> Result<NativeToken> {
        match self.values.get(index) {
            Some(ArgValue::Number(value)) => Ok(NativeToken::from_number(*value)),
            other => Err(Self::type_error(name, ValueKind::Number, other)),
        }
    }

    /// Like [`CallArgs::number`], but an absent argument yields `None`.
    ///
    /// Only absence counts: an explicit `undefined` is a present argument of the wrong type.
    pub fn optional_number(&self, index: usize, name: &'static str) -> Result<Option<NativeToken>> {
        if index >= self.values.len() {
            return Ok(None);
        }
        self.number(index, name).map(Some)
    }

    fn type_error(name: &'static str, expected: ValueKind, found: Option<&ArgValue>) -> Error {
        Error::InvalidArgType {
            name,
            expected,
            actual: found.map_or(ValueKind::Undefined, ArgValue::kind),
        }
    }
}

impl FromIterator<ArgValue> for CallArgs {
    fn from_iter<I: IntoIterator<Item = ArgValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: Vec<ArgValue>) -> CallArgs {
        CallArgs::new(values)
    }

    #[test]
    fn test_require_counts_arguments() {
        let call = args(vec!["label".into()]);
        assert!(call.require("f", &["label"]).is_ok());
        assert_eq!(
            call.require("f", &["label", "attr"]),
            Err(Error::MissingArguments {
                function: "f",
                params: &["label", "attr"],
                actual: 1,
            })
        );
    }

    #[test]
    fn test_string_rejects_other_types() {
        let call = args(vec![42.0.into()]);
        assert_eq!(
            call.string(0, "path").unwrap_err(),
            Error::InvalidArgType {
                name: "path",
                expected: ValueKind::String,
                actual: ValueKind::Number,
            }
        );
    }

    #[test]
    fn test_number_rejects_other_types() {
        let call = args(vec!["x".into(), ValueKind::Null.into()]);
        assert_eq!(
            call.number(1, "attr").unwrap_err().to_string(),
            "attr must be a number"
        );
    }

    #[test]
    fn test_optional_number_absent() {
        let call = args(vec!["/usr/lib/libc.dylib".into()]);
        assert_eq!(call.optional_number(1, "mode"), Ok(None));
    }

    #[test]
    fn test_optional_number_explicit_undefined_is_rejected() {
        let call = args(vec!["x".into(), ValueKind::Undefined.into()]);
        assert!(matches!(
            call.optional_number(1, "mode"),
            Err(Error::InvalidArgType {
                name: "mode",
                actual: ValueKind::Undefined,
                ..
            })
        ));
    }

    #[test]
    fn test_optional_number_present() {
        let call = args(vec!["x".into(), 2.0.into()]);
        assert_eq!(
            call.optional_number(1, "mode"),
            Ok(Some(NativeToken::from_bits(2)))
        );
    }

    #[test]
    fn test_string_keeps_exact_bytes() {
        let call = args(vec!["queue.\u{1F980}".into()]);
        let label = call.string(0, "label").unwrap();
        assert_eq!(label.len(), "queue.".len() + 4);
        assert_eq!(label.as_bytes_with_nul().last(), Some(&0));
    }
}
