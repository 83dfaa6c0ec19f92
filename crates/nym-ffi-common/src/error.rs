// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

use crate::args::ValueKind;

/// Errors surfaced to the caller before any native call is made.
///
/// A native call returning a null or zero handle is never an error; it is marshaled as a regular
/// value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{function}: expected {}, got {actual} argument(s)", expected_args(.params))]
    MissingArguments {
        function: &'static str,
        params: &'static [&'static str],
        actual: usize,
    },

    #[error("{name} must be a {expected}")]
    InvalidArgType {
        name: &'static str,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("framework {0} not found")]
    FrameworkNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad class of an [`Error`], used by the host bridge to pick the exception constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Argument,
    Type,
    NotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingArguments { .. } => ErrorKind::Argument,
            Error::InvalidArgType { .. } => ErrorKind::Type,
            Error::FrameworkNotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Stable error code attached to the thrown exception.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Argument => "ERR_MISSING_ARGS",
            ErrorKind::Type => "ERR_INVALID_ARG_TYPE",
            ErrorKind::NotFound => "ERR_FRAMEWORK_NOT_FOUND",
        }
    }
}

fn expected_args(params: &[&str]) -> String {
    let quoted = params
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>();

    match quoted.as_slice() {
        [] => "no arguments".to_owned(),
        [only] => format!("{only} argument"),
        [init @ .., last] => format!("{} and {last} arguments", init.join(", ")),
    }
}
