// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Call-boundary building blocks shared by the native bridges: untyped argument validation,
//! NUL-terminated string buffers, opaque handle marshaling and the typed errors raised before a
//! native call is attempted.

pub mod args;
pub mod config;
mod error;
pub mod handle;
pub mod logging;
mod native_string;

pub use args::{ArgValue, CallArgs, ValueKind};
pub use config::BridgeConfig;
pub use error::{Error, ErrorKind, Result};
pub use handle::{Marshaled, NativeToken, OpaqueHandle, HANDLE_WIDTH};
pub use native_string::NativeString;
