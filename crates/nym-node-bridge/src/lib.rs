// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Node.js addon exposing three native entry points:
//!
//! - `dispatch.queue_create(label, attr)`: `dispatch_queue_create`, returns the queue pointer in a
//!   pointer-width `Buffer`, or `null`.
//! - `dl.open(path, mode?)`: `dlopen`, returns the handle as a number, `0` on failure.
//!   `dl.openFramework(name, mode?)` does the same for a system framework bundle.
//! - `sel.registerName(name)`: `sel_registerName`, returns the selector as a number, or `null`.
//!
//! Arguments are validated before the native call. Wrong arity throws an `Error` with code
//! `ERR_MISSING_ARGS`, a wrong type throws a `TypeError` with code `ERR_INVALID_ARG_TYPE`. A null
//! result from the native side is never thrown.
//!
//! `dispatch` and `sel` are only registered on Apple platforms.

mod convert;
#[cfg(any(target_os = "macos", target_os = "ios"))]
mod dispatch;
#[cfg(unix)]
mod dl;
#[cfg(any(target_os = "macos", target_os = "ios"))]
mod sel;

use napi::{Env, JsObject, Result};
use napi_derive::module_exports;
use nym_ffi_common::{logging, BridgeConfig};

#[module_exports]
fn init(mut exports: JsObject, env: Env) -> Result<()> {
    let config = BridgeConfig::from_env();
    logging::init_logger(&config);

    #[cfg(any(target_os = "macos", target_os = "ios"))]
    {
        exports.set_named_property("dispatch", dispatch::namespace(&env)?)?;
        exports.set_named_property("sel", sel::namespace(&env)?)?;
    }

    #[cfg(unix)]
    exports.set_named_property("dl", dl::namespace(&env, &config)?)?;

    tracing::debug!(?config, "native bridge registered");
    Ok(())
}
