// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Bridge for `sel_registerName`.
//! Documentation: <https://developer.apple.com/documentation/objectivec/1418557-sel_registername>
//!
//! The selector table is owned by the Objective-C runtime. Registering the same name twice
//! yields the same selector; that is the runtime's guarantee, nothing is cached here.

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod sys;

use nym_ffi_common::{CallArgs, Marshaled, NativeString, OpaqueHandle, Result};

pub const REGISTER_NAME: &str = "registerName";

const REGISTER_NAME_PARAMS: &[&str] = &["name"];

/// Native selector registration.
pub trait SelectorRegistry {
    /// Calls `sel_registerName` exactly once and returns whatever it produced.
    fn register_name(&self, name: &NativeString) -> OpaqueHandle;
}

/// [`SelectorRegistry`] backed by the system Objective-C runtime.
#[cfg(any(target_os = "macos", target_os = "ios"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSelectorRegistry;

#[cfg(any(target_os = "macos", target_os = "ios"))]
impl SelectorRegistry for SystemSelectorRegistry {
    fn register_name(&self, name: &NativeString) -> OpaqueHandle {
        // SAFETY: name is NUL-terminated and outlives the call. The runtime copies it.
        let sel = unsafe { sys::sel_registerName(name.as_ptr()) };
        OpaqueHandle::from_ptr(sel)
    }
}

/// `registerName(name: string)`
///
/// Returns the selector as an integer, or `Null` if the runtime returned no selector.
pub fn register_name<R>(registry: &R, args: &CallArgs) -> Result<Marshaled>
where
    R: SelectorRegistry + ?Sized,
{
    let name = parse_register_name(args)
        .inspect_err(|err| tracing::debug!("{REGISTER_NAME} rejected: {err}"))?;

    let sel = registry.register_name(&name);
    tracing::trace!(%name, %sel, "sel_registerName");

    Ok(Marshaled::int64_or_null(sel))
}

fn parse_register_name(args: &CallArgs) -> Result<NativeString> {
    args.require(REGISTER_NAME, REGISTER_NAME_PARAMS)?;
    args.string(0, "name")
}
