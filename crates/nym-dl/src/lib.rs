// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Bridge for `dlopen(3)`.
//!
//! Libraries are never closed by the bridge and `dlerror` is never consulted: a zero handle is
//! returned as is and the caller decides what to do with it.

#![cfg(unix)]

mod framework;

pub use framework::FrameworkResolver;

use nym_ffi_common::{CallArgs, Marshaled, NativeString, NativeToken, OpaqueHandle, Result};

pub const OPEN: &str = "open";
pub const OPEN_FRAMEWORK: &str = "openFramework";

const OPEN_PARAMS: &[&str] = &["path"];
const OPEN_FRAMEWORK_PARAMS: &[&str] = &["name"];

pub const RTLD_LAZY: NativeToken = NativeToken::from_bits(libc::RTLD_LAZY as i64);
pub const RTLD_NOW: NativeToken = NativeToken::from_bits(libc::RTLD_NOW as i64);
pub const RTLD_GLOBAL: NativeToken = NativeToken::from_bits(libc::RTLD_GLOBAL as i64);
pub const RTLD_LOCAL: NativeToken = NativeToken::from_bits(libc::RTLD_LOCAL as i64);

/// Mode used when the caller does not pass one.
pub const DEFAULT_MODE: NativeToken = RTLD_LAZY;

/// Native library loading.
pub trait DynamicLoader {
    /// Calls `dlopen` exactly once and returns whatever it produced.
    fn dlopen(&self, path: &NativeString, mode: NativeToken) -> OpaqueHandle;
}

/// [`DynamicLoader`] backed by the system dynamic linker.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLoader;

impl DynamicLoader for SystemLoader {
    fn dlopen(&self, path: &NativeString, mode: NativeToken) -> OpaqueHandle {
        // SAFETY: path is NUL-terminated and outlives the call. Running the library's
        // initializers is the documented effect of this call.
        let handle = unsafe { libc::dlopen(path.as_ptr(), mode.as_c_int()) };
        OpaqueHandle::from_mut_ptr(handle)
    }
}

/// `open(path: string, mode?: number)`
///
/// Always returns an integer, `0` when the library could not be loaded.
pub fn open<L>(loader: &L, args: &CallArgs) -> Result<Marshaled>
where
    L: DynamicLoader + ?Sized,
{
    let (path, mode) =
        parse_open(args).inspect_err(|err| tracing::debug!("{OPEN} rejected: {err}"))?;

    Ok(load(loader, &path, mode))
}

/// `openFramework(name: string, mode?: number)`
///
/// Loads `<root>/<name>.framework/<name>`. A missing bundle is reported as an error before the
/// loader is called; anything else behaves like [`open`].
pub fn open_framework<L>(
    loader: &L,
    resolver: &FrameworkResolver,
    args: &CallArgs,
) -> Result<Marshaled>
where
    L: DynamicLoader + ?Sized,
{
    let (path, mode) = parse_open_framework(resolver, args)
        .inspect_err(|err| tracing::debug!("{OPEN_FRAMEWORK} rejected: {err}"))?;

    Ok(load(loader, &path, mode))
}

fn load<L>(loader: &L, path: &NativeString, mode: NativeToken) -> Marshaled
where
    L: DynamicLoader + ?Sized,
{
    let handle = loader.dlopen(path, mode);
    tracing::debug!(%path, ?mode, %handle, "dlopen");

    Marshaled::int64(handle)
}

fn parse_open(args: &CallArgs) -> Result<(NativeString, NativeToken)> {
    args.require(OPEN, OPEN_PARAMS)?;
    let path = args.string(0, "path")?;
    let mode = args.optional_number(1, "mode")?.unwrap_or(DEFAULT_MODE);
    Ok((path, mode))
}

fn parse_open_framework(
    resolver: &FrameworkResolver,
    args: &CallArgs,
) -> Result<(NativeString, NativeToken)> {
    args.require(OPEN_FRAMEWORK, OPEN_FRAMEWORK_PARAMS)?;
    let name = args.string(0, "name")?;
    let mode = args.optional_number(1, "mode")?.unwrap_or(DEFAULT_MODE);

    let binary = resolver.resolve(&name.to_string())?;
    Ok((NativeString::new(&binary.to_string_lossy()), mode))
}
