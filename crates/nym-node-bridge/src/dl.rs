// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::OnceLock;

use napi::{CallContext, Env, JsObject, JsUnknown, Result};
use napi_derive::js_function;
use nym_dl::{
    FrameworkResolver, SystemLoader, OPEN, OPEN_FRAMEWORK, RTLD_GLOBAL, RTLD_LAZY, RTLD_LOCAL,
    RTLD_NOW,
};
use nym_ffi_common::BridgeConfig;

use crate::convert;

static FRAMEWORKS: OnceLock<FrameworkResolver> = OnceLock::new();

pub(crate) fn namespace(env: &Env, config: &BridgeConfig) -> Result<JsObject> {
    FRAMEWORKS.get_or_init(|| FrameworkResolver::new(&config.frameworks_dir));

    let mut dl = env.create_object()?;
    dl.create_named_method(OPEN, open)?;
    dl.create_named_method(OPEN_FRAMEWORK, open_framework)?;

    for (name, mode) in [
        ("RTLD_LAZY", RTLD_LAZY),
        ("RTLD_NOW", RTLD_NOW),
        ("RTLD_GLOBAL", RTLD_GLOBAL),
        ("RTLD_LOCAL", RTLD_LOCAL),
    ] {
        dl.set_named_property(name, env.create_int64(mode.bits())?)?;
    }
    Ok(dl)
}

// void* dlopen(const char* path, int mode);
#[js_function(2)]
fn open(ctx: CallContext) -> Result<JsUnknown> {
    let args = convert::call_args(&ctx, 2)?;
    let result = nym_dl::open(&SystemLoader, &args);
    convert::complete(ctx.env, result)
}

#[js_function(2)]
fn open_framework(ctx: CallContext) -> Result<JsUnknown> {
    let args = convert::call_args(&ctx, 2)?;
    let resolver =
        FRAMEWORKS.get_or_init(|| FrameworkResolver::new(BridgeConfig::from_env().frameworks_dir));
    let result = nym_dl::open_framework(&SystemLoader, resolver, &args);
    convert::complete(ctx.env, result)
}
