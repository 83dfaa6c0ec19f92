// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

use napi::{CallContext, Env, JsObject, JsUnknown, Result};
use napi_derive::js_function;
use nym_objc_sel::{SystemSelectorRegistry, REGISTER_NAME};

use crate::convert;

pub(crate) fn namespace(env: &Env) -> Result<JsObject> {
    let mut sel = env.create_object()?;
    sel.create_named_method(REGISTER_NAME, register_name)?;
    Ok(sel)
}

// SEL sel_registerName(const char *str)
#[js_function(1)]
fn register_name(ctx: CallContext) -> Result<JsUnknown> {
    let args = convert::call_args(&ctx, 1)?;
    let result = nym_objc_sel::register_name(&SystemSelectorRegistry, &args);
    convert::complete(ctx.env, result)
}
