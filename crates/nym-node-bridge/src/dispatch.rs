// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

use napi::{CallContext, Env, JsObject, JsUnknown, Result};
use napi_derive::js_function;
use nym_apple_dispatch::{queue_concurrent, SystemQueueFactory, QUEUE_CREATE, QUEUE_SERIAL};

use crate::convert;

pub(crate) fn namespace(env: &Env) -> Result<JsObject> {
    let mut dispatch = env.create_object()?;
    dispatch.create_named_method(QUEUE_CREATE, queue_create)?;
    dispatch.set_named_property("QUEUE_SERIAL", env.create_int64(QUEUE_SERIAL.bits())?)?;
    dispatch.set_named_property(
        "QUEUE_CONCURRENT",
        env.create_int64(queue_concurrent().bits())?,
    )?;
    Ok(dispatch)
}

// dispatch_queue_t dispatch_queue_create(const char *label, dispatch_queue_attr_t attr);
#[js_function(2)]
fn queue_create(ctx: CallContext) -> Result<JsUnknown> {
    let args = convert::call_args(&ctx, 2)?;
    let result = nym_apple_dispatch::queue_create(&SystemQueueFactory, &args);
    convert::complete(ctx.env, result)
}
