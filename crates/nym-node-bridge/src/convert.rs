// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Conversion between JS values and the bridge's call model.

use napi::{CallContext, Env, JsNull, JsNumber, JsString, JsUndefined, JsUnknown, ValueType};
use nym_ffi_common::{ArgValue, CallArgs, Error, ErrorKind, Marshaled, ValueKind};

/// Collects at most `max` of the arguments actually passed.
pub(crate) fn call_args(ctx: &CallContext, max: usize) -> napi::Result<CallArgs> {
    (0..ctx.length.min(max))
        .map(|index| arg_value(ctx, index))
        .collect()
}

fn arg_value(ctx: &CallContext, index: usize) -> napi::Result<ArgValue> {
    let value = ctx.get::<JsUnknown>(index)?;

    let arg = match value.get_type()? {
        // napi probes the UTF-8 length before allocating the buffer.
        ValueType::String => {
            ArgValue::String(ctx.get::<JsString>(index)?.into_utf8()?.into_owned()?)
        }
        ValueType::Number => ArgValue::Number(ctx.get::<JsNumber>(index)?.get_double()?),
        other => ArgValue::Other(value_kind(other)),
    };
    Ok(arg)
}

fn value_kind(value_type: ValueType) -> ValueKind {
    match value_type {
        ValueType::Undefined => ValueKind::Undefined,
        ValueType::Null => ValueKind::Null,
        ValueType::Boolean => ValueKind::Boolean,
        ValueType::Number => ValueKind::Number,
        ValueType::String => ValueKind::String,
        ValueType::Symbol => ValueKind::Symbol,
        ValueType::Object => ValueKind::Object,
        ValueType::Function => ValueKind::Function,
        ValueType::External => ValueKind::External,
        ValueType::BigInt => ValueKind::BigInt,
        #[allow(unreachable_patterns)]
        _ => ValueKind::Undefined,
    }
}

/// Turns an adapter result into the JS return value, throwing for validation errors.
pub(crate) fn complete(
    env: &Env,
    result: nym_ffi_common::Result<Marshaled>,
) -> napi::Result<JsUnknown> {
    match result {
        Ok(value) => to_js(env, value),
        Err(err) => {
            throw(env, &err)?;
            env.get_undefined().map(JsUndefined::into_unknown)
        }
    }
}

fn to_js(env: &Env, value: Marshaled) -> napi::Result<JsUnknown> {
    match value {
        Marshaled::Null => env.get_null().map(JsNull::into_unknown),
        Marshaled::Buffer(bytes) => Ok(env.create_buffer_copy(bytes)?.into_raw().into_unknown()),
        Marshaled::Int64(value) => Ok(env.create_int64(value)?.into_unknown()),
    }
}

fn throw(env: &Env, err: &Error) -> napi::Result<()> {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::Type => env.throw_type_error(&message, Some(err.code())),
        ErrorKind::Argument | ErrorKind::NotFound => env.throw_error(&message, Some(err.code())),
    }
}
