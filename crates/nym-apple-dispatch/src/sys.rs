// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Bindings for libdispatch.

#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]

use std::ffi::c_char;

use objc2::runtime::{NSObjectProtocol, ProtocolObject};

// Dispatch objects are objc types when compiled with objc compiler.
pub type dispatch_object_s = ProtocolObject<dyn NSObjectProtocol>;

pub type OS_dispatch_queue = dispatch_object_s;
pub type dispatch_queue_t = *mut OS_dispatch_queue;

pub type OS_dispatch_queue_attr = dispatch_object_s;
pub type dispatch_queue_attr_t = *mut OS_dispatch_queue_attr;

#[link(name = "System", kind = "dylib")]
extern "C" {
    static _dispatch_queue_attr_concurrent: dispatch_object_s;

    pub fn dispatch_queue_create(
        label: *const c_char,
        attr: dispatch_queue_attr_t,
    ) -> dispatch_queue_t;
    #[allow(unused)]
    pub fn dispatch_queue_get_label(queue: dispatch_queue_t) -> *const c_char;
}

pub fn dispatch_queue_attr_concurrent() -> dispatch_queue_attr_t {
    unsafe { &_dispatch_queue_attr_concurrent as *const _ as dispatch_queue_attr_t }
}
