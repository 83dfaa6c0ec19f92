// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Bindings for the Objective-C runtime.

#![allow(non_camel_case_types)]

use std::ffi::c_char;

#[repr(C)]
pub struct objc_selector {
    _private: [u8; 0],
}

pub type SEL = *const objc_selector;

#[link(name = "objc", kind = "dylib")]
extern "C" {
    pub fn sel_registerName(name: *const c_char) -> SEL;
    #[allow(unused)]
    pub fn sel_getName(sel: SEL) -> *const c_char;
}
