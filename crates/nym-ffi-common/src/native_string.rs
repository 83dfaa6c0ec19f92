// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

use std::{ffi::c_char, fmt};

/// UTF-8 string copied into a buffer of exactly `len + 1` bytes, the last one being NUL.
///
/// Unlike [`std::ffi::CString`] interior NUL bytes are not rejected; they are passed through and
/// the native side simply sees a shorter C string.
#[derive(Clone, PartialEq, Eq)]
pub struct NativeString {
    buf: Box<[u8]>,
}

impl NativeString {
    pub fn new(value: &str) -> Self {
        let mut buf = Vec::with_capacity(value.len() + 1);
        buf.extend_from_slice(value.as_bytes());
        buf.push(0);
        Self {
            buf: buf.into_boxed_slice(),
        }
    }

    /// Number of decoded bytes, excluding the terminator.
    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf
    }

    /// Pointer valid for as long as `self` is alive.
    pub fn as_ptr(&self) -> *const c_char {
        self.buf.as_ptr().cast()
    }
}

impl fmt::Debug for NativeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Display for NativeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}
