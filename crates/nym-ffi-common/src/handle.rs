// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Opaque native values passed through the bridge without interpretation.

use std::{ffi::c_int, fmt, mem};

/// Width in bytes of a native pointer, and therefore of a marshaled handle buffer.
pub const HANDLE_WIDTH: usize = mem::size_of::<usize>();

/// Pointer-sized handle to a resource owned by a native library.
///
/// The bridge neither owns nor dereferences the resource. The only supported operations are
/// storing the value and getting the exact same bits back, either as bytes or as an integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct OpaqueHandle(usize);

impl OpaqueHandle {
    pub const NULL: Self = Self(0);

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    pub fn from_mut_ptr<T>(ptr: *mut T) -> Self {
        Self(ptr as usize)
    }

    /// Returns the raw pointer so the handle can be handed back to a native API.
    pub fn as_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Native byte order, exactly [`HANDLE_WIDTH`] bytes.
    pub fn to_ne_bytes(self) -> [u8; HANDLE_WIDTH] {
        self.0.to_ne_bytes()
    }

    pub fn from_ne_bytes(bytes: [u8; HANDLE_WIDTH]) -> Self {
        Self(usize::from_ne_bytes(bytes))
    }

    /// Integer encoding. Pointers are unsigned, so narrower targets zero-extend.
    pub fn to_i64(self) -> i64 {
        self.0 as u64 as i64
    }

    /// Inverse of [`OpaqueHandle::to_i64`]. Returns `None` if the value does not fit a pointer.
    pub fn from_i64(value: i64) -> Option<Self> {
        usize::try_from(value as u64).ok().map(Self)
    }
}

impl fmt::Debug for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueHandle({:#x})", self.0)
    }
}

impl fmt::Display for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Opaque 64-bit argument for native calls, e.g. a queue attribute or a `dlopen` mode.
///
/// Valid values are defined by the native side, so no validation happens here.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NativeToken(i64);

impl NativeToken {
    pub const fn from_bits(bits: i64) -> Self {
        Self(bits)
    }

    /// Applies the host's int64 coercion: non-finite values become 0, everything else is
    /// truncated toward zero and saturated to the i64 range.
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() {
            Self(value as i64)
        } else {
            Self(0)
        }
    }

    pub const fn bits(self) -> i64 {
        self.0
    }

    /// Reinterprets the token as a pointer-typed native argument.
    pub fn as_ptr<T>(self) -> *mut T {
        self.0 as usize as *mut T
    }

    /// Narrows the token to a C `int`, keeping the low bits.
    pub fn as_c_int(self) -> c_int {
        self.0 as c_int
    }
}

impl fmt::Debug for NativeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeToken({:#x})", self.0)
    }
}

/// Value handed back to the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marshaled {
    Null,
    Buffer(Vec<u8>),
    Int64(i64),
}

impl Marshaled {
    /// Raw handle bytes in a fresh buffer, or `Null` for a null handle.
    pub fn buffer_or_null(handle: OpaqueHandle) -> Self {
        if handle.is_null() {
            Marshaled::Null
        } else {
            Marshaled::Buffer(handle.to_ne_bytes().to_vec())
        }
    }

    /// Integer encoding, or `Null` for a null handle.
    pub fn int64_or_null(handle: OpaqueHandle) -> Self {
        if handle.is_null() {
            Marshaled::Null
        } else {
            Marshaled::Int64(handle.to_i64())
        }
    }

    /// Integer encoding, including zero for a null handle.
    pub fn int64(handle: OpaqueHandle) -> Self {
        Marshaled::Int64(handle.to_i64())
    }

    /// Decodes a value produced by this module back into the native handle.
    pub fn to_handle(&self) -> Option<OpaqueHandle> {
        match self {
            Marshaled::Null => Some(OpaqueHandle::NULL),
            Marshaled::Buffer(bytes) => <[u8; HANDLE_WIDTH]>::try_from(bytes.as_slice())
                .ok()
                .map(OpaqueHandle::from_ne_bytes),
            Marshaled::Int64(value) => OpaqueHandle::from_i64(*value),
        }
    }
}
