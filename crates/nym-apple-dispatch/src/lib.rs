// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

//! Minimalistic bridge for libdispatch queue creation.
//! Documentation: <https://developer.apple.com/documentation/dispatch?language=objc>
//!
//! Queues created here are never retained or released by the bridge. The caller owns the
//! returned handle and is responsible for releasing it through libdispatch.

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod sys;

use nym_ffi_common::{CallArgs, Marshaled, NativeString, NativeToken, OpaqueHandle, Result};

/// Name the adapter is exported under.
pub const QUEUE_CREATE: &str = "queue_create";

const QUEUE_CREATE_PARAMS: &[&str] = &["label", "attr"];

/// Attribute for a serial queue. libdispatch represents it as a null attribute.
pub const QUEUE_SERIAL: NativeToken = NativeToken::from_bits(0);

/// Native queue construction.
pub trait QueueFactory {
    /// Calls `dispatch_queue_create` exactly once and returns whatever it produced.
    fn create_queue(&self, label: &NativeString, attr: NativeToken) -> OpaqueHandle;
}

/// [`QueueFactory`] backed by the system libdispatch.
#[cfg(any(target_os = "macos", target_os = "ios"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemQueueFactory;

#[cfg(any(target_os = "macos", target_os = "ios"))]
impl QueueFactory for SystemQueueFactory {
    fn create_queue(&self, label: &NativeString, attr: NativeToken) -> OpaqueHandle {
        // SAFETY: label is NUL-terminated and outlives the call. libdispatch copies the label.
        // The attribute is passed through as provided by the caller.
        let queue = unsafe { sys::dispatch_queue_create(label.as_ptr(), attr.as_ptr()) };
        OpaqueHandle::from_mut_ptr(queue)
    }
}

/// Attribute for a concurrent queue, i.e. the address of the runtime's concurrent attribute.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn queue_concurrent() -> NativeToken {
    let attr = sys::dispatch_queue_attr_concurrent();
    NativeToken::from_bits(OpaqueHandle::from_mut_ptr(attr).to_i64())
}

/// `queue_create(label: string, attr: number)`
///
/// Returns the raw queue pointer copied into a pointer-width buffer, or `Null` if libdispatch
/// did not create a queue.
pub fn queue_create<F>(factory: &F, args: &CallArgs) -> Result<Marshaled>
where
    F: QueueFactory + ?Sized,
{
    let (label, attr) = parse_queue_create(args)
        .inspect_err(|err| tracing::debug!("{QUEUE_CREATE} rejected: {err}"))?;

    let queue = factory.create_queue(&label, attr);
    tracing::debug!(%label, ?attr, %queue, "dispatch_queue_create");

    Ok(Marshaled::buffer_or_null(queue))
}

fn parse_queue_create(args: &CallArgs) -> Result<(NativeString, NativeToken)> {
    args.require(QUEUE_CREATE, QUEUE_CREATE_PARAMS)?;
    let label = args.string(0, "label")?;
    let attr = args.number(1, "attr")?;
    Ok((label, attr))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use nym_ffi_common::{ArgValue, Error, ValueKind, HANDLE_WIDTH};

    use super::*;

    /// Records every call and returns `handle_for(attr)`.
    #[derive(Default)]
    struct RecordingFactory {
        calls: AtomicUsize,
        labels: Mutex<Vec<Vec<u8>>>,
        null: bool,
    }

    impl RecordingFactory {
        fn returning_null() -> Self {
            Self {
                null: true,
                ..Default::default()
            }
        }

        fn handle_for(attr: NativeToken) -> OpaqueHandle {
            OpaqueHandle::from_ptr((0x7f00_0000 + attr.bits() as usize * 0x10) as *const ())
        }
    }

    impl QueueFactory for RecordingFactory {
        fn create_queue(&self, label: &NativeString, attr: NativeToken) -> OpaqueHandle {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.labels
                .lock()
                .unwrap()
                .push(label.as_bytes_with_nul().to_vec());
            if self.null {
                OpaqueHandle::NULL
            } else {
                Self::handle_for(attr)
            }
        }
    }

    fn args(values: Vec<ArgValue>) -> CallArgs {
        CallArgs::new(values)
    }

    #[test]
    fn test_missing_arguments_skip_native_call() {
        let factory = RecordingFactory::default();

        for call in [args(vec![]), args(vec!["net.nymtech.queue".into()])] {
            let err = queue_create(&factory, &call).unwrap_err();
            assert!(matches!(err, Error::MissingArguments { .. }));
        }
        assert_eq!(factory.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_label_must_be_string() {
        let factory = RecordingFactory::default();
        let err = queue_create(&factory, &args(vec![1.0.into(), 0.0.into()])).unwrap_err();
        assert_eq!(err.to_string(), "label must be a string");
        assert_eq!(factory.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_attr_must_be_number() {
        let factory = RecordingFactory::default();
        let err = queue_create(
            &factory,
            &args(vec!["q".into(), ValueKind::Object.into()]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "attr must be a number");
        assert_eq!(factory.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_returns_pointer_width_buffer() {
        let factory = RecordingFactory::default();
        let result = queue_create(&factory, &args(vec!["q".into(), 3.0.into()])).unwrap();

        let expected = RecordingFactory::handle_for(NativeToken::from_bits(3));
        assert_eq!(result, Marshaled::Buffer(expected.to_ne_bytes().to_vec()));
        match &result {
            Marshaled::Buffer(bytes) => assert_eq!(bytes.len(), HANDLE_WIDTH),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(result.to_handle(), Some(expected));
        assert_eq!(factory.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_null_queue_is_not_an_error() {
        let factory = RecordingFactory::returning_null();
        let result = queue_create(&factory, &args(vec!["q".into(), 0.0.into()]));
        assert_eq!(result, Ok(Marshaled::Null));
        assert_eq!(factory.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multi_byte_label_reaches_native_call_intact() {
        let factory = RecordingFactory::default();
        let label = "net.nymtech.\u{00e9}\u{20ac}\u{1f980}";
        queue_create(&factory, &args(vec![label.into(), 0.0.into()])).unwrap();

        let labels = factory.labels.lock().unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].len(), "net.nymtech.".len() + 2 + 3 + 4 + 1);
        assert_eq!(&labels[0][..labels[0].len() - 1], label.as_bytes());
        assert_eq!(labels[0].last(), Some(&0));
    }

    #[test]
    fn test_concurrent_calls_keep_their_own_buffers() {
        let factory = RecordingFactory::default();

        std::thread::scope(|scope| {
            let handles = (0..16)
                .map(|i| {
                    let factory = &factory;
                    scope.spawn(move || {
                        let call = args(vec![format!("queue-{i}").into(), (i as f64).into()]);
                        (i, queue_create(factory, &call).unwrap())
                    })
                })
                .collect::<Vec<_>>();

            for handle in handles {
                let (i, result) = handle.join().unwrap();
                assert_eq!(
                    result.to_handle(),
                    Some(RecordingFactory::handle_for(NativeToken::from_bits(i)))
                );
            }
        });

        let mut labels = factory.labels.lock().unwrap().clone();
        labels.sort();
        let mut expected = (0..16)
            .map(|i| format!("queue-{i}\0").into_bytes())
            .collect::<Vec<_>>();
        expected.sort();
        assert_eq!(labels, expected);
    }

    #[cfg(any(target_os = "macos", target_os = "ios"))]
    #[test]
    fn test_create_serial_queue() {
        let result = queue_create(
            &SystemQueueFactory,
            &args(vec!["net.nymtech.queue".into(), 0.0.into()]),
        )
        .unwrap();

        let queue = result.to_handle().expect("handle decodes");
        assert!(!queue.is_null());

        let raw_label = unsafe { sys::dispatch_queue_get_label(queue.as_ptr()) };
        assert!(!raw_label.is_null());

        let label = unsafe { std::ffi::CStr::from_ptr(raw_label) };
        assert_eq!(label.to_str(), Ok("net.nymtech.queue"));
    }

    #[cfg(any(target_os = "macos", target_os = "ios"))]
    #[test]
    fn test_concurrent_attribute_is_not_serial() {
        assert_ne!(queue_concurrent(), QUEUE_SERIAL);
    }
}
