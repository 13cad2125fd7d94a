//! The process-wide engine slot read by the facade.

use std::sync::OnceLock;

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "async")] {
        #[doc(hidden)]
        pub trait AsyncCapable: crate::r#async::AnyAsyncBackend {}
        impl<B: crate::r#async::AnyAsyncBackend> AsyncCapable for B {}
    } else {
        #[doc(hidden)]
        pub trait AsyncCapable {}
        impl<B> AsyncCapable for B {}
    }
}

cfg_if! {
    if #[cfg(feature = "blocking")] {
        #[doc(hidden)]
        pub trait BlockingCapable: crate::blocking::AnyBlockingBackend {}
        impl<B: crate::blocking::AnyBlockingBackend> BlockingCapable for B {}
    } else {
        #[doc(hidden)]
        pub trait BlockingCapable {}
        impl<B> BlockingCapable for B {}
    }
}

/// An engine covering every interface enabled by the crate features.
pub trait Engine: AsyncCapable + BlockingCapable {}
impl<B: AsyncCapable + BlockingCapable> Engine for B {}

/// The registered engine, if any.
pub static BACKEND: OnceLock<Box<dyn Engine + Send + Sync>> = OnceLock::new();

/// Installs `backend` as the engine of every client built afterwards.
///
/// # Panics
///
/// Panics when an engine is already installed. Use [`try_register_backend`] when several
/// call sites may race.
pub fn register_backend(backend: impl Engine + Send + Sync + 'static) {
    assert!(
        try_register_backend(backend),
        "an easyquest engine is already registered"
    );
}

/// Installs `backend` unless an engine is already in place, returning whether it was
/// installed.
pub fn try_register_backend(backend: impl Engine + Send + Sync + 'static) -> bool {
    BACKEND.set(Box::new(backend)).is_ok()
}
