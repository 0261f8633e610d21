//! Process-scoped context container.
//!
//! A [`ContextSlot`] holds at most one instance of an application context.
//! It is created at the composition root and handed to whoever needs it;
//! there is no global. Injecting a new context swaps it in and then
//! finalizes the one it replaced; reading an empty slot fails fast.

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::AppError;
use crate::result::AppResult;

/// Message of the error returned when a slot is read before injection.
pub const UNINITIALIZED_MESSAGE: &str = "App context has not been injected";

/// Something that releases its resources when it is replaced.
pub trait Finalizable: Send + Sync {
    /// Releases resources held by this instance.
    fn finalize(&self);
}

/// Holder for the single live application context.
pub struct ContextSlot<C: ?Sized> {
    current: RwLock<Option<Arc<C>>>,
}

impl<C: Finalizable + ?Sized> ContextSlot<C> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Installs `ctx`, then finalizes the context it replaced.
    ///
    /// The swap happens under one write lock, so readers always see either
    /// the previous or the new context, and every replaced context is
    /// finalized exactly once even when injections race. Finalization runs
    /// after the lock is released and may read the slot.
    pub fn inject(&self, ctx: Arc<C>) {
        let previous = std::mem::replace(
            &mut *self.current.write().unwrap_or_else(|e| e.into_inner()),
            Some(ctx),
        );
        info!("App context injected");

        if let Some(previous) = previous {
            info!("Finalizing previous app context");
            previous.finalize();
        }
    }

    /// Returns the injected context.
    pub fn get(&self) -> AppResult<Arc<C>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| AppError::uninitialized(UNINITIALIZED_MESSAGE))
    }

    /// Returns whether a context has been injected.
    pub fn is_initialized(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Removes the current context without finalizing it.
    pub fn take(&self) -> Option<Arc<C>> {
        self.current
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

impl<C: Finalizable + ?Sized> Default for ContextSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> std::fmt::Debug for ContextSlot<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let initialized = self
            .current
            .read()
            .map(|c| c.is_some())
            .unwrap_or(false);
        f.debug_struct("ContextSlot")
            .field("initialized", &initialized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Counting {
        finalized: AtomicUsize,
    }

    impl Finalizable for Counting {
        fn finalize(&self) {
            self.finalized.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_get_before_inject_fails() {
        let slot: ContextSlot<Counting> = ContextSlot::new();
        let err = slot.get().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Uninitialized);
        assert_eq!(err.message, "App context has not been injected");
        assert!(!slot.is_initialized());
    }

    #[test]
    fn test_inject_then_get() {
        let slot = ContextSlot::new();
        let ctx = Arc::new(Counting::default());
        slot.inject(ctx.clone());

        let got = slot.get().expect("context injected");
        assert!(Arc::ptr_eq(&got, &ctx));
        assert_eq!(ctx.finalized.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_second_inject_finalizes_first() {
        let slot = ContextSlot::new();
        let first = Arc::new(Counting::default());
        let second = Arc::new(Counting::default());

        slot.inject(first.clone());
        slot.inject(second.clone());

        assert_eq!(first.finalized.load(Ordering::SeqCst), 1);
        assert_eq!(second.finalized.load(Ordering::SeqCst), 0);
        assert!(Arc::ptr_eq(&slot.get().unwrap(), &second));
    }

    #[test]
    fn test_take_does_not_finalize() {
        let slot = ContextSlot::new();
        let ctx = Arc::new(Counting::default());
        slot.inject(ctx.clone());

        let taken = slot.take().expect("context present");
        assert!(Arc::ptr_eq(&taken, &ctx));
        assert_eq!(ctx.finalized.load(Ordering::SeqCst), 0);
        assert!(slot.get().is_err());
    }

    #[derive(Debug, Default)]
    struct Reentrant {
        saw_live_context: AtomicBool,
    }

    static REENTRANT_SLOT: ContextSlot<Reentrant> = ContextSlot::new();

    impl Finalizable for Reentrant {
        fn finalize(&self) {
            let live = REENTRANT_SLOT.get().is_ok();
            self.saw_live_context.store(live, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_slot_readable_while_previous_finalizes() {
        let first = Arc::new(Reentrant::default());
        let second = Arc::new(Reentrant::default());

        REENTRANT_SLOT.inject(first.clone());
        REENTRANT_SLOT.inject(second.clone());

        assert!(first.saw_live_context.load(Ordering::SeqCst));
        assert!(Arc::ptr_eq(&REENTRANT_SLOT.get().unwrap(), &second));
    }

    #[test]
    fn test_concurrent_injects_finalize_every_replaced_context() {
        let slot: ContextSlot<Counting> = ContextSlot::new();
        let contexts: Vec<Arc<Counting>> = (0..16).map(|_| Arc::new(Counting::default())).collect();

        std::thread::scope(|scope| {
            for ctx in &contexts {
                let slot = &slot;
                scope.spawn(move || slot.inject(ctx.clone()));
            }
        });

        let live = slot.get().unwrap();
        for ctx in &contexts {
            let expected = if Arc::ptr_eq(ctx, &live) { 0 } else { 1 };
            assert_eq!(ctx.finalized.load(Ordering::SeqCst), expected);
        }
    }
}
