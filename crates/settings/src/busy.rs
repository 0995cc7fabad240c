use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared "operation in flight" flag.
///
/// Raising the flag returns a [`BusyGuard`]; the flag drops back when the
/// guard is dropped, including when the future holding it is cancelled.
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[must_use = "the flag is lowered as soon as the guard is dropped"]
    pub fn raise(&self) -> BusyGuard {
        self.0.store(true, Ordering::Release);
        BusyGuard(Arc::clone(&self.0))
    }
}

/// Lowers its [`BusyFlag`] on drop.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
