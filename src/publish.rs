//! Building alignments off the display thread and handing them over.
//!
//! A build owns all of its working state; only the finished vector is
//! shared. Readers hold `Arc` snapshots, so an old alignment stays valid
//! for as long as anybody still looks at it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info};

use crate::diff::DiffList;
use crate::diff3::{AlignOptions, Diff3LineVector};
use crate::error::Result;
use crate::source::LineSource;

/// Cooperative cancellation flag, polled by builds between rows.
///
/// Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The currently published alignment.
///
/// Reads never block; [`AlignmentStore::publish`] swaps in a new snapshot
/// atomically.
#[derive(Debug)]
pub struct AlignmentStore {
    current: ArcSwap<Diff3LineVector>,
}

impl Default for AlignmentStore {
    fn default() -> Self {
        Self::new(Diff3LineVector::default())
    }
}

impl AlignmentStore {
    pub fn new(initial: Diff3LineVector) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<Diff3LineVector> {
        self.current.load_full()
    }

    /// Replace the current snapshot, returning the previous one.
    pub fn publish(&self, vector: Diff3LineVector) -> Arc<Diff3LineVector> {
        info!(rows = vector.len(), "publishing alignment");
        self.current.swap(Arc::new(vector))
    }

    /// Build a three-way alignment and publish it unless cancelled.
    ///
    /// Returns whether a new snapshot was published. On error or
    /// cancellation the current snapshot is left untouched.
    pub fn rebuild<S: LineSource + ?Sized>(
        &self,
        ab: &DiffList,
        against_c: &DiffList,
        sources: &S,
        options: &AlignOptions,
        cancel: &CancelToken,
    ) -> Result<bool> {
        match Diff3LineVector::build(ab, against_c, sources, options, cancel)? {
            Some(vector) => {
                self.publish(vector);
                Ok(true)
            }
            None => {
                debug!("rebuild cancelled, keeping current alignment");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_publish_returns_previous() {
        let store = AlignmentStore::default();
        let before = store.load();
        assert!(before.is_empty());
        let previous = store.publish(Diff3LineVector::default());
        assert!(Arc::ptr_eq(&before, &previous));
        assert!(!Arc::ptr_eq(&before, &store.load()));
    }
}
