//! Execution-context-scoped stack of structured context frames
//!
//! This module provides:
//! - `ScopeProvider`: per-thread stack of frames, shared by every logger of
//!   one registry
//! - `ScopeGuard`: RAII handle that pops exactly the frame it pushed
//! - `ScopeSnapshot`: read-only view handed to scope-aware sinks
//!
//! The facade never suspends, so one logical execution context maps to one
//! OS thread and the stacks live in `thread_local!` storage. Stacks are
//! keyed by provider id: two registries on the same thread do not see each
//! other's frames, and two threads never share frames at all.

use super::log_state::LogState;
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

thread_local! {
    static SCOPE_STACKS: RefCell<HashMap<u64, Vec<Frame>>> = RefCell::new(HashMap::new());
}

static NEXT_PROVIDER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
struct Frame {
    seq: u64,
    state: LogState,
}

/// Owns the scope stacks of one registry across all threads.
#[derive(Debug)]
pub struct ScopeProvider {
    id: u64,
    next_seq: AtomicU64,
}

impl ScopeProvider {
    pub fn new() -> Self {
        Self {
            id: NEXT_PROVIDER_ID.fetch_add(1, Ordering::Relaxed),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Push a frame onto the calling thread's stack.
    ///
    /// The returned guard pops exactly that frame when dropped; release is
    /// guaranteed on every exit path, normal or panic.
    pub fn begin_scope(&self, state: LogState) -> ScopeGuard {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        SCOPE_STACKS.with(|stacks| {
            stacks
                .borrow_mut()
                .entry(self.id)
                .or_default()
                .push(Frame { seq, state });
        });
        ScopeGuard {
            provider_id: self.id,
            seq,
            _not_send: PhantomData,
        }
    }

    /// Number of frames currently open on the calling thread
    pub fn depth(&self) -> usize {
        SCOPE_STACKS.with(|stacks| {
            stacks
                .borrow()
                .get(&self.id)
                .map(|s| s.len())
                .unwrap_or(0)
        })
    }

    /// Visit live frames of the calling thread, outermost to innermost,
    /// threading an accumulator through the visits.
    pub fn for_each_scope<T>(&self, mut visitor: impl FnMut(&LogState, &mut T), acc: &mut T) {
        // Visit over a snapshot so a visitor may itself open scopes.
        for state in self.snapshot().iter() {
            visitor(state, acc);
        }
    }

    /// Owned outermost-first copy of the calling thread's frames
    pub fn snapshot(&self) -> ScopeSnapshot {
        let frames = SCOPE_STACKS.with(|stacks| {
            stacks
                .borrow()
                .get(&self.id)
                .map(|stack| stack.iter().map(|f| f.state.clone()).collect())
                .unwrap_or_default()
        });
        ScopeSnapshot { frames }
    }
}

impl Default for ScopeProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one pushed scope frame.
///
/// Dropping the guard pops its frame. Releasing out of LIFO order, or after
/// the frame is already gone, is a structural bug in caller code and panics
/// rather than being silently ignored. Not `Send`: the frame belongs to the
/// thread that pushed it.
#[must_use = "dropping the guard immediately closes the scope"]
pub struct ScopeGuard {
    provider_id: u64,
    seq: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPE_STACKS.with(|stacks| {
            let mut stacks = stacks.borrow_mut();
            let stack = stacks.entry(self.provider_id).or_default();
            match stack.last() {
                Some(top) if top.seq == self.seq => {
                    stack.pop();
                }
                Some(top) => panic!(
                    "scope released out of order: expected frame {}, top is {}",
                    self.seq, top.seq
                ),
                None => panic!("scope released with no open frame on this thread"),
            }
        });
    }
}

/// Read-only, outermost-first view of the scope chain at dispatch time.
///
/// `iter()` walks outermost to innermost; `iter().rev()` gives the opposite
/// traversal.
#[derive(Debug, Clone, Default)]
pub struct ScopeSnapshot {
    frames: Vec<LogState>,
}

impl ScopeSnapshot {
    pub fn iter(&self) -> std::slice::Iter<'_, LogState> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn for_each_scope<T>(&self, mut visitor: impl FnMut(&LogState, &mut T), acc: &mut T) {
        for state in &self.frames {
            visitor(state, acc);
        }
    }
}

impl<'a> IntoIterator for &'a ScopeSnapshot {
    type Item = &'a LogState;
    type IntoIter = std::slice::Iter<'a, LogState>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_visit_outermost_first() {
        let provider = ScopeProvider::new();
        let _outer = provider.begin_scope(LogState::new().with_field("Key1", "A"));
        let _inner = provider.begin_scope(LogState::new().with_field("Key2", "B"));

        let mut keys = Vec::new();
        provider.for_each_scope(
            |state, keys: &mut Vec<String>| {
                for (k, _) in state.iter() {
                    keys.push(k.clone());
                }
            },
            &mut keys,
        );

        assert_eq!(keys, vec!["Key1".to_string(), "Key2".to_string()]);
    }

    #[test]
    fn test_depth_matches_open_handles() {
        let provider = ScopeProvider::new();
        assert_eq!(provider.depth(), 0);

        let outer = provider.begin_scope(LogState::opaque("outer"));
        assert_eq!(provider.depth(), 1);
        {
            let _inner = provider.begin_scope(LogState::opaque("inner"));
            assert_eq!(provider.depth(), 2);
        }
        assert_eq!(provider.depth(), 1);
        drop(outer);
        assert_eq!(provider.depth(), 0);
    }

    #[test]
    fn test_snapshot_supports_both_traversals() {
        let provider = ScopeProvider::new();
        let _a = provider.begin_scope(LogState::opaque("a"));
        let _b = provider.begin_scope(LogState::opaque("b"));

        let snapshot = provider.snapshot();
        let outer_in: Vec<_> = snapshot.iter().map(|s| s.template().unwrap()).collect();
        let inner_out: Vec<_> = snapshot.iter().rev().map(|s| s.template().unwrap()).collect();
        assert_eq!(outer_in, vec!["a", "b"]);
        assert_eq!(inner_out, vec!["b", "a"]);
    }

    #[test]
    fn test_providers_do_not_share_frames() {
        let first = ScopeProvider::new();
        let second = ScopeProvider::new();

        let _scope = first.begin_scope(LogState::opaque("only on first"));
        assert_eq!(first.depth(), 1);
        assert_eq!(second.depth(), 0);
    }

    #[test]
    fn test_threads_do_not_share_frames() {
        let provider = std::sync::Arc::new(ScopeProvider::new());
        let _scope = provider.begin_scope(LogState::opaque("main thread"));

        let remote = std::sync::Arc::clone(&provider);
        let remote_depth = std::thread::spawn(move || remote.depth())
            .join()
            .unwrap();

        assert_eq!(remote_depth, 0);
        assert_eq!(provider.depth(), 1);
    }

    #[test]
    #[should_panic(expected = "scope released out of order")]
    fn test_out_of_order_release_panics() {
        let provider = ScopeProvider::new();
        let outer = provider.begin_scope(LogState::opaque("outer"));
        let inner = provider.begin_scope(LogState::opaque("inner"));

        drop(outer); // inner is still on top
        drop(inner);
    }
}
