//! Memoized derived-view selectors
//!
//! A [`Selector`] projects an input key out of `(state, params)` and feeds it
//! to a pure computation. The result is cached in a single slot and handed
//! out as an `Arc`, so callers can detect "nothing changed" by pointer
//! equality. The computation only runs again when the key differs from the
//! cached one.
//!
//! Keys are compared with `PartialEq`. Wrap shared collections in
//! [`ByAddress`] to compare them by identity rather than by contents.
//!
//! Each selector owns its cache. Build one selector per consumer (see the
//! `make_*` factories in the feature modules) so consumers with different
//! parameters do not evict each other's result.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// `Arc` wrapper whose equality is pointer identity
pub struct ByAddress<T>(pub Arc<T>);

impl<T> ByAddress<T> {
    pub fn new(inner: &Arc<T>) -> Self {
        Self(Arc::clone(inner))
    }
}

impl<T> Clone for ByAddress<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for ByAddress<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for ByAddress<T> {}

impl<T> std::ops::Deref for ByAddress<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for ByAddress<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByAddress({:p})", Arc::as_ptr(&self.0))
    }
}

/// Single-entry cache
#[derive(Debug)]
pub enum CacheSlot<K, V> {
    Empty,
    Filled { inputs: K, output: Arc<V> },
}

impl<K, V> Default for CacheSlot<K, V> {
    fn default() -> Self {
        CacheSlot::Empty
    }
}

type InputFn<S, P, K> = Box<dyn FnMut(&S, &P) -> Result<K>>;
type ComputeFn<K, V> = Box<dyn Fn(&K) -> V>;

/// Memoized selector over state `S` and call-site parameters `P`
pub struct Selector<S, P, K, V> {
    inputs: InputFn<S, P, K>,
    compute: ComputeFn<K, V>,
    cache: CacheSlot<K, V>,
    recomputations: usize,
}

/// Build a memoized selector
///
/// `inputs` collects every declared dependency into one key. It may itself
/// call other selectors, which is how selectors compose.
pub fn create_selector<S, P, K, V, I, C>(inputs: I, compute: C) -> Selector<S, P, K, V>
where
    K: PartialEq,
    I: FnMut(&S, &P) -> Result<K> + 'static,
    C: Fn(&K) -> V + 'static,
{
    Selector {
        inputs: Box::new(inputs),
        compute: Box::new(compute),
        cache: CacheSlot::Empty,
        recomputations: 0,
    }
}

impl<S, P, K, V> Selector<S, P, K, V>
where
    K: PartialEq,
{
    /// Return the derived view, recomputing only when the inputs changed
    ///
    /// # Errors
    ///
    /// Propagates errors from the input projections (e.g. a missing branch).
    pub fn select(&mut self, state: &S, params: &P) -> Result<Arc<V>> {
        let key = (self.inputs)(state, params)?;

        if let CacheSlot::Filled { inputs, output } = &self.cache {
            if *inputs == key {
                return Ok(Arc::clone(output));
            }
        }

        let output = Arc::new((self.compute)(&key));
        self.recomputations += 1;
        tracing::trace!(recomputations = self.recomputations, "Selector recomputed");
        self.cache = CacheSlot::Filled {
            inputs: key,
            output: Arc::clone(&output),
        };
        Ok(output)
    }

    /// Number of times the computation has run
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn reset_recomputations(&mut self) {
        self.recomputations = 0;
    }

    /// Drop the cached entry
    pub fn clear_cache(&mut self) {
        self.cache = CacheSlot::Empty;
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.cache, CacheSlot::Filled { .. })
    }
}

impl<S, P, K, V> fmt::Debug for Selector<S, P, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("cached", &matches!(self.cache, CacheSlot::Filled { .. }))
            .field("recomputations", &self.recomputations)
            .finish()
    }
}
