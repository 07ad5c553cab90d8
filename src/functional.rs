//! # Lazy Sequence Combinators
//!
//! [`FunctionalIterator`] wraps any single-use, forward-only source and
//! exposes filter/map/reduce/sort style combinators on it. The combinators
//! live on the [`Fluent`] trait so that specialized sequences (such as
//! [`FileIterator`](crate::FileIterator)) get them too and keep their own
//! type through the chain:
//!
//! ```rust
//! use fluentfs::{Fluent, FunctionalIterator};
//!
//! let squares_of_evens: Vec<u32> = FunctionalIterator::new(1..=10)
//!     .filter(|n| n % 2 == 0)
//!     .map(|n| n * n)
//!     .sort_desc()
//!     .to_list();
//! assert_eq!(squares_of_evens, [100, 64, 36, 16, 4]);
//! ```
//!
//! ## Laziness
//!
//! `filter` and `map` compose a new source without pulling anything. `sort_*`
//! and `top_n` drain the input but hand back a fresh sequence over the
//! materialized values. `reduce`, `sum`, `len`, `min`, `max`, `for_each`,
//! `to_list` and `to_table` are terminal.
//!
//! Every combinator takes `self` by value: a sequence is consumed exactly
//! once and cannot be restarted.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::iter::Sum;

use crate::{FsError, Table};

/// Boxed, forward-only source backing every fluent sequence.
pub type Source<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Combinators shared by every lazy sequence type.
///
/// Implementors only provide the conversions to and from a boxed [`Source`];
/// every combinator that keeps the element type rebuilds `Self`, so
/// domain-specific methods stay available after `filter`, `map` or `sort`.
pub trait Fluent<'a>: Sized + 'a {
    /// Element type.
    type Item: 'a;

    /// Rebuild this sequence type around a transformed source.
    fn from_source(source: Source<'a, Self::Item>) -> Self;

    /// Give up the wrapper and return the underlying source.
    fn into_source(self) -> Source<'a, Self::Item>;

    /// Keep the elements for which `predicate` returns `true`.
    fn filter<P>(self, predicate: P) -> Self
    where
        P: FnMut(&Self::Item) -> bool + 'a,
    {
        Self::from_source(Box::new(self.into_source().filter(predicate)))
    }

    /// Transform every element, keeping the element type and `Self`.
    fn map<F>(self, f: F) -> Self
    where
        F: FnMut(Self::Item) -> Self::Item + 'a,
    {
        Self::from_source(Box::new(self.into_source().map(f)))
    }

    /// Transform every element into another type, yielding a plain
    /// [`FunctionalIterator`].
    fn map_to_base<U, F>(self, f: F) -> FunctionalIterator<'a, U>
    where
        U: 'a,
        F: FnMut(Self::Item) -> U + 'a,
    {
        FunctionalIterator::new(self.into_source().map(f))
    }

    /// Fold every element into an accumulator, starting from `seed`.
    fn reduce<S, F>(self, seed: S, f: F) -> S
    where
        F: FnMut(S, Self::Item) -> S,
    {
        self.into_source().fold(seed, f)
    }

    /// Sum all elements.
    ///
    /// Summing into `Result<T, E>` stops at the first error.
    fn sum<S>(self) -> S
    where
        S: Sum<Self::Item>,
    {
        self.into_source().sum()
    }

    /// Number of elements.
    fn len(self) -> usize {
        self.reduce(0, |count, _| count + 1)
    }

    /// Smallest element, or `None` if the sequence is empty.
    fn min(self) -> Option<Self::Item>
    where
        Self::Item: Ord,
    {
        self.into_source().min()
    }

    /// Largest element, or `None` if the sequence is empty.
    fn max(self) -> Option<Self::Item>
    where
        Self::Item: Ord,
    {
        self.into_source().max()
    }

    /// Sort ascending. Equal elements keep their relative order.
    fn sort_asc(self) -> Self
    where
        Self::Item: Ord,
    {
        let mut items = self.to_list();
        items.sort();
        Self::from_source(Box::new(items.into_iter()))
    }

    /// Alias for [`sort_asc`](Self::sort_asc).
    fn sort(self) -> Self
    where
        Self::Item: Ord,
    {
        self.sort_asc()
    }

    /// Sort descending. Equal elements keep their relative order.
    fn sort_desc(self) -> Self
    where
        Self::Item: Ord,
    {
        let mut items = self.to_list();
        items.sort_by(|a, b| b.cmp(a));
        Self::from_source(Box::new(items.into_iter()))
    }

    /// Sort ascending by a key computed once per element.
    fn sort_asc_by_key<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        let mut items = self.to_list();
        items.sort_by_cached_key(key);
        Self::from_source(Box::new(items.into_iter()))
    }

    /// Sort descending by a key computed once per element.
    fn sort_desc_by_key<K, F>(self, mut key: F) -> Self
    where
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        let mut items = self.to_list();
        items.sort_by_cached_key(|item| Reverse(key(item)));
        Self::from_source(Box::new(items.into_iter()))
    }

    /// The `n` largest elements, largest first.
    ///
    /// Uses a bounded heap instead of a full sort. Ties are broken in
    /// favour of earlier elements, so the result equals the first `n`
    /// elements of [`sort_desc`](Self::sort_desc).
    fn top_n(self, n: usize) -> Self
    where
        Self::Item: Ord,
    {
        if n == 0 {
            return Self::from_source(Box::new(std::iter::empty()));
        }

        // Min-heap over (value, later-is-smaller) keeps the current best n.
        let mut heap: BinaryHeap<Reverse<(Self::Item, Reverse<usize>)>> =
            BinaryHeap::with_capacity(n);
        for (index, item) in self.into_source().enumerate() {
            let candidate = Reverse((item, Reverse(index)));
            if heap.len() < n {
                heap.push(candidate);
            } else if heap.peek().is_some_and(|smallest| candidate < *smallest) {
                heap.pop();
                heap.push(candidate);
            }
        }

        let best = heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse((item, _))| item);
        Self::from_source(Box::new(best))
    }

    /// Call `f` on every element, in order.
    fn for_each<F>(self, f: F)
    where
        F: FnMut(Self::Item),
    {
        self.into_source().for_each(f);
    }

    /// Collect the elements, in order.
    fn to_list(self) -> Vec<Self::Item> {
        self.into_source().collect()
    }

    /// Build a [`Table`] with one row per element.
    ///
    /// `row` must return exactly one value per column.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if the columns are invalid or a row has the wrong arity
    fn to_table<C, S, R, X, F>(self, col_names: C, mut row: F) -> Result<Table, FsError>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(Self::Item) -> R,
        R: IntoIterator<Item = X>,
        X: ToString,
    {
        let mut table = Table::new(col_names)?;
        for item in self.into_source() {
            table.add_row(row(item))?;
        }
        Ok(table)
    }
}

/// Generic lazy sequence over any element type.
///
/// The inherent [`map`](Self::map) may change the element type; use
/// [`Fluent::map`] through a generic bound when the type must be kept.
pub struct FunctionalIterator<'a, T> {
    source: Source<'a, T>,
}

impl<'a, T: 'a> FunctionalIterator<'a, T> {
    /// Wrap a source. Nothing is pulled from it until a terminal operation runs.
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            source: Box::new(source.into_iter()),
        }
    }

    /// Transform every element, possibly into another type.
    pub fn map<U, F>(self, f: F) -> FunctionalIterator<'a, U>
    where
        U: 'a,
        F: FnMut(T) -> U + 'a,
    {
        self.map_to_base(f)
    }
}

impl<'a, T: 'a> Fluent<'a> for FunctionalIterator<'a, T> {
    type Item = T;

    fn from_source(source: Source<'a, T>) -> Self {
        Self { source }
    }

    fn into_source(self) -> Source<'a, T> {
        self.source
    }
}

impl<'a, T: 'a> IntoIterator for FunctionalIterator<'a, T> {
    type Item = T;
    type IntoIter = Source<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.source
    }
}

impl<T> std::fmt::Debug for FunctionalIterator<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionalIterator").finish_non_exhaustive()
    }
}
