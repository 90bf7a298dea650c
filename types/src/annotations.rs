//! Small typed helpers: arithmetic, string building, and lookups.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

#[must_use]
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

#[must_use]
pub fn concat(a: &str, b: &str) -> String {
    let mut out = String::with_capacity(a.len() + b.len());
    out.push_str(a);
    out.push_str(b);
    out
}

/// Render a float in round-trip notation.
///
/// Whole numbers keep their fractional part (`1.0`, not `1`).
#[must_use]
pub fn to_str(n: f64) -> String {
    format!("{n:?}")
}

/// Sum of a float slice. Empty input sums to `0.0`.
#[must_use]
pub fn sum_list(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// An integer or a float, for lists that mix both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

#[must_use]
pub fn sum_mixed_list(values: &[Number]) -> f64 {
    values.iter().map(|n| n.as_f64()).sum()
}

/// Build a closure that scales its argument by `multiplier`.
pub fn make_multiplier(multiplier: f64) -> impl Fn(f64) -> f64 {
    move |value| value * multiplier
}

/// Anything with a length.
///
/// Strings count characters, not bytes.
pub trait Sequence {
    fn length(&self) -> usize;
}

impl Sequence for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl Sequence for String {
    fn length(&self) -> usize {
        self.as_str().length()
    }
}

impl<T> Sequence for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Sequence for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    fn length(&self) -> usize {
        N
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    fn length(&self) -> usize {
        (**self).length()
    }
}

/// Pair each element with its length, preserving input order.
pub fn element_length<I>(items: I) -> Vec<(I::Item, usize)>
where
    I: IntoIterator,
    I::Item: Sequence,
{
    items
        .into_iter()
        .map(|item| {
            let len = item.length();
            (item, len)
        })
        .collect()
}

/// Key/value lookup over any map shape.
pub trait Mapping<K, V> {
    fn lookup(&self, key: &K) -> Option<&V>;
}

impl<K: Eq + Hash, V, S: BuildHasher> Mapping<K, V> for HashMap<K, V, S> {
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
}

impl<K: Ord, V> Mapping<K, V> for BTreeMap<K, V> {
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
}

/// The value stored under `key`, or `default` when the key is absent.
pub fn safely_get_value<'a, M, K, V>(map: &'a M, key: &K, default: Option<&'a V>) -> Option<&'a V>
where
    M: Mapping<K, V> + ?Sized,
{
    map.lookup(key).or(default)
}
