//! Lookups derived mechanically from a variant set: the enumeration of its kinds, and maps keyed
//! by them.
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Index;

use itertools::Itertools;

/// A closed set of tagged variants sharing a discriminant.
pub trait VariantSet {
    /// The discriminant. One value per variant.
    type Kind: Copy + Ord + Debug;

    fn kind(&self) -> Self::Kind;

    /// Every legal discriminant, in declaration order. Implementors derive this from the enum
    /// itself rather than listing kinds by hand.
    fn kinds() -> Vec<Self::Kind>;
}

/// The empty variant set. Nothing inhabits it, so a value of this type proves the branch holding it
/// is unreachable.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
pub enum Never {}

/// The fallback branch: accepts a value that can't exist and produces whatever is needed.
pub fn absurd<T>(never: Never) -> T {
    match never {}
}

impl Display for Never {
    fn fmt(&self, _f: &mut Formatter<'_>) -> fmt::Result {
        absurd(*self)
    }
}

impl VariantSet for Never {
    type Kind = Never;

    fn kind(&self) -> Never {
        *self
    }

    fn kinds() -> Vec<Never> {
        Vec::new()
    }
}

/// A total map from every kind of a variant set to a `V`.
///
/// Built from `VariantSet::kinds`, so it always has exactly one entry per kind: adding a variant
/// adds an entry without anyone touching this code.
#[derive(Clone, Eq, PartialEq)]
pub struct KindMap<K: Ord, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Copy + Ord + Debug, V> KindMap<K, V> {
    /// A map over every kind of `T`, each entry initialised by `init`.
    pub fn for_set<T, F>(mut init: F) -> KindMap<K, V>
    where
        T: VariantSet<Kind = K> + ?Sized,
        F: FnMut(K) -> V,
    {
        KindMap {
            entries: T::kinds().into_iter().map(|k| (k, init(k))).collect(),
        }
    }

    pub fn get(&self, kind: K) -> Option<&V> {
        self.entries.get(&kind)
    }

    pub fn get_mut(&mut self, kind: K) -> Option<&mut V> {
        self.entries.get_mut(&kind)
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn map_values<W, F>(self, mut f: F) -> KindMap<K, W>
    where
        F: FnMut(K, V) -> W,
    {
        KindMap {
            entries: self.entries.into_iter().map(|(k, v)| (k, f(k, v))).collect(),
        }
    }
}

impl<K: Copy + Ord + Debug, V> Index<K> for KindMap<K, V> {
    type Output = V;

    fn index(&self, kind: K) -> &V {
        match self.entries.get(&kind) {
            Some(v) => v,
            // Only reachable if a kind was constructed that `VariantSet::kinds` doesn't list.
            None => panic!("{:?} is not a kind of this variant set", kind),
        }
    }
}

impl<K: Ord + Debug, V: Debug> Debug for KindMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K: Ord + Display, V: Debug> Display for KindMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.entries
                .iter()
                .map(|(k, v)| format!("{}: {:?}", k, v))
                .join(", ")
        )
    }
}

impl<K: Ord, V> IntoIterator for KindMap<K, V> {
    type Item = (K, V);
    type IntoIter = btree_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Group `items` by kind. Every kind of `T` has an entry, even if nothing of that kind was given;
/// within an entry items keep their input order.
pub fn group_by_kind<'a, T, I>(items: I) -> KindMap<T::Kind, Vec<&'a T>>
where
    T: VariantSet + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut groups = KindMap::for_set::<T, _>(|_| Vec::new());
    for item in items {
        if let Some(group) = groups.get_mut(item.kind()) {
            group.push(item);
        }
    }
    groups
}

/// How many items of each kind there are, with zero for absent kinds.
pub fn count_by_kind<'a, T, I>(items: I) -> KindMap<T::Kind, usize>
where
    T: VariantSet + 'a,
    I: IntoIterator<Item = &'a T>,
{
    group_by_kind(items).map_values(|_, group| group.len())
}

/// The distinct kinds actually present in `items`.
pub fn collect_kinds<'a, T, I>(items: I) -> BTreeSet<T::Kind>
where
    T: VariantSet + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| item.kind()).collect()
}

pub fn filter_kind<'a, T, I>(items: I, kind: T::Kind) -> impl Iterator<Item = &'a T>
where
    T: VariantSet + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().filter(move |item| item.kind() == kind)
}
