use std::ops::Index;

use petgraph::graph::{IndexType, NodeIndex};

use crate::automaton::graph::StateId;

pub trait IndexMapData: Clone + PartialEq {
    fn empty() -> Self;
}

impl<T: Clone + PartialEq> IndexMapData for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl IndexMapData for usize {
    fn empty() -> Self {
        0
    }
}

pub trait IndexMapKey: Copy {
    fn index(self) -> usize;
}

impl<T: IndexType> IndexMapKey for NodeIndex<T> {
    fn index(self) -> usize {
        NodeIndex::index(self)
    }
}

/// A map over a compact index space, backed by a [Vec].
/// Keys that were never inserted hold [IndexMapData::empty].
#[derive(Debug, Clone)]
pub struct IndexMap<K: IndexMapKey, V: IndexMapData> {
    data: Vec<V>,
    _marker: std::marker::PhantomData<K>,
}

impl<K: IndexMapKey, V: IndexMapData> IndexMap<K, V> {
    pub fn new(max_index: usize) -> Self {
        IndexMap {
            data: vec![V::empty(); max_index],
            _marker: std::marker::PhantomData,
        }
    }

    pub fn has_key(&self, key: K) -> bool {
        let index = key.index();

        index < self.data.len() && self.data[index] != V::empty()
    }

    pub fn get(&self, key: K) -> &V {
        &self.data[key.index()]
    }

    pub fn get_mut(&mut self, key: K) -> &mut V {
        &mut self.data[key.index()]
    }

    /// Inserts a value, growing the map if the key lies past its end.
    pub fn insert(&mut self, key: K, value: V) {
        let index = key.index();
        if index >= self.data.len() {
            self.data.resize(index + 1, V::empty());
        }
        self.data[index] = value;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: IndexMapKey, V: IndexMapData> Index<K> for IndexMap<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &Self::Output {
        self.get(key)
    }
}

/// Maps the states of a source automaton to their copies in a target
/// automaton.
pub type StateMap = IndexMap<StateId, Option<StateId>>;

/// A set over a compact index space, backed by a [Vec] of flags.
#[derive(Debug, Clone)]
pub struct IndexSet<K: IndexMapKey> {
    data: Vec<bool>,
    _marker: std::marker::PhantomData<K>,
}

impl<K: IndexMapKey> IndexSet<K> {
    pub fn new(max_index: usize) -> Self {
        IndexSet {
            data: vec![false; max_index],
            _marker: std::marker::PhantomData,
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.data.get(key.index()).copied().unwrap_or(false)
    }

    /// Inserts a key. Returns true if the key was not contained before.
    pub fn insert(&mut self, key: K) -> bool {
        let index = key.index();
        if index >= self.data.len() {
            self.data.resize(index + 1, false);
        }

        !std::mem::replace(&mut self.data[index], true)
    }
}
