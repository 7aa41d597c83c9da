//! Vertex subsets and their exhaustive enumeration

use roaring::RoaringBitmap;
use std::fmt;

use super::VertexId;

/// A set of vertex ids
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexSet(RoaringBitmap);

impl VertexSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        u32::try_from(id).is_ok_and(|id| self.0.contains(id))
    }

    /// Add `id`. Returns whether it was newly inserted.
    pub fn insert(&mut self, id: VertexId) -> bool {
        match u32::try_from(id) {
            Ok(id) => self.0.insert(id),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.0.iter().map(|id| id as VertexId)
    }
}

impl FromIterator<VertexId> for VertexSet {
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl fmt::Display for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.iter().map(|id| id.to_string()).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}

/// All subsets of `{0, ..., n-1}`, lazily
///
/// Subset number `k` contains vertex `i` exactly when bit `i` of `k` is set,
/// and subsets come in ascending order of `k`, starting with the empty set.
/// The counter is a bit vector, so any `n` works; only the time does not.
#[derive(Clone, Debug)]
pub struct VertexSubsets {
    mask: Vec<bool>,
    done: bool,
}

impl VertexSubsets {
    pub fn new(n: usize) -> Self {
        Self {
            mask: vec![false; n],
            done: false,
        }
    }
}

impl Iterator for VertexSubsets {
    type Item = VertexSet;

    fn next(&mut self) -> Option<VertexSet> {
        if self.done {
            return None;
        }
        let current = self
            .mask
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit)
            .map(|(id, _)| id)
            .collect();

        // Increment: clear trailing ones, set the first zero
        match self.mask.iter().position(|bit| !bit) {
            Some(first_zero) => {
                self.mask[..first_zero].iter_mut().for_each(|bit| *bit = false);
                self.mask[first_zero] = true;
            }
            None => self.done = true,
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let n = self.mask.len();
        if n >= usize::BITS as usize {
            return (usize::MAX, None);
        }
        let taken = self
            .mask
            .iter()
            .rev()
            .fold(0usize, |acc, bit| (acc << 1) | usize::from(*bit));
        let remaining = (1usize << n) - taken;
        (remaining, Some(remaining))
    }
}
