//! Nested sequences and flattening

use serde::{Deserialize, Serialize};

/// A leaf or an ordered group of nested values
///
/// Serialized untagged: a group is a JSON array, a leaf is whatever `T`
/// serializes to. Leaves that are themselves arrays (duration pairs) are
/// tried first, so `[7, 8]` reads as one leaf and `[[7, 8]]` as a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Item(T),
    Group(Vec<Nested<T>>),
}

/// How many levels of grouping `flatten` removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum Depth {
    Levels(usize),
    #[default]
    Unbounded,
}

impl Depth {
    fn decrement(self) -> Self {
        match self {
            Depth::Levels(n) => Depth::Levels(n.saturating_sub(1)),
            Depth::Unbounded => Depth::Unbounded,
        }
    }
}

/// `null` means unbounded
impl From<Option<usize>> for Depth {
    fn from(levels: Option<usize>) -> Self {
        levels.map_or(Depth::Unbounded, Depth::Levels)
    }
}

impl From<Depth> for Option<usize> {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Levels(n) => Some(n),
            Depth::Unbounded => None,
        }
    }
}

impl<T> Nested<T> {
    pub fn is_group(&self) -> bool {
        matches!(self, Nested::Group(_))
    }

    pub fn as_item(&self) -> Option<&T> {
        match self {
            Nested::Item(item) => Some(item),
            Nested::Group(_) => None,
        }
    }

    /// Leaves in depth-first order
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            Nested::Item(item) => out.push(item),
            Nested::Group(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn into_leaves(self) -> Vec<T> {
        match self {
            Nested::Item(item) => vec![item],
            Nested::Group(children) => children.into_iter().flat_map(Nested::into_leaves).collect(),
        }
    }

    /// Same shape, every leaf mapped
    pub fn map<U, F: FnMut(T) -> U>(self, f: &mut F) -> Nested<U> {
        match self {
            Nested::Item(item) => Nested::Item(f(item)),
            Nested::Group(children) => {
                Nested::Group(children.into_iter().map(|child| child.map(f)).collect())
            }
        }
    }

    pub fn try_map<U, E, F: FnMut(T) -> Result<U, E>>(self, f: &mut F) -> Result<Nested<U>, E> {
        match self {
            Nested::Item(item) => f(item).map(Nested::Item),
            Nested::Group(children) => children
                .into_iter()
                .map(|child| child.try_map(f))
                .collect::<Result<Vec<_>, E>>()
                .map(Nested::Group),
        }
    }
}

impl<T> From<T> for Nested<T> {
    fn from(item: T) -> Self {
        Nested::Item(item)
    }
}

/// Remove `depth` levels of grouping, keeping left-to-right order
///
/// `Levels(0)` returns the input unchanged. Flattening a sequence that is
/// already flat at that depth is a no-op.
pub fn flatten<T>(items: Vec<Nested<T>>, depth: Depth) -> Vec<Nested<T>> {
    if depth == Depth::Levels(0) {
        return items;
    }
    items
        .into_iter()
        .flat_map(|item| match item {
            Nested::Item(_) => vec![item],
            Nested::Group(children) => flatten(children, depth.decrement()),
        })
        .collect()
}

/// Every leaf of a sequence in depth-first order
pub fn leaves<T>(items: &[Nested<T>]) -> Vec<&T> {
    items.iter().flat_map(Nested::leaves).collect()
}

pub fn into_leaves<T>(items: Vec<Nested<T>>) -> Vec<T> {
    items.into_iter().flat_map(Nested::into_leaves).collect()
}
