//! Group sizes and grouping by counts

use super::errors::{DivisionError, Result};
use serde::{Deserialize, Serialize};

/// Group size for fuse and partition
///
/// `Infinite` takes everything that is left. Serialized as an integer, or
/// `null` for infinite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum Count {
    Finite(i64),
    Infinite,
}

impl From<Option<i64>> for Count {
    fn from(count: Option<i64>) -> Self {
        count.map_or(Count::Infinite, Count::Finite)
    }
}

impl From<Count> for Option<i64> {
    fn from(count: Count) -> Self {
        match count {
            Count::Finite(n) => Some(n),
            Count::Infinite => None,
        }
    }
}

impl From<i64> for Count {
    fn from(n: i64) -> Self {
        Count::Finite(n)
    }
}

pub(crate) fn validate_counts(counts: &[Count]) -> Result<()> {
    match counts
        .iter()
        .find(|count| matches!(count, Count::Finite(n) if *n <= 0))
    {
        Some(Count::Finite(n)) => Err(DivisionError::InvalidCount(*n)),
        _ => Ok(()),
    }
}

/// Result of cutting a sequence into groups
#[derive(Debug)]
pub(crate) struct Grouping<T> {
    /// Groups filled to their declared count
    pub full: Vec<Vec<T>>,
    /// Items left over: an incomplete last group, or everything past a
    /// non-cyclic count list
    pub leftover: Vec<T>,
}

/// Cut `items` into consecutive groups sized by `counts`
///
/// Counts must be validated and non-empty.
pub(crate) fn group_by_counts<T>(items: Vec<T>, counts: &[Count], cyclic: bool) -> Grouping<T> {
    let mut full = Vec::new();
    let mut leftover = Vec::new();
    let mut remaining = items.into_iter().peekable();
    let mut k = 0;
    while remaining.peek().is_some() {
        if k >= counts.len() && !cyclic {
            leftover = remaining.collect();
            break;
        }
        let count = counts[k % counts.len()];
        k += 1;
        match count {
            Count::Infinite => full.push(remaining.by_ref().collect()),
            Count::Finite(n) => {
                let size = n as usize;
                let group: Vec<T> = remaining.by_ref().take(size).collect();
                if group.len() < size {
                    leftover = group;
                    break;
                }
                full.push(group);
            }
        }
    }
    Grouping { full, leftover }
}
