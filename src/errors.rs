use std::error::Error;

use thiserror::Error;

use crate::graph::NumEdges;

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigraphInvariant {
    #[error("arc ({0}, {1}) has no mirror entry in the reverse adjacency")]
    MissingMirror(u32, u32),

    #[error("stored arc count {stored} disagrees with the adjacency lists ({actual})")]
    ArcCount { stored: NumEdges, actual: NumEdges },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolInvariant {
    #[error("live pool entries {0} and {1} are comparable under inclusion")]
    ComparableEntries(usize, usize),

    #[error("live pool entries already cover the full edge set")]
    CoveringUnion,
}
