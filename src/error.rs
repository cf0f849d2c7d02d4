use thiserror::Error;

/// Errors reported for misuse of the tree's API.
///
/// Absence of a value is not an error; lookups and removals report it as `None`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A 1-indexed rank was zero or greater than the number of stored values.
    #[error("rank {rank} is out of range for a tree of {len} values")]
    RankOutOfRange { rank: usize, len: usize },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
