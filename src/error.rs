//! Error types for the ordered-set containers.

/// Errors that can be raised by the containers in this crate.
///
/// `DuplicateValue` and `NotFound` are deliberately absent: per the
/// container contracts, an unsuccessful `insert` or a missing `find`/
/// `remove`/`min`/`max`/`peek` is an expected outcome, reported through a
/// `bool` or `Option` return rather than an `Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raised by `try_new` when no comparator was supplied.
    #[error("comparator must be supplied to construct a container")]
    InvalidComparator,

    /// Raised internally when a rotation is asked to pivot on a child that
    /// is not present. Reaching this from a public operation indicates a
    /// broken BST/RBT invariant, not a condition a caller can recover from.
    #[error("rotation requires a present child in the needed direction")]
    RotationPrecondition,
}
