use thiserror::Error;

/// An error looking up or constructing a labeled array or collection.
///
/// All of these are caller errors: nothing is retried and no partial state is
/// left behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The dimension name is not present in the collection or array.
    #[error("unknown dimension `{0}`")]
    UnknownDimension(String),
    /// The variable name is not present in the collection.
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    /// An index or position falls outside a dimension's length, or the number
    /// of indices does not match the rank.
    #[error("index {index} out of range for `{dimension}` with length {len}")]
    IndexOutOfRange {
        /// The dimension the index was applied to. For a rank mismatch this
        /// is the whole dimension tuple.
        dimension: String,
        /// The offending index (or the number of indices on rank mismatch).
        index: usize,
        /// The dimension length (or the rank on rank mismatch).
        len: usize,
    },
    /// The dimension exists but carries no coordinate labels.
    #[error("no coordinate labels defined for dimension `{0}`")]
    NoCoordinateDefined(String),
    /// The attribute key is absent.
    #[error("missing attribute `{0}`")]
    MissingAttribute(String),
    /// Declared dimensions disagree with the shape of the data.
    #[error("shape mismatch for `{name}`: {detail}")]
    ShapeMismatch {
        /// The array, dimension or coordinate being validated.
        name: String,
        /// What disagreed.
        detail: String,
    },
    /// A name appears twice where names must be unique.
    #[error("duplicate name `{0}`")]
    DuplicateName(String),
    /// Two members declare different coordinate labels for one dimension.
    #[error("conflicting coordinate labels for dimension `{0}`")]
    CoordinateConflict(String),
}

/// Result alias with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn out_of_range(dimension: &str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            dimension: dimension.to_owned(),
            index,
            len,
        }
    }

    pub(crate) fn shape_mismatch(name: &str, detail: String) -> Self {
        Self::ShapeMismatch {
            name: name.to_owned(),
            detail,
        }
    }
}
