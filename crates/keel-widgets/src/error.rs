//! Configuration errors.
//!
//! Components validate their configuration once, at construction. Runtime
//! problems (a failed fetch, an empty result) are the caller's state and are
//! rendered, not returned.

/// Rejected component configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A table needs at least one column.
    #[error("table has no columns")]
    EmptyColumns,

    /// Two columns share an id.
    #[error("duplicate column id `{0}`")]
    DuplicateColumn(String),

    /// A column id used in sort, group or visibility settings does not exist.
    #[error("unknown column `{column}` in {setting}")]
    UnknownColumn {
        /// The offending id.
        column: String,
        /// Which setting referenced it.
        setting: &'static str,
    },

    /// A column accessor key is empty.
    #[error("column `{0}` has an empty accessor")]
    MissingAccessor(String),

    /// Page sizes must be at least one.
    #[error("invalid page size {0}")]
    InvalidPageSize(usize),

    /// Dropdown items nest one level at most.
    #[error("dropdown item `{0}` nests deeper than one level")]
    NestedTooDeep(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::EmptyColumns.to_string(), "table has no columns");
        assert_eq!(
            Error::UnknownColumn {
                column: "age".into(),
                setting: "sort_by",
            }
            .to_string(),
            "unknown column `age` in sort_by"
        );
        assert_eq!(
            Error::NestedTooDeep("Export".into()).to_string(),
            "dropdown item `Export` nests deeper than one level"
        );
    }
}
