use thiserror::Error;

/// Reasons an upload is rejected before anything is persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Header row lacks one or more required columns.
    #[error("CSV must contain columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The upload parsed but no row survived conversion.
    #[error("no usable rows in upload")]
    EmptyInput,
}

impl IngestError {
    /// Columns reported missing, empty for non-schema failures.
    #[must_use]
    pub fn missing_columns(&self) -> &[String] {
        match self {
            Self::Schema { missing } => missing,
            Self::EmptyInput => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
