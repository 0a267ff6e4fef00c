use thiserror::Error;

/// Precondition violations raised at the boundary where unvalidated data
/// enters the engine or the application state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("function name must not be empty")]
    EmptyName,

    #[error("project name must not be empty")]
    EmptyProjectName,

    #[error("project id must not be empty")]
    EmptyProjectId,

    #[error("unknown function type '{0}' (expected ILF, EIF, EI, EO or EQ)")]
    InvalidFunctionType(String),

    #[error("unknown complexity '{0}' (expected low, medium or high)")]
    InvalidComplexity(String),

    #[error("unknown general characteristic '{0}'")]
    UnknownCharacteristic(String),

    #[error("expected {expected} general characteristics, got {actual}")]
    CharacteristicCount { expected: usize, actual: usize },

    #[error("general characteristic '{characteristic}' rated more than once")]
    DuplicateCharacteristic { characteristic: String },

    #[error("degree of influence for '{characteristic}' must be 0-5, got {value}")]
    DegreeOutOfRange { characteristic: String, value: i64 },

    #[error("characteristic index {0} out of range (0-13)")]
    CharacteristicIndex(usize),

    #[error("unknown project '{0}'")]
    UnknownProject(String),

    #[error("project id '{0}' already exists")]
    DuplicateProject(String),

    #[error("no project selected")]
    NoProjectSelected,
}
