use std::path::PathBuf;

/// Boxed error raised by a user model. Passed through untranslated.
pub type ModelError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a sweep
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// A parameter spec (or the list of them) cannot produce a grid
    #[error("invalid parameter spec: {0}")]
    InvalidSpec(String),

    /// The named model is not available to invoke or construct
    #[error("model '{0}' is not callable")]
    NotCallable(String),

    #[error("expected {expected} output names for the recorded outputs, got {actual}")]
    OutputNameMismatch { expected: usize, actual: usize },

    /// An output name that cannot label its own output area
    #[error("output name '{0}' is empty, reserved or used more than once")]
    InvalidOutputName(String),

    /// The model returned a different number of outputs than the selection expects
    #[error("model returned {actual} outputs, expected {expected}")]
    OutputCountMismatch { expected: usize, actual: usize },

    /// An object model has no value for a declared output after its run step
    #[error("model has no output attribute '{0}'")]
    AttributeMissing(String),

    #[error(
        "directory '{}' does not exist; enable create_if_missing to have it created",
        .0.display()
    )]
    LocationMissing(PathBuf),

    /// A fixed parameter shares its name with a swept parameter
    #[error("fixed parameter '{0}' collides with a swept parameter")]
    ParameterCollision(String),

    /// The model asked for a parameter that is neither swept nor fixed
    #[error("parameter '{0}' is not bound")]
    UnboundParameter(String),

    #[error(transparent)]
    Model(ModelError),

    #[error("render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SweepError {
    /// Wrap an arbitrary error raised inside a model.
    pub fn model<E>(err: E) -> Self
    where
        E: Into<ModelError>,
    {
        SweepError::Model(err.into())
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
