use thiserror::Error;

/// Protocol errors returned to the caller as an `ErrorResponse` document.
///
/// Every variant is a client-input error and maps to HTTP 400. The `Display`
/// output is the `Message` element of the rendered document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElbError {
    /// The `Action` field named no known action.
    #[error("Unrecognized Action")]
    UnrecognizedAction,

    /// A required field is missing, or a composition rule was violated.
    #[error("{0}")]
    Validation(String),

    #[error("There is no ACTIVE Load Balancer named '{0}'")]
    LoadBalancerNotFound(String),

    #[error("InvalidInstance found in [{0}]. Invalid id: \"{0}\"")]
    InvalidInstance(String),
}

impl ElbError {
    /// A required field was absent or empty.
    pub fn missing_field(field: &str) -> Self {
        ElbError::Validation(format!("{} is required.", field))
    }

    /// Both fields of a mutually exclusive pair were given.
    pub fn conflicting_fields(first: &str, second: &str) -> Self {
        ElbError::Validation(format!(
            "Only one of {} or {} may be specified",
            first, second
        ))
    }

    /// Neither field of a mutually exclusive pair was given.
    pub fn missing_one_of(first: &str, second: &str) -> Self {
        ElbError::Validation(format!(
            "Either {} or {} must be specified",
            first, second
        ))
    }

    /// The `Code` element of the rendered error.
    pub fn code(&self) -> &'static str {
        match self {
            ElbError::UnrecognizedAction => "InvalidParameterValue",
            ElbError::Validation(_) => "ValidationError",
            ElbError::LoadBalancerNotFound(_) => "LoadBalancerNotFound",
            ElbError::InvalidInstance(_) => "InvalidInstance",
        }
    }

    /// HTTP status sent alongside the error document.
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// Infrastructure errors: anything that is not part of the protocol taxonomy.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
