use thiserror::Error;

#[derive(Error, Debug)]
pub enum NestedZipError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read input {path}: {source}")]
    InputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Opening, writing or finalizing either archive level, or the storage handle.
    Io,
    /// Contract input that could not be read or parsed.
    Input,
    Config,
}

impl NestedZipError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NestedZipError::ZipError(_) | NestedZipError::IoError(_) => ErrorCategory::Io,
            NestedZipError::InputError { .. } | NestedZipError::SerializationError(_) => {
                ErrorCategory::Input
            }
            NestedZipError::ConfigError { .. }
            | NestedZipError::InvalidConfigValueError { .. }
            | NestedZipError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn is_io_failure(&self) -> bool {
        self.category() == ErrorCategory::Io
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NestedZipError::ZipError(zip::result::ZipError::InvalidArchive(_)) => {
                "Check for contracts sharing the same number and sequence, or repeated filenames within one contract"
            }
            NestedZipError::ZipError(_) | NestedZipError::IoError(_) => {
                "Check that the output directory exists, is writable and has free space"
            }
            NestedZipError::InputError { .. } => {
                "Check that the input file exists and is readable"
            }
            NestedZipError::SerializationError(_) => {
                "Check that the input file is a JSON array of contracts"
            }
            NestedZipError::ConfigError { .. } => "Check the configuration file syntax",
            NestedZipError::InvalidConfigValueError { .. } => {
                "Correct the reported configuration value"
            }
            NestedZipError::MissingConfigError { .. } => {
                "Provide the value on the command line or in the configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Failed to write the archive: {}", self),
            ErrorCategory::Input => format!("Failed to read contracts: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Io => 2,
            ErrorCategory::Input | ErrorCategory::Config => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, NestedZipError>;
