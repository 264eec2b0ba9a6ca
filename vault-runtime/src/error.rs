use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultToolsError {
    #[error("Artifact load failed: {path}: {message}")]
    ArtifactLoad { path: String, message: String },

    #[error("Unresolved library '{library}' (placeholder {marker})")]
    UnresolvedLibrary { library: String, marker: String },

    #[error("Deployment of {contract} reverted: {reason}")]
    DeploymentReverted { contract: String, reason: String },

    #[error("Value out of range for {field}: {value} does not fit {abi_type}")]
    EncodingRange {
        field: &'static str,
        value: String,
        abi_type: &'static str,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unknown function '{function}' on {contract}")]
    UnknownFunction { contract: String, function: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl VaultToolsError {
    pub(crate) fn artifact(path: impl Into<String>, message: impl ToString) -> Self {
        VaultToolsError::ArtifactLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<alloy::sol_types::Error> for VaultToolsError {
    fn from(e: alloy::sol_types::Error) -> Self {
        VaultToolsError::Decode(e.to_string())
    }
}

impl From<serde_json::Error> for VaultToolsError {
    fn from(e: serde_json::Error) -> Self {
        VaultToolsError::ConfigError(e.to_string())
    }
}

impl From<std::io::Error> for VaultToolsError {
    fn from(e: std::io::Error) -> Self {
        VaultToolsError::ConfigError(format!("IO error: {e}"))
    }
}
