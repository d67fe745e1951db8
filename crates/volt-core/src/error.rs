use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoltError {
    #[error("invalid format of repository: {raw}")]
    InvalidFormat { raw: String },

    #[error("Executable not found in PATH: {name}")]
    ExecutableNotFound { name: String },

    /// Neither `HOME` nor `USERPROFILE` is set. Nothing under the layout can be
    /// derived without it, so callers are expected to abort.
    #[error("Couldn't look up HOME (neither HOME nor USERPROFILE is set)")]
    HomeDirectoryUnresolvable,
}

pub type Result<T> = std::result::Result<T, VoltError>;

impl VoltError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidFormat { .. } => 2,
            Self::ExecutableNotFound { .. } => 3,
            Self::HomeDirectoryUnresolvable => 4,
        }
    }

    /// Whether the process can do anything useful after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::HomeDirectoryUnresolvable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_carries_raw_input() {
        let err = VoltError::InvalidFormat {
            raw: "a/b/c/d".to_string(),
        };
        assert_eq!(err.to_string(), "invalid format of repository: a/b/c/d");
        assert_eq!(err.exit_code(), 2);
        assert!(!err.is_fatal());
    }

    #[test]
    fn only_missing_home_is_fatal() {
        assert!(VoltError::HomeDirectoryUnresolvable.is_fatal());
        assert!(!VoltError::ExecutableNotFound {
            name: "vim".to_string()
        }
        .is_fatal());
        assert_eq!(VoltError::HomeDirectoryUnresolvable.exit_code(), 4);
    }
}
