//! Transform error types.

/// Errors produced by transform construction and stream plumbing.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// The configuration carried no default-instruction factory.
    #[error("missing default instruction in transform configuration")]
    MissingDefaultInstruction,

    /// I/O failure while driving a reader or writer.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_default_instruction_names_the_configuration() {
        let err = TransformError::MissingDefaultInstruction;
        assert!(err.to_string().contains("default instruction"));
    }

    #[test]
    fn test_io_error_passthrough() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TransformError::from(io);
        assert_eq!(err.to_string(), "no such file");
    }
}
