//! Error taxonomy for the benchmark harness.

use thiserror::Error;

/// Errors raised while configuring or running a benchmark sweep.
///
/// Degenerate measurements (an undefined speedup, disagreeing kernels) are
/// results, not errors, and never appear here.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A sample buffer of the requested length could not be obtained.
    ///
    /// `bytes` is `None` when the byte count itself does not fit in `usize`.
    #[error("memory allocation failed for n = {size} ({})", describe_bytes(.bytes))]
    Allocation { size: usize, bytes: Option<usize> },

    /// A kernel cannot run on this machine.
    #[error("kernel '{kernel}' cannot run here: missing {feature}")]
    Capability {
        kernel: &'static str,
        feature: &'static str,
    },

    #[error("unknown kernel '{name}'")]
    UnknownKernel { name: String },

    #[error("invalid configuration for '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },
}

impl BenchError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            BenchError::Allocation { .. } => 1,
            BenchError::Capability { .. } => 2,
            BenchError::UnknownKernel { .. } | BenchError::InvalidConfig { .. } => 64,
        }
    }
}

fn describe_bytes(bytes: &Option<usize>) -> String {
    match bytes {
        Some(bytes) => format!("{} bytes per buffer", bytes),
        None => "byte count overflows usize".to_string(),
    }
}

pub type BenchResult<T> = Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_message_names_size() {
        let err = BenchError::Allocation {
            size: 1 << 28,
            bytes: Some(8 << 28),
        };
        let message = err.to_string();
        assert!(message.contains("n = 268435456"));
        assert!(message.contains("2147483648 bytes per buffer"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_allocation_message_for_overflowing_byte_count() {
        let err = BenchError::Allocation {
            size: usize::MAX,
            bytes: None,
        };
        let message = err.to_string();
        assert!(message.contains(&format!("n = {}", usize::MAX)));
        assert!(message.contains("overflows usize"));
        assert!(!message.contains("bytes per buffer"));
    }

    #[test]
    fn test_exit_codes_are_nonzero() {
        let errors = [
            BenchError::Capability {
                kernel: "x86_64-avx2",
                feature: "avx2",
            },
            BenchError::UnknownKernel {
                name: "nope".to_string(),
            },
            BenchError::InvalidConfig {
                field: "trials",
                message: "must be positive".to_string(),
            },
        ];
        for err in &errors {
            assert_ne!(err.exit_code(), 0, "{}", err);
        }
    }
}
