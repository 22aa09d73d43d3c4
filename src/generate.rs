//! QR generation orchestration.
//!
//! The single-shot, stateless core shared by both surfaces: validate the
//! request, encode through the backend, render, hand back the bytes. The CLI
//! additionally calls [`write_image`] to put the bytes on disk; the web
//! surface streams them directly.
//!
//! Error taxonomy:
//! - invalid input ([`GenerateError::EmptyPayload`], [`GenerateError::SizeOutOfRange`],
//!   [`GenerateError::BorderOutOfRange`]) — the caller must fix the request;
//!   the backend is never invoked.
//! - encoding failure ([`GenerateError::Encoding`]) — the library cannot
//!   encode this payload/parameter combination, e.g. capacity exceeded.
//! - IO failure ([`GenerateError::Write`]) — the output file could not be
//!   written.
//!
//! Generation is deterministic, so nothing here retries.

use crate::encoding::{BackendError, QrBackend, RenderParams};
use crate::request::{GenerationRequest, GenerationResult, MAX_BORDER, MAX_MODULE_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("no data provided to encode")]
    EmptyPayload,
    #[error("module size must be between 1 and {MAX_MODULE_SIZE}, got {0}")]
    SizeOutOfRange(u32),
    #[error("border must be at most {MAX_BORDER} modules, got {0}")]
    BorderOutOfRange(u32),
    #[error(transparent)]
    Encoding(#[from] BackendError),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Whether the error is the caller's to fix (bad payload or parameters),
    /// as opposed to an encoding or IO failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            GenerateError::EmptyPayload
                | GenerateError::SizeOutOfRange(_)
                | GenerateError::BorderOutOfRange(_)
        )
    }
}

/// Generate a QR image for `request`.
///
/// Validates, encodes, renders. The payload is treated as opaque text — a
/// string that happens not to be a URL is encoded as-is.
pub fn generate(
    backend: &impl QrBackend,
    request: &GenerationRequest,
) -> Result<GenerationResult, GenerateError> {
    let payload = request.payload.trim();
    if payload.is_empty() {
        return Err(GenerateError::EmptyPayload);
    }
    if request.size == 0 || request.size > MAX_MODULE_SIZE {
        return Err(GenerateError::SizeOutOfRange(request.size));
    }
    if request.border > MAX_BORDER {
        return Err(GenerateError::BorderOutOfRange(request.border));
    }

    let matrix = backend.encode(payload, request.level)?;
    let bytes = backend.render(
        &matrix,
        &RenderParams {
            module_size: request.size,
            border: request.border,
            format: request.format,
        },
    )?;

    Ok(GenerationResult {
        bytes,
        format: request.format,
    })
}

/// Write a generation result to `path`, creating missing parent directories.
///
/// Exactly one file per invocation; nothing else is persisted.
pub fn write_image(result: &GenerationResult, path: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &result.bytes).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::backend::tests::{tiny_matrix, MockBackend, RecordedOp};
    use crate::request::{ErrorCorrection, OutputFormat};

    #[test]
    fn empty_payload_rejected_before_backend() {
        let backend = MockBackend::new();
        let err = generate(&backend, &GenerationRequest::new("")).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyPayload));
        assert!(err.is_invalid_input());
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn whitespace_payload_rejected() {
        let backend = MockBackend::new();
        let err = generate(&backend, &GenerationRequest::new("  \t\n ")).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyPayload));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn payload_is_trimmed_before_encoding() {
        let backend = MockBackend::with_matrices(vec![tiny_matrix()]);
        generate(&backend, &GenerationRequest::new("  hello  ")).unwrap();

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode { text, .. } if text == "hello"
        ));
    }

    #[test]
    fn size_bounds_enforced() {
        let backend = MockBackend::new();

        let zero = GenerationRequest {
            size: 0,
            ..GenerationRequest::new("hello")
        };
        assert!(matches!(
            generate(&backend, &zero).unwrap_err(),
            GenerateError::SizeOutOfRange(0)
        ));

        let huge = GenerationRequest {
            size: MAX_MODULE_SIZE + 1,
            ..GenerationRequest::new("hello")
        };
        let err = generate(&backend, &huge).unwrap_err();
        assert!(matches!(err, GenerateError::SizeOutOfRange(_)));
        assert!(err.is_invalid_input());
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn border_bound_enforced() {
        let backend = MockBackend::new();
        let req = GenerationRequest {
            border: MAX_BORDER + 1,
            ..GenerationRequest::new("hello")
        };
        let err = generate(&backend, &req).unwrap_err();
        assert!(matches!(err, GenerateError::BorderOutOfRange(_)));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn resolved_params_reach_backend() {
        let backend = MockBackend::with_matrices(vec![tiny_matrix()]);
        let req = GenerationRequest {
            size: 7,
            border: 2,
            level: ErrorCorrection::High,
            format: OutputFormat::Svg,
            ..GenerationRequest::new("hello")
        };
        let result = generate(&backend, &req).unwrap();
        assert_eq!(result.format, OutputFormat::Svg);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode {
                level: ErrorCorrection::High,
                ..
            }
        ));
        assert!(matches!(
            &ops[1],
            RecordedOp::Render {
                matrix_width: 2,
                module_size: 7,
                border: 2,
                format: OutputFormat::Svg,
            }
        ));
    }

    #[test]
    fn capacity_failure_is_not_invalid_input() {
        // No matrices queued → the mock reports CapacityExceeded
        let backend = MockBackend::new();
        let err = generate(&backend, &GenerationRequest::new("hello")).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Encoding(BackendError::CapacityExceeded)
        ));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn write_image_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/qr.png");
        let result = GenerationResult {
            bytes: vec![1, 2, 3],
            format: OutputFormat::Png,
        };
        write_image(&result, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn write_image_surfaces_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the target path makes the write fail
        let path = dir.path().join("qr.png");
        std::fs::create_dir(&path).unwrap();
        let result = GenerationResult {
            bytes: vec![0],
            format: OutputFormat::Png,
        };
        let err = write_image(&result, &path).unwrap_err();
        assert!(matches!(err, GenerateError::Write { .. }));
    }
}
