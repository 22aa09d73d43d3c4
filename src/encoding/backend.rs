//! QR encoding backend trait and shared types.
//!
//! The [`QrBackend`] trait defines the two operations every backend must
//! support: encode (text → symbol matrix) and render (matrix → image bytes).
//! The rest of the crate is backend-agnostic, so orchestration logic can be
//! unit-tested against a mock without touching the QR library.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — the `qrcode` crate for
//! encoding, the `image` crate for PNG output, everything statically linked.

use crate::request::OutputFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// The payload does not fit any symbol version at the requested
    /// error-correction level.
    #[error("payload too long for any QR version at this error-correction level")]
    CapacityExceeded,
    #[error("encoding failed: {0}")]
    Encoding(String),
    #[error("rendering failed: {0}")]
    Render(String),
}

/// A QR symbol as a square grid of dark/light modules, quiet zone excluded.
///
/// Row-major; `width` is the module count per side (21 for version 1 up to
/// 177 for version 40).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl SymbolMatrix {
    /// Build a matrix from row-major dark flags. `modules.len()` must equal
    /// `width * width`.
    pub fn new(width: usize, modules: Vec<bool>) -> Self {
        debug_assert_eq!(modules.len(), width * width);
        Self { width, modules }
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at `(x, y)` is dark. Coordinates are in modules,
    /// origin top-left.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }

    /// Count of dark modules, used by the SVG renderer and tests.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| **m).count()
    }
}

/// Parameters for a render operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderParams {
    /// Pixels per module.
    pub module_size: u32,
    /// Quiet zone around the symbol, in modules.
    pub border: u32,
    pub format: OutputFormat,
}

impl RenderParams {
    /// Side length in pixels of the rendered image, quiet zone included.
    pub fn pixel_dimension(&self, matrix: &SymbolMatrix) -> u32 {
        (matrix.width() as u32 + 2 * self.border) * self.module_size
    }
}

/// Trait for QR encoding backends.
///
/// Both operations must be deterministic: encoding is a pure function of the
/// standard, so identical inputs must produce identical output bytes.
pub trait QrBackend: Sync {
    /// Encode text into a symbol matrix at the smallest fitting version.
    fn encode(
        &self,
        text: &str,
        level: crate::request::ErrorCorrection,
    ) -> Result<SymbolMatrix, BackendError>;

    /// Render a symbol matrix to image bytes.
    fn render(&self, matrix: &SymbolMatrix, params: &RenderParams) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::request::ErrorCorrection;
    use std::sync::Mutex;

    /// Mock backend that records operations without invoking the QR library.
    /// Uses Mutex (not RefCell) so it stays Sync like the real backend.
    #[derive(Default)]
    pub struct MockBackend {
        pub encode_results: Mutex<Vec<SymbolMatrix>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Encode {
            text: String,
            level: ErrorCorrection,
        },
        Render {
            matrix_width: usize,
            module_size: u32,
            border: u32,
            format: OutputFormat,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_matrices(matrices: Vec<SymbolMatrix>) -> Self {
            Self {
                encode_results: Mutex::new(matrices),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    /// A 2x2 checkerboard stand-in for a real symbol.
    pub fn tiny_matrix() -> SymbolMatrix {
        SymbolMatrix::new(2, vec![true, false, false, true])
    }

    impl QrBackend for MockBackend {
        fn encode(
            &self,
            text: &str,
            level: ErrorCorrection,
        ) -> Result<SymbolMatrix, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                text: text.to_string(),
                level,
            });
            self.encode_results
                .lock()
                .unwrap()
                .pop()
                .ok_or(BackendError::CapacityExceeded)
        }

        fn render(
            &self,
            matrix: &SymbolMatrix,
            params: &RenderParams,
        ) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Render {
                matrix_width: matrix.width(),
                module_size: params.module_size,
                border: params.border,
                format: params.format,
            });
            Ok(vec![0u8; params.pixel_dimension(matrix) as usize])
        }
    }

    #[test]
    fn matrix_indexing_is_row_major() {
        let m = SymbolMatrix::new(2, vec![true, false, false, true]);
        assert!(m.is_dark(0, 0));
        assert!(!m.is_dark(1, 0));
        assert!(!m.is_dark(0, 1));
        assert!(m.is_dark(1, 1));
        assert_eq!(m.dark_count(), 2);
    }

    #[test]
    fn pixel_dimension_includes_quiet_zone() {
        let params = RenderParams {
            module_size: 10,
            border: 4,
            format: OutputFormat::Png,
        };
        // 21-module symbol + 4 modules of border each side, at 10 px/module
        let m = SymbolMatrix::new(21, vec![false; 21 * 21]);
        assert_eq!(params.pixel_dimension(&m), 290);
    }

    #[test]
    fn mock_records_encode() {
        let backend = MockBackend::with_matrices(vec![tiny_matrix()]);
        let m = backend.encode("hello", ErrorCorrection::Medium).unwrap();
        assert_eq!(m.width(), 2);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode { text, level: ErrorCorrection::Medium } if text == "hello"
        ));
    }

    #[test]
    fn mock_exhausted_matrices_reports_capacity() {
        let backend = MockBackend::new();
        let err = backend.encode("hello", ErrorCorrection::Low).unwrap_err();
        assert!(matches!(err, BackendError::CapacityExceeded));
    }
}
