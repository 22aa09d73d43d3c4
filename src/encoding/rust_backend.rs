//! Pure Rust QR backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Encode (segmentation, Reed–Solomon, masking) | `qrcode::QrCode` |
//! | Render → PNG | `image::ImageBuffer<Luma<u8>>` + PNG encoder |
//! | Render → SVG | string builder, one `<rect>` per dark module |
//!
//! The symbol version is always auto-fitted: the `qrcode` crate picks the
//! smallest version that holds the payload at the requested correction level.

use super::backend::{BackendError, QrBackend, RenderParams, SymbolMatrix};
use crate::request::{ErrorCorrection, OutputFormat};
use image::{ImageBuffer, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use std::fmt::Write as _;
use std::io::Cursor;

/// Production backend delegating to the `qrcode` and `image` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

impl QrBackend for RustBackend {
    fn encode(&self, text: &str, level: ErrorCorrection) -> Result<SymbolMatrix, BackendError> {
        let code =
            QrCode::with_error_correction_level(text.as_bytes(), ec_level(level)).map_err(
                |e| match e {
                    QrError::DataTooLong => BackendError::CapacityExceeded,
                    other => BackendError::Encoding(other.to_string()),
                },
            )?;

        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(SymbolMatrix::new(width, modules))
    }

    fn render(&self, matrix: &SymbolMatrix, params: &RenderParams) -> Result<Vec<u8>, BackendError> {
        match params.format {
            OutputFormat::Png => render_png(matrix, params),
            OutputFormat::Svg => Ok(render_svg(matrix, params).into_bytes()),
        }
    }
}

/// Rasterize to an 8-bit grayscale PNG: dark modules black, everything else
/// (including the quiet zone) white.
fn render_png(matrix: &SymbolMatrix, params: &RenderParams) -> Result<Vec<u8>, BackendError> {
    let dim = params.pixel_dimension(matrix);
    let mut img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_pixel(dim, dim, Luma([255u8]));

    let offset = params.border * params.module_size;
    for y in 0..matrix.width() {
        for x in 0..matrix.width() {
            if !matrix.is_dark(x, y) {
                continue;
            }
            let px = offset + x as u32 * params.module_size;
            let py = offset + y as u32 * params.module_size;
            for dy in 0..params.module_size {
                for dx in 0..params.module_size {
                    img.put_pixel(px + dx, py + dy, Luma([0u8]));
                }
            }
        }
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| BackendError::Render(e.to_string()))?;
    Ok(bytes)
}

/// Emit an SVG document in module units scaled by the viewBox, one rect per
/// dark module. Infallible: pure string assembly.
fn render_svg(matrix: &SymbolMatrix, params: &RenderParams) -> String {
    let dim = params.pixel_dimension(matrix);
    let units = matrix.width() as u32 + 2 * params.border;

    let mut svg = String::with_capacity(64 * matrix.dark_count() + 256);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{dim}" height="{dim}" viewBox="0 0 {units} {units}" shape-rendering="crispEdges">"#,
    );
    let _ = write!(svg, r##"<rect width="{units}" height="{units}" fill="#fff"/>"##);
    for y in 0..matrix.width() {
        for x in 0..matrix.width() {
            if matrix.is_dark(x, y) {
                let _ = write!(
                    svg,
                    r##"<rect x="{}" y="{}" width="1" height="1" fill="#000"/>"##,
                    x as u32 + params.border,
                    y as u32 + params.border,
                );
            }
        }
    }
    svg.push_str("</svg>\n");
    svg
}
