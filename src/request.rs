//! Request and result types for QR generation.
//!
//! These structs describe *what* to generate, not *how* to generate it. They
//! are the interface between the surfaces (CLI flags, web form/query params)
//! and the [`generate`](crate::generate) orchestration. A request is built
//! once per invocation and never mutated afterwards.
//!
//! ## Types
//!
//! - [`GenerationRequest`] — payload plus rendering parameters, with the
//!   defaults of the original tool (size 10, border 4, medium correction).
//! - [`GenerationResult`] — produced image bytes tagged with their format.
//! - [`ErrorCorrection`] — the four standard QR redundancy tiers.
//! - [`OutputFormat`] — supported output encodings (PNG raster, SVG).

use serde::Deserialize;

/// Largest accepted module scale, in pixels per module.
///
/// A version-40 symbol is 177 modules wide; at this scale plus the maximum
/// quiet zone the rendered image stays within a ~10k×10k grayscale buffer.
pub const MAX_MODULE_SIZE: u32 = 50;

/// Largest accepted quiet zone, in modules.
pub const MAX_BORDER: u32 = 16;

/// Error-correction level: redundancy traded against data capacity.
///
/// Tiers per the QR standard — Low recovers ~7% damage, Medium ~15%,
/// Quartile ~25%, High ~30%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    #[serde(alias = "l")]
    #[value(alias = "l")]
    Low,
    #[default]
    #[serde(alias = "m")]
    #[value(alias = "m")]
    Medium,
    #[serde(alias = "q")]
    #[value(alias = "q")]
    Quartile,
    #[serde(alias = "h")]
    #[value(alias = "h")]
    High,
}

/// Output image encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// MIME type for HTTP responses and data URLs.
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// A single QR generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Text or URL to encode. Treated as opaque bytes — no URL validation.
    pub payload: String,
    /// Module scale in pixels (1..=[`MAX_MODULE_SIZE`]).
    pub size: u32,
    /// Quiet zone around the symbol, in modules (0..=[`MAX_BORDER`]).
    pub border: u32,
    /// Error-correction level.
    pub level: ErrorCorrection,
    /// Output encoding.
    pub format: OutputFormat,
}

impl GenerationRequest {
    /// A request for `payload` with the stock defaults; override fields via
    /// struct update as needed.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            size: 10,
            border: 4,
            level: ErrorCorrection::default(),
            format: OutputFormat::default(),
        }
    }
}

/// A successfully generated image.
///
/// Transient: produced and consumed within a single CLI invocation or HTTP
/// request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

impl GenerationResult {
    /// MIME type matching the produced bytes.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
