//! QR encoding — delegation to the `qrcode` and `image` crates.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Encode** | `qrcode::QrCode` (auto-fitted version) |
//! | **Render PNG** | module scaling + `image` PNG encoder |
//! | **Render SVG** | string assembly, no rasterization |
//!
//! The module is split into:
//! - **Backend**: [`QrBackend`] trait + shared types ([`SymbolMatrix`], [`RenderParams`])
//! - **RustBackend**: the production implementation

pub mod backend;
pub mod rust_backend;

pub use backend::{BackendError, QrBackend, RenderParams, SymbolMatrix};
pub use rust_backend::RustBackend;
