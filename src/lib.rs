//! # qrgen
//!
//! A minimal static QR code generator with CLI and web front ends. Give it a
//! URL or any text and it produces a PNG (or SVG) QR code — no accounts, no
//! redirect service, no expiry. The code encodes the data directly, so it
//! stays valid as long as the target does.
//!
//! # Architecture: One Stateless Transformation
//!
//! Everything reduces to a single call:
//!
//! ```text
//! GenerationRequest  →  validate  →  encode  →  render  →  GenerationResult
//! ```
//!
//! Each invocation builds its own request and result; there is no shared
//! mutable state, no cache, and no persistence. The CLI writes the result to
//! one file, the web variant streams it into the HTTP response, and both go
//! through the same [`generate::generate`] core — so concurrent web requests
//! need no locking and the two surfaces cannot drift apart.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`request`] | Request/result types, parameter enums, validation limits |
//! | [`generate`] | Orchestration: validate → encode → render, plus file output |
//! | [`encoding`] | [`QrBackend`](encoding::QrBackend) trait and the `qrcode`-crate implementation |
//! | [`server`] | axum web front end: form page, image endpoint, health probe |
//!
//! # Design Decisions
//!
//! ## Delegate the Hard Part
//!
//! QR encoding — data segmentation, Reed–Solomon error correction, matrix
//! placement, masking — is a published standard with a mature pure-Rust
//! implementation, the [`qrcode`](https://docs.rs/qrcode) crate. This crate
//! deliberately implements none of it. The value here is the orchestration:
//! input validation, parameter resolution, format selection, and honest
//! errors at both surfaces.
//!
//! ## A Trait at the Library Seam
//!
//! The encoding library is reached only through
//! [`encoding::QrBackend`], a two-method capability trait (encode to a
//! symbol matrix, render the matrix to bytes). Orchestration logic is tested
//! against a recording mock without ever touching the QR library, and the
//! library could be swapped without the surfaces noticing.
//!
//! ## Payloads Are Opaque Text
//!
//! No URL validation: whatever string is given gets encoded. A QR code is a
//! byte container — deciding what counts as a "valid" URL is the scanner's
//! problem, not the generator's.
//!
//! ## Maud Over Template Engines
//!
//! The web form is generated with [Maud](https://maud.lambda.xyz/):
//! compile-time checked HTML, auto-escaped interpolation, and no template
//! directory to ship next to the binary.

pub mod encoding;
pub mod generate;
pub mod request;
pub mod server;
