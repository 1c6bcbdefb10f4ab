//! Generator for the CES component maintenance report (CMR) sample contract PDF.

pub mod builder;
pub mod contract;
pub mod elements;
pub mod fonts;
pub mod generate;
pub mod model;
pub mod style;

pub use builder::{PdfBuildError, PdfBuilder, RenderedPdf};
pub use generate::{build, build_in, default_output_path};
