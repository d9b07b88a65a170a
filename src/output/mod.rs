//! Output encoders (PNG, SVG, HTML) and the browser viewer.

mod html;
mod png_encoder;
pub(crate) mod svg;
mod viewer;

pub use html::HtmlExporter;
pub use png_encoder::PngEncoder;
pub use svg::{SvgElement, SvgEncoder, TextAnchor};
pub use viewer::Viewer;
