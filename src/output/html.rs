//! Standalone HTML pages for showing figures in a browser.

use crate::error::Result;
use crate::output::svg::escape_xml;
use crate::output::SvgEncoder;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;
use std::path::Path;

/// Wraps rendered charts in a self-contained HTML document.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    title: String,
    body: String,
}

impl HtmlExporter {
    /// Page with the SVG markup inlined.
    #[must_use]
    pub fn from_svg(title: &str, svg: &SvgEncoder) -> Self {
        Self {
            title: title.to_string(),
            body: svg.render(),
        }
    }

    /// Page embedding PNG bytes as a base64 data URI.
    #[must_use]
    pub fn from_png(title: &str, png: &[u8]) -> Self {
        let data = STANDARD.encode(png);
        Self {
            title: title.to_string(),
            body: format!(
                r#"<img alt="{}" src="data:image/png;base64,{data}"/>"#,
                escape_xml(title)
            ),
        }
    }

    /// Render the full document.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html lang=\"en\">\n",
                "<head>\n",
                "<meta charset=\"utf-8\"/>\n",
                "<title>{}</title>\n",
                "<style>body{{margin:0;display:flex;justify-content:center;",
                "background:#fafafa;font-family:sans-serif}}</style>\n",
                "</head>\n",
                "<body>\n{}</body>\n",
                "</html>\n"
            ),
            escape_xml(&self.title),
            self.body
        )
    }

    /// Write the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_page_inlines_markup() {
        let page = HtmlExporter::from_svg("A <b> title", &SvgEncoder::new(10, 10)).render();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>A &lt;b&gt; title</title>"));
        assert!(page.contains("<svg"));
    }

    #[test]
    fn test_png_page_embeds_data_uri() {
        let page = HtmlExporter::from_png("png", &[137, 80, 78, 71]).render();
        assert!(page.contains("data:image/png;base64,iVBORw=="));
    }
}
