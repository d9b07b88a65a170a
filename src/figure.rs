//! Rendered charts and their export formats.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::output::{HtmlExporter, PngEncoder, SvgEncoder};
use crate::render::rasterize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// File format used when a figure is saved or shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone HTML page with inline SVG.
    #[default]
    Html,
    /// Bare SVG document.
    Svg,
    /// Raster PNG image (labels are not rasterized).
    Png,
}

impl OutputFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(format!("unknown output format '{other}' (expected html, svg or png)")),
        }
    }
}

/// A finished chart: a title plus a vector scene.
#[derive(Debug, Clone)]
pub struct Figure {
    title: String,
    scene: SvgEncoder,
}

impl Figure {
    pub(crate) fn new(title: impl Into<String>, scene: SvgEncoder) -> Self {
        Self {
            title: title.into(),
            scene,
        }
    }

    /// Chart title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The vector scene.
    #[must_use]
    pub fn scene(&self) -> &SvgEncoder {
        &self.scene
    }

    /// SVG markup.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.scene.render()
    }

    /// Rasterize the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure has zero dimensions.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        rasterize(&self.scene)
    }

    /// PNG bytes of the rasterized scene.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or encoding fails.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        PngEncoder::to_bytes(&self.to_framebuffer()?)
    }

    /// Standalone HTML page showing the figure.
    #[must_use]
    pub fn to_html(&self) -> String {
        HtmlExporter::from_svg(&self.title, &self.scene).render()
    }

    /// File name derived from the title.
    #[must_use]
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("{}.{}", slug(&self.title), format.extension())
    }

    /// Write the figure into `dir` and return the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name(format));

        match format {
            OutputFormat::Html => HtmlExporter::from_svg(&self.title, &self.scene).write_to_file(&path)?,
            OutputFormat::Svg => self.scene.write_to_file(&path)?,
            OutputFormat::Png => PngEncoder::write_to_file(&self.to_framebuffer()?, &path)?,
        }

        info!(title = %self.title, path = %path.display(), "figure written");
        Ok(path)
    }
}

/// Lowercase, underscore-separated file stem for a title.
#[must_use]
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "figure".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn figure() -> Figure {
        let mut scene = SvgEncoder::new(40, 30);
        scene.rect(5.0, 5.0, 10.0, 10.0, Rgba::RED);
        Figure::new("A 2D scatter with 10 points", scene)
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("A 2D scatter with 10 points"), "a_2d_scatter_with_10_points");
        assert_eq!(slug("A histogram (two variables)"), "a_histogram_two_variables");
        assert_eq!(slug("!!!"), "figure");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert!("gif".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "html");
    }

    #[test]
    fn test_save_each_format() {
        let dir = tempfile::tempdir().unwrap();
        let fig = figure();

        for format in [OutputFormat::Html, OutputFormat::Svg, OutputFormat::Png] {
            let path = fig.save(dir.path(), format).unwrap();
            assert!(path.exists());
            assert_eq!(path.extension().unwrap(), format.extension());
        }
    }

    #[test]
    fn test_exports() {
        let fig = figure();
        assert!(fig.to_svg().contains("<rect x=\"5\""));
        assert!(fig.to_html().contains("<title>A 2D scatter with 10 points</title>"));
        assert_eq!(&fig.to_png().unwrap()[1..4], b"PNG");
        assert_eq!(fig.to_framebuffer().unwrap().get_pixel(6, 6), Some(Rgba::RED));
    }
}
