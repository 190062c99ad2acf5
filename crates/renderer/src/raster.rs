//! PNG output: the SVG map rasterized with resvg.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use snowline_common::SnowlineResult;
use tracing::debug;

use crate::error::{RenderError, Result};
use crate::svg::SvgMapRenderer;
use crate::MapRenderer;

/// Renders the same map as [`SvgMapRenderer`] and writes it as a PNG.
pub struct PngMapRenderer {
    svg: SvgMapRenderer,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl PngMapRenderer {
    pub fn new(svg: SvgMapRenderer) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        Self {
            svg,
            fontdb: Arc::new(fontdb),
        }
    }

    /// Rasterize one map into encoded PNG bytes.
    pub fn render_png(&self, snowline: Option<&SnowlineResult>, date: NaiveDate) -> Result<Vec<u8>> {
        let document = self.svg.render_svg(snowline, date)?;
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&document, &options)
            .map_err(|e| RenderError::Rasterize(e.to_string()))?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            RenderError::Rasterize(format!(
                "cannot allocate {}x{} pixmap",
                size.width(),
                size.height()
            ))
        })?;

        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Rasterize(e.to_string()))
    }
}

impl MapRenderer for PngMapRenderer {
    fn render(
        &self,
        snowline: Option<&SnowlineResult>,
        date: NaiveDate,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let png = self.render_png(snowline, date)?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, png)?;
        debug!(date = %date, path = %output_path.display(), "Wrote PNG map");
        Ok(output_path.to_path_buf())
    }
}
