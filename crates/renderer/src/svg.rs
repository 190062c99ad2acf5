//! SVG map renderer.
//!
//! Draws a single-panel equirectangular map: background, optional basemap
//! outlines, dashed graticule with degree labels, the snowline overlay, a
//! north arrow, a title and a legend.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use snowline_common::{BoundingBox, SnowlineResult, StyleConfig};
use tracing::debug;

use crate::basemap::Basemap;
use crate::error::Result;
use crate::frame::{format_degrees, MapFrame};
use crate::MapRenderer;

const BACKGROUND: &str = "#e6f3ff";
const FRAME_STROKE: &str = "#333333";
const BASEMAP_STROKE: &str = "#333333";
const BASEMAP_WIDTH: f64 = 0.5;
const GRATICULE_WIDTH: f64 = 0.5;
const GRATICULE_OPACITY: f64 = 0.7;
const LABEL_SIZE: f64 = 12.0;
const TITLE_SIZE: f64 = 20.0;

/// Renders snowline maps as standalone SVG documents.
#[derive(Debug, Clone)]
pub struct SvgMapRenderer {
    bbox: BoundingBox,
    style: StyleConfig,
    basemap: Option<Basemap>,
}

impl SvgMapRenderer {
    /// Create a renderer for a fixed map extent.
    ///
    /// Both the extent and the style are checked up front so `render` can
    /// only fail on I/O.
    pub fn new(bbox: BoundingBox, style: StyleConfig) -> Result<Self> {
        bbox.validate()?;
        style.validate()?;
        Ok(Self {
            bbox,
            style,
            basemap: None,
        })
    }

    /// Draw `basemap` outlines beneath the snowline on every map.
    pub fn with_basemap(mut self, basemap: Basemap) -> Self {
        self.basemap = Some(basemap);
        self
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Build the SVG document for one date without touching the filesystem.
    pub fn render_svg(&self, snowline: Option<&SnowlineResult>, date: NaiveDate) -> Result<String> {
        let mut svg = String::with_capacity(8 * 1024);
        self.write_document(&mut svg, snowline, date)?;
        Ok(svg)
    }

    fn write_document(
        &self,
        svg: &mut String,
        snowline: Option<&SnowlineResult>,
        date: NaiveDate,
    ) -> fmt::Result {
        let frame = MapFrame::new(self.bbox);

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.2} {h:.2}">"#,
            w = frame.page_width,
            h = frame.page_height,
        )?;
        writeln!(
            svg,
            r#"<defs><clipPath id="panel"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"#,
            frame.left, frame.top, frame.width, frame.height
        )?;
        writeln!(
            svg,
            r#"<rect x="0" y="0" width="{:.2}" height="{:.2}" fill="white"/>"#,
            frame.page_width, frame.page_height
        )?;
        writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            frame.left, frame.top, frame.width, frame.height, BACKGROUND
        )?;

        if let Some(basemap) = &self.basemap {
            write_basemap(svg, &frame, basemap)?;
        }
        self.write_graticule(svg, &frame)?;
        if let Some(result) = snowline {
            self.write_snowline(svg, &frame, result)?;
        }

        writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}" stroke-width="1"/>"#,
            frame.left, frame.top, frame.width, frame.height, FRAME_STROKE
        )?;

        write_north_arrow(svg, &frame)?;
        self.write_legend(svg, &frame)?;

        writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" font-weight="bold" text-anchor="middle">Snowline - {}</text>"#,
            frame.left + frame.width / 2.0,
            frame.top / 2.0 + TITLE_SIZE / 3.0,
            TITLE_SIZE,
            date.format("%d %B %Y")
        )?;

        svg.push_str("</svg>\n");
        Ok(())
    }

    fn write_graticule(&self, svg: &mut String, frame: &MapFrame) -> fmt::Result {
        let color = self.style.gridline_color.to_hex();
        let dash = self
            .style
            .gridline_style
            .dasharray()
            .map(|d| format!(r#" stroke-dasharray="{}""#, d))
            .unwrap_or_default();

        svg.push_str("<g class=\"graticule\">\n");
        for lon in frame.meridians() {
            let (x, top) = frame.project(lon, frame.bbox.max_lat);
            let (_, bottom) = frame.project(lon, frame.bbox.min_lat);
            writeln!(
                svg,
                r#"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="{color}" stroke-width="{GRATICULE_WIDTH}" stroke-opacity="{GRATICULE_OPACITY}"{dash}/>"#,
            )?;
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" text-anchor="middle">{}</text>"#,
                x,
                bottom + LABEL_SIZE + 6.0,
                LABEL_SIZE,
                format_degrees(lon, 'E', 'W')
            )?;
        }
        for lat in frame.parallels() {
            let (left, y) = frame.project(frame.bbox.min_lon, lat);
            let (right, _) = frame.project(frame.bbox.max_lon, lat);
            writeln!(
                svg,
                r#"<line x1="{left:.2}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}" stroke="{color}" stroke-width="{GRATICULE_WIDTH}" stroke-opacity="{GRATICULE_OPACITY}"{dash}/>"#,
            )?;
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" text-anchor="end">{}</text>"#,
                left - 6.0,
                y + LABEL_SIZE / 3.0,
                LABEL_SIZE,
                format_degrees(lat, 'N', 'S')
            )?;
        }
        svg.push_str("</g>\n");
        Ok(())
    }

    fn write_snowline(
        &self,
        svg: &mut String,
        frame: &MapFrame,
        result: &SnowlineResult,
    ) -> fmt::Result {
        let Some(geometry) = &result.geometry else {
            return Ok(());
        };

        writeln!(
            svg,
            r#"<g class="snowline" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round">"#,
            self.style.snowline_color.to_hex(),
            self.style.snowline_width
        )?;
        for line in geometry.lines() {
            let points = line.coords().map(|c| (c.x, c.y));
            write_polyline(svg, frame, points)?;
        }
        svg.push_str("</g>\n");
        Ok(())
    }

    fn write_legend(&self, svg: &mut String, frame: &MapFrame) -> fmt::Result {
        let x = frame.right() - 130.0;
        let y = frame.top + 12.0;
        writeln!(
            svg,
            r#"<g class="legend"><rect x="{:.2}" y="{:.2}" width="118" height="30" fill="white" fill-opacity="0.85" stroke="{}" stroke-width="0.5"/>"#,
            x, y, FRAME_STROKE
        )?;
        writeln!(
            svg,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            x + 10.0,
            y + 15.0,
            x + 40.0,
            y + 15.0,
            self.style.snowline_color.to_hex(),
            self.style.snowline_width
        )?;
        writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}">Snowline</text></g>"#,
            x + 48.0,
            y + 15.0 + LABEL_SIZE / 3.0,
            LABEL_SIZE
        )
    }
}

/// One `<polyline>` through the projected (lon, lat) points.
fn write_polyline(
    svg: &mut String,
    frame: &MapFrame,
    points: impl Iterator<Item = (f64, f64)>,
) -> fmt::Result {
    svg.push_str("<polyline points=\"");
    for (i, (lon, lat)) in points.enumerate() {
        let (x, y) = frame.project(lon, lat);
        if i > 0 {
            svg.push(' ');
        }
        write!(svg, "{:.2},{:.2}", x, y)?;
    }
    svg.push_str("\"/>\n");
    Ok(())
}

fn write_basemap(svg: &mut String, frame: &MapFrame, basemap: &Basemap) -> fmt::Result {
    writeln!(
        svg,
        r#"<g class="basemap" clip-path="url(#panel)" fill="none" stroke="{}" stroke-width="{}">"#,
        BASEMAP_STROKE, BASEMAP_WIDTH
    )?;
    for outline in basemap.outlines() {
        write_polyline(svg, frame, outline.iter().copied())?;
    }
    svg.push_str("</g>\n");
    Ok(())
}

fn write_north_arrow(svg: &mut String, frame: &MapFrame) -> fmt::Result {
    let x = frame.left + 30.0;
    let y = frame.top + 20.0;
    writeln!(
        svg,
        r#"<g class="north-arrow"><path d="M {x:.2} {y:.2} L {:.2} {:.2} L {x:.2} {:.2} L {:.2} {:.2} Z" fill="black"/>"#,
        x + 8.0,
        y + 30.0,
        y + 24.0,
        x - 8.0,
        y + 30.0,
    )?;
    writeln!(
        svg,
        r#"<text x="{x:.2}" y="{:.2}" font-family="sans-serif" font-size="14" font-weight="bold" text-anchor="middle">N</text></g>"#,
        y + 46.0
    )
}

impl MapRenderer for SvgMapRenderer {
    fn render(
        &self,
        snowline: Option<&SnowlineResult>,
        date: NaiveDate,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let document = self.render_svg(snowline, date)?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, document)?;
        debug!(date = %date, path = %output_path.display(), "Wrote SVG map");
        Ok(output_path.to_path_buf())
    }
}
