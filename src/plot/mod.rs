//! Figures
//!
//! A [Chart] draws itself onto the plotters drawing area it is given, a [Figure] decides on the
//! drawing backend from its file extension and writes the chart to disk:
//!  - `.svg`: [SVGBackend],
//!  - `.png`: [BitMapBackend],
//!  - `.pdf` and anything else: SVG converted to PDF with [svg2pdf].

use plotters::{coord::Shift, prelude::*};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

mod polarization;
pub use polarization::{spread_segments, Polarization, PolarizationChart};
mod radius;
pub use radius::RadiusChart;

#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("failed to draw the chart: {0}")]
    Drawing(String),
    #[error("failed to write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to convert the figure to PDF: {0}")]
    Pdf(String),
}
type Result<T> = std::result::Result<T, PlotError>;

pub(crate) fn drawing<E>(error: DrawingAreaErrorKind<E>) -> PlotError
where
    E: std::error::Error + Send + Sync,
{
    PlotError::Drawing(error.to_string())
}

/// Figure contents
pub trait Chart {
    /// Draws the chart onto `root`
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Figure file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdf,
    Svg,
    Png,
}
impl Format {
    /// Format matching the file extension, PDF if the extension is unknown
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("svg") => Format::Svg,
            Some("png") => Format::Png,
            _ => Format::Pdf,
        }
    }
}

/// Figure file
#[derive(Debug, Clone)]
pub struct Figure {
    path: PathBuf,
    size: (u32, u32),
    format: Format,
}
impl Figure {
    /// New figure of `size` pixels
    pub fn new<P: Into<PathBuf>>(path: P, size: (u32, u32)) -> Self {
        let path = path.into();
        let format = Format::from_path(&path);
        Self { path, size, format }
    }
    fn io_error(&self, source: std::io::Error) -> PlotError {
        PlotError::Io {
            path: self.path.clone(),
            source,
        }
    }
    /// Draws the chart and writes the figure
    pub fn save<C: Chart>(&self, chart: &C) -> Result<()> {
        log::info!("making figure: {:?}", self.path);
        let now = Instant::now();
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                return Err(self.io_error(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{:?} is not a directory", parent),
                )))
            }
            _ => (),
        }
        match self.format {
            Format::Svg => {
                let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
                chart.draw(&root)?;
                root.present().map_err(drawing)?;
            }
            Format::Png => {
                let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
                chart.draw(&root)?;
                root.present().map_err(drawing)?;
            }
            Format::Pdf => {
                let pdf = to_pdf(&self.to_svg(chart)?)?;
                fs::write(&self.path, pdf).map_err(|e| self.io_error(e))?;
            }
        }
        log::info!("... {:?} written in {:.3}s", self.path, now.elapsed().as_secs_f64());
        Ok(())
    }
    /// Draws the chart into an SVG document
    pub fn to_svg<C: Chart>(&self, chart: &C) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            chart.draw(&root)?;
            root.present().map_err(drawing)?;
        }
        Ok(svg)
    }
}

/// Converts an SVG document into a PDF document
pub fn to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &options)
        .map_err(|e| PlotError::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| PlotError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frame;
    impl Chart for Frame {
        fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
            root.fill(&WHITE).map_err(drawing)?;
            root.draw(&Rectangle::new([(10, 10), (90, 90)], BLACK.stroke_width(2)))
                .map_err(drawing)
        }
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path("fig.pdf"), Format::Pdf);
        assert_eq!(Format::from_path("fig.SVG"), Format::Svg);
        assert_eq!(Format::from_path("fig.png"), Format::Png);
        assert_eq!(Format::from_path("fig"), Format::Pdf);
    }

    #[test]
    fn save_svg_and_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("frame.svg");
        Figure::new(&svg, (100, 100)).save(&Frame).unwrap();
        assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));
        let pdf = dir.path().join("frame.pdf");
        Figure::new(&pdf, (100, 100)).save(&Frame).unwrap();
        assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.pdf");
        let err = Figure::new(&path, (100, 100)).save(&Frame).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
        assert!(!path.exists());
    }
}
