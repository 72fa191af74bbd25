//! Plot configurations
//!
//! The defaults are the command line defaults.

use crate::{
    binning::{Closed, MAX_BINS},
    color,
    observations::{ObservationFields, EMISSIVITY, INCIDENCE_ANGLE, LATITUDE, PLANETARY_RADIUS},
};
use plotters::style::RGBColor;
use std::{ops::Range, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("bin size must be a positive number, found {0}")]
    BinSize(f64),
    #[error("bin size {width} gives {n_bin} bins (maximum is {max})", max = MAX_BINS)]
    TooManyBins { width: f64, n_bin: usize },
    #[error("expected `right` or `left` bin closure, found {0:?}")]
    Closed(String),
    #[error("{axis} axis range [{min},{max}] is empty")]
    AxisRange {
        axis: &'static str,
        min: f64,
        max: f64,
    },
    #[error("unknown color {0:?}")]
    Color(String),
}

/// Axis lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}
impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
    fn validate(&self, axis: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::AxisRange {
                axis,
                min: self.min,
                max: self.max,
            })
        }
    }
    pub fn range(&self) -> Range<f64> {
        self.min..self.max
    }
}

/// Emissivity versus planetary radius plot configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusPlotConfig {
    pub file: PathBuf,
    pub emissivity_field: String,
    pub radius_field: String,
    pub fig_file: PathBuf,
    pub xaxis: AxisRange,
    pub yaxis: AxisRange,
    /// marker color, any spec accepted by [color::parse]
    pub color: String,
    /// figure size in pixels
    pub size: (u32, u32),
}
impl Default for RadiusPlotConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::new(),
            emissivity_field: EMISSIVITY.to_string(),
            radius_field: PLANETARY_RADIUS.to_string(),
            fig_file: PathBuf::from("emissivity_vs_pr.pdf"),
            xaxis: AxisRange::new(0.15, 0.9),
            yaxis: AxisRange::new(6051., 6058.),
            color: "k".to_string(),
            size: (640, 480),
        }
    }
}
impl RadiusPlotConfig {
    pub fn new<P: Into<PathBuf>>(file: P) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }
    pub fn fig_file<P: Into<PathBuf>>(self, fig_file: P) -> Self {
        Self {
            fig_file: fig_file.into(),
            ..self
        }
    }
    /// Checks the axes and the color
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.xaxis.validate("x")?;
        self.yaxis.validate("y")?;
        self.color().map(|_| ())
    }
    pub fn color(&self) -> Result<RGBColor, ConfigError> {
        color::parse(&self.color)
    }
    pub fn fields(&self) -> ObservationFields {
        ObservationFields::emissivity(&self.emissivity_field).planetary_radius(&self.radius_field)
    }
}

/// H and V polarized emissivity versus latitude plot configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PolarizationPlotConfig {
    pub h_file: PathBuf,
    pub v_file: PathBuf,
    pub emissivity_field: String,
    pub latitude_field: String,
    pub incidence_field: String,
    /// incidence angle bin width [deg]
    pub bin_size: f64,
    pub closed: Closed,
    /// standard deviation delta degrees of freedom
    pub ddof: usize,
    pub fig_file: PathBuf,
    pub xaxis: AxisRange,
    pub yaxis: AxisRange,
    /// H observations and spread color
    pub h_color: String,
    /// H bin means color
    pub h_mean_color: String,
    /// V observations and spread color
    pub v_color: String,
    /// V bin means color
    pub v_mean_color: String,
    /// figure size in pixels
    pub size: (u32, u32),
    /// CSV file the bin summaries are written to
    pub summary_file: Option<PathBuf>,
}
impl Default for PolarizationPlotConfig {
    fn default() -> Self {
        Self {
            h_file: PathBuf::new(),
            v_file: PathBuf::new(),
            emissivity_field: EMISSIVITY.to_string(),
            latitude_field: LATITUDE.to_string(),
            incidence_field: INCIDENCE_ANGLE.to_string(),
            bin_size: 0.1,
            closed: Closed::Right,
            ddof: 1,
            fig_file: PathBuf::from("pol_emissivity.pdf"),
            xaxis: AxisRange::new(-10., 4.5),
            yaxis: AxisRange::new(0.25, 1.05),
            h_color: "#ae76a3".to_string(),
            h_mean_color: "#882e72".to_string(),
            v_color: "#90c987".to_string(),
            v_mean_color: "#4eb27f".to_string(),
            size: (1600, 800),
            summary_file: None,
        }
    }
}
impl PolarizationPlotConfig {
    pub fn new<P: Into<PathBuf>>(h_file: P, v_file: P) -> Self {
        Self {
            h_file: h_file.into(),
            v_file: v_file.into(),
            ..Default::default()
        }
    }
    pub fn fig_file<P: Into<PathBuf>>(self, fig_file: P) -> Self {
        Self {
            fig_file: fig_file.into(),
            ..self
        }
    }
    pub fn bin_size(self, bin_size: f64) -> Self {
        Self { bin_size, ..self }
    }
    /// Checks the bin size, the axes and the colors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bin_size.is_finite() && self.bin_size > 0.) {
            return Err(ConfigError::BinSize(self.bin_size));
        }
        self.xaxis.validate("x")?;
        self.yaxis.validate("y")?;
        self.colors().map(|_| ())
    }
    /// H, H mean, V and V mean colors
    pub fn colors(&self) -> Result<[RGBColor; 4], ConfigError> {
        Ok([
            color::parse(&self.h_color)?,
            color::parse(&self.h_mean_color)?,
            color::parse(&self.v_color)?,
            color::parse(&self.v_mean_color)?,
        ])
    }
    pub fn fields(&self) -> ObservationFields {
        ObservationFields::emissivity(&self.emissivity_field)
            .incidence_angle(&self.incidence_field)
            .latitude(&self.latitude_field)
    }
}
