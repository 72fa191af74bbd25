//! Incidence angle binning
//!
//! The H and V polarized observations are binned along the incidence angle with the same bin
//! edges, derived from the range of the H incidence angles.
//! Within each bin, the mean and the standard deviation of the emissivity and the mean incidence
//! angle and latitude are computed.

use crate::{config::ConfigError, observations::Observations, Observation};
use std::{fmt, str::FromStr};

/// Upper limit on the number of bins
pub const MAX_BINS: usize = 10_000_000;

/// Side of the bin intervals that includes its edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Closed {
    /// `(lo,hi]`, the lowest bin being `[lo,hi]`
    #[default]
    Right,
    /// `[lo,hi)`
    Left,
}
impl FromStr for Closed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "right" => Ok(Closed::Right),
            "left" => Ok(Closed::Left),
            _ => Err(ConfigError::Closed(s.to_string())),
        }
    }
}
impl fmt::Display for Closed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Closed::Right => write!(f, "right"),
            Closed::Left => write!(f, "left"),
        }
    }
}

/// Evenly spaced bin edges
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
    closed: Closed,
}
impl BinEdges {
    /// Bin edges starting at `lo` with a `width` step
    ///
    /// The edges are extended until the last bin contains `hi`.
    pub fn new(lo: f64, hi: f64, width: f64, closed: Closed) -> Result<Self, ConfigError> {
        if !(width.is_finite() && width > 0.) {
            return Err(ConfigError::BinSize(width));
        }
        if !(lo.is_finite() && hi.is_finite()) || lo > hi {
            log::warn!("invalid binning range [{lo},{hi}], no bins");
            return Ok(Self::empty(closed));
        }
        let span = (hi - lo) / width;
        let n = match closed {
            Closed::Right => span.ceil().max(1.),
            Closed::Left => span.floor() + 1.,
        };
        if n > MAX_BINS as f64 {
            return Err(ConfigError::TooManyBins {
                width,
                n_bin: n as usize,
            });
        }
        let n = n as usize;
        let mut edges: Vec<f64> = (0..=n).map(|k| lo + k as f64 * width).collect();
        // rounding may leave `hi` out of the last bin
        while edges
            .last()
            .is_some_and(|&last| last < hi || (closed == Closed::Left && last == hi))
        {
            edges.push(lo + edges.len() as f64 * width);
        }
        Ok(Self { edges, closed })
    }
    /// No bins
    pub fn empty(closed: Closed) -> Self {
        Self {
            edges: vec![],
            closed,
        }
    }
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }
    pub fn closed(&self) -> Closed {
        self.closed
    }
    /// Number of bins
    pub fn len(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Iterator over the bins (lower,upper) edges
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.edges.windows(2).map(|w| (w[0], w[1]))
    }
    /// Returns the index of the bin `value` belongs to
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if self.edges.len() < 2 || value.is_nan() {
            return None;
        }
        let n_edge = self.edges.len();
        match self.closed {
            Closed::Right => match self.edges.partition_point(|&e| e < value) {
                0 if value == self.edges[0] => Some(0),
                0 => None,
                k if k == n_edge => None,
                k => Some(k - 1),
            },
            Closed::Left => match self.edges.partition_point(|&e| e <= value) {
                0 => None,
                k if k == n_edge => None,
                k => Some(k - 1),
            },
        }
    }
}
impl fmt::Display for BinEdges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) if self.len() > 0 => write!(
                f,
                "{} {}-closed bins over [{:.3},{:.3}]",
                self.len(),
                self.closed,
                first,
                last
            ),
            _ => write!(f, "no bins"),
        }
    }
}

/// Mean of the values that are not `NaN`
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (n, sum) = values
        .into_iter()
        .filter(|x| !x.is_nan())
        .fold((0usize, 0f64), |(n, s), x| (n + 1, s + x));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}
/// Standard deviation with `ddof` delta degrees of freedom of the values that are not `NaN`
pub fn std(values: &[f64], ddof: usize) -> f64 {
    let values: Vec<f64> = values.iter().cloned().filter(|x| !x.is_nan()).collect();
    let n = values.len();
    if n <= ddof {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    (values.iter().map(|x| x - mean).fold(0f64, |s, x| s + x * x) / (n - ddof) as f64).sqrt()
}

/// Statistics of the observations within a bin
#[derive(Debug, Clone, Copy)]
pub struct BinSummary {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub mean_emissivity: f64,
    pub std_emissivity: f64,
    pub mean_incidence_angle: f64,
    pub mean_latitude: f64,
}
impl BinSummary {
    fn new((lower, upper): (f64, f64), observations: &[&Observation], ddof: usize) -> Self {
        let emissivity: Vec<f64> = observations.iter().map(|o| o.emissivity).collect();
        Self {
            lower,
            upper,
            count: observations.len(),
            mean_emissivity: mean(emissivity.iter().cloned()),
            std_emissivity: std(&emissivity, ddof),
            mean_incidence_angle: mean(observations.iter().map(|o| o.incidence_angle)),
            mean_latitude: mean(observations.iter().map(|o| o.latitude)),
        }
    }
    /// Mean latitude and mean emissivity are both defined
    pub fn has_mean(&self) -> bool {
        self.mean_latitude.is_finite() && self.mean_emissivity.is_finite()
    }
    /// Mean latitude, mean and standard deviation of the emissivity are all defined
    pub fn has_spread(&self) -> bool {
        self.has_mean() && self.std_emissivity.is_finite()
    }
    /// Emissivity mean minus and plus the standard deviation
    pub fn emissivity_band(&self) -> (f64, f64) {
        (
            self.mean_emissivity - self.std_emissivity,
            self.mean_emissivity + self.std_emissivity,
        )
    }
    /// Returns `true` if both summaries are bit for bit identical
    pub fn same_as(&self, other: &Self) -> bool {
        self.count == other.count
            && [
                (self.lower, other.lower),
                (self.upper, other.upper),
                (self.mean_emissivity, other.mean_emissivity),
                (self.std_emissivity, other.std_emissivity),
                (self.mean_incidence_angle, other.mean_incidence_angle),
                (self.mean_latitude, other.mean_latitude),
            ]
            .iter()
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

/// Bins the observations and summarizes each bin
///
/// There is one summary per bin, empty bins included.
pub fn summarize(observations: &Observations, edges: &BinEdges, ddof: usize) -> Vec<BinSummary> {
    let mut bins: Vec<Vec<&Observation>> = vec![vec![]; edges.len()];
    let mut n_out = 0usize;
    for observation in observations.iter() {
        match edges.bin_of(observation.incidence_angle) {
            Some(k) => bins[k].push(observation),
            None => n_out += 1,
        }
    }
    if n_out > 0 {
        log::debug!("{n_out} observations outside of the bins");
    }
    edges
        .intervals()
        .zip(bins.iter())
        .map(|(interval, bin)| BinSummary::new(interval, bin, ddof))
        .inspect(|s| {
            log::debug!(
                "bin [{:.3},{:.3}]: {:5} rows, emissivity {:.4} +/- {:.4}",
                s.lower,
                s.upper,
                s.count,
                s.mean_emissivity,
                s.std_emissivity
            )
        })
        .collect()
}

/// H and V polarized observations summarized over the same bins
#[derive(Debug, Clone)]
pub struct Comparison {
    pub edges: BinEdges,
    pub h: Vec<BinSummary>,
    pub v: Vec<BinSummary>,
    /// V observations within the H incidence angle range
    pub v_observations: Observations,
    /// number of V observations outside the H incidence angle range
    pub v_dropped: usize,
}
impl Comparison {
    /// Bins the H and V observations on the H incidence angle range
    pub fn new(
        h: &Observations,
        v: &Observations,
        width: f64,
        closed: Closed,
        ddof: usize,
    ) -> Result<Self, ConfigError> {
        let (edges, v_observations) = match h.incidence_range() {
            Some((lo, hi)) => (
                BinEdges::new(lo, hi, width, closed)?,
                v.within_incidence(lo, hi),
            ),
            None => {
                if !(width.is_finite() && width > 0.) {
                    return Err(ConfigError::BinSize(width));
                }
                (BinEdges::empty(closed), Observations::default())
            }
        };
        let v_dropped = v.len() - v_observations.len();
        if v_dropped > 0 {
            log::warn!("{v_dropped} V observations outside of the H incidence angle range dropped");
        }
        log::info!("binning the incidence angle: {}", edges);
        let h = summarize(h, &edges, ddof);
        let v = summarize(&v_observations, &edges, ddof);
        if !h.iter().chain(v.iter()).any(|s| s.count > 0) {
            log::warn!("all bins are empty");
        }
        Ok(Self {
            edges,
            h,
            v,
            v_observations,
            v_dropped,
        })
    }
}
