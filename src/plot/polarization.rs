use super::{drawing, Chart, PlotError};
use crate::{binning::BinSummary, config::AxisRange, observations::Observations};
use plotters::{coord::Shift, prelude::*};

const FONT_SIZE: f64 = 20.;

/// A polarization series: observations and bin summaries
pub struct Polarization<'a> {
    pub label: &'a str,
    pub observations: &'a Observations,
    pub summaries: &'a [BinSummary],
    /// observations and spread color
    pub color: RGBColor,
    /// bin means color
    pub mean_color: RGBColor,
}

/// Contiguous runs of bins with a defined emissivity spread, in ascending order of mean latitude
///
/// Empty bins are skipped, bins with an undefined standard deviation break the runs.
pub fn spread_segments(summaries: &[BinSummary]) -> Vec<Vec<&BinSummary>> {
    let mut bins: Vec<&BinSummary> = summaries.iter().filter(|s| s.has_mean()).collect();
    bins.sort_by(|a, b| a.mean_latitude.total_cmp(&b.mean_latitude));
    let mut segments: Vec<Vec<&BinSummary>> = vec![];
    let mut segment: Vec<&BinSummary> = vec![];
    for bin in bins {
        if bin.has_spread() {
            segment.push(bin);
        } else if !segment.is_empty() {
            segments.push(std::mem::take(&mut segment));
        }
    }
    if !segment.is_empty() {
        segments.push(segment);
    }
    segments
}

/// H and V polarized emissivity versus footprint latitude
pub struct PolarizationChart<'a> {
    h: Polarization<'a>,
    v: Polarization<'a>,
    xaxis: AxisRange,
    yaxis: AxisRange,
}
impl<'a> PolarizationChart<'a> {
    pub fn new(
        h: Polarization<'a>,
        v: Polarization<'a>,
        xaxis: AxisRange,
        yaxis: AxisRange,
    ) -> Self {
        Self { h, v, xaxis, yaxis }
    }
}
impl Chart for PolarizationChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), PlotError> {
        root.fill(&WHITE).map_err(drawing)?;
        let font = ("sans-serif", FONT_SIZE);
        let mut chart = ChartBuilder::on(root)
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .margin(20)
            .build_cartesian_2d(self.xaxis.range(), self.yaxis.range())
            .map_err(drawing)?;
        chart
            .configure_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(BLACK.mix(0.2))
            .x_desc("Footprint center latitude")
            .y_desc("Polarized emissivity")
            .x_label_formatter(&|x| format!("{:.0} °", x))
            .label_style(font)
            .axis_desc_style(font)
            .draw()
            .map_err(drawing)?;

        // observations
        for pol in [&self.h, &self.v] {
            let style = pol.color.stroke_width(1);
            chart
                .draw_series(
                    pol.observations
                        .latitude_emissivity_iter()
                        .filter(|(x, y)| x.is_finite() && y.is_finite())
                        .map(|xy| Circle::new(xy, 3, style)),
                )
                .map_err(drawing)?;
        }
        // mean +/- std
        for pol in [&self.h, &self.v] {
            let style = pol.color.mix(0.5).filled();
            chart
                .draw_series(spread_segments(pol.summaries).into_iter().map(|segment| {
                    let upper = segment
                        .iter()
                        .map(|s| (s.mean_latitude, s.emissivity_band().1));
                    let lower = segment
                        .iter()
                        .rev()
                        .map(|s| (s.mean_latitude, s.emissivity_band().0));
                    Polygon::new(upper.chain(lower).collect::<Vec<_>>(), style)
                }))
                .map_err(drawing)?;
        }
        // bin means
        for pol in [&self.v, &self.h] {
            let color = pol.mean_color;
            chart
                .draw_series(
                    pol.summaries
                        .iter()
                        .filter(|s| s.has_mean())
                        .map(|s| {
                            Cross::new(
                                (s.mean_latitude, s.mean_emissivity),
                                4,
                                color.stroke_width(2),
                            )
                        }),
                )
                .map_err(drawing)?
                .label(pol.label)
                .legend(move |(x, y)| Cross::new((x, y), 4, color.stroke_width(2)));
        }
        chart
            .configure_series_labels()
            .label_font(font)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(drawing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        binning::{summarize, BinEdges, Closed},
        Figure, Observation,
    };

    fn summary(mean_latitude: f64, count: usize, std_emissivity: f64) -> BinSummary {
        BinSummary {
            lower: 0.,
            upper: 1.,
            count,
            mean_emissivity: if count > 0 { 0.8 } else { f64::NAN },
            std_emissivity,
            mean_incidence_angle: 0.5,
            mean_latitude: if count > 0 { mean_latitude } else { f64::NAN },
        }
    }

    #[test]
    fn segments_split_on_undefined_spread() {
        let summaries = vec![
            summary(3., 2, 0.1),
            summary(-1., 3, 0.1),
            summary(0., 0, f64::NAN),
            summary(1., 1, f64::NAN),
            summary(2., 2, 0.05),
            summary(-2., 4, 0.1),
        ];
        let segments = spread_segments(&summaries);
        let latitudes: Vec<Vec<f64>> = segments
            .iter()
            .map(|s| s.iter().map(|b| b.mean_latitude).collect())
            .collect();
        assert_eq!(latitudes, vec![vec![-2., -1.], vec![2., 3.]]);
    }

    #[test]
    fn polarization_svg() {
        let observations = |offset: f64| -> Observations {
            (0..50)
                .map(|i| Observation {
                    emissivity: 0.6 + offset + 0.002 * i as f64,
                    incidence_angle: 20. + 0.2 * i as f64,
                    latitude: -8. + 0.2 * i as f64,
                    planetary_radius: f64::NAN,
                })
                .collect()
        };
        let (h, v) = (observations(0.), observations(0.1));
        let edges = BinEdges::new(20., 29.8, 1., Closed::Right).unwrap();
        let (h_summaries, v_summaries) = (summarize(&h, &edges, 1), summarize(&v, &edges, 1));
        let chart = PolarizationChart::new(
            Polarization {
                label: "H-polarized",
                observations: &h,
                summaries: &h_summaries,
                color: RGBColor(0xae, 0x76, 0xa3),
                mean_color: RGBColor(0x88, 0x2e, 0x72),
            },
            Polarization {
                label: "V-polarized",
                observations: &v,
                summaries: &v_summaries,
                color: RGBColor(0x90, 0xc9, 0x87),
                mean_color: RGBColor(0x4e, 0xb2, 0x7f),
            },
            AxisRange::new(-10., 4.5),
            AxisRange::new(0.25, 1.05),
        );
        let svg = Figure::new("pol.svg", (1600, 800)).to_svg(&chart).unwrap();
        assert!(svg.contains("H-polarized") && svg.contains("V-polarized"));
        assert!(svg.contains("°"));
        assert!(svg.contains("<polygon"));
    }
}
