use super::{drawing, Chart, PlotError};
use crate::{config::AxisRange, observations::Observations};
use plotters::{coord::Shift, prelude::*};

const MARKER_SIZE: u32 = 2;
const OPACITY: f64 = 0.3;

/// Emissivity versus planetary radius scatter plot
pub struct RadiusChart<'a> {
    observations: &'a Observations,
    label: String,
    xaxis: AxisRange,
    yaxis: AxisRange,
    color: RGBColor,
}
impl<'a> RadiusChart<'a> {
    pub fn new<S: Into<String>>(
        observations: &'a Observations,
        label: S,
        xaxis: AxisRange,
        yaxis: AxisRange,
        color: RGBColor,
    ) -> Self {
        Self {
            observations,
            label: label.into(),
            xaxis,
            yaxis,
            color,
        }
    }
}
impl Chart for RadiusChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), PlotError> {
        root.fill(&WHITE).map_err(drawing)?;
        let mut chart = ChartBuilder::on(root)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .margin(10)
            .build_cartesian_2d(self.xaxis.range(), self.yaxis.range())
            .map_err(drawing)?;
        chart
            .configure_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(BLACK.mix(0.2))
            .x_desc("Surface emissivity")
            .y_desc("Planetary radius [km]")
            .draw()
            .map_err(drawing)?;

        let color = self.color;
        let style = color.mix(OPACITY).filled();
        chart
            .draw_series(
                self.observations
                    .emissivity_radius_iter()
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|xy| Circle::new(xy, MARKER_SIZE, style)),
            )
            .map_err(drawing)?
            .label(self.label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE + 1, color.filled()));
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(drawing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Figure, Observation};

    #[test]
    fn scatter_svg() {
        let observations: Observations = (0..10)
            .map(|i| Observation {
                emissivity: 0.2 + 0.05 * i as f64,
                incidence_angle: f64::NAN,
                latitude: f64::NAN,
                planetary_radius: 6051. + 0.5 * i as f64,
            })
            .collect();
        let chart = RadiusChart::new(
            &observations,
            "ovda",
            AxisRange::new(0.15, 0.9),
            AxisRange::new(6051., 6058.),
            BLACK,
        );
        let svg = Figure::new("radius.svg", (640, 480)).to_svg(&chart).unwrap();
        assert!(svg.contains("Surface emissivity"));
        assert!(svg.contains("ovda"));
        assert!(svg.matches("<circle").count() >= 10);
    }
}
