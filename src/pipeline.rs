//! Plotting pipelines
//!
//! Each pipeline validates its configuration, loads the layer(s), extracts the observations and
//! only then draws and writes the figure, so no figure is written if a field is missing.
//! The bin summaries are written once the figure is saved.

use crate::{
    binning::{BinSummary, Comparison},
    config::{PolarizationPlotConfig, RadiusPlotConfig},
    layer::AttributeTable,
    observations::Observations,
    plot::{Figure, Polarization, PolarizationChart, RadiusChart},
    Result,
};
use serde::Serialize;
use std::path::Path;

/// Emissivity versus planetary radius
pub fn emissivity_vs_radius(config: &RadiusPlotConfig) -> Result<Observations> {
    config.validate()?;
    let table = AttributeTable::load(&config.file)?;
    let observations = Observations::from_table(&table, &config.fields())?;
    log::info!("{} observations", observations.len());
    let label = config
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| table.name().to_string());
    let chart = RadiusChart::new(
        &observations,
        label,
        config.xaxis,
        config.yaxis,
        config.color()?,
    );
    Figure::new(&config.fig_file, config.size).save(&chart)?;
    Ok(observations)
}

/// H and V polarized emissivity versus latitude, binned along the incidence angle
pub fn polarized_emissivity(config: &PolarizationPlotConfig) -> Result<Comparison> {
    config.validate()?;
    let [h_color, h_mean_color, v_color, v_mean_color] = config.colors()?;
    let fields = config.fields();
    let load = |path: &Path| -> Result<Observations> {
        let table = AttributeTable::load(path)?.sort_by(&config.latitude_field)?;
        Ok(Observations::from_table(&table, &fields)?)
    };
    let h = load(&config.h_file)?;
    let v = load(&config.v_file)?;
    log::info!("{} H and {} V observations", h.len(), v.len());

    let comparison = Comparison::new(&h, &v, config.bin_size, config.closed, config.ddof)?;
    let chart = PolarizationChart::new(
        Polarization {
            label: "H-polarized",
            observations: &h,
            summaries: &comparison.h,
            color: h_color,
            mean_color: h_mean_color,
        },
        Polarization {
            label: "V-polarized",
            observations: &comparison.v_observations,
            summaries: &comparison.v,
            color: v_color,
            mean_color: v_mean_color,
        },
        config.xaxis,
        config.yaxis,
    );
    Figure::new(&config.fig_file, config.size).save(&chart)?;
    if let Some(path) = &config.summary_file {
        write_summaries(path, &comparison)?;
    }
    Ok(comparison)
}

#[derive(Serialize)]
struct SummaryRecord {
    polarization: &'static str,
    lower: f64,
    upper: f64,
    count: usize,
    mean_emissivity: f64,
    std_emissivity: f64,
    mean_incidence_angle: f64,
    mean_latitude: f64,
}
impl SummaryRecord {
    fn new(polarization: &'static str, summary: &BinSummary) -> Self {
        Self {
            polarization,
            lower: summary.lower,
            upper: summary.upper,
            count: summary.count,
            mean_emissivity: summary.mean_emissivity,
            std_emissivity: summary.std_emissivity,
            mean_incidence_angle: summary.mean_incidence_angle,
            mean_latitude: summary.mean_latitude,
        }
    }
}

/// Writes the H and V bin summaries to a CSV file
pub fn write_summaries<P: AsRef<Path>>(path: P, comparison: &Comparison) -> Result<()> {
    log::info!("writing bin summaries to {:?}", path.as_ref());
    let mut wtr = csv::Writer::from_path(path)?;
    for record in comparison
        .h
        .iter()
        .map(|s| SummaryRecord::new("H", s))
        .chain(comparison.v.iter().map(|s| SummaryRecord::new("V", s)))
    {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layer::tests::geojson, Error, LayerError};
    use std::io::Write;

    #[test]
    fn missing_field_writes_nothing() {
        let file = geojson(&[(0.8, 20.0, -3.0, 6052.1)]);
        let dir = tempfile::tempdir().unwrap();
        let fig_file = dir.path().join("emissivity_vs_pr.svg");
        let config = RadiusPlotConfig {
            radius_field: "RADIUS".to_string(),
            ..RadiusPlotConfig::new(file.path()).fig_file(&fig_file)
        };
        let err = emissivity_vs_radius(&config).unwrap_err();
        assert!(err.is_field_error());
        assert!(!fig_file.exists());
    }

    #[test]
    fn missing_input() {
        let config = RadiusPlotConfig::new("no/such/layer.gpkg");
        assert!(matches!(emissivity_vs_radius(&config), Err(Error::Input(_))));
    }

    #[test]
    fn unreadable_input() {
        let mut file = tempfile::Builder::new().suffix(".gpkg").tempfile().unwrap();
        file.write_all(b"garbage, not a vector layer").unwrap();
        file.flush().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let fig_file = dir.path().join("emissivity_vs_pr.svg");
        let config = RadiusPlotConfig::new(file.path()).fig_file(&fig_file);
        assert!(matches!(
            emissivity_vs_radius(&config),
            Err(Error::Input(LayerError::Open { .. }))
        ));
        assert!(!fig_file.exists());
    }

    #[test]
    fn missing_latitude_writes_nothing() {
        let h = geojson(&[(0.80, 20.0, -3.0, 6052.1), (0.70, 20.3, -1.0, 6052.1)]);
        let v = geojson(&[(0.85, 20.0, -3.0, 6052.1)]);
        let dir = tempfile::tempdir().unwrap();
        let fig_file = dir.path().join("pol_emissivity.svg");
        let summary_file = dir.path().join("bins.csv");
        let config = PolarizationPlotConfig {
            latitude_field: "LATITUDE".to_string(),
            summary_file: Some(summary_file.clone()),
            ..PolarizationPlotConfig::new(h.path(), v.path()).fig_file(&fig_file)
        };
        let err = polarized_emissivity(&config).unwrap_err();
        assert!(err.is_field_error());
        assert!(!fig_file.exists());
        assert!(!summary_file.exists());
    }

    #[test]
    fn no_summaries_without_figure() {
        let h = geojson(&[(0.80, 20.0, -3.0, 6052.1), (0.70, 20.3, -1.0, 6052.1)]);
        let v = geojson(&[(0.85, 20.0, -3.0, 6052.1)]);
        let dir = tempfile::tempdir().unwrap();
        let fig_file = dir.path().join("missing").join("pol_emissivity.svg");
        let summary_file = dir.path().join("bins.csv");
        let config = PolarizationPlotConfig {
            summary_file: Some(summary_file.clone()),
            ..PolarizationPlotConfig::new(h.path(), v.path()).fig_file(&fig_file)
        };
        assert!(matches!(
            polarized_emissivity(&config),
            Err(Error::Render(_))
        ));
        assert!(!summary_file.exists());
    }

    #[test]
    fn radius_figure() {
        let file = geojson(&[(0.8, 20.0, -3.0, 6052.1), (0.5, 30.0, 1.0, 6055.0)]);
        let dir = tempfile::tempdir().unwrap();
        let fig_file = dir.path().join("emissivity_vs_pr.svg");
        let config = RadiusPlotConfig::new(file.path()).fig_file(&fig_file);
        let observations = emissivity_vs_radius(&config).unwrap();
        assert_eq!(observations.len(), 2);
        assert!(fig_file.exists());
    }

    #[test]
    fn polarization_figure_and_summaries() {
        let h = geojson(&[
            (0.80, 20.0, -3.0, 6052.1),
            (0.82, 20.05, -2.5, 6052.1),
            (0.70, 20.3, -1.0, 6052.1),
            (0.72, 20.3, -0.5, 6052.1),
        ]);
        let v = geojson(&[
            (0.85, 20.0, -3.0, 6052.1),
            (0.75, 20.3, -1.0, 6052.1),
            (0.65, 25.0, 2.0, 6052.1),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let fig_file = dir.path().join("pol_emissivity.svg");
        let summary_file = dir.path().join("bins.csv");
        let config = PolarizationPlotConfig {
            summary_file: Some(summary_file.clone()),
            ..PolarizationPlotConfig::new(h.path(), v.path()).fig_file(&fig_file)
        };
        let comparison = polarized_emissivity(&config).unwrap();
        assert_eq!(comparison.v_dropped, 1);
        assert_eq!(comparison.h.iter().map(|s| s.count).sum::<usize>(), 4);
        assert!(fig_file.exists());
        let mut rdr = csv::Reader::from_path(&summary_file).unwrap();
        assert_eq!(
            rdr.headers().unwrap().iter().take(3).collect::<Vec<_>>(),
            vec!["polarization", "lower", "upper"]
        );
        assert_eq!(rdr.records().count(), comparison.h.len() + comparison.v.len());
    }
}
