//! Dual-polarized emissivity versus latitude
//!
//! Plots the H and V polarized Magellan emissivity as a function of the footprint latitude,
//! together with the emissivity mean and standard deviation within incidence angle bins.
//!
//! ```shell
//! pol-emissivity ovda_h.gpkg ovda_v.gpkg -binSize 0.5 -figFile ovda.pdf
//! ```

use std::path::PathBuf;

use emissivity_plots::{
    cli,
    config::{AxisRange, PolarizationPlotConfig},
    pipeline, Closed,
};
use structopt::{clap::AppSettings, StructOpt};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pol-emissivity",
    about = "Plot dual-polarized microwave emissivity as a function of latitude",
    setting = AppSettings::AllowNegativeNumbers
)]
struct Opt {
    /// GIS file containing H-polarized Magellan emissivity data
    #[structopt(name = "Hfile", parse(from_os_str))]
    h_file: PathBuf,
    /// GIS file containing V-polarized Magellan emissivity data
    #[structopt(name = "Vfile", parse(from_os_str))]
    v_file: PathBuf,
    /// Surface emissivity field name
    #[structopt(long = "emisField", default_value = "SURFACE_EMISSIVITY")]
    emis_field: String,
    /// Latitude field name
    #[structopt(long = "latField", default_value = "RAD_FOOTPRINT_LATITUDE")]
    lat_field: String,
    /// Incidence angle field name
    #[structopt(long = "incField", default_value = "INCIDENCE_ANGLE")]
    inc_field: String,
    /// Size of the incidence angle bins
    #[structopt(long = "binSize", default_value = "0.1")]
    bin_size: f64,
    /// Bin side including the edge: right or left
    #[structopt(long, default_value = "right")]
    closed: Closed,
    /// Delta degrees of freedom of the emissivity standard deviation
    #[structopt(long, default_value = "1")]
    ddof: usize,
    /// Filename for the output figure (PDF, SVG or PNG)
    #[structopt(long = "figFile", default_value = "pol_emissivity.pdf", parse(from_os_str))]
    fig_file: PathBuf,
    /// Leftmost value for the x axis
    #[structopt(long = "xaxis_min", default_value = "-10.0")]
    xaxis_min: f64,
    /// Rightmost value for the x axis
    #[structopt(long = "xaxis_max", default_value = "4.5")]
    xaxis_max: f64,
    /// Bottommost value for the y axis
    #[structopt(long = "yaxis_min", default_value = "0.25")]
    yaxis_min: f64,
    /// Topmost value for the y axis
    #[structopt(long = "yaxis_max", default_value = "1.05")]
    yaxis_max: f64,
    /// H-polarized observations color
    #[structopt(long = "hColor", default_value = "#ae76a3")]
    h_color: String,
    /// H-polarized bin means color
    #[structopt(long = "hMeanColor", default_value = "#882e72")]
    h_mean_color: String,
    /// V-polarized observations color
    #[structopt(long = "vColor", default_value = "#90c987")]
    v_color: String,
    /// V-polarized bin means color
    #[structopt(long = "vMeanColor", default_value = "#4eb27f")]
    v_mean_color: String,
    /// CSV file to write the bin summaries to
    #[structopt(long = "summaryFile", parse(from_os_str))]
    summary_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_iter(cli::normalize_args(std::env::args()));
    log::debug!("{:?}", opt);

    let config = PolarizationPlotConfig {
        h_file: opt.h_file,
        v_file: opt.v_file,
        emissivity_field: opt.emis_field,
        latitude_field: opt.lat_field,
        incidence_field: opt.inc_field,
        bin_size: opt.bin_size,
        closed: opt.closed,
        ddof: opt.ddof,
        fig_file: opt.fig_file,
        xaxis: AxisRange::new(opt.xaxis_min, opt.xaxis_max),
        yaxis: AxisRange::new(opt.yaxis_min, opt.yaxis_max),
        h_color: opt.h_color,
        h_mean_color: opt.h_mean_color,
        v_color: opt.v_color,
        v_mean_color: opt.v_mean_color,
        summary_file: opt.summary_file,
        ..Default::default()
    };
    let comparison = pipeline::polarized_emissivity(&config)?;

    println!("SUMMARY:");
    println!(" - {}", comparison.edges);
    for (pol, summaries) in [("H", &comparison.h), ("V", &comparison.v)] {
        println!(
            " - {}: {} observations in {} non-empty bins",
            pol,
            summaries.iter().map(|s| s.count).sum::<usize>(),
            summaries.iter().filter(|s| s.count > 0).count()
        );
    }
    if comparison.v_dropped > 0 {
        println!(
            " - {} V observations outside of the H incidence angle range",
            comparison.v_dropped
        );
    }
    println!(" - figure: {:?}", config.fig_file);

    Ok(())
}
