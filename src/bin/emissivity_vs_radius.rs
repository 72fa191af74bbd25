//! Emissivity versus planetary radius
//!
//! ```shell
//! emissivity-vs-radius maxwell.gpkg -color C0 -figFile maxwell.pdf
//! ```

use std::path::PathBuf;

use emissivity_plots::{
    cli,
    config::{AxisRange, RadiusPlotConfig},
    pipeline,
};
use structopt::{clap::AppSettings, StructOpt};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "emissivity-vs-radius",
    about = "Plot Magellan surface emissivity as a function of the planetary radius",
    setting = AppSettings::AllowNegativeNumbers
)]
struct Opt {
    /// GIS file containing Magellan emissivity data
    #[structopt(parse(from_os_str))]
    file: PathBuf,
    /// Surface emissivity field name
    #[structopt(long = "emisField", default_value = "SURFACE_EMISSIVITY")]
    emis_field: String,
    /// Planetary radius field name
    #[structopt(long = "prField", default_value = "AVERAGE_PLANETARY_RADIUS")]
    pr_field: String,
    /// Filename for the output figure (PDF, SVG or PNG)
    #[structopt(long = "figFile", default_value = "emissivity_vs_pr.pdf", parse(from_os_str))]
    fig_file: PathBuf,
    /// Leftmost value for the x axis
    #[structopt(long = "xaxis_min", default_value = "0.15")]
    xaxis_min: f64,
    /// Rightmost value for the x axis
    #[structopt(long = "xaxis_max", default_value = "0.9")]
    xaxis_max: f64,
    /// Bottommost value for the y axis
    #[structopt(long = "yaxis_min", default_value = "6051")]
    yaxis_min: f64,
    /// Topmost value for the y axis
    #[structopt(long = "yaxis_max", default_value = "6058")]
    yaxis_max: f64,
    /// Marker color
    #[structopt(long, default_value = "k")]
    color: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_iter(cli::normalize_args(std::env::args()));
    log::debug!("{:?}", opt);

    let config = RadiusPlotConfig {
        file: opt.file,
        emissivity_field: opt.emis_field,
        radius_field: opt.pr_field,
        fig_file: opt.fig_file,
        xaxis: AxisRange::new(opt.xaxis_min, opt.xaxis_max),
        yaxis: AxisRange::new(opt.yaxis_min, opt.yaxis_max),
        color: opt.color,
        ..Default::default()
    };
    let observations = pipeline::emissivity_vs_radius(&config)?;
    println!(
        "{} observations plotted in {:?}",
        observations.len(),
        config.fig_file
    );

    Ok(())
}
