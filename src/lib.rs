/*!
# Magellan emissivity plots

Plots of the Magellan radiometer surface emissivity read from GIS vector layers
(GeoPackage, GeoJSON, Shapefile, ... anything GDAL can open).

Two pipelines are provided, each with its own binary:
 - `emissivity-vs-radius`: emissivity versus planetary radius scatter plot of a single layer,
 - `pol-emissivity`: H and V polarized emissivity versus footprint latitude, binned along the incidence angle.

```shell
RUST_LOG=info cargo r -r --bin pol-emissivity -- ovda_h.gpkg ovda_v.gpkg -binSize 0.5
```
*/

pub mod binning;
pub mod cli;
pub mod color;
pub mod config;
mod error;
pub mod layer;
pub mod observations;
pub mod pipeline;
pub mod plot;

pub use binning::{BinEdges, BinSummary, Closed, Comparison};
pub use error::Error;
pub use layer::{AttributeTable, FieldError, LayerError};
pub use observations::{Observation, ObservationFields, Observations};
pub use plot::{Chart, Figure, Format, PlotError};

pub type Result<T> = std::result::Result<T, Error>;
