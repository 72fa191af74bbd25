use crate::{config::ConfigError, layer::FieldError, layer::LayerError, plot::PlotError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to load the input layer")]
    Input(#[from] LayerError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("failed to render the figure")]
    Render(#[from] PlotError),
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
    #[error("failed to write the bin summaries")]
    Summary(#[from] csv::Error),
}

impl Error {
    /// Returns `true` if the error is due to a field missing from the attribute table
    pub fn is_field_error(&self) -> bool {
        matches!(self, Error::Field(_))
    }
}
