//! GIS vector layer attribute table
//!
//! The first layer of a vector dataset is read with GDAL and its attribute fields are stored
//! into a [polars] [DataFrame]: fields holding only integer or real values become `f64` columns,
//! all the others become string columns.

use gdal::{
    vector::{FieldValue, LayerAccess},
    Dataset,
};
use polars::prelude::*;
use std::{
    fmt,
    path::{Path, PathBuf},
    time::Instant,
};

#[derive(thiserror::Error, Debug)]
pub enum LayerError {
    #[error("input file {0:?} not found")]
    NotFound(PathBuf),
    #[error("failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: gdal::errors::GdalError,
    },
    #[error("no vector layer in {0:?}")]
    NoLayer(PathBuf),
    #[error("failed to read the attribute table")]
    Table(#[from] PolarsError),
}

#[derive(thiserror::Error, Debug)]
pub enum FieldError {
    #[error("field {field:?} not found in layer {layer:?} (available: {available})")]
    Missing {
        field: String,
        layer: String,
        available: String,
    },
    #[error("field {field:?} cannot be read as numbers")]
    NotNumeric {
        field: String,
        #[source]
        source: PolarsError,
    },
}
type Result<T> = std::result::Result<T, LayerError>;

/// Attribute rows of a vector layer
#[derive(Debug, Clone)]
pub struct AttributeTable {
    name: String,
    frame: DataFrame,
}

/// A single attribute column as read from GDAL
enum Values {
    Numbers(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}
impl Values {
    fn push(&mut self, value: Option<FieldValue>) {
        match self {
            Values::Numbers(numbers) => match value.as_ref().map(as_number) {
                Some(Some(x)) => numbers.push(Some(x)),
                Some(None) => {
                    let mut text: Vec<Option<String>> = numbers
                        .iter()
                        .map(|x| x.map(|x| x.to_string()))
                        .collect();
                    text.push(value.map(as_text));
                    *self = Values::Text(text);
                }
                None => numbers.push(None),
            },
            Values::Text(text) => text.push(value.map(as_text)),
        }
    }
    fn into_column(self, name: &str) -> Column {
        match self {
            Values::Numbers(numbers) => Column::new(name.into(), numbers),
            Values::Text(text) => Column::new(name.into(), text),
        }
    }
}
fn as_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::RealValue(x) => Some(*x),
        FieldValue::IntegerValue(x) => Some(*x as f64),
        FieldValue::Integer64Value(x) => Some(*x as f64),
        _ => None,
    }
}
fn as_text(value: FieldValue) -> String {
    match value {
        FieldValue::StringValue(s) => s,
        FieldValue::RealValue(x) => x.to_string(),
        FieldValue::IntegerValue(x) => x.to_string(),
        FieldValue::Integer64Value(x) => x.to_string(),
        other => format!("{:?}", other),
    }
}

impl AttributeTable {
    /// Loads the attribute table of the first layer in the vector file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LayerError::NotFound(path.to_path_buf()));
        }
        log::info!("Loading {:?}...", path);
        let now = Instant::now();
        let dataset = Dataset::open(path).map_err(|source| LayerError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::first_layer(&dataset, path)?;
        log::info!(
            "... loaded layer {:?} ({} rows) in {:.3}s",
            table.name,
            table.height(),
            now.elapsed().as_secs_f64()
        );
        Ok(table)
    }
    fn first_layer(dataset: &Dataset, path: &Path) -> Result<Self> {
        let mut layer = dataset
            .layers()
            .next()
            .ok_or_else(|| LayerError::NoLayer(path.to_path_buf()))?;
        let name = layer.name();
        let names: Vec<String> = layer.defn().fields().map(|field| field.name()).collect();
        let mut columns: Vec<Values> = names.iter().map(|_| Values::Numbers(vec![])).collect();
        for feature in layer.features() {
            for (values, (_, value)) in columns.iter_mut().zip(feature.fields()) {
                values.push(value);
            }
        }
        let frame = DataFrame::new(
            columns
                .into_iter()
                .zip(&names)
                .map(|(values, name)| values.into_column(name))
                .collect(),
        )?;
        Ok(Self { name, frame })
    }
    /// Wraps an existing [DataFrame]
    pub fn from_frame<S: Into<String>>(name: S, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }
    /// Layer name
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Number of rows
    pub fn height(&self) -> usize {
        self.frame.height()
    }
    /// Field names, in the layer order
    pub fn field_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }
    fn missing(&self, field: &str) -> FieldError {
        FieldError::Missing {
            field: field.to_string(),
            layer: self.name.clone(),
            available: self.field_names().join(", "),
        }
    }
    /// Returns the values of `field` as `f64`, nulls and non numeric entries are `NaN`
    pub fn column(&self, field: &str) -> std::result::Result<Vec<f64>, FieldError> {
        let column = self.frame.column(field).map_err(|_| self.missing(field))?;
        let numbers = column
            .cast(&DataType::Float64)
            .map_err(|source| FieldError::NotNumeric {
                field: field.to_string(),
                source,
            })?;
        let values = numbers
            .as_materialized_series()
            .f64()
            .map_err(|source| FieldError::NotNumeric {
                field: field.to_string(),
                source,
            })?
            .into_iter()
            .map(|x| x.unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }
    /// Returns a copy of the table sorted in ascending order of `field`
    pub fn sort_by(&self, field: &str) -> std::result::Result<Self, FieldError> {
        if self.frame.column(field).is_err() {
            return Err(self.missing(field));
        }
        let frame = self
            .frame
            .sort(
                [field],
                SortMultipleOptions::default()
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .map_err(|source| FieldError::NotNumeric {
                field: field.to_string(),
                source,
            })?;
        Ok(Self {
            name: self.name.clone(),
            frame,
        })
    }
}
impl fmt::Display for AttributeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} rows): ", self.name, self.height())?;
        write!(f, "[{}]", self.field_names().join(", "))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::io::Write;

    pub fn geojson(features: &[(f64, f64, f64, f64)]) -> tempfile::NamedTempFile {
        let features: Vec<String> = features
            .iter()
            .map(|(emissivity, incidence, latitude, radius)| {
                format!(
                    r#"{{"type":"Feature","properties":{{"SURFACE_EMISSIVITY":{},"INCIDENCE_ANGLE":{},"RAD_FOOTPRINT_LATITUDE":{},"AVERAGE_PLANETARY_RADIUS":{},"ORBIT":"O{}"}},"geometry":{{"type":"Point","coordinates":[0.0,{}]}}}}"#,
                    emissivity, incidence, latitude, radius, incidence, latitude
                )
            })
            .collect();
        let mut file = tempfile::Builder::new()
            .suffix(".geojson")
            .tempfile()
            .unwrap();
        write!(
            file,
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn load_geojson() {
        let file = geojson(&[(0.8, 20.0, -3.0, 6052.1), (0.7, 25.0, -2.0, 6052.5)]);
        let table = AttributeTable::load(file.path()).unwrap();
        println!("{}", table);
        assert_eq!(table.height(), 2);
        assert_eq!(table.column("SURFACE_EMISSIVITY").unwrap(), vec![0.8, 0.7]);
        assert!(table.field_names().contains(&"ORBIT".to_string()));
    }

    #[test]
    fn missing_file() {
        let err = AttributeTable::load("no/such/file.gpkg").unwrap_err();
        assert!(matches!(err, LayerError::NotFound(_)));
    }

    #[test]
    fn unreadable_file() {
        let mut file = tempfile::Builder::new().suffix(".gpkg").tempfile().unwrap();
        file.write_all(b"\x00\x13 not a geopackage \xff\xfe").unwrap();
        file.flush().unwrap();
        let err = AttributeTable::load(file.path()).unwrap_err();
        assert!(matches!(err, LayerError::Open { .. }));
    }

    #[test]
    fn no_layer() {
        // an in-memory dataset, GeoJSON and GeoPackage files always hold a layer
        let dataset = gdal::DriverManager::get_driver_by_name("Memory")
            .or_else(|_| gdal::DriverManager::get_driver_by_name("MEM"))
            .unwrap()
            .create_vector_only("")
            .unwrap();
        assert_eq!(dataset.layer_count(), 0);
        let err = AttributeTable::first_layer(&dataset, Path::new("memory")).unwrap_err();
        assert!(matches!(err, LayerError::NoLayer(_)));
    }

    #[test]
    fn missing_field() {
        let file = geojson(&[(0.8, 20.0, -3.0, 6052.1)]);
        let table = AttributeTable::load(file.path()).unwrap();
        let err = table.column("EMISSIVITY").unwrap_err();
        assert!(matches!(err, FieldError::Missing { .. }));
        assert!(table.sort_by("LATITUDE").is_err());
    }

    #[test]
    fn sort_by_latitude() {
        let file = geojson(&[
            (0.8, 20.0, 3.0, 6052.1),
            (0.7, 25.0, -2.0, 6052.5),
            (0.6, 22.0, 1.0, 6053.0),
        ]);
        let table = AttributeTable::load(file.path())
            .unwrap()
            .sort_by("RAD_FOOTPRINT_LATITUDE")
            .unwrap();
        assert_eq!(
            table.column("RAD_FOOTPRINT_LATITUDE").unwrap(),
            vec![-2.0, 1.0, 3.0]
        );
        assert_eq!(table.column("SURFACE_EMISSIVITY").unwrap(), vec![0.7, 0.6, 0.8]);
    }

    #[test]
    fn nulls_are_nan() {
        let frame = DataFrame::new(vec![Column::new(
            "SURFACE_EMISSIVITY".into(),
            vec![Some(0.5), None],
        )])
        .unwrap();
        let table = AttributeTable::from_frame("test", frame);
        let values = table.column("SURFACE_EMISSIVITY").unwrap();
        assert_eq!(values[0], 0.5);
        assert!(values[1].is_nan());
    }
}
