//! Radiometer observations
//!
//! The observations are extracted from an [AttributeTable] according to the [ObservationFields]
//! naming the columns to read.

use crate::layer::{AttributeTable, FieldError};
use itertools::{Itertools, MinMaxResult};
use std::ops::Deref;

/// Default surface emissivity field name
pub const EMISSIVITY: &str = "SURFACE_EMISSIVITY";
/// Default incidence angle field name
pub const INCIDENCE_ANGLE: &str = "INCIDENCE_ANGLE";
/// Default footprint latitude field name
pub const LATITUDE: &str = "RAD_FOOTPRINT_LATITUDE";
/// Default planetary radius field name
pub const PLANETARY_RADIUS: &str = "AVERAGE_PLANETARY_RADIUS";

/// Field names of the observation attributes
///
/// The emissivity is always read, the other fields only if they are set.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationFields {
    emissivity: String,
    incidence_angle: Option<String>,
    latitude: Option<String>,
    planetary_radius: Option<String>,
}
impl Default for ObservationFields {
    fn default() -> Self {
        Self {
            emissivity: EMISSIVITY.to_string(),
            incidence_angle: Some(INCIDENCE_ANGLE.to_string()),
            latitude: Some(LATITUDE.to_string()),
            planetary_radius: Some(PLANETARY_RADIUS.to_string()),
        }
    }
}
impl ObservationFields {
    /// Only the emissivity field
    pub fn emissivity<S: Into<String>>(field: S) -> Self {
        Self {
            emissivity: field.into(),
            incidence_angle: None,
            latitude: None,
            planetary_radius: None,
        }
    }
    pub fn incidence_angle<S: Into<String>>(self, field: S) -> Self {
        Self {
            incidence_angle: Some(field.into()),
            ..self
        }
    }
    pub fn latitude<S: Into<String>>(self, field: S) -> Self {
        Self {
            latitude: Some(field.into()),
            ..self
        }
    }
    pub fn planetary_radius<S: Into<String>>(self, field: S) -> Self {
        Self {
            planetary_radius: Some(field.into()),
            ..self
        }
    }
}

/// Radiometer observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub emissivity: f64,
    /// incidence angle [deg]
    pub incidence_angle: f64,
    /// footprint center latitude [deg]
    pub latitude: f64,
    /// planetary radius [km]
    pub planetary_radius: f64,
}

/// Observations of a layer, in the table row order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observations(Vec<Observation>);
impl Deref for Observations {
    type Target = Vec<Observation>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<Vec<Observation>> for Observations {
    fn from(value: Vec<Observation>) -> Self {
        Self(value)
    }
}
impl FromIterator<Observation> for Observations {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl Observations {
    /// Extracts the observations from the table
    ///
    /// All the requested fields are checked before any value is read,
    /// the fields that are not requested are set to `NaN`.
    pub fn from_table(
        table: &AttributeTable,
        fields: &ObservationFields,
    ) -> Result<Self, FieldError> {
        let n = table.height();
        let read = |field: Option<&String>| -> Result<Vec<f64>, FieldError> {
            match field {
                Some(field) => table.column(field),
                None => Ok(vec![f64::NAN; n]),
            }
        };
        let emissivity = read(Some(&fields.emissivity))?;
        let incidence_angle = read(fields.incidence_angle.as_ref())?;
        let latitude = read(fields.latitude.as_ref())?;
        let planetary_radius = read(fields.planetary_radius.as_ref())?;
        Ok(emissivity
            .into_iter()
            .zip(incidence_angle)
            .zip(latitude)
            .zip(planetary_radius)
            .map(
                |(((emissivity, incidence_angle), latitude), planetary_radius)| Observation {
                    emissivity,
                    incidence_angle,
                    latitude,
                    planetary_radius,
                },
            )
            .collect())
    }
    pub fn emissivity_iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|o| o.emissivity)
    }
    pub fn incidence_angle_iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|o| o.incidence_angle)
    }
    pub fn latitude_iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|o| o.latitude)
    }
    /// Iterator over the (emissivity,radius) pairs
    pub fn emissivity_radius_iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.iter().map(|o| (o.emissivity, o.planetary_radius))
    }
    /// Iterator over the (latitude,emissivity) pairs
    pub fn latitude_emissivity_iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.iter().map(|o| (o.latitude, o.emissivity))
    }
    /// Returns the range of the incidence angle, `None` if there is no valid angle
    pub fn incidence_range(&self) -> Option<(f64, f64)> {
        match self
            .incidence_angle_iter()
            .filter(|x| !x.is_nan())
            .minmax_by(|a, b| a.total_cmp(b))
        {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(x) => Some((x, x)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }
    /// Returns the observations with an incidence angle within `[lo,hi]`
    pub fn within_incidence(&self, lo: f64, hi: f64) -> Self {
        self.iter()
            .filter(|o| o.incidence_angle >= lo && o.incidence_angle <= hi)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn table() -> AttributeTable {
        let frame = DataFrame::new(vec![
            Column::new(EMISSIVITY.into(), vec![0.5, 0.6, 0.8]),
            Column::new(INCIDENCE_ANGLE.into(), vec![30i32, 10, 20]),
            Column::new(LATITUDE.into(), vec![-1.0, 0.0, 1.0]),
        ])
        .unwrap();
        AttributeTable::from_frame("test", frame)
    }

    #[test]
    fn unrequested_fields_are_nan() {
        let obs = Observations::from_table(
            &table(),
            &ObservationFields::emissivity(EMISSIVITY).incidence_angle(INCIDENCE_ANGLE),
        )
        .unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[1].incidence_angle, 10.0);
        assert!(obs.iter().all(|o| o.planetary_radius.is_nan()));
    }

    #[test]
    fn missing_requested_field() {
        let err = Observations::from_table(&table(), &ObservationFields::default()).unwrap_err();
        match err {
            FieldError::Missing { field, .. } => assert_eq!(field, PLANETARY_RADIUS),
            _ => panic!("expected a missing field error"),
        }
    }

    #[test]
    fn incidence_range_and_filter() {
        let obs: Observations = [10.0, f64::NAN, 25.0, 40.0, 5.0]
            .into_iter()
            .map(|incidence_angle| Observation {
                emissivity: 0.5,
                incidence_angle,
                latitude: 0.0,
                planetary_radius: 6051.8,
            })
            .collect();
        assert_eq!(obs.incidence_range(), Some((5.0, 40.0)));
        let kept = obs.within_incidence(10.0, 25.0);
        assert_eq!(kept.incidence_angle_iter().collect::<Vec<_>>(), vec![10.0, 25.0]);
        assert_eq!(Observations::default().incidence_range(), None);
    }
}
