//! Validation applied when entities enter a store.
//!
//! Query intents do not validate their geometry; these checks guard the
//! data itself.

use crate::error::{DirectoryError, Result};
use orgdir_types::geo::GeoPoint;

/// Validates latitude/longitude of a building.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use orgdir::compute::validation::validate_coordinates;
///
/// assert!(validate_coordinates(55.7558, 37.6173).is_ok());
/// assert!(validate_coordinates(95.0, 37.6173).is_err());
/// assert!(validate_coordinates(55.7558, 200.0).is_err());
/// ```
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() {
        return Err(DirectoryError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            latitude
        )));
    }

    if !longitude.is_finite() {
        return Err(DirectoryError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            longitude
        )));
    }

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(DirectoryError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(DirectoryError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            longitude
        )));
    }

    Ok(())
}

pub fn validate_point(point: &GeoPoint) -> Result<()> {
    validate_coordinates(point.lat(), point.lon())
}

/// Validates that a required text field is not blank.
pub fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DirectoryError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}
