//! Validation utilities for the crop registration form
//!
//! The form only enforces required fields and the fixed option lists; there
//! is no cross-field validation.

use thiserror::Error;

use crate::models::CropField;

/// Number of selectable prediction years, starting at the current year
pub const PREDICTION_YEAR_SPAN: i32 = 10;

/// Form validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field {0} is required")]
    Required(CropField),

    #[error("Invalid value '{value}' for {field}")]
    InvalidChoice { field: CropField, value: String },

    #[error("Value '{value}' for {field} is out of range")]
    OutOfRange { field: CropField, value: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl ValidationError {
    /// The form field the error refers to, if any
    pub fn field(&self) -> Option<CropField> {
        match self {
            ValidationError::Required(field)
            | ValidationError::InvalidChoice { field, .. }
            | ValidationError::OutOfRange { field, .. } => Some(*field),
            ValidationError::UnknownField(_) => None,
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let failed = errors.field_errors();
        CropField::ALL
            .into_iter()
            .find(|field| failed.contains_key(struct_field_name(*field)))
            .map(ValidationError::Required)
            .unwrap_or_else(|| ValidationError::UnknownField(format!("{:?}", failed.keys())))
    }
}

/// Rust-side field name of the draft struct, as reported by `validator`
fn struct_field_name(field: CropField) -> &'static str {
    match field {
        CropField::Crop => "crop",
        CropField::CultivationA => "cultivation_a",
        CropField::AgriculturalP => "agricultural_p",
        CropField::Lat => "lat",
        CropField::Lng => "lng",
        CropField::PredictionYear => "prediction_year",
        CropField::PredictionMonth => "prediction_month",
    }
}

/// Validate the free-text crop name
pub fn validate_crop_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required(CropField::Crop));
    }
    Ok(())
}

/// The selectable prediction years, `current_year` first
pub fn prediction_years(current_year: i32) -> Vec<i32> {
    (0..PREDICTION_YEAR_SPAN).map(|i| current_year + i).collect()
}

/// The selectable prediction months
pub fn prediction_months() -> Vec<u32> {
    (1..=12).collect()
}

/// Parse a prediction year and check it falls in the selectable window
pub fn parse_prediction_year(value: &str, current_year: i32) -> Result<i32, ValidationError> {
    let out_of_range = || ValidationError::OutOfRange {
        field: CropField::PredictionYear,
        value: value.to_string(),
    };
    let year: i32 = value.trim().parse().map_err(|_| out_of_range())?;
    if year < current_year || year >= current_year + PREDICTION_YEAR_SPAN {
        return Err(out_of_range());
    }
    Ok(year)
}

/// Parse a prediction month (1..=12)
pub fn parse_prediction_month(value: &str) -> Result<u32, ValidationError> {
    let out_of_range = || ValidationError::OutOfRange {
        field: CropField::PredictionMonth,
        value: value.to_string(),
    };
    let month: u32 = value.trim().parse().map_err(|_| out_of_range())?;
    if !(1..=12).contains(&month) {
        return Err(out_of_range());
    }
    Ok(month)
}

/// Parse a coordinate as the map widget reports it
pub fn parse_coordinate(field: CropField, value: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::OutOfRange {
        field,
        value: value.to_string(),
    };
    let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
    let limit = if field == CropField::Lat { 90.0 } else { 180.0 };
    if !parsed.is_finite() || parsed.abs() > limit {
        return Err(invalid());
    }
    Ok(parsed)
}
