//! Crop registration models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Coordinates;
use crate::validation::{
    parse_prediction_month, parse_prediction_year, validate_crop_name, ValidationError,
};

/// Size of the cultivated area
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CultivationArea {
    Small,
    Medium,
    Large,
}

impl CultivationArea {
    pub const ALL: [CultivationArea; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Form value as sent on the wire
    pub fn value(&self) -> &'static str {
        match self {
            CultivationArea::Small => "small",
            CultivationArea::Medium => "medium",
            CultivationArea::Large => "large",
        }
    }

    /// Human readable option label
    pub fn label(&self) -> &'static str {
        match self {
            CultivationArea::Small => "Small (0.5 - 2 hectares)",
            CultivationArea::Medium => "Medium (2 - 10 hectares)",
            CultivationArea::Large => "Large (10+ hectares)",
        }
    }
}

impl std::str::FromStr for CultivationArea {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|area| area.value() == s)
            .ok_or_else(|| ValidationError::InvalidChoice {
                field: CropField::CultivationA,
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for CultivationArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Agricultural practice applied to the crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgriculturalPractice {
    Irrigation,
    Organic,
    Fertilizer,
    CropRotation,
}

impl AgriculturalPractice {
    pub const ALL: [AgriculturalPractice; 4] = [
        Self::Irrigation,
        Self::Organic,
        Self::Fertilizer,
        Self::CropRotation,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            AgriculturalPractice::Irrigation => "irrigation",
            AgriculturalPractice::Organic => "organic",
            AgriculturalPractice::Fertilizer => "fertilizer",
            AgriculturalPractice::CropRotation => "crop_rotation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgriculturalPractice::Irrigation => "Irrigation",
            AgriculturalPractice::Organic => "Organic Farming",
            AgriculturalPractice::Fertilizer => "Fertilizer Use",
            AgriculturalPractice::CropRotation => "Crop Rotation",
        }
    }
}

impl std::str::FromStr for AgriculturalPractice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|practice| practice.value() == s)
            .ok_or_else(|| ValidationError::InvalidChoice {
                field: CropField::AgriculturalP,
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for AgriculturalPractice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A finalized crop, the only value ever published to shared state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropRecord {
    pub crop: String,
    pub cultivation_a: CultivationArea,
    pub agricultural_p: AgriculturalPractice,
    pub lat: f64,
    pub lng: f64,
    pub prediction_year: i32,
    pub prediction_month: u32,
}

impl CropRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Names of the editable record fields, as used by the form controls
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CropField {
    Crop,
    CultivationA,
    AgriculturalP,
    Lat,
    Lng,
    PredictionYear,
    PredictionMonth,
}

impl CropField {
    pub const ALL: [CropField; 7] = [
        Self::Crop,
        Self::CultivationA,
        Self::AgriculturalP,
        Self::Lat,
        Self::Lng,
        Self::PredictionYear,
        Self::PredictionMonth,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CropField::Crop => "crop",
            CropField::CultivationA => "cultivationA",
            CropField::AgriculturalP => "agriculturalP",
            CropField::Lat => "lat",
            CropField::Lng => "lng",
            CropField::PredictionYear => "predictionYear",
            CropField::PredictionMonth => "predictionMonth",
        }
    }
}

impl std::str::FromStr for CropField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for CropField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The in-progress form contents, every field held as raw text
///
/// `lat`/`lng` are part of the draft only so that a reset clears them too;
/// the finalized record always takes its coordinates from the map marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CropDraft {
    #[validate(length(min = 1))]
    pub crop: String,
    #[validate(length(min = 1))]
    pub cultivation_a: String,
    #[validate(length(min = 1))]
    pub agricultural_p: String,
    pub lat: String,
    pub lng: String,
    #[validate(length(min = 1))]
    pub prediction_year: String,
    #[validate(length(min = 1))]
    pub prediction_month: String,
}

impl CropDraft {
    pub fn get(&self, field: CropField) -> &str {
        match field {
            CropField::Crop => &self.crop,
            CropField::CultivationA => &self.cultivation_a,
            CropField::AgriculturalP => &self.agricultural_p,
            CropField::Lat => &self.lat,
            CropField::Lng => &self.lng,
            CropField::PredictionYear => &self.prediction_year,
            CropField::PredictionMonth => &self.prediction_month,
        }
    }

    /// Merge one field into the draft, leaving the others untouched
    pub fn set(&mut self, field: CropField, value: impl Into<String>) {
        let slot = match field {
            CropField::Crop => &mut self.crop,
            CropField::CultivationA => &mut self.cultivation_a,
            CropField::AgriculturalP => &mut self.agricultural_p,
            CropField::Lat => &mut self.lat,
            CropField::Lng => &mut self.lng,
            CropField::PredictionYear => &mut self.prediction_year,
            CropField::PredictionMonth => &mut self.prediction_month,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        CropField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Build the finalized record, injecting the marker position
    pub fn finalize(
        &self,
        marker: Coordinates,
        current_year: i32,
    ) -> Result<CropRecord, ValidationError> {
        self.validate().map_err(ValidationError::from)?;

        validate_crop_name(&self.crop)?;
        let cultivation_a = self.cultivation_a.parse()?;
        let agricultural_p = self.agricultural_p.parse()?;
        let prediction_year = parse_prediction_year(&self.prediction_year, current_year)?;
        let prediction_month = parse_prediction_month(&self.prediction_month)?;

        Ok(CropRecord {
            crop: self.crop.trim().to_string(),
            cultivation_a,
            agricultural_p,
            lat: marker.lat,
            lng: marker.lng,
            prediction_year,
            prediction_month,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> CropDraft {
        let mut draft = CropDraft::default();
        draft.set(CropField::Crop, "corn");
        draft.set(CropField::CultivationA, "small");
        draft.set(CropField::AgriculturalP, "irrigation");
        draft.set(CropField::PredictionYear, "2025");
        draft.set(CropField::PredictionMonth, "6");
        draft
    }

    #[test]
    fn test_record_serializes_with_wire_names() {
        let record = CropRecord {
            crop: "corn".to_string(),
            cultivation_a: CultivationArea::Small,
            agricultural_p: AgriculturalPractice::CropRotation,
            lat: 10.0,
            lng: 20.0,
            prediction_year: 2025,
            prediction_month: 6,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["cultivationA"], "small");
        assert_eq!(json["agriculturalP"], "crop_rotation");
        assert_eq!(json["predictionYear"], 2025);
        assert_eq!(json["predictionMonth"], 6);
        assert_eq!(json["lat"], 10.0);
    }

    #[test]
    fn test_field_names_parse() {
        for field in CropField::ALL {
            assert_eq!(field.name().parse::<CropField>().unwrap(), field);
        }
        assert!("harvest".parse::<CropField>().is_err());
    }

    #[test]
    fn test_finalize_takes_marker_coordinates() {
        let mut draft = filled_draft();
        draft.set(CropField::Lat, "99");
        let record = draft.finalize(Coordinates::new(10.0, 20.0), 2025).unwrap();
        assert_eq!(record.lat, 10.0);
        assert_eq!(record.lng, 20.0);
        assert_eq!(record.cultivation_a, CultivationArea::Small);
        assert_eq!(record.agricultural_p, AgriculturalPractice::Irrigation);
        assert_eq!(record.prediction_month, 6);
    }

    #[test]
    fn test_finalize_rejects_missing_field() {
        let mut draft = filled_draft();
        draft.set(CropField::AgriculturalP, "");
        let err = draft.finalize(Coordinates::origin(), 2025).unwrap_err();
        assert_eq!(err, ValidationError::Required(CropField::AgriculturalP));
    }

    #[test]
    fn test_finalize_rejects_unknown_choice() {
        let mut draft = filled_draft();
        draft.set(CropField::CultivationA, "huge");
        assert!(matches!(
            draft.finalize(Coordinates::origin(), 2025),
            Err(ValidationError::InvalidChoice { field: CropField::CultivationA, .. })
        ));
    }

    #[test]
    fn test_clear_empties_every_field() {
        let mut draft = filled_draft();
        draft.set(CropField::Lng, "3.5");
        draft.clear();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_option_labels() {
        assert_eq!(CultivationArea::Large.label(), "Large (10+ hectares)");
        assert_eq!(AgriculturalPractice::Organic.label(), "Organic Farming");
        assert_eq!("crop_rotation".parse::<AgriculturalPractice>().unwrap(), AgriculturalPractice::CropRotation);
    }
}
