//! Recommendation request and response models

use serde::{Deserialize, Serialize};

use super::crop::{AgriculturalPractice, CropRecord, CultivationArea};

/// Message shown when a recommendation cannot be obtained
pub const NO_CROP_MESSAGE: &str = "Por favor recuerda que primero debes registrar un cultivo";

/// Which narrative the content-generation endpoint should produce
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AnalysisContext {
    Precipitation,
    Drought,
}

impl AnalysisContext {
    pub const ALL: [AnalysisContext; 2] = [Self::Precipitation, Self::Drought];

    /// Tag sent to the recommendation endpoint
    pub fn tag(&self) -> &'static str {
        match self {
            AnalysisContext::Precipitation => "Precipitation",
            AnalysisContext::Drought => "Drought",
        }
    }

    /// Route the view is mounted on
    pub fn path(&self) -> &'static str {
        match self {
            AnalysisContext::Precipitation => "/analysisCropP",
            AnalysisContext::Drought => "/analysisCropD",
        }
    }

    /// Label used in the navigation sidebar
    pub fn nav_label(&self) -> &'static str {
        match self {
            AnalysisContext::Precipitation => "Precipitation",
            AnalysisContext::Drought => "Droughts",
        }
    }
}

impl std::fmt::Display for AnalysisContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for AnalysisContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Precipitation" => Ok(AnalysisContext::Precipitation),
            "Drought" => Ok(AnalysisContext::Drought),
            other => Err(format!("Unknown analysis context: {}", other)),
        }
    }
}

/// Body of `POST /generate-content`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub crop: String,
    pub cultivation_a: CultivationArea,
    pub agricultural_p: AgriculturalPractice,
    pub lat: f64,
    pub lng: f64,
    pub prediction_year: i32,
    pub prediction_month: u32,
    pub context: AnalysisContext,
}

impl RecommendationRequest {
    pub fn new(record: &CropRecord, context: AnalysisContext) -> Self {
        Self {
            crop: record.crop.clone(),
            cultivation_a: record.cultivation_a,
            agricultural_p: record.agricultural_p,
            lat: record.lat,
            lng: record.lng,
            prediction_year: record.prediction_year,
            prediction_month: record.prediction_month,
            context,
        }
    }
}

/// Success body of `POST /generate-content`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationResponse {
    pub content: String,
}
