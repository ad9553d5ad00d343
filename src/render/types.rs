use serde::{Deserialize, Serialize};

/// Body of a successful prediction. The `error` field is inspected on the
/// raw JSON before this is ever deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub disease: String,
    pub prediction: String,
    pub confidence: f64,
    pub risk_level: String,
    pub tabular_result: ModalityResult,
    pub image_result: ModalityResult,
    pub blockchain_tx: String,
    pub data_hash: String,
    pub image_hash: String,
}

/// One per-modality sub-analysis of the same case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalityResult {
    pub prediction: String,
    pub confidence: f64,
    pub risk_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Positive,
    Negative,
}

impl Classification {
    /// Case-sensitive lexical rule: exactly "Positive", or any label containing
    /// "Disease". "No Disease Detected" therefore classifies as positive.
    pub fn from_prediction(prediction: &str) -> Self {
        if prediction == "Positive" || prediction.contains("Disease") {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub disease: String,
    pub prediction: String,
    pub confidence: String,
    pub risk_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisBlock {
    pub title: &'static str,
    pub prediction: String,
    pub confidence: String,
    pub risk_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub blockchain_tx: String,
    pub data_hash: String,
    pub image_hash: String,
}

/// Fixed-structure result panel. Every string is plain text taken from the
/// response; nothing here is markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub result_class: String,
    pub classification: Classification,
    pub headline: Headline,
    pub tabular: AnalysisBlock,
    pub image: AnalysisBlock,
    pub provenance: Provenance,
}
