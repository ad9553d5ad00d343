use serde::{Deserialize, Serialize};

/// What one submission flow posts and where its result goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOptions {
    /// Absolute path of the prediction endpoint, e.g. `/predict/heart`.
    pub endpoint: String,
    /// Form to read fields from; also selects the status region.
    pub form_id: String,
    /// Styling hook carried onto the rendered panel.
    #[serde(default)]
    pub result_class: String,
}

impl SubmitOptions {
    pub fn new(
        endpoint: impl Into<String>,
        form_id: impl Into<String>,
        result_class: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            form_id: form_id.into(),
            result_class: result_class.into(),
        }
    }

    pub fn diabetes() -> Self {
        Self::new("/predict/diabetes", "diabetesForm", "diabetes-result")
    }

    pub fn heart() -> Self {
        Self::new("/predict/heart", "heartForm", "heart-result")
    }
}
