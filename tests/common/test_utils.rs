use medpredict_client::{
    client::HttpPredictionClient,
    config::ServerConfig,
    form::FormPayload,
    page::MemoryPage,
};
use serde_json::{Value, json};
use std::time::Duration;

/// A well-formed prediction body with the given headline prediction
pub fn prediction_body(disease: &str, prediction: &str) -> Value {
    json!({
        "disease": disease,
        "prediction": prediction,
        "confidence": 82.5,
        "risk_level": "High",
        "tabular_result": {
            "prediction": prediction,
            "confidence": 87,
            "risk_level": "High"
        },
        "image_result": {
            "prediction": "Retinopathy Detected",
            "confidence": 78.567,
            "risk_level": "Medium"
        },
        "blockchain_tx": "0x5f2c9d1e",
        "data_hash": "e3b0c44298fc1c149afbf4c8996fb924",
        "image_hash": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
    })
}

pub fn diabetes_payload() -> FormPayload {
    FormPayload::new()
        .with_text("patient_id", "PATIENT_042")
        .with_text("pregnancies", "6")
        .with_text("glucose", "148")
        .with_text("blood_pressure", "72")
        .with_text("skin_thickness", "35")
        .with_text("insulin", "0")
        .with_text("bmi", "33.6")
        .with_text("diabetes_pedigree", "0.627")
        .with_text("age", "50")
        .with_file("image_file", "fundus.png", b"fake-png-bytes".to_vec())
}

pub fn heart_payload() -> FormPayload {
    FormPayload::new()
        .with_text("patient_id", "PATIENT_007")
        .with_text("age", "63")
        .with_text("sex", "1")
        .with_text("cp", "3")
        .with_text("trestbps", "145")
        .with_text("chol", "233")
        .with_text("thalach", "150")
        .with_file("image_file", "ecg.jpg", b"fake-jpg-bytes".to_vec())
}

/// Page holding both prediction forms, each with its own status region
pub fn create_test_page() -> MemoryPage {
    MemoryPage::new()
        .with_form("diabetesForm", diabetes_payload())
        .with_form("heartForm", heart_payload())
}

pub fn create_http_client(base_url: &str) -> HttpPredictionClient {
    HttpPredictionClient::new(&ServerConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: Some(10),
    })
    .expect("Failed to build HTTP client")
}

/// Yields until `condition` holds, failing the test after a second.
pub async fn wait_until(condition: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  base_url: "http://127.0.0.1:5000/"
  request_timeout_secs: 30

logs:
  level: "debug"

auth:
  email: "clinician@example.com"
  password: "hunter2"

forms:
  - endpoint: "/predict/diabetes"
    form_id: "diabetesForm"
    result_class: "diabetes-result"
  - endpoint: "/predict/heart"
    form_id: "heartForm"
"#;
