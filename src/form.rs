use crate::{Error, Result};
use reqwest::multipart::{Form, Part};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Fields the diabetes endpoint reads. `image_file` is a file upload.
pub const DIABETES_FIELDS: &[&str] = &[
    "patient_id",
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree",
    "age",
    "image_file",
];

/// Fields the heart endpoint reads. `image_file` is a file upload.
pub const HEART_FIELDS: &[&str] = &[
    "patient_id",
    "age",
    "sex",
    "cp",
    "trestbps",
    "chol",
    "fbs",
    "restecg",
    "thalach",
    "exang",
    "oldpeak",
    "slope",
    "ca",
    "thal",
    "image_file",
];

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn file(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self::File {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn file_from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                Error::invalid_field(path.display().to_string(), "path has no file name")
            })?;
        Ok(Self::file(file_name, bytes))
    }
}

/// Field name to value, as captured from a form at submission time.
/// Nothing here is validated; the server owns validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    fields: HashMap<String, FieldValue>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, FieldValue::text(value));
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, file_name: &str, bytes: Vec<u8>) -> Self {
        self.insert(name, FieldValue::file(file_name, bytes));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn into_multipart(self) -> Result<Form> {
        debug!("Building multipart body with {} fields", self.fields.len());

        let mut form = Form::new();
        for (name, value) in self.fields {
            form = match value {
                FieldValue::Text(text) => form.text(name, text),
                FieldValue::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let part = Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// Splits a `name=value` argument. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        Some(_) => Err(Error::invalid_field(raw, "field name is empty")),
        None => Err(Error::invalid_field(raw, "expected name=value")),
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("csv") => "text/csv",
        _ => OCTET_STREAM,
    }
}
