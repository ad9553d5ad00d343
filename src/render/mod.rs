mod types;

pub use types::*;

use crate::{Error, Result};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Builds the result panel from a prediction body.
///
/// The body is assumed to be an error-free response. Missing or mistyped
/// fields fail with [`Error::MalformedResponse`]; no partial panel is produced.
pub fn render_result(body: &Value, result_class: &str) -> Result<ResultPanel> {
    let response: PredictionResponse =
        serde_json::from_value(body.clone()).map_err(|e| Error::malformed(e.to_string()))?;

    let classification = Classification::from_prediction(&response.prediction);
    debug!(
        "Rendering {} result for '{}' as {:?}",
        response.disease, response.prediction, classification
    );

    Ok(ResultPanel {
        result_class: result_class.to_string(),
        classification,
        headline: Headline {
            disease: response.disease,
            prediction: response.prediction,
            confidence: format_number(response.confidence),
            risk_level: response.risk_level,
        },
        tabular: analysis_block("Tabular Data Analysis", response.tabular_result),
        image: analysis_block("Image Analysis", response.image_result),
        provenance: Provenance {
            blockchain_tx: response.blockchain_tx,
            data_hash: response.data_hash,
            image_hash: response.image_hash,
        },
    })
}

fn analysis_block(title: &'static str, result: ModalityResult) -> AnalysisBlock {
    AnalysisBlock {
        title,
        prediction: result.prediction,
        confidence: to_fixed_2(result.confidence),
        risk_level: result.risk_level,
    }
}

/// Shortest round-trip form of the number, as it arrived (`87.0` shows as `87`).
///
/// Always positional notation; JavaScript switches to exponent form below
/// `1e-6` and from `1e21` up, which confidences never reach.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Two decimals, ties rounded away from zero.
///
/// Works on the exact decimal expansion of the float, so `1.005` (stored as
/// 1.00499999...) becomes `1.00` while an exact tie like `0.125` becomes `0.13`.
pub fn to_fixed_2(value: f64) -> String {
    let exact = format!("{:.60}", value.abs());
    let (int_part, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if frac.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let to_str = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{}", to_str(&digits[..split]), to_str(&digits[split..]))
}

/// Escapes text for use in element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl ResultPanel {
    /// Markup for the result container. Every response field is escaped.
    pub fn to_html(&self) -> String {
        let e = escape_html;
        let mut html = String::new();

        html.push_str(&format!(
            "<div class=\"result-panel {}\">\n",
            e(&self.result_class)
        ));
        html.push_str(&format!(
            "<div class=\"result-item {}\">\n<h3>Final Prediction</h3>\n",
            self.classification.css_class()
        ));
        html.push_str(&html_row("Disease", &e(&self.headline.disease)));
        html.push_str(&html_row("Result", &e(&self.headline.prediction)));
        html.push_str(&html_row(
            "Confidence",
            &format!("{}%", e(&self.headline.confidence)),
        ));
        html.push_str(&html_row("Risk Level", &e(&self.headline.risk_level)));
        html.push_str("</div>\n");

        for block in [&self.tabular, &self.image] {
            html.push_str(&format!(
                "<div class=\"result-item\">\n<h3>{}</h3>\n",
                block.title
            ));
            html.push_str(&html_row("Prediction", &e(&block.prediction)));
            html.push_str(&html_row(
                "Confidence",
                &format!("{}%", e(&block.confidence)),
            ));
            html.push_str(&html_row("Risk Level", &e(&block.risk_level)));
            html.push_str("</div>\n");
        }

        html.push_str("<div class=\"blockchain-info\">\n<h4>Blockchain Verification</h4>\n");
        for (label, value) in [
            ("Transaction Hash:", &self.provenance.blockchain_tx),
            ("Data Hash:", &self.provenance.data_hash),
            ("Image Hash (IPFS):", &self.provenance.image_hash),
        ] {
            html.push_str(&format!(
                "<p><strong>{label}</strong></p>\n<code>{}</code>\n",
                e(value)
            ));
        }
        html.push_str("</div>\n</div>\n");

        html
    }
}

fn html_row(label: &str, escaped_value: &str) -> String {
    format!("<p><strong>{label}:</strong> {escaped_value}</p>\n")
}

impl fmt::Display for ResultPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.classification {
            Classification::Positive => "[+]",
            Classification::Negative => "[-]",
        };

        writeln!(f, "{marker} Final Prediction")?;
        writeln!(f, "  Disease:    {}", self.headline.disease)?;
        writeln!(f, "  Result:     {}", self.headline.prediction)?;
        writeln!(f, "  Confidence: {}%", self.headline.confidence)?;
        writeln!(f, "  Risk Level: {}", self.headline.risk_level)?;

        for block in [&self.tabular, &self.image] {
            writeln!(f)?;
            writeln!(f, "{}", block.title)?;
            writeln!(f, "  Prediction: {}", block.prediction)?;
            writeln!(f, "  Confidence: {}%", block.confidence)?;
            writeln!(f, "  Risk Level: {}", block.risk_level)?;
        }

        writeln!(f)?;
        writeln!(f, "Blockchain Verification")?;
        writeln!(f, "  Transaction Hash:  {}", self.provenance.blockchain_tx)?;
        writeln!(f, "  Data Hash:         {}", self.provenance.data_hash)?;
        write!(f, "  Image Hash (IPFS): {}", self.provenance.image_hash)
    }
}
