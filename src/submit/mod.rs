pub mod fsm;
mod options;

pub use fsm::{SubmissionEvent, SubmissionState, SubmissionStateMachine};
pub use options::SubmitOptions;

use crate::{
    Result,
    client::PredictionClient,
    page::Page,
    render::{ResultPanel, render_result},
};
use serde_json::Value;
use tracing::{Instrument, debug, error, field, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The submit control was disabled; nothing was sent.
    Ignored,
    /// The user was shown a blocking alert with this message.
    Alerted { message: String },
    /// The panel was placed in the result container and made visible.
    Rendered(ResultPanel),
}

/// Runs one submission of the form named by `options`.
///
/// Busy state is set on the form's own status region before the request and
/// cleared once it resolves, success or not. Application errors and transport
/// failures end in an alert. A successful body the renderer cannot read is
/// returned as `Err(MalformedResponse)` with no alert; the region is left idle
/// and the previous panel stays hidden.
///
/// The submission span records the final [`SubmissionState`] in its `state`
/// field.
pub async fn submit_form(
    options: &SubmitOptions,
    page: &dyn Page,
    client: &dyn PredictionClient,
) -> Result<SubmitOutcome> {
    let submission_id = Uuid::new_v4();
    let span = info_span!(
        "submission",
        %submission_id,
        form_id = %options.form_id,
        endpoint = %options.endpoint,
        state = field::Empty
    );

    let mut fsm = SubmissionStateMachine::new();
    let result = run_submission(options, page, client, &mut fsm)
        .instrument(span.clone())
        .await;
    span.record("state", field::debug(fsm.current_state()));

    result
}

async fn run_submission(
    options: &SubmitOptions,
    page: &dyn Page,
    client: &dyn PredictionClient,
    fsm: &mut SubmissionStateMachine,
) -> Result<SubmitOutcome> {
    let region = page.status_region(&options.form_id)?;
    let payload = page.read_form(&options.form_id)?;

    if !region.try_begin() {
        debug!("Submit control disabled, ignoring click");
        return Ok(SubmitOutcome::Ignored);
    }
    fsm.transition(SubmissionEvent::Submit)?;

    info!("Submitting {} fields", payload.len());
    let response = client.predict(&options.endpoint, payload).await;

    region.set_loading(false);
    region.set_submit_enabled(true);

    let body = match response {
        Ok(body) => body,
        Err(e) => {
            let message = format!("Error: {e}");
            warn!("Submission failed: {}", e);
            region.alert(&message);
            fsm.transition(SubmissionEvent::TransportFailed)?;
            return Ok(SubmitOutcome::Alerted { message });
        }
    };

    if let Some(reason) = application_error(&body) {
        let message = format!("Error: {reason}");
        warn!("Server reported an error: {}", reason);
        region.alert(&message);
        fsm.transition(SubmissionEvent::ApplicationError)?;
        return Ok(SubmitOutcome::Alerted { message });
    }

    match render_result(&body, &options.result_class) {
        Ok(panel) => {
            region.replace_result(panel.clone());
            region.set_result_visible(true);
            fsm.transition(SubmissionEvent::ResultRendered)?;
            info!(
                "Rendered {} prediction: {}",
                panel.headline.disease, panel.headline.prediction
            );
            Ok(SubmitOutcome::Rendered(panel))
        }
        Err(e) => {
            error!("Could not render prediction response: {}", e);
            fsm.transition(SubmissionEvent::MalformedResponse)?;
            Err(e)
        }
    }
}

/// The alert text for a body whose `error` field is truthy in the JavaScript
/// sense (not null, false, 0, NaN or the empty string).
pub fn application_error(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    let truthy = match error {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };

    truthy.then(|| match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
