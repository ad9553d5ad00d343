use super::{Page, StatusRegion};
use crate::{Error, Result, form::FormPayload, render::ResultPanel};
use clap::ValueEnum;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

#[derive(Debug)]
struct TerminalState {
    submit_enabled: bool,
    panel: Option<ResultPanel>,
}

/// Status region backed by the terminal: busy indicator and alerts go to
/// stderr, the result panel to stdout.
#[derive(Debug)]
pub struct TerminalStatusRegion {
    format: OutputFormat,
    state: Mutex<TerminalState>,
}

impl TerminalStatusRegion {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            state: Mutex::new(TerminalState {
                submit_enabled: true,
                panel: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn print_panel(&self, panel: &ResultPanel) {
        let rendered = match self.format {
            OutputFormat::Text => format!("{panel}\n"),
            OutputFormat::Html => panel.to_html(),
        };
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout
            .write_all(rendered.as_bytes())
            .and_then(|_| stdout.flush())
        {
            warn!("Failed to write result panel: {}", e);
        }
    }
}

impl StatusRegion for TerminalStatusRegion {
    fn set_loading(&self, visible: bool) {
        if visible {
            eprintln!("Submitting...");
        }
    }

    fn set_result_visible(&self, visible: bool) {
        if !visible {
            return;
        }
        let panel = self.state().panel.clone();
        if let Some(panel) = panel {
            self.print_panel(&panel);
        }
    }

    fn replace_result(&self, panel: ResultPanel) {
        self.state().panel = Some(panel);
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.state().submit_enabled = enabled;
    }

    fn is_submit_enabled(&self) -> bool {
        self.state().submit_enabled
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn try_begin(&self) -> bool {
        {
            let mut state = self.state();
            if !state.submit_enabled {
                return false;
            }
            state.submit_enabled = false;
        }
        self.set_loading(true);
        true
    }
}

/// A single form assembled from command-line arguments.
pub struct TerminalPage {
    form_id: String,
    payload: FormPayload,
    region: Arc<TerminalStatusRegion>,
}

impl TerminalPage {
    pub fn new(form_id: impl Into<String>, payload: FormPayload, format: OutputFormat) -> Self {
        Self {
            form_id: form_id.into(),
            payload,
            region: Arc::new(TerminalStatusRegion::new(format)),
        }
    }
}

impl Page for TerminalPage {
    fn read_form(&self, form_id: &str) -> Result<FormPayload> {
        if form_id != self.form_id {
            return Err(Error::form_not_found(form_id));
        }
        Ok(self.payload.clone())
    }

    fn status_region(&self, form_id: &str) -> Result<Arc<dyn StatusRegion>> {
        if form_id != self.form_id {
            return Err(Error::form_not_found(form_id));
        }
        let region: Arc<dyn StatusRegion> = self.region.clone();
        Ok(region)
    }
}
