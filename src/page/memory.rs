use super::{Page, StatusRegion};
use crate::{Error, Result, form::FormPayload, render::ResultPanel};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Observable state of one status region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSnapshot {
    pub loading: bool,
    pub result_visible: bool,
    pub submit_enabled: bool,
    pub panel: Option<ResultPanel>,
    pub alerts: Vec<String>,
}

impl Default for RegionSnapshot {
    fn default() -> Self {
        Self {
            loading: false,
            result_visible: false,
            submit_enabled: true,
            panel: None,
            alerts: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStatusRegion {
    state: Mutex<RegionSnapshot>,
}

impl MemoryStatusRegion {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RegionSnapshot> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> RegionSnapshot {
        self.state().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn is_result_visible(&self) -> bool {
        self.state().result_visible
    }

    pub fn panel(&self) -> Option<ResultPanel> {
        self.state().panel.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state().alerts.clone()
    }
}

impl StatusRegion for MemoryStatusRegion {
    fn set_loading(&self, visible: bool) {
        self.state().loading = visible;
    }

    fn set_result_visible(&self, visible: bool) {
        self.state().result_visible = visible;
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
        debug!("Alert raised: {}", message);
        self.state().alerts.push(message.to_string());
    }

    fn try_begin(&self) -> bool {
        let mut state = self.state();
        if !state.submit_enabled {
            return false;
        }
        state.loading = true;
        state.result_visible = false;
        state.submit_enabled = false;
        true
    }
}

/// In-memory page: named forms, each with its own status region.
#[derive(Debug, Default)]
pub struct MemoryPage {
    forms: Mutex<HashMap<String, FormPayload>>,
    regions: Mutex<HashMap<String, Arc<MemoryStatusRegion>>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a form and gives it a fresh status region.
    pub fn with_form(self, form_id: impl Into<String>, payload: FormPayload) -> Self {
        let form_id = form_id.into();
        self.lock_regions()
            .insert(form_id.clone(), Arc::new(MemoryStatusRegion::new()));
        self.lock_forms().insert(form_id, payload);
        self
    }

    /// Updates the values a later submission of `form_id` will capture.
    pub fn set_form(&self, form_id: &str, payload: FormPayload) -> Result<()> {
        match self.lock_forms().get_mut(form_id) {
            Some(existing) => {
                *existing = payload;
                Ok(())
            }
            None => Err(Error::form_not_found(form_id)),
        }
    }

    /// Concrete handle to a form's region, for inspection.
    pub fn region(&self, form_id: &str) -> Option<Arc<MemoryStatusRegion>> {
        self.lock_regions().get(form_id).cloned()
    }

    fn lock_forms(&self) -> MutexGuard<'_, HashMap<String, FormPayload>> {
        self.forms.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_regions(&self) -> MutexGuard<'_, HashMap<String, Arc<MemoryStatusRegion>>> {
        self.regions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Page for MemoryPage {
    fn read_form(&self, form_id: &str) -> Result<FormPayload> {
        self.lock_forms()
            .get(form_id)
            .cloned()
            .ok_or_else(|| Error::form_not_found(form_id))
    }

    fn status_region(&self, form_id: &str) -> Result<Arc<dyn StatusRegion>> {
        let region: Arc<dyn StatusRegion> = self
            .region(form_id)
            .ok_or_else(|| Error::form_not_found(form_id))?;
        Ok(region)
    }
}
