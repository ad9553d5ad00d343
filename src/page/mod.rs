mod memory;
mod terminal;

pub use memory::{MemoryPage, MemoryStatusRegion, RegionSnapshot};
pub use terminal::{OutputFormat, TerminalPage, TerminalStatusRegion};

use crate::{Result, form::FormPayload, render::ResultPanel};
use std::sync::Arc;

/// The part of the page a submission owns: its busy indicator, its result
/// container, its submit control, and a way to raise a blocking alert.
///
/// Implementations use interior mutability; a region is shared between the
/// page and an in-flight submission.
pub trait StatusRegion: Send + Sync {
    fn set_loading(&self, visible: bool);
    fn set_result_visible(&self, visible: bool);
    fn replace_result(&self, panel: ResultPanel);
    fn set_submit_enabled(&self, enabled: bool);
    fn is_submit_enabled(&self) -> bool;
    fn alert(&self, message: &str);

    /// Enters the busy state if the submit control is enabled: loading shown,
    /// result hidden, control disabled. Returns `false` and changes nothing
    /// when the control is already disabled.
    ///
    /// Regions that hold their state behind a lock override this so the check
    /// and the disable happen under one acquisition.
    fn try_begin(&self) -> bool {
        if !self.is_submit_enabled() {
            return false;
        }
        self.set_loading(true);
        self.set_result_visible(false);
        self.set_submit_enabled(false);
        true
    }
}

/// Source of form state and status regions, looked up by form id.
pub trait Page: Send + Sync {
    /// Captures the named form's current field values.
    fn read_form(&self, form_id: &str) -> Result<FormPayload>;

    /// The status region scoped to the named form.
    fn status_region(&self, form_id: &str) -> Result<Arc<dyn StatusRegion>>;
}
