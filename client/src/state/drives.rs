//! Drive listing and editor state for the drives page.

#[cfg(test)]
#[path = "drives_test.rs"]
mod drives_test;

use gateway::listing::{self, PageInfo};
use gateway::models::{Drive, DriveId, DriveInput};
use gateway::validation;
use time::Date;

#[derive(Clone, Debug)]
pub struct DrivesState {
    pub items: Vec<Drive>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    pub page: usize,
}

impl Default for DrivesState {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None, search: String::new(), page: 1 }
    }
}

impl DrivesState {
    pub fn set_search(&mut self, term: String) {
        self.search = term;
        self.page = 1;
    }

    pub fn filtered(&self) -> Vec<&Drive> {
        listing::filter_drives(&self.items, &self.search)
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.page, self.filtered().len())
    }

    pub fn show_pagination(&self) -> bool {
        listing::needs_pagination(self.filtered().len())
    }

    /// Drives on the current page.
    pub fn visible(&self) -> Vec<Drive> {
        listing::page_slice(&self.filtered(), self.page)
            .iter()
            .map(|d| (*d).clone())
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = listing::clamp_page(page, self.filtered().len());
    }

    pub fn loaded(&mut self, result: Result<Vec<Drive>, String>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.page = listing::clamp_page(self.page, self.filtered().len());
            }
            Err(message) => self.error = Some(message),
        }
    }
}

/// Add/edit drive modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriveEditor {
    /// `None` while adding.
    pub editing: Option<DriveId>,
    pub input: DriveInput,
    pub date_error: Option<String>,
    pub error: Option<String>,
    pub saving: bool,
}

impl DriveEditor {
    pub fn for_drive(drive: &Drive) -> Self {
        Self { editing: Some(drive.id), input: drive.to_input(), ..Self::default() }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() { "Edit Drive" } else { "Add New Drive" }
    }

    /// Update the date and flag a past or malformed one straight away.
    pub fn set_date(&mut self, raw: String, today: Date) {
        self.date_error = validation::check_drive_date(&raw, today).err().map(|e| e.to_string());
        self.input.date = raw;
    }

    /// Validated body ready to send, or the message to show.
    ///
    /// # Errors
    ///
    /// The first failing form rule, as display text.
    pub fn submission(&self, today: Date) -> Result<DriveInput, String> {
        validation::validate_drive(&self.input, today).map_err(|e| e.to_string())
    }
}
