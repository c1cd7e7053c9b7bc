//! Reports page state: drive search, date filter and export menus.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use gateway::dates;
use gateway::listing::{self, PageInfo};
use gateway::models::{Drive, DriveId};
use gateway::reports::ReportFormat;
use time::Date;

/// What an export menu downloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportTarget {
    Drive(DriveId),
    All,
}

#[derive(Clone, Debug)]
pub struct ReportsState {
    pub drives: Vec<Drive>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    pub date: Option<Date>,
    pub page: usize,
    /// Export menu currently open, if any.
    pub menu: Option<ExportTarget>,
    /// Export in flight; its button reads "Exporting...".
    pub downloading: Option<ExportTarget>,
    pub download_error: Option<String>,
}

impl Default for ReportsState {
    fn default() -> Self {
        Self {
            drives: Vec::new(),
            loading: true,
            error: None,
            search: String::new(),
            date: None,
            page: 1,
            menu: None,
            downloading: None,
            download_error: None,
        }
    }
}

impl ReportsState {
    pub fn set_search(&mut self, term: String) {
        self.search = term;
        self.page = 1;
    }

    /// Set the date filter from the raw `<input type="date">` value; blank
    /// clears it.
    pub fn set_date(&mut self, raw: &str) {
        self.date = dates::parse_iso_date(raw);
        self.page = 1;
    }

    pub fn date_input(&self) -> String {
        self.date.map(dates::iso).unwrap_or_default()
    }

    pub fn filtered(&self) -> Vec<&Drive> {
        listing::filter_reports(&self.drives, &self.search, self.date)
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.page, self.filtered().len())
    }

    pub fn show_pagination(&self) -> bool {
        listing::needs_pagination(self.filtered().len())
    }

    pub fn visible(&self) -> Vec<Drive> {
        listing::page_slice(&self.filtered(), self.page)
            .iter()
            .map(|d| (*d).clone())
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = listing::clamp_page(page, self.filtered().len());
    }

    pub fn toggle_menu(&mut self, target: ExportTarget) {
        self.menu = if self.menu == Some(target) { None } else { Some(target) };
    }

    pub fn is_downloading(&self, target: ExportTarget) -> bool {
        self.downloading == Some(target)
    }

    /// Close the menu and mark `target` busy. Returns false while another
    /// export is still running.
    pub fn start_download(&mut self, target: ExportTarget) -> bool {
        if self.downloading.is_some() {
            return false;
        }
        self.menu = None;
        self.downloading = Some(target);
        self.download_error = None;
        true
    }

    pub fn finish_download(&mut self, result: Result<(), String>) {
        self.downloading = None;
        self.download_error = result.err();
    }

    pub fn loaded(&mut self, result: Result<Vec<Drive>, String>) {
        self.loading = false;
        match result {
            Ok(drives) => {
                self.drives = drives;
                self.error = None;
                self.page = listing::clamp_page(self.page, self.filtered().len());
            }
            Err(message) => self.error = Some(message),
        }
    }
}

/// Inline text for a failed export.
pub fn download_failure(target: ExportTarget, format: ReportFormat) -> String {
    let format = format.as_str().to_uppercase();
    match target {
        ExportTarget::Drive(_) => format!("Failed to download {format} report. Please try again."),
        ExportTarget::All => format!("Failed to download all reports as {format}. Please try again."),
    }
}
