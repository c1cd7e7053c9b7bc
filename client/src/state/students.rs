//! Student registry state: search, grade chips, paging and the add/edit
//! modal with its bulk CSV tab.

#[cfg(test)]
#[path = "students_test.rs"]
mod students_test;

use gateway::listing::{self, PageInfo, StudentRow};
use gateway::models::{Drive, Student, StudentId, StudentSubmission};
use gateway::validation::{self, FieldErrors, StudentField, StudentForm};

#[derive(Clone, Debug)]
pub struct StudentsState {
    pub rows: Vec<StudentRow>,
    /// Drives offered in the "vaccinated in" picker.
    pub drives: Vec<Drive>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    pub grade: Option<String>,
    pub page: usize,
}

impl Default for StudentsState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            drives: Vec::new(),
            loading: true,
            error: None,
            search: String::new(),
            grade: None,
            page: 1,
        }
    }
}

impl StudentsState {
    /// A new search term clears the grade chip; chips are hidden while searching.
    pub fn set_search(&mut self, term: String) {
        self.search = term;
        self.grade = None;
        self.page = 1;
    }

    pub fn show_grade_chips(&self) -> bool {
        self.search.trim().is_empty()
    }

    /// Select a grade chip; picking the active chip again shows all grades.
    pub fn toggle_grade(&mut self, grade: &str) {
        self.grade = if self.grade.as_deref() == Some(grade) { None } else { Some(grade.to_owned()) };
        self.page = 1;
    }

    /// Chip labels with their student counts, e.g. `Grade 5 (3)`.
    pub fn grade_chips(&self) -> Vec<(String, String)> {
        let all: Vec<&StudentRow> = self.rows.iter().collect();
        listing::bucket_by_grade(&all)
            .into_iter()
            .map(|b| {
                let label = format!("Grade {} ({})", b.grade, b.rows.len());
                (b.grade, label)
            })
            .collect()
    }

    /// Text for an empty table.
    pub fn empty_message(&self) -> String {
        match &self.grade {
            Some(grade) => format!("No students found in Grade {grade}"),
            None => "No students found matching your search".to_owned(),
        }
    }

    pub fn filtered(&self) -> Vec<&StudentRow> {
        listing::select_grade(listing::filter_students(&self.rows, &self.search), self.grade.as_deref())
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.page, self.filtered().len())
    }

    pub fn show_pagination(&self) -> bool {
        listing::needs_pagination(self.filtered().len())
    }

    pub fn visible(&self) -> Vec<StudentRow> {
        listing::page_slice(&self.filtered(), self.page)
            .iter()
            .map(|r| (*r).clone())
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = listing::clamp_page(page, self.filtered().len());
    }

    pub fn loaded(&mut self, result: Result<(Vec<StudentRow>, Vec<Drive>), String>) {
        self.loading = false;
        match result {
            Ok((rows, drives)) => {
                self.rows = rows;
                self.drives = drives;
                self.error = None;
                self.page = listing::clamp_page(self.page, self.filtered().len());
            }
            Err(message) => self.error = Some(message),
        }
    }

    pub fn drive_name(&self, id: i64) -> Option<&str> {
        self.drives.iter().find(|d| d.id == id).map(|d| d.name.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryMode {
    #[default]
    Single,
    Bulk,
}

/// A CSV picked for bulk upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvSelection {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Add/edit student modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentEditor {
    pub editing: Option<StudentId>,
    pub mode: EntryMode,
    pub form: StudentForm,
    pub field_errors: Option<FieldErrors<StudentField>>,
    pub csv: Option<CsvSelection>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub saving: bool,
}

impl StudentEditor {
    pub fn for_student(student: &Student) -> Self {
        Self { editing: Some(student.id), form: StudentForm::from_student(student), ..Self::default() }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() { "Edit Student" } else { "Add Students" }
    }

    pub fn field_error(&self, field: StudentField) -> Option<String> {
        self.field_errors.as_ref()?.get(field).map(ToString::to_string)
    }

    /// Unticking "vaccinated" forgets the chosen drive.
    pub fn set_vaccinated(&mut self, vaccinated: bool) {
        self.form.vaccination_status = vaccinated;
        if !vaccinated {
            self.form.vaccinated_in = None;
        }
    }

    /// Validate the single-entry form, keeping field errors for display.
    pub fn submission(&mut self) -> Option<StudentSubmission> {
        match validation::validate_student(&self.form) {
            Ok(submission) => {
                self.field_errors = None;
                Some(submission)
            }
            Err(errors) => {
                self.field_errors = Some(errors);
                None
            }
        }
    }

    /// Accept a picked file for bulk upload, or explain why not.
    pub fn select_csv(&mut self, selection: CsvSelection) {
        match validation::validate_csv_upload(&selection.filename, &selection.content_type) {
            Ok(()) => {
                self.error = None;
                self.csv = Some(selection);
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.csv = None;
            }
        }
    }
}
