//! Client-side form checks. A failure here blocks submission; nothing is sent.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use time::Date;

use crate::dates;
use crate::models::{DriveId, DriveInput, SignupInput, Student, StudentInput, StudentSubmission};

pub const MIN_GRADE: u8 = 1;
pub const MAX_GRADE: u8 = 12;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Enter a valid date (YYYY-MM-DD).")]
    InvalidDate,
    #[error("Date cannot be in the past. Please select today or a future date.")]
    DateInPast,
    #[error("Grade must be between 1 and 12.")]
    GradeOutOfRange,
    #[error("Roll number must be a positive number.")]
    InvalidRollNumber,
    #[error("Vaccination drive is required when vaccinated")]
    DriveRequired,
    #[error("Please upload a valid CSV file.")]
    NotCsv,
    #[error("Enter both username and password.")]
    MissingCredentials,
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Per-field errors, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F> {
    errors: Vec<(F, ValidationError)>,
}

impl<F: Copy + PartialEq> FieldErrors<F> {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn push(&mut self, field: F, error: ValidationError) {
        self.errors.push((field, error));
    }

    #[must_use]
    pub fn get(&self, field: F) -> Option<&ValidationError> {
        self.errors.iter().find(|(f, _)| *f == field).map(|(_, e)| e)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(F, ValidationError)> {
        self.errors.iter()
    }
}

/// Check a drive date as the user types it.
///
/// # Errors
///
/// [`ValidationError::InvalidDate`] for unparseable input,
/// [`ValidationError::DateInPast`] for any day before `today`.
pub fn check_drive_date(raw: &str, today: Date) -> Result<Date, ValidationError> {
    let date = dates::parse_iso_date(raw).ok_or(ValidationError::InvalidDate)?;
    if date < today {
        return Err(ValidationError::DateInPast);
    }
    Ok(date)
}

/// Validate the add/edit drive form and return the trimmed body.
///
/// # Errors
///
/// The first failing rule, in form order.
pub fn validate_drive(input: &DriveInput, today: Date) -> Result<DriveInput, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required("Drive name"));
    }
    if input.date.trim().is_empty() {
        return Err(ValidationError::Required("Date"));
    }
    let date = check_drive_date(&input.date, today)?;
    let target_grades = input.target_grades.trim();
    if target_grades.is_empty() {
        return Err(ValidationError::Required("Target grades"));
    }
    Ok(DriveInput { name: name.to_owned(), date: dates::iso(date), target_grades: target_grades.to_owned() })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentField {
    Name,
    Grade,
    RollNumber,
    VaccinatedIn,
}

/// Raw single-entry student form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub grade: String,
    pub roll_number: String,
    pub vaccination_status: bool,
    pub vaccinated_in: Option<DriveId>,
}

impl StudentForm {
    #[must_use]
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            grade: student.grade.clone(),
            roll_number: student.roll_number.clone(),
            vaccination_status: student.vaccination_status,
            vaccinated_in: student.vaccinated_in,
        }
    }
}

/// Validate the single-entry student form, reporting every failing field.
///
/// # Errors
///
/// All field errors found, keyed by [`StudentField`].
pub fn validate_student(form: &StudentForm) -> Result<StudentSubmission, FieldErrors<StudentField>> {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.push(StudentField::Name, ValidationError::Required("Name"));
    }

    let grade = form.grade.trim();
    if grade.is_empty() {
        errors.push(StudentField::Grade, ValidationError::Required("Grade"));
    } else if !grade.parse::<u8>().is_ok_and(|g| (MIN_GRADE..=MAX_GRADE).contains(&g)) {
        errors.push(StudentField::Grade, ValidationError::GradeOutOfRange);
    }

    let roll_number = form.roll_number.trim();
    if roll_number.is_empty() {
        errors.push(StudentField::RollNumber, ValidationError::Required("Roll number"));
    } else if !roll_number.parse::<u32>().is_ok_and(|n| n >= 1) {
        errors.push(StudentField::RollNumber, ValidationError::InvalidRollNumber);
    }

    if form.vaccination_status && form.vaccinated_in.is_none() {
        errors.push(StudentField::VaccinatedIn, ValidationError::DriveRequired);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(StudentSubmission {
        student: StudentInput {
            name: name.to_owned(),
            grade: grade.to_owned(),
            roll_number: roll_number.to_owned(),
            vaccination_status: form.vaccination_status,
        },
        vaccinated_in: form.vaccinated_in.filter(|_| form.vaccination_status),
    })
}

/// Accept a bulk-upload file by MIME type or `.csv` extension.
///
/// # Errors
///
/// [`ValidationError::NotCsv`] otherwise.
pub fn validate_csv_upload(filename: &str, content_type: &str) -> Result<(), ValidationError> {
    let by_type = content_type.trim().eq_ignore_ascii_case("text/csv");
    let by_extension = filename.to_ascii_lowercase().ends_with(".csv");
    if by_type || by_extension { Ok(()) } else { Err(ValidationError::NotCsv) }
}

/// Trim the username and require both login fields.
///
/// # Errors
///
/// [`ValidationError::MissingCredentials`] when either is blank.
pub fn validate_credentials(username: &str, password: &str) -> Result<(String, String), ValidationError> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Raw signup form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validate the signup form.
///
/// # Errors
///
/// The first failing rule, in form order.
pub fn validate_signup(form: &SignupForm) -> Result<SignupInput, ValidationError> {
    let username = form.username.trim();
    if username.is_empty() {
        return Err(ValidationError::Required("Username"));
    }
    let email = form.email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required("Email"));
    }
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !valid_email {
        return Err(ValidationError::InvalidEmail);
    }
    if form.password.is_empty() {
        return Err(ValidationError::Required("Password"));
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(SignupInput { username: username.to_owned(), email: email.to_owned(), password: form.password.clone() })
}
