//! Endpoint wrappers over [`ApiClient::execute`].
//!
//! Paths keep the backend's trailing slashes. Every call here is
//! authenticated; the public auth endpoints live in `client`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    DashboardMetrics, Drive, DriveId, DriveInput, Student, StudentId, StudentInput, StudentSubmission, VaccinationRecord,
};
use crate::reports::{self, ReportFile, ReportFormat};
use crate::session::SessionHandle;
use crate::transport::{ApiRequest, MultipartFile, Transport};
use crate::validation;

pub const DRIVES_PATH: &str = "/drives/drives/";
pub const STUDENTS_PATH: &str = "/students/students/";
pub const STUDENT_UPLOAD_PATH: &str = "/students/upload-csv/";
pub const VACCINATION_RECORDS_PATH: &str = "/vaccinations/vaccination-records/";
pub const METRICS_PATH: &str = "/reports/dashboard/metrics/";

#[must_use]
pub fn drive_path(id: DriveId) -> String {
    format!("{DRIVES_PATH}{id}/")
}

#[must_use]
pub fn student_path(id: StudentId) -> String {
    format!("{STUDENTS_PATH}{id}/")
}

#[must_use]
pub fn drive_report_path(id: DriveId, format: ReportFormat) -> String {
    format!("/reports/drives/{id}/{format}/")
}

#[must_use]
pub fn all_reports_path(format: ReportFormat) -> String {
    format!("/reports/drives/all/{format}/")
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl<T: Transport, H: SessionHandle> ApiClient<T, H> {
    // =============================================================
    // Drives
    // =============================================================

    /// All drives, or only upcoming ones for the dashboard.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn list_drives(&self, upcoming: bool) -> Result<Vec<Drive>, ApiError> {
        let mut request = ApiRequest::get(DRIVES_PATH);
        if upcoming {
            request = request.query("upcoming", "true");
        }
        self.fetch_json(request).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn create_drive(&self, input: &DriveInput) -> Result<Drive, ApiError> {
        self.fetch_json(ApiRequest::post(DRIVES_PATH).json(to_json(input)?)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn update_drive(&self, id: DriveId, input: &DriveInput) -> Result<Drive, ApiError> {
        self.fetch_json(ApiRequest::put(drive_path(id)).json(to_json(input)?)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn delete_drive(&self, id: DriveId) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(drive_path(id))).await?;
        tracing::info!(drive_id = id, "drive deleted");
        Ok(())
    }

    // =============================================================
    // Students
    // =============================================================

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        self.fetch_json(ApiRequest::get(STUDENTS_PATH)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn create_student(&self, input: &StudentInput) -> Result<Student, ApiError> {
        self.fetch_json(ApiRequest::post(STUDENTS_PATH).json(to_json(input)?)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn update_student(&self, id: StudentId, input: &StudentInput) -> Result<Student, ApiError> {
        self.fetch_json(ApiRequest::put(student_path(id)).json(to_json(input)?)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn delete_student(&self, id: StudentId) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(student_path(id))).await?;
        tracing::info!(student_id = id, "student deleted");
        Ok(())
    }

    /// Create or update a student, then link the drive they were vaccinated in.
    ///
    /// The backend answers 400 when the (student, drive) record already
    /// exists; that is treated as success.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn save_student(
        &self,
        existing: Option<StudentId>,
        submission: &StudentSubmission,
    ) -> Result<Student, ApiError> {
        let student = match existing {
            Some(id) => self.update_student(id, &submission.student).await?,
            None => self.create_student(&submission.student).await?,
        };

        if let Some(drive_id) = submission.vaccinated_in.filter(|_| submission.student.vaccination_status) {
            match self.create_vaccination_record(student.id, drive_id).await {
                Ok(_) => {}
                Err(ApiError::Status { status: 400, .. }) => {
                    tracing::warn!(student_id = student.id, drive_id, "vaccination record already exists");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(student)
    }

    /// Bulk-import students from a CSV file. Returns the backend's summary
    /// message when it sends one.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for a non-CSV file, otherwise as
    /// [`ApiClient::execute`].
    pub async fn upload_students_csv(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, ApiError> {
        validation::validate_csv_upload(filename, content_type)?;
        let file = MultipartFile {
            field: "file".to_owned(),
            filename: filename.to_owned(),
            content_type: "text/csv".to_owned(),
            bytes,
        };
        let response = self.execute(ApiRequest::post(STUDENT_UPLOAD_PATH).multipart(file)).await?;
        let message = response
            .json::<Value>()
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned));
        tracing::info!(%filename, "student csv uploaded");
        Ok(message)
    }

    // =============================================================
    // Vaccination records
    // =============================================================

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn list_vaccination_records(&self) -> Result<Vec<VaccinationRecord>, ApiError> {
        self.fetch_json(ApiRequest::get(VACCINATION_RECORDS_PATH)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`]. A duplicate pair answers 400.
    pub async fn create_vaccination_record(
        &self,
        student_id: StudentId,
        drive_id: DriveId,
    ) -> Result<VaccinationRecord, ApiError> {
        let record = VaccinationRecord { id: None, student_id, drive_id, drive_name: None };
        self.fetch_json(ApiRequest::post(VACCINATION_RECORDS_PATH).json(to_json(&record)?)).await
    }

    // =============================================================
    // Reports
    // =============================================================

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        self.fetch_json(ApiRequest::get(METRICS_PATH)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn download_drive_report(&self, id: DriveId, format: ReportFormat) -> Result<ReportFile, ApiError> {
        self.download(drive_report_path(id, format), reports::drive_report_filename(id, format)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn download_all_reports(&self, format: ReportFormat) -> Result<ReportFile, ApiError> {
        self.download(all_reports_path(format), reports::all_reports_filename(format)).await
    }

    async fn download(&self, path: String, fallback: String) -> Result<ReportFile, ApiError> {
        let request = ApiRequest::get(path).header("Cache-Control", "no-cache");
        let response = self.execute(request).await?;
        let filename = response
            .header("content-disposition")
            .and_then(reports::filename_from_content_disposition)
            .unwrap_or(fallback);
        let content_type = response.header("content-type").unwrap_or("application/octet-stream").to_owned();
        tracing::info!(%filename, bytes = response.body.len(), "report downloaded");
        Ok(ReportFile { filename, content_type, bytes: response.body })
    }
}
