//! Report export formats and download filenames.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::DriveId;

/// `filename=` or RFC 5987 `filename*=UTF-8''...`, quoted or bare.
static FILENAME_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?i)filename\*?=['"]?(?:UTF-\d['"]*)?([^;\r\n"']*)['"]?;?"#).ok());

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Pdf,
    Csv,
    Excel,
}

impl ReportFormat {
    pub const ALL: [Self; 3] = [Self::Pdf, Self::Csv, Self::Excel];

    /// Path segment the backend expects.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Csv => "CSV",
            Self::Excel => "Excel",
        }
    }

    /// Extension for fallback filenames.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report format: {0} (expected pdf, csv or excel)")]
pub struct UnknownFormat(pub String);

impl FromStr for ReportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            "excel" | "xlsx" => Ok(Self::Excel),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}

/// A downloaded report, ready to hand to the browser or write to disk.
#[derive(Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ReportFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[must_use]
pub fn drive_report_filename(drive_id: DriveId, format: ReportFormat) -> String {
    format!("drive_{drive_id}_report.{}", format.extension())
}

#[must_use]
pub fn all_reports_filename(format: ReportFormat) -> String {
    format!("all_drives_report.{}", format.extension())
}

/// Filename carried by a `Content-Disposition` header, if any.
#[must_use]
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let re = FILENAME_RE.as_ref()?;
    let name = re.captures(header)?.get(1)?.as_str().trim();
    // Strip any path a hostile server might smuggle in.
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    (!name.is_empty()).then(|| name.to_owned())
}
