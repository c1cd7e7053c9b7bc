use super::*;

#[test]
fn object_url_outlives_the_click() {
    assert!(REVOKE_DELAY_MS >= 100);
}

#[test]
fn missing_body_message_reads_as_a_failure() {
    assert!(NO_BODY_MESSAGE.starts_with("Download failed"));
}

#[cfg(not(feature = "csr"))]
#[test]
fn save_without_a_browser_reports_an_error() {
    let file = ReportFile {
        filename: "drive_3_report.pdf".to_owned(),
        content_type: "application/pdf".to_owned(),
        bytes: b"%PDF-1.4".to_vec(),
    };
    assert_eq!(save_report(&file), Err("Downloads need a browser".to_owned()));
}
