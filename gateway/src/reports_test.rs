use super::*;

#[test]
fn formats_parse_case_insensitively() {
    assert_eq!("PDF".parse::<ReportFormat>(), Ok(ReportFormat::Pdf));
    assert_eq!(" csv ".parse::<ReportFormat>(), Ok(ReportFormat::Csv));
    assert_eq!("xlsx".parse::<ReportFormat>(), Ok(ReportFormat::Excel));
    assert_eq!("doc".parse::<ReportFormat>(), Err(UnknownFormat("doc".to_owned())));
}

#[test]
fn excel_uses_excel_path_and_xlsx_extension() {
    assert_eq!(ReportFormat::Excel.as_str(), "excel");
    assert_eq!(drive_report_filename(4, ReportFormat::Excel), "drive_4_report.xlsx");
    assert_eq!(all_reports_filename(ReportFormat::Pdf), "all_drives_report.pdf");
}

#[test]
fn content_disposition_variants() {
    assert_eq!(
        filename_from_content_disposition(r#"attachment; filename="drive_3.pdf""#),
        Some("drive_3.pdf".to_owned())
    );
    assert_eq!(
        filename_from_content_disposition("attachment; filename=report.csv; size=10"),
        Some("report.csv".to_owned())
    );
    assert_eq!(
        filename_from_content_disposition("attachment; FILENAME*=UTF-8''all%20drives.xlsx"),
        Some("all%20drives.xlsx".to_owned())
    );
}

#[test]
fn content_disposition_without_name_falls_back() {
    assert_eq!(filename_from_content_disposition("attachment"), None);
    assert_eq!(filename_from_content_disposition(r#"attachment; filename="""#), None);
}

#[test]
fn content_disposition_strips_directories() {
    assert_eq!(
        filename_from_content_disposition(r#"attachment; filename="../../etc/passwd""#),
        Some("passwd".to_owned())
    );
}
