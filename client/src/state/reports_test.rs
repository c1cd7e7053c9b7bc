use super::*;

fn drive(id: i64, name: &str, date: &str) -> Drive {
    Drive { id, name: name.to_owned(), date: date.to_owned(), target_grades: "5".to_owned() }
}

fn loaded() -> ReportsState {
    let mut state = ReportsState::default();
    state.loaded(Ok(vec![
        drive(1, "Polio", "2025-05-01"),
        drive(2, "Polio Booster", "2025-05-02"),
        drive(3, "MMR", "2025-05-01"),
    ]));
    state
}

#[test]
fn date_filter_narrows_and_clears() {
    let mut state = loaded();
    state.set_date("2025-05-01");
    assert_eq!(state.filtered().len(), 2);
    assert_eq!(state.date_input(), "2025-05-01");

    state.set_search("polio".to_owned());
    assert_eq!(state.filtered().iter().map(|d| d.id).collect::<Vec<_>>(), vec![1]);

    state.set_date("");
    assert_eq!(state.date, None);
    assert_eq!(state.filtered().len(), 2);
}

#[test]
fn filters_reset_page() {
    let mut state = ReportsState::default();
    state.loaded(Ok((1..=9).map(|i| drive(i, "Drive", "2025-05-01")).collect()));
    state.set_page(2);
    assert_eq!(state.page, 2);
    state.set_date("2025-05-01");
    assert_eq!(state.page, 1);
}

#[test]
fn export_menu_toggles_per_target() {
    let mut state = loaded();
    state.toggle_menu(ExportTarget::Drive(1));
    assert_eq!(state.menu, Some(ExportTarget::Drive(1)));
    state.toggle_menu(ExportTarget::All);
    assert_eq!(state.menu, Some(ExportTarget::All));
    state.toggle_menu(ExportTarget::All);
    assert_eq!(state.menu, None);
}

#[test]
fn one_export_at_a_time() {
    let mut state = loaded();
    state.toggle_menu(ExportTarget::Drive(2));
    assert!(state.start_download(ExportTarget::Drive(2)));
    assert_eq!(state.menu, None);
    assert!(state.is_downloading(ExportTarget::Drive(2)));
    assert!(!state.start_download(ExportTarget::All));

    state.finish_download(Err("boom".to_owned()));
    assert_eq!(state.downloading, None);
    assert_eq!(state.download_error.as_deref(), Some("boom"));

    assert!(state.start_download(ExportTarget::All));
    assert_eq!(state.download_error, None);
}

#[test]
fn failure_text_names_format() {
    assert_eq!(
        download_failure(ExportTarget::Drive(1), ReportFormat::Pdf),
        "Failed to download PDF report. Please try again."
    );
    assert_eq!(
        download_failure(ExportTarget::All, ReportFormat::Excel),
        "Failed to download all reports as EXCEL. Please try again."
    );
}
