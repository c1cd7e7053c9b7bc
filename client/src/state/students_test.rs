use super::*;

fn row(id: i64, name: &str, grade: &str) -> StudentRow {
    StudentRow {
        student: Student {
            id,
            name: name.to_owned(),
            grade: grade.to_owned(),
            roll_number: id.to_string(),
            vaccination_status: false,
            vaccinated_in: None,
        },
        vaccination_count: 0,
        latest_drive: None,
    }
}

fn loaded(rows: Vec<StudentRow>) -> StudentsState {
    let mut state = StudentsState::default();
    state.loaded(Ok((rows, Vec::new())));
    state
}

#[test]
fn grade_chips_follow_grade_order() {
    let state = loaded(vec![row(1, "A", "10"), row(2, "B", "2"), row(3, "C", "2")]);
    let chips: Vec<(String, String)> = state.grade_chips();
    assert_eq!(
        chips,
        vec![("2".to_owned(), "Grade 2 (2)".to_owned()), ("10".to_owned(), "Grade 10 (1)".to_owned())]
    );
}

#[test]
fn searching_clears_grade_and_hides_chips() {
    let mut state = loaded(vec![row(1, "Asha", "5"), row(2, "Ravi", "6")]);
    state.toggle_grade("5");
    assert_eq!(state.empty_message(), "No students found in Grade 5");
    state.set_search("ra".to_owned());
    assert_eq!(state.grade, None);
    assert!(!state.show_grade_chips());
    assert_eq!(state.empty_message(), "No students found matching your search");
}

#[test]
fn toggling_grade_filters_and_resets_page() {
    let mut state = loaded((1..=14).map(|i| row(i, "Kid", if i % 2 == 0 { "5" } else { "6" })).collect());
    state.set_page(2);
    state.toggle_grade("5");
    assert_eq!(state.page, 1);
    assert_eq!(state.filtered().len(), 7);
    state.toggle_grade("5");
    assert_eq!(state.grade, None);
    assert_eq!(state.filtered().len(), 14);
}

#[test]
fn search_combines_with_grade() {
    let mut state = loaded(vec![row(1, "Asha", "5"), row(2, "Ravi", "5"), row(3, "Asif", "6")]);
    state.set_search("as".to_owned());
    state.toggle_grade("5");
    let names: Vec<&str> = state.filtered().iter().map(|r| r.student.name.as_str()).collect();
    assert_eq!(names, vec!["Asha"]);
}

#[test]
fn unticking_vaccinated_clears_drive() {
    let mut editor = StudentEditor::default();
    editor.set_vaccinated(true);
    editor.form.vaccinated_in = Some(3);
    editor.set_vaccinated(false);
    assert_eq!(editor.form.vaccinated_in, None);
}

#[test]
fn invalid_form_keeps_field_errors() {
    let mut editor = StudentEditor::default();
    assert!(editor.submission().is_none());
    assert_eq!(editor.field_error(StudentField::Name).as_deref(), Some("Name is required"));

    editor.form = StudentForm {
        name: "Asha".to_owned(),
        grade: "5".to_owned(),
        roll_number: "12".to_owned(),
        ..StudentForm::default()
    };
    assert!(editor.submission().is_some());
    assert_eq!(editor.field_error(StudentField::Name), None);
}

#[test]
fn csv_selection_requires_csv() {
    let mut editor = StudentEditor { mode: EntryMode::Bulk, ..StudentEditor::default() };
    editor.select_csv(CsvSelection {
        filename: "kids.xlsx".to_owned(),
        content_type: "application/octet-stream".to_owned(),
        bytes: vec![1],
    });
    assert_eq!(editor.error.as_deref(), Some("Please upload a valid CSV file."));
    assert!(editor.csv.is_none());

    editor.select_csv(CsvSelection {
        filename: "kids.csv".to_owned(),
        content_type: "text/csv".to_owned(),
        bytes: b"name\n".to_vec(),
    });
    assert_eq!(editor.error, None);
    assert!(editor.csv.is_some());
}

#[test]
fn editor_for_existing_student() {
    let editor = StudentEditor::for_student(&row(9, "Ravi", "7").student);
    assert_eq!(editor.editing, Some(9));
    assert_eq!(editor.title(), "Edit Student");
    assert_eq!(editor.form.grade, "7");
}
