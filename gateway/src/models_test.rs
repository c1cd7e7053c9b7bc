use super::*;
use serde_json::json;

#[test]
fn student_accepts_numeric_grade_and_roll_number() {
    let student: Student = serde_json::from_value(json!({
        "id": 7,
        "name": "Asha",
        "grade": 5,
        "roll_number": 12,
        "vaccination_status": true,
        "vaccinated_in": 3
    }))
    .unwrap();
    assert_eq!(student.grade, "5");
    assert_eq!(student.roll_number, "12");
    assert_eq!(student.vaccinated_in, Some(3));
}

#[test]
fn student_defaults_missing_vaccination_fields() {
    let student: Student = serde_json::from_value(json!({
        "id": 1,
        "name": "Ravi",
        "grade": "7",
        "roll_number": "A-4"
    }))
    .unwrap();
    assert!(!student.vaccination_status);
    assert_eq!(student.vaccinated_in, None);
}

#[test]
fn student_rejects_object_grade() {
    let result = serde_json::from_value::<Student>(json!({
        "id": 1,
        "name": "Ravi",
        "grade": { "n": 7 },
        "roll_number": "4"
    }));
    assert!(result.is_err());
}

#[test]
fn vaccination_record_uses_backend_field_names() {
    let record: VaccinationRecord = serde_json::from_value(json!({
        "id": 11,
        "student": 7,
        "drive": 3,
        "drive_name": "Polio Booster"
    }))
    .unwrap();
    assert_eq!(record.student_id, 7);
    assert_eq!(record.drive_id, 3);

    let body = serde_json::to_value(VaccinationRecord { id: None, student_id: 1, drive_id: 2, drive_name: None }).unwrap();
    assert_eq!(body, json!({ "student": 1, "drive": 2 }));
}

#[test]
fn drive_to_input_drops_time_part() {
    let drive = Drive {
        id: 1,
        name: "MMR".to_owned(),
        date: "2025-06-10T00:00:00Z".to_owned(),
        target_grades: "5-7".to_owned(),
    };
    let input = drive.to_input();
    assert_eq!(input.date, "2025-06-10");
    assert_eq!(input.target_grades, "5-7");
    assert!(drive.calendar_date().is_some());
}

#[test]
fn metrics_tolerate_missing_fields() {
    let metrics: DashboardMetrics = serde_json::from_value(json!({
        "total_students": 40,
        "students_vaccinated": 25,
        "vaccination_trend": { "5": { "vaccinated": 3, "not_vaccinated": 1 } }
    }))
    .unwrap();
    assert_eq!(metrics.remaining(), 15);
    assert_eq!(metrics.vaccination_trend["5"].total(), 4);

    let empty: DashboardMetrics = serde_json::from_value(json!({})).unwrap();
    assert_eq!(empty, DashboardMetrics::default());
}
