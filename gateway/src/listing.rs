//! Filtering, pagination and grouping for the drive, student and report
//! listings.
//!
//! All three listings page the same way: six items per page, 1-based pages,
//! and the controls hide when everything fits on one page. Views reset to
//! page 1 whenever a filter input changes; these helpers only clamp.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::dates;
use crate::models::{Drive, Student, StudentId, VaccinationRecord};

pub const PAGE_SIZE: usize = 6;

pub const NO_DRIVE_LABEL: &str = "N/A";

#[must_use]
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Clamp a 1-based page into `1..=total_pages` (page 1 for empty lists).
#[must_use]
pub fn clamp_page(page: usize, len: usize) -> usize {
    page.clamp(1, total_pages(len).max(1))
}

#[must_use]
pub fn needs_pagination(len: usize) -> bool {
    len > PAGE_SIZE
}

/// Items on the 1-based `page` after clamping.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let page = clamp_page(page, items.len());
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// Pagination summary for the "Page x of y" controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
}

impl PageInfo {
    #[must_use]
    pub fn new(page: usize, len: usize) -> Self {
        Self { page: clamp_page(page, len), total_pages: total_pages(len).max(1) }
    }

    #[must_use]
    pub fn has_previous(self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(self) -> bool {
        self.page < self.total_pages
    }
}

/// Drives whose name contains `term`, ignoring case.
#[must_use]
pub fn filter_drives<'a>(drives: &'a [Drive], term: &str) -> Vec<&'a Drive> {
    let needle = term.trim().to_lowercase();
    drives.iter().filter(|d| d.name.to_lowercase().contains(&needle)).collect()
}

/// Report rows: name search plus an optional exact-day match.
#[must_use]
pub fn filter_reports<'a>(drives: &'a [Drive], term: &str, on: Option<Date>) -> Vec<&'a Drive> {
    filter_drives(drives, term)
        .into_iter()
        .filter(|d| on.is_none_or(|day| d.calendar_date() == Some(day)))
        .collect()
}

/// Students matching `term` by name (any case), grade or roll number.
#[must_use]
pub fn filter_students<'a>(rows: &'a [StudentRow], term: &str) -> Vec<&'a StudentRow> {
    let needle = term.trim().to_lowercase();
    rows.iter()
        .filter(|row| {
            let s = &row.student;
            s.name.to_lowercase().contains(&needle) || s.grade.contains(&needle) || s.roll_number.contains(&needle)
        })
        .collect()
}

/// A student with its vaccination history folded in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudentRow {
    pub student: Student,
    pub vaccination_count: usize,
    pub latest_drive: Option<String>,
}

impl StudentRow {
    #[must_use]
    pub fn drive_label(&self) -> &str {
        self.latest_drive.as_deref().unwrap_or(NO_DRIVE_LABEL)
    }
}

/// Join students with their records. The last record in backend order is the
/// latest one; its drive name is shown even when blank.
#[must_use]
pub fn enrich_students(students: Vec<Student>, records: &[VaccinationRecord]) -> Vec<StudentRow> {
    let mut by_student: HashMap<StudentId, (usize, Option<&str>)> = HashMap::new();
    for record in records {
        let entry = by_student.entry(record.student_id).or_default();
        entry.0 += 1;
        entry.1 = record.drive_name.as_deref();
    }
    students
        .into_iter()
        .map(|student| {
            let (vaccination_count, latest) = by_student.get(&student.id).copied().unwrap_or_default();
            StudentRow { student, vaccination_count, latest_drive: latest.map(str::to_owned) }
        })
        .collect()
}

/// Numeric grades first in numeric order, then the rest lexicographically.
#[must_use]
pub fn compare_grades(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u32>(), b.trim().parse::<u32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeBucket<'a> {
    pub grade: String,
    pub rows: Vec<&'a StudentRow>,
}

/// Group rows by grade, buckets in [`compare_grades`] order.
#[must_use]
pub fn bucket_by_grade<'a>(rows: &[&'a StudentRow]) -> Vec<GradeBucket<'a>> {
    let mut buckets: Vec<GradeBucket<'a>> = Vec::new();
    for &row in rows {
        let grade = row.student.grade.trim();
        match buckets.iter_mut().find(|b| b.grade == grade) {
            Some(bucket) => bucket.rows.push(row),
            None => buckets.push(GradeBucket { grade: grade.to_owned(), rows: vec![row] }),
        }
    }
    buckets.sort_by(|a, b| compare_grades(&a.grade, &b.grade));
    buckets
}

/// Rows for the selected grade chip; `None` shows everything.
#[must_use]
pub fn select_grade<'a>(rows: Vec<&'a StudentRow>, grade: Option<&str>) -> Vec<&'a StudentRow> {
    match grade {
        Some(grade) => rows.into_iter().filter(|r| r.student.grade.trim() == grade).collect(),
        None => rows,
    }
}

/// Upcoming drives soonest first, skipping ones already past.
#[must_use]
pub fn upcoming_drives(drives: &[Drive], today: Date) -> Vec<(&Drive, i64)> {
    let mut upcoming: Vec<(&Drive, i64)> = drives
        .iter()
        .filter_map(|d| d.calendar_date().map(|day| (d, dates::days_until(day, today))))
        .filter(|(_, days)| *days >= 0)
        .collect();
    upcoming.sort_by_key(|(_, days)| *days);
    upcoming
}
