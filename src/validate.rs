use std::collections::BTreeMap;

use crate::model::{AcademicResult, MedicalRecord, Student, SUBJECTS};

/// Field name -> human-readable message, surfaced to the caller unchanged.
pub type ValidationErrors = BTreeMap<String, String>;

/// Check a candidate student record. All rules are evaluated independently;
/// an empty map means the record is acceptable.
pub fn validate_student(student: &Student) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if student.id.is_empty() {
        errors.insert("id".to_string(), "Student ID is required".to_string());
    }
    if student.name.is_empty() {
        errors.insert("name".to_string(), "Name is required".to_string());
    }

    if student.class_name.is_empty() {
        errors.insert("class".to_string(), "Class is required".to_string());
    } else if !is_class_code(&student.class_name) {
        errors.insert(
            "class".to_string(),
            "Class must be in format [1-6][A-F]".to_string(),
        );
    }

    if student.class_number.is_empty() {
        errors.insert(
            "classNumber".to_string(),
            "Class number is required".to_string(),
        );
    } else {
        match student.class_number.trim().parse::<i64>() {
            Ok(n) if (1..=39).contains(&n) => {}
            _ => {
                errors.insert(
                    "classNumber".to_string(),
                    "Class number must be between 1 and 39".to_string(),
                );
            }
        }
    }

    errors
}

// Grade 1-6, section A-F, nothing else.
fn is_class_code(code: &str) -> bool {
    let b = code.as_bytes();
    b.len() == 2 && (b'1'..=b'6').contains(&b[0]) && (b'A'..=b'F').contains(&b[1])
}

/// Entry rules for a new medical record: physician, date, hospital and
/// treatment are required; the date must be an actual calendar date.
pub fn validate_medical_record(record: &MedicalRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if record.physician.trim().is_empty() {
        errors.insert(
            "physician".to_string(),
            "Physician in charge is required".to_string(),
        );
    }
    if record.date.trim().is_empty() {
        errors.insert("date".to_string(), "Date is required".to_string());
    } else if chrono::NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d").is_err() {
        errors.insert(
            "date".to_string(),
            "Date must be a valid YYYY-MM-DD date".to_string(),
        );
    }
    if record.hospital.trim().is_empty() {
        errors.insert("hospital".to_string(), "Hospital is required".to_string());
    }
    if record.treatment.trim().is_empty() {
        errors.insert("treatment".to_string(), "Treatment is required".to_string());
    }

    errors
}

/// Entry rules for a new academic result: marks must be non-empty and the
/// subject must come from the fixed catalogue.
pub fn validate_academic_result(result: &AcademicResult) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if result.marks.trim().is_empty() {
        errors.insert("marks".to_string(), "Marks are required".to_string());
    }
    if !SUBJECTS.contains(&result.subject.as_str()) {
        errors.insert("subject".to_string(), "Unknown subject".to_string());
    }

    errors
}
