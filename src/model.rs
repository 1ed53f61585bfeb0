use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed subject catalogue academic results are recorded against.
pub const SUBJECTS: [&str; 16] = [
    "English Language",
    "Chinese Language",
    "Mathematics",
    "Liberal Studies",
    "Physics",
    "Chemistry",
    "Biology",
    "Economics",
    "Business, Accounting and Financial Studies",
    "History",
    "Chinese History",
    "Geography",
    "Information and Communication Technology",
    "Music",
    "Visual Arts",
    "Physical Education",
];

/// Delimiter used when strengths/weaknesses are edited as a single line.
pub const LIST_DELIMITER: &str = ", ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// "s" followed by six digits. Assigned by the store on create; a draft
    /// arrives with this empty.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub class_number: String,
    #[serde(default)]
    pub grades: BTreeMap<String, f64>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub medical_records: Vec<MedicalRecord>,
    #[serde(default)]
    pub academic_results: Vec<AcademicResult>,
    #[serde(default)]
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    #[serde(default)]
    pub physician: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub hospital: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicResult {
    pub form: FormLevel,
    pub term: Term,
    pub subject: String,
    #[serde(default)]
    pub marks: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormLevel {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    #[serde(rename = "First Term")]
    First,
    #[serde(rename = "Second Term")]
    Second,
    #[serde(rename = "Third Term")]
    Third,
}

/// Join an ordered list into its single-line edit form.
pub fn join_list(items: &[String]) -> String {
    items.join(LIST_DELIMITER)
}

/// Split the single-line edit form back into an ordered list. The empty
/// string maps to the empty list so join/split round-trips both ways. An
/// individual entry containing the delimiter cannot round-trip.
pub fn split_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(LIST_DELIMITER).map(str::to_string).collect()
}

/// Built-in roster used when the workspace has no saved collection yet.
pub fn seed_students() -> Vec<Student> {
    vec![
        Student {
            id: "s000001".to_string(),
            name: "Zhang San".to_string(),
            class_name: "3A".to_string(),
            class_number: "1".to_string(),
            grades: BTreeMap::from([
                ("Math".to_string(), 85.0),
                ("English".to_string(), 90.0),
                ("Science".to_string(), 88.0),
            ]),
            strengths: vec!["Critical thinking".to_string(), "Leadership".to_string()],
            weaknesses: vec!["Time management".to_string()],
            medical_records: vec![MedicalRecord {
                physician: "Dr. Li".to_string(),
                date: "2023-05-15".to_string(),
                hospital: "City Hospital".to_string(),
                treatment: "Annual checkup".to_string(),
                remark: "All clear".to_string(),
            }],
            academic_results: Vec::new(),
            remark: "Excellent student".to_string(),
        },
        Student {
            id: "s000002".to_string(),
            name: "Li Si".to_string(),
            class_name: "2B".to_string(),
            class_number: "5".to_string(),
            grades: BTreeMap::from([
                ("Math".to_string(), 72.0),
                ("English".to_string(), 65.0),
            ]),
            strengths: vec!["Teamwork".to_string()],
            weaknesses: vec!["Public speaking".to_string()],
            medical_records: Vec::new(),
            academic_results: vec![AcademicResult {
                form: FormLevel::F2,
                term: Term::First,
                subject: "Mathematics".to_string(),
                marks: "78".to_string(),
            }],
            remark: String::new(),
        },
        Student {
            id: "s000003".to_string(),
            name: "Wang Wu".to_string(),
            class_name: "4C".to_string(),
            class_number: "12".to_string(),
            grades: BTreeMap::new(),
            strengths: Vec::new(),
            weaknesses: vec!["Attendance".to_string()],
            medical_records: Vec::new(),
            academic_results: Vec::new(),
            remark: "Transferred in mid-year".to_string(),
        },
    ]
}
