use serde::{Deserialize, Serialize};

use crate::model::Student;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Class,
    ClassNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The list view's current sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            field: SortField::Name,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Reselecting the current column flips direction; a new column resets
    /// to ascending.
    pub fn select(&mut self, field: SortField) {
        if field == self.field {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Derive the display view: case-insensitive substring filter over name, id,
/// class and class number, then a stable lexicographic sort. Records tied on
/// the sort key keep their filter-step order in both directions.
pub fn view<'a>(
    records: &'a [Student],
    search_term: &str,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a Student> {
    let needle = search_term.to_lowercase();
    let mut hits: Vec<&Student> = records
        .iter()
        .filter(|s| matches_search(s, &needle))
        .collect();

    hits.sort_by(|a, b| {
        let ord = sort_key(a, field).cmp(sort_key(b, field));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    hits
}

fn matches_search(student: &Student, needle: &str) -> bool {
    student.name.to_lowercase().contains(needle)
        || student.id.to_lowercase().contains(needle)
        || student.class_name.to_lowercase().contains(needle)
        || student.class_number.to_lowercase().contains(needle)
}

fn sort_key(student: &Student, field: SortField) -> &str {
    match field {
        SortField::Name => &student.name,
        SortField::Class => &student.class_name,
        SortField::ClassNumber => &student.class_number,
    }
}
