use crate::model::{self, Student};
use crate::validate::{validate_student, ValidationErrors};

/// Durable key-value collaborator holding the full serialized roster.
pub trait Gateway {
    /// Read the saved collection. `None` means nothing has been saved yet.
    fn load(&self) -> anyhow::Result<Option<Vec<Student>>>;
    /// Replace the saved collection with the given one.
    fn save(&self, students: &[Student]) -> anyhow::Result<()>;
}

/// The in-memory authoritative roster plus its CRUD operations. Every
/// successful mutation writes the whole collection back through the gateway.
pub struct RecordStore {
    students: Vec<Student>,
    gateway: Box<dyn Gateway>,
}

impl RecordStore {
    /// Load from the gateway, falling back to the built-in seed roster when
    /// nothing is saved or the saved state is unreadable.
    pub fn open(gateway: Box<dyn Gateway>) -> Self {
        let students = match gateway.load() {
            Ok(Some(saved)) => saved,
            Ok(None) => model::seed_students(),
            Err(e) => {
                eprintln!("rosterd: failed to load saved roster, starting from seed: {e:?}");
                model::seed_students()
            }
        };
        RecordStore { students, gateway }
    }

    /// Current records in insertion order.
    pub fn list(&self) -> &[Student] {
        &self.students
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Validate, assign the next id, append, persist. On validation failure
    /// the store is untouched and the field->message set comes back.
    ///
    /// Ids are count-based: next = len + 1, zero-padded to six digits. After
    /// a delete this can mint an id that is already in use.
    pub fn create(&mut self, mut candidate: Student) -> Result<Student, ValidationErrors> {
        candidate.id = format!("s{:06}", self.students.len() + 1);
        let errors = validate_student(&candidate);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.students.push(candidate.clone());
        self.persist();
        Ok(candidate)
    }

    /// Validate and replace the record whose id matches. An unmatched id is
    /// a silent no-op; the caller still gets the record back.
    pub fn update(&mut self, record: Student) -> Result<Student, ValidationErrors> {
        let errors = validate_student(&record);
        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some(slot) = self.students.iter_mut().find(|s| s.id == record.id) {
            *slot = record.clone();
        }
        self.persist();
        Ok(record)
    }

    /// Remove the record with the given id. Removing an absent id is a
    /// no-op, so a repeated delete is harmless.
    pub fn delete(&mut self, id: &str) {
        self.students.retain(|s| s.id != id);
        self.persist();
    }

    fn persist(&self) {
        // The in-memory roster stays authoritative for the session; a failed
        // write must not fail the mutation that triggered it.
        if let Err(e) = self.gateway.save(&self.students) {
            eprintln!("rosterd: failed to persist roster: {e:?}");
        }
    }
}
