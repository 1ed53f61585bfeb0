use crate::confirm::PendingAction;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_accept(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(action) = state.confirm.take() else {
        return err(&req.id, "no_pending_action", "nothing to confirm", None);
    };
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match action {
        PendingAction::DeleteStudent { student_id } => {
            store.delete(&student_id);
            ok(&req.id, json!({ "deleted": student_id }))
        }
        PendingAction::DeleteMedicalRecord { student_id, index } => {
            let Some(mut student) = store.get(&student_id).cloned() else {
                return err(&req.id, "not_found", "student not found", None);
            };
            // A stale index no longer maps to an entry; the collection is
            // left as-is rather than removing a neighbour.
            if index < student.medical_records.len() {
                student.medical_records.remove(index);
            }
            match store.update(student) {
                Ok(student) => ok(&req.id, json!({ "student": student })),
                Err(errors) => err(
                    &req.id,
                    "validation_failed",
                    "student record failed validation",
                    Some(json!({ "errors": errors })),
                ),
            }
        }
        PendingAction::DeleteAcademicResult { student_id, index } => {
            let Some(mut student) = store.get(&student_id).cloned() else {
                return err(&req.id, "not_found", "student not found", None);
            };
            if index < student.academic_results.len() {
                student.academic_results.remove(index);
            }
            match store.update(student) {
                Ok(student) => ok(&req.id, json!({ "student": student })),
                Err(errors) => err(
                    &req.id,
                    "validation_failed",
                    "student record failed validation",
                    Some(json!({ "errors": errors })),
                ),
            }
        }
    }
}

fn handle_cancel(state: &mut AppState, req: &Request) -> serde_json::Value {
    let was_pending = state.confirm.is_pending();
    state.confirm.cancel();
    ok(&req.id, json!({ "cancelled": was_pending }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "confirm.accept" => Some(handle_accept(state, req)),
        "confirm.cancel" => Some(handle_cancel(state, req)),
        _ => None,
    }
}
