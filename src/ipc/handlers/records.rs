use crate::confirm::PendingAction;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{AcademicResult, MedicalRecord};
use crate::validate::{validate_academic_result, validate_medical_record};
use serde_json::json;

pub const DELETE_MEDICAL_RECORD_MESSAGE: &str =
    "Are you sure you want to delete this medical record? This action cannot be undone.";
pub const DELETE_ACADEMIC_RESULT_MESSAGE: &str =
    "Are you sure you want to delete this academic result? This action cannot be undone.";

fn handle_medical_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };
    let record = match req
        .params
        .get("record")
        .map(|v| serde_json::from_value::<MedicalRecord>(v.clone()))
    {
        Some(Ok(r)) => r,
        _ => return err(&req.id, "bad_params", "missing/invalid record", None),
    };

    let entry_errors = validate_medical_record(&record);
    if !entry_errors.is_empty() {
        return err(
            &req.id,
            "validation_failed",
            "medical record is incomplete",
            Some(json!({ "errors": entry_errors })),
        );
    }

    let Some(mut student) = store.get(&student_id).cloned() else {
        return err(&req.id, "not_found", "student not found", None);
    };
    student.medical_records.push(record);

    // The whole student goes back through update, so the record is
    // re-validated and the collection re-persisted in one place.
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

fn handle_academic_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };
    let result = match req
        .params
        .get("result")
        .map(|v| serde_json::from_value::<AcademicResult>(v.clone()))
    {
        Some(Ok(r)) => r,
        _ => return err(&req.id, "bad_params", "missing/invalid result", None),
    };

    let entry_errors = validate_academic_result(&result);
    if !entry_errors.is_empty() {
        return err(
            &req.id,
            "validation_failed",
            "academic result is incomplete",
            Some(json!({ "errors": entry_errors })),
        );
    }

    let Some(mut student) = store.get(&student_id).cloned() else {
        return err(&req.id, "not_found", "student not found", None);
    };
    student.academic_results.push(result);

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

fn handle_medical_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    request_positional_delete(state, req, |student_id, index| {
        (
            DELETE_MEDICAL_RECORD_MESSAGE,
            PendingAction::DeleteMedicalRecord { student_id, index },
        )
    })
}

fn handle_academic_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    request_positional_delete(state, req, |student_id, index| {
        (
            DELETE_ACADEMIC_RESULT_MESSAGE,
            PendingAction::DeleteAcademicResult { student_id, index },
        )
    })
}

fn request_positional_delete(
    state: &mut AppState,
    req: &Request,
    make: impl FnOnce(String, usize) -> (&'static str, PendingAction),
) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };
    let index = match req.params.get("index").and_then(|v| v.as_u64()) {
        Some(v) => v as usize,
        None => return err(&req.id, "bad_params", "missing/invalid index", None),
    };

    if store.get(&student_id).is_none() {
        return err(&req.id, "not_found", "student not found", None);
    }

    let (message, action) = make(student_id, index);
    state.confirm.request(message, action);
    ok(
        &req.id,
        json!({ "pendingConfirmation": { "message": message } }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "medicalRecords.add" => Some(handle_medical_add(state, req)),
        "medicalRecords.delete" => Some(handle_medical_delete(state, req)),
        "academicResults.add" => Some(handle_academic_add(state, req)),
        "academicResults.delete" => Some(handle_academic_delete(state, req)),
        _ => None,
    }
}
