use crate::confirm::PendingAction;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{split_list, Student};
use crate::query::{self, SortDirection, SortField};
use serde_json::json;

const DELETE_STUDENT_MESSAGE: &str =
    "Are you sure you want to delete this student? This action cannot be undone.";

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    ok(&req.id, json!({ "students": store.list() }))
}

fn handle_students_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    // Explicit params override the held view state for this call only.
    let search_term = match req.params.get("searchTerm") {
        Some(v) => match v.as_str() {
            Some(s) => s.to_string(),
            None => return err(&req.id, "bad_params", "searchTerm must be a string", None),
        },
        None => state.search_term.clone(),
    };
    let field = match req.params.get("sortField") {
        Some(v) => match serde_json::from_value::<SortField>(v.clone()) {
            Ok(f) => f,
            Err(_) => return err(&req.id, "bad_params", "invalid sortField", None),
        },
        None => state.sort.field,
    };
    let direction = match req.params.get("sortDirection") {
        Some(v) => match serde_json::from_value::<SortDirection>(v.clone()) {
            Ok(d) => d,
            Err(_) => return err(&req.id, "bad_params", "invalid sortDirection", None),
        },
        None => state.sort.direction,
    };

    let students = query::view(store.list(), &search_term, field, direction);
    ok(
        &req.id,
        json!({
            "students": students,
            "searchTerm": search_term,
            "sortField": field,
            "sortDirection": direction
        }),
    )
}

fn handle_view_set_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let term = match req.params.get("term").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing term", None),
    };
    state.search_term = term.clone();
    ok(&req.id, json!({ "searchTerm": term }))
}

fn handle_view_sort_by(state: &mut AppState, req: &Request) -> serde_json::Value {
    let field = match req.params.get("field") {
        Some(v) => match serde_json::from_value::<SortField>(v.clone()) {
            Ok(f) => f,
            Err(_) => return err(&req.id, "bad_params", "invalid field", None),
        },
        None => return err(&req.id, "bad_params", "missing field", None),
    };

    state.sort.select(field);
    ok(
        &req.id,
        json!({
            "sortField": state.sort.field,
            "sortDirection": state.sort.direction
        }),
    )
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let Some(candidate) = parse_student(&req.params) else {
        return err(&req.id, "bad_params", "missing/invalid student", None);
    };

    match store.create(candidate) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(errors) => err(
            &req.id,
            "validation_failed",
            "student record failed validation",
            Some(json!({ "errors": errors })),
        ),
    }
}

fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let Some(record) = parse_student(&req.params) else {
        return err(&req.id, "bad_params", "missing/invalid student", None);
    };

    match store.update(record) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(errors) => err(
            &req.id,
            "validation_failed",
            "student record failed validation",
            Some(json!({ "errors": errors })),
        ),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.store.is_none() {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    }

    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };

    // Nothing is deleted yet; the action waits behind confirm.accept.
    state.confirm.request(
        DELETE_STUDENT_MESSAGE,
        PendingAction::DeleteStudent { student_id },
    );
    ok(
        &req.id,
        json!({ "pendingConfirmation": { "message": DELETE_STUDENT_MESSAGE } }),
    )
}

fn parse_student(params: &serde_json::Value) -> Option<Student> {
    let mut v = params.get("student")?.clone();
    // Strengths and weaknesses arrive either as arrays or in their
    // single-line comma-delimited edit form.
    for key in ["strengths", "weaknesses"] {
        let text = v.get(key).and_then(|f| f.as_str()).map(str::to_string);
        if let Some(text) = text {
            v[key] = json!(split_list(&text));
        }
    }
    serde_json::from_value::<Student>(v).ok()
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.view" => Some(handle_students_view(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        "view.setSearch" => Some(handle_view_set_search(state, req)),
        "view.sortBy" => Some(handle_view_sort_by(state, req)),
        _ => None,
    }
}
