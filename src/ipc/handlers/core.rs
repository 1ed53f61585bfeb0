use crate::confirm::ConfirmState;
use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::query::SortState;
use crate::store::RecordStore;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match db::open_db(&path) {
        Ok(conn) => {
            let store = RecordStore::open(Box::new(db::SqliteGateway::new(conn)));
            let count = store.list().len();

            // Selecting a workspace starts a fresh session: view and
            // confirmation state from the previous one must not leak in.
            state.workspace = Some(path.clone());
            state.store = Some(store);
            state.search_term = String::new();
            state.sort = SortState::default();
            state.confirm = ConfirmState::Idle;

            ok(
                &req.id,
                json!({
                    "workspacePath": path.to_string_lossy(),
                    "studentCount": count
                }),
            )
        }
        Err(e) => err(&req.id, "db_open_failed", format!("{e:?}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        _ => None,
    }
}
