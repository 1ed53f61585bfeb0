use crate::backup;
use crate::confirm::ConfirmState;
use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::join_list;
use crate::store::RecordStore;
use serde_json::json;
use std::path::PathBuf;

fn handle_export_bundle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let workspace_path = match req
        .params
        .get("workspacePath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .or_else(|| state.workspace.clone())
    {
        Some(p) => p,
        None => return err(&req.id, "no_workspace", "select a workspace first", None),
    };
    let out_path = match req.params.get("outPath").and_then(|v| v.as_str()) {
        Some(v) => PathBuf::from(v),
        None => return err(&req.id, "bad_params", "missing outPath", None),
    };

    match backup::export_workspace_bundle(&workspace_path, &out_path) {
        Ok(summary) => ok(
            &req.id,
            json!({
                "outPath": out_path.to_string_lossy(),
                "bundleFormat": summary.bundle_format,
                "bundleId": summary.bundle_id,
                "dbSha256": summary.db_sha256,
            }),
        ),
        Err(e) => err(&req.id, "export_failed", format!("{e:?}"), None),
    }
}

fn handle_import_bundle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let workspace_path = match req
        .params
        .get("workspacePath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .or_else(|| state.workspace.clone())
    {
        Some(p) => p,
        None => return err(&req.id, "no_workspace", "select a workspace first", None),
    };
    let in_path = match req.params.get("inPath").and_then(|v| v.as_str()) {
        Some(v) => PathBuf::from(v),
        None => return err(&req.id, "bad_params", "missing inPath", None),
    };

    // Importing over the selected workspace swaps the database file under
    // the open connection; close the store first and reload it afterwards.
    let selected = state.workspace.as_deref() == Some(workspace_path.as_path());
    if selected {
        state.store = None;
        state.confirm = ConfirmState::Idle;
    }

    let result = backup::import_workspace_bundle(&in_path, &workspace_path);

    if selected {
        match db::open_db(&workspace_path) {
            Ok(conn) => {
                state.store = Some(RecordStore::open(Box::new(db::SqliteGateway::new(conn))));
            }
            Err(e) => {
                state.workspace = None;
                return err(&req.id, "db_open_failed", format!("{e:?}"), None);
            }
        }
    }

    match result {
        Ok(summary) => {
            let count = state.store.as_ref().map(|s| s.list().len());
            ok(
                &req.id,
                json!({
                    "bundleFormatDetected": summary.bundle_format_detected,
                    "studentCount": count,
                }),
            )
        }
        Err(e) => err(&req.id, "import_failed", format!("{e:?}"), None),
    }
}

fn handle_export_students_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let out_path = match req.params.get("outPath").and_then(|v| v.as_str()) {
        Some(v) => PathBuf::from(v),
        None => return err(&req.id, "bad_params", "missing outPath", None),
    };

    let mut csv = String::from("id,name,class,classNumber,strengths,weaknesses,remark\r\n");
    for s in store.list() {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\r\n",
            csv_quote(&s.id),
            csv_quote(&s.name),
            csv_quote(&s.class_name),
            csv_quote(&s.class_number),
            csv_quote(&join_list(&s.strengths)),
            csv_quote(&join_list(&s.weaknesses)),
            csv_quote(&s.remark),
        ));
    }

    if let Some(parent) = out_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return err(&req.id, "export_failed", e.to_string(), None);
        }
    }
    if let Err(e) = std::fs::write(&out_path, csv.as_bytes()) {
        return err(&req.id, "export_failed", e.to_string(), None);
    }

    ok(
        &req.id,
        json!({
            "outPath": out_path.to_string_lossy(),
            "rowCount": store.list().len(),
        }),
    )
}

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.exportWorkspaceBundle" => Some(handle_export_bundle(state, req)),
        "backup.importWorkspaceBundle" => Some(handle_import_bundle(state, req)),
        "exchange.exportStudentsCsv" => Some(handle_export_students_csv(state, req)),
        _ => None,
    }
}
