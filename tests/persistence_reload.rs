use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_daemon() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rosterd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rosterd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn mutations_survive_a_daemon_restart() {
    let workspace = temp_dir("rosterd-reload");

    {
        let (mut child, mut stdin, mut reader) = spawn_daemon();
        let selected = request_ok(
            &mut stdin,
            &mut reader,
            "1",
            "workspace.select",
            json!({ "path": workspace.to_string_lossy() }),
        );
        assert_eq!(selected["studentCount"], 3);

        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "2",
            "students.create",
            json!({ "student": { "name": "Li Wei", "class": "2B", "classNumber": "5" } }),
        );

        let listed = request_ok(&mut stdin, &mut reader, "3", "students.list", json!({}));
        let mut zhang = listed["students"][0].clone();
        assert_eq!(zhang["id"], "s000001");
        zhang["remark"] = json!("Needs a new textbook");
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "4",
            "students.update",
            json!({ "student": zhang }),
        );

        drop(stdin);
        let _ = child.wait();
    }

    // A fresh process on the same workspace sees the persisted roster, not
    // the seed.
    let (mut child, mut stdin, mut reader) = spawn_daemon();
    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(selected["studentCount"], 4);

    let listed = request_ok(&mut stdin, &mut reader, "6", "students.list", json!({}));
    let students = listed["students"].as_array().expect("students array");
    assert_eq!(students.len(), 4);
    assert_eq!(students[0]["remark"], "Needs a new textbook");
    assert_eq!(students[3]["id"], "s000004");
    assert_eq!(students[3]["name"], "Li Wei");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn reselecting_an_untouched_workspace_stays_on_seed() {
    let workspace = temp_dir("rosterd-seed-twice");

    // No mutation happens, so nothing is written; the seed comes back on
    // the next select.
    for round in ["1", "2"] {
        let (mut child, mut stdin, mut reader) = spawn_daemon();
        let selected = request_ok(
            &mut stdin,
            &mut reader,
            round,
            "workspace.select",
            json!({ "path": workspace.to_string_lossy() }),
        );
        assert_eq!(selected["studentCount"], 3);
        drop(stdin);
        let _ = child.wait();
    }

    let _ = std::fs::remove_dir_all(workspace);
}
