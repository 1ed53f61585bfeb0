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

fn view_names(result: &serde_json::Value) -> Vec<String> {
    result
        .get("students")
        .and_then(|v| v.as_array())
        .expect("students array")
        .iter()
        .map(|s| s["name"].as_str().expect("name").to_string())
        .collect()
}

#[test]
fn view_filters_and_sorts_the_roster() {
    let workspace = temp_dir("rosterd-view");
    let (_child, mut stdin, mut reader) = spawn_daemon();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    // Seed roster: Zhang San (3A/1), Li Si (2B/5), Wang Wu (4C/12).
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.create",
        json!({ "student": { "name": "Li Wei", "class": "2B", "classNumber": "5" } }),
    );

    // Case-insensitive name match, sorted ascending by name.
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.view",
        json!({ "searchTerm": "LI", "sortField": "name", "sortDirection": "asc" }),
    );
    assert_eq!(view_names(&result), vec!["Li Si", "Li Wei"]);

    // Same query via the id field.
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.view",
        json!({ "searchTerm": "S000003", "sortField": "name", "sortDirection": "asc" }),
    );
    assert_eq!(view_names(&result), vec!["Wang Wu"]);

    // Class and class-number matches.
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.view",
        json!({ "searchTerm": "2b", "sortField": "name", "sortDirection": "asc" }),
    );
    assert_eq!(view_names(&result), vec!["Li Si", "Li Wei"]);

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "students.view",
        json!({ "searchTerm": "12", "sortField": "name", "sortDirection": "asc" }),
    );
    assert_eq!(view_names(&result), vec!["Wang Wu"]);

    // Descending flips the distinct-key order.
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "students.view",
        json!({ "searchTerm": "", "sortField": "name", "sortDirection": "desc" }),
    );
    assert_eq!(
        view_names(&result),
        vec!["Zhang San", "Wang Wu", "Li Wei", "Li Si"]
    );

    // Ties on the sort key keep insertion order in both directions.
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "students.view",
        json!({ "searchTerm": "2b", "sortField": "class", "sortDirection": "asc" }),
    );
    assert_eq!(view_names(&result), vec!["Li Si", "Li Wei"]);
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "9",
        "students.view",
        json!({ "searchTerm": "2b", "sortField": "class", "sortDirection": "desc" }),
    );
    assert_eq!(view_names(&result), vec!["Li Si", "Li Wei"]);

    // Class-number sorting is lexicographic: "12" sorts before "5".
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "10",
        "students.view",
        json!({ "searchTerm": "", "sortField": "classNumber", "sortDirection": "asc" }),
    );
    assert_eq!(
        view_names(&result),
        vec!["Zhang San", "Wang Wu", "Li Si", "Li Wei"]
    );

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn held_view_state_applies_and_toggles() {
    let workspace = temp_dir("rosterd-view-state");
    let (_child, mut stdin, mut reader) = spawn_daemon();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    // Defaults: no search, name ascending.
    let result = request_ok(&mut stdin, &mut reader, "2", "students.view", json!({}));
    assert_eq!(result["sortField"], "name");
    assert_eq!(result["sortDirection"], "asc");
    assert_eq!(view_names(&result), vec!["Li Si", "Wang Wu", "Zhang San"]);

    // Reselecting the current column flips direction.
    let sorted = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "view.sortBy",
        json!({ "field": "name" }),
    );
    assert_eq!(sorted["sortDirection"], "desc");
    let result = request_ok(&mut stdin, &mut reader, "4", "students.view", json!({}));
    assert_eq!(view_names(&result), vec!["Zhang San", "Wang Wu", "Li Si"]);

    // Selecting a different column resets to ascending.
    let sorted = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "view.sortBy",
        json!({ "field": "classNumber" }),
    );
    assert_eq!(sorted["sortField"], "classNumber");
    assert_eq!(sorted["sortDirection"], "asc");

    // The held search term narrows the view until changed.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "view.setSearch",
        json!({ "term": "wang" }),
    );
    let result = request_ok(&mut stdin, &mut reader, "7", "students.view", json!({}));
    assert_eq!(view_names(&result), vec!["Wang Wu"]);

    // Explicit params override the held state for one call only.
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "students.view",
        json!({ "searchTerm": "" }),
    );
    assert_eq!(view_names(&result).len(), 3);
    let result = request_ok(&mut stdin, &mut reader, "9", "students.view", json!({}));
    assert_eq!(view_names(&result), vec!["Wang Wu"]);

    let bad = request(
        &mut stdin,
        &mut reader,
        "10",
        "students.view",
        json!({ "sortField": "grades" }),
    );
    assert_eq!(bad["ok"], false);
    assert_eq!(bad["error"]["code"], "bad_params");

    let _ = std::fs::remove_dir_all(workspace);
}
