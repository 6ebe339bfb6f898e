use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_probestatd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn probestatd");
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
    let payload = json!({ "id": id, "method": method, "params": params });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    serde_json::from_str(line.trim()).expect("parse response json")
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
fn linear_narrative_reaches_unique_solution() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "tutor.linear.solve",
        json!({ "a": 2, "b": 5, "c": 1, "d": -3 }),
    );
    assert_eq!(result["kind"], "linear");
    assert_eq!(result["cursor"], 0);
    assert_eq!(result["outcome"]["kind"], "unique");
    assert_eq!(result["outcome"]["solutionLatex"], "-8");

    let steps = result["steps"].as_array().expect("steps");
    assert_eq!(steps[0]["title"], "Equation");
    assert_eq!(steps[0]["latex"], "2x + 5 = x - 3");
    assert_eq!(steps.last().expect("last")["latex"], "x = -8");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn linear_degenerate_cases() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let identity = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "tutor.linear.solve",
        json!({ "a": 1, "b": 2, "c": 1, "d": 2 }),
    );
    assert_eq!(identity["outcome"]["kind"], "infinite");

    let contradiction = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "tutor.linear.solve",
        json!({ "a": 1, "b": 2, "c": 1, "d": 3 }),
    );
    assert_eq!(contradiction["outcome"]["kind"], "empty");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn navigation_clamps_and_resets() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "tutor.linear.solve",
        json!({ "a": 2, "b": 5, "c": 1, "d": -3 }),
    );
    let first_session = result["sessionId"].as_str().expect("session id").to_string();
    let count = result["stepCount"].as_u64().expect("count");
    assert_eq!(count, 7);

    // Retreating at the first step is a no-op.
    let back = request_ok(&mut stdin, &mut reader, "2", "tutor.step.prev", json!({}));
    assert_eq!(back["cursor"], 0);

    // Advancing past the last step clamps.
    for i in 0..10 {
        request_ok(
            &mut stdin,
            &mut reader,
            &format!("n{i}"),
            "tutor.step.next",
            json!({}),
        );
    }
    let at_end = request_ok(&mut stdin, &mut reader, "3", "tutor.step.next", json!({}));
    assert_eq!(at_end["cursor"], count - 1);
    assert_eq!(at_end["step"]["latex"], "x = -8");

    // Out-of-range jumps clamp into [0, len-1].
    let jumped = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "tutor.step.jump",
        json!({ "index": 99 }),
    );
    assert_eq!(jumped["cursor"], count - 1);
    let jumped = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "tutor.step.jump",
        json!({ "index": -4 }),
    );
    assert_eq!(jumped["cursor"], 0);

    // Regenerating installs a fresh session with cursor 0.
    let regenerated = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "tutor.quadratic.solve",
        json!({ "a": 1, "b": -3, "c": 2 }),
    );
    assert_eq!(regenerated["cursor"], 0);
    assert_ne!(regenerated["sessionId"].as_str().expect("id"), first_session);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn quadratic_perfect_square_discriminant() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "tutor.quadratic.solve",
        json!({ "a": 1, "b": -3, "c": 2 }),
    );
    assert_eq!(result["kind"], "quadratic");
    assert_eq!(result["discriminant"], "1");
    assert_eq!(result["outcome"]["kind"], "rationalPair");
    assert_eq!(result["outcome"]["rootsLatex"], json!(["1", "2"]));

    let steps = result["steps"].as_array().expect("steps");
    let factorization = steps.last().expect("last");
    assert_eq!(factorization["title"], "Factorization");
    assert_eq!(factorization["latex"], "x^{2} - 3x + 2 = (x - 1)(x - 2)");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn quadratic_complex_and_repeated_branches() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let complex = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "tutor.quadratic.solve",
        json!({ "a": 1, "b": 2, "c": 5 }),
    );
    assert_eq!(complex["discriminant"], "-16");
    assert_eq!(complex["outcome"]["kind"], "complexPair");

    let repeated = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "tutor.quadratic.solve",
        json!({ "a": 1, "b": -2, "c": 1 }),
    );
    assert_eq!(repeated["discriminant"], "0");
    assert_eq!(repeated["outcome"]["kind"], "repeated");
    assert_eq!(repeated["outcome"]["rootLatex"], "1");
    let steps = repeated["steps"].as_array().expect("steps");
    assert_eq!(
        steps.last().expect("last")["latex"],
        "x^{2} - 2x + 1 = (x - 1)^{2}"
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn quadratic_degenerate_delegates_to_linear() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "tutor.quadratic.solve",
        json!({ "a": 0, "b": 2, "c": -6 }),
    );
    assert_eq!(result["discriminant"], serde_json::Value::Null);
    assert_eq!(result["outcome"]["kind"], "reducedToLinear");
    assert_eq!(result["outcome"]["linear"]["kind"], "unique");
    assert_eq!(result["outcome"]["linear"]["solutionLatex"], "3");

    let steps = result["steps"].as_array().expect("steps");
    assert_eq!(steps[0]["title"], "Degenerate equation");
    // The spliced linear narrative must not restate the equation.
    assert_eq!(steps[1]["title"], "Expand both sides");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn plot_is_quadratic_only() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let no_session = request(&mut stdin, &mut reader, "1", "tutor.plot", json!({}));
    assert_eq!(no_session["ok"], false);
    assert_eq!(no_session["error"]["code"], "no_session");

    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "tutor.quadratic.solve",
        json!({ "a": 1, "b": -2, "c": 1 }),
    );
    let plotted = request_ok(&mut stdin, &mut reader, "3", "tutor.plot", json!({}));
    let points = plotted["curve"]["points"].as_array().expect("points");
    assert_eq!(points.len(), 401);
    assert_eq!(plotted["curve"]["xMin"], -10.0);
    assert_eq!(plotted["curve"]["xMax"], 10.0);

    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "tutor.linear.solve",
        json!({ "a": 1, "b": 0, "c": 0, "d": 1 }),
    );
    let refused = request(&mut stdin, &mut reader, "5", "tutor.plot", json!({}));
    assert_eq!(refused["ok"], false);
    assert_eq!(refused["error"]["code"], "no_plot");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn solving_is_deterministic_across_sessions() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let first = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "tutor.quadratic.solve",
        json!({ "a": 3, "b": -5, "c": 1 }),
    );
    let second = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "tutor.quadratic.solve",
        json!({ "a": 3, "b": -5, "c": 1 }),
    );
    assert_eq!(first["steps"], second["steps"]);
    assert_eq!(first["discriminant"], second["discriminant"]);
    // Session identity is fresh even for the same tuple.
    assert_ne!(first["sessionId"], second["sessionId"]);

    drop(stdin);
    let _ = child.wait();
}
