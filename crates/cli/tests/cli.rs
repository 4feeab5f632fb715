//! End-to-end checks of the `pro` binary that need no account server.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn pro(session: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_pro"))
		.arg("--session")
		.arg(session)
		.args(args)
		.env_remove("PRO_SERVER_URL")
		.env_remove("PRO_PROXY_URL")
		.env_remove("PRO_TIMEOUT_MS")
		.env_remove("PRO_SESSION_FILE")
		.env_remove("RUST_LOG")
		.output()
		.expect("run pro")
}

fn stdout_json(output: &Output) -> Value {
	serde_json::from_slice(&output.stdout).expect("stdout is a JSON result")
}

#[test]
fn exec_unknown_command_fails_without_touching_session() {
	let temp = TempDir::new().unwrap();
	let session = temp.path().join("session.json");

	let output = pro(&session, &["exec", "bogus-command"]);

	assert!(!output.status.success());
	let result = stdout_json(&output);
	assert_eq!(result["ok"], false);
	assert_eq!(result["command"], "bogus-command");
	assert_eq!(result["error"]["code"], "UNKNOWN_COMMAND");

	let saved: Value = serde_json::from_str(&std::fs::read_to_string(&session).unwrap()).unwrap();
	assert_eq!(saved["userId"], 0);
	assert_eq!(saved["token"], "");
	assert!(saved["error"].is_null());
}

#[test]
fn remove_device_with_proxy_but_no_proxy_url_is_transport_error() {
	let temp = TempDir::new().unwrap();
	let session = temp.path().join("session.json");

	let output = pro(&session, &["--proxy", "remove-device", "device-9"]);

	assert!(!output.status.success());
	let result = stdout_json(&output);
	assert_eq!(result["ok"], false);
	assert_eq!(result["command"], "remove-device");
	assert_eq!(result["error"]["code"], "TRANSPORT_ERROR");
}

#[test]
fn session_set_then_show() {
	let temp = TempDir::new().unwrap();
	let session = temp.path().join("session.json");

	let set = pro(
		&session,
		&["session", "set", "--email", "a@example.com", "--plan", "1y-usd", "--locale", "en-US"],
	);
	assert!(set.status.success());

	let show = pro(&session, &["session", "show"]);
	assert!(show.status.success());
	let result = stdout_json(&show);
	assert_eq!(result["ok"], true);
	assert_eq!(result["data"]["email"], "a@example.com");
	assert_eq!(result["data"]["plan"], "1y-usd");
	assert_eq!(result["data"]["locale"], "en-US");
	assert_eq!(result["data"]["registered"], false);
	assert!(!result["data"]["deviceId"].as_str().unwrap().is_empty());
}

#[test]
fn session_clear_removes_file() {
	let temp = TempDir::new().unwrap();
	let session = temp.path().join("session.json");

	assert!(pro(&session, &["session", "set", "--email", "a@example.com"]).status.success());
	assert!(session.exists());

	let clear = pro(&session, &["session", "clear"]);
	assert!(clear.status.success());
	assert_eq!(stdout_json(&clear)["data"]["removed"], true);
	assert!(!session.exists());
}

#[test]
fn commands_lists_registry() {
	let temp = TempDir::new().unwrap();
	let output = pro(&temp.path().join("session.json"), &["commands"]);

	assert!(output.status.success());
	let result = stdout_json(&output);
	let commands = result["data"].as_array().unwrap();
	assert_eq!(commands.len(), 9);
	let names: Vec<&str> = commands.iter().map(|c| c["name"].as_str().unwrap()).collect();
	assert!(names.contains(&"create-user"));
	assert!(names.contains(&"fetch-user-data"));
	let plans = commands.iter().find(|c| c["name"] == "list-plans").unwrap();
	assert_eq!(plans["aliases"][0], "plans");
}
