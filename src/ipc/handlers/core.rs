use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};

fn handle_ping(req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "pong": true }))
}

fn handle_version(state: &AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "datasetId": state.roster.as_ref().map(|r| r.dataset_id.to_string()),
            "tutorSessionId": state.tutor.as_ref().map(|t| t.session_id.to_string()),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "core.ping" => Some(handle_ping(req)),
        "core.version" => Some(handle_version(state, req)),
        _ => None,
    }
}
