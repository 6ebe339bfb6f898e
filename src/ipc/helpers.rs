use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request, TutorSession};
use crate::roster::Roster;

pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn required_i64(req: &Request, key: &str) -> Result<i64, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| {
            err(
                &req.id,
                "bad_params",
                format!("missing integer {}", key),
                None,
            )
        })
}

/// Optional class filter; absent or null means "all classes".
pub fn opt_class(req: &Request) -> Option<String> {
    req.params
        .get("class")
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
}

pub fn roster_ref<'a>(state: &'a AppState, req: &Request) -> Result<&'a Roster, serde_json::Value> {
    state
        .roster
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_dataset", "load a dataset first", None))
}

pub fn tutor_mut<'a>(
    state: &'a mut AppState,
    req: &Request,
) -> Result<&'a mut TutorSession, serde_json::Value> {
    state
        .tutor
        .as_mut()
        .ok_or_else(|| err(&req.id, "no_session", "solve an equation first", None))
}
