use std::path::PathBuf;

use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_class, required_str, roster_ref};
use crate::ipc::types::{AppState, Request};
use crate::{report, stats};

/// The raw sheet always carries the full roster; the summary sheet follows
/// the active class filter, matching what the user sees on screen.
fn handle_export(state: &AppState, req: &Request) -> serde_json::Value {
    let roster = match roster_ref(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let out_path = match required_str(req, "outPath") {
        Ok(v) => PathBuf::from(v),
        Err(resp) => return resp,
    };

    let class = opt_class(req);
    let filtered = roster.filtered(class.as_deref());
    let summaries = stats::class_summaries(&filtered);

    match report::export_report(roster, &summaries, &out_path) {
        Ok(summary) => ok(
            &req.id,
            json!({
                "outPath": out_path.to_string_lossy(),
                "sheets": summary.sheets,
                "bytes": summary.bytes,
            }),
        ),
        Err(e) => err(&req.id, "export_failed", format!("{e:?}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "report.export" => Some(handle_export(state, req)),
        _ => None,
    }
}
