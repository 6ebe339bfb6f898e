use std::path::PathBuf;

use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_class, required_str, roster_ref};
use crate::ipc::types::{AppState, Request};
use crate::roster;

fn handle_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => PathBuf::from(v),
        Err(resp) => return resp,
    };

    match roster::load_csv_file(&path) {
        Ok(loaded) => {
            tracing::info!(rows = loaded.students.len(), "dataset loaded");
            let resp = ok(
                &req.id,
                json!({
                    "datasetId": loaded.dataset_id.to_string(),
                    "rowCount": loaded.students.len(),
                    "classes": loaded.classes(),
                }),
            );
            state.roster = Some(loaded);
            resp
        }
        Err(e) => err(&req.id, &e.code, e.message, e.details),
    }
}

fn handle_rows(state: &AppState, req: &Request) -> serde_json::Value {
    let roster = match roster_ref(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let class = opt_class(req);
    let rows = roster.filtered(class.as_deref());
    ok(
        &req.id,
        json!({
            "datasetId": roster.dataset_id.to_string(),
            "rowCount": rows.len(),
            "rows": rows,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dataset.load" => Some(handle_load(state, req)),
        "dataset.rows" => Some(handle_rows(state, req)),
        _ => None,
    }
}
