use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_class, roster_ref};
use crate::ipc::types::{AppState, Request};
use crate::roster::Probe;
use crate::stats;

fn handle_class_summary(state: &AppState, req: &Request) -> serde_json::Value {
    let roster = match roster_ref(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let class = opt_class(req);
    let filtered = roster.filtered(class.as_deref());
    let rows = stats::class_summaries(&filtered);
    ok(
        &req.id,
        json!({
            "datasetId": roster.dataset_id.to_string(),
            "rows": rows,
        }),
    )
}

fn handle_chart_series(state: &AppState, req: &Request) -> serde_json::Value {
    let roster = match roster_ref(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let probe = match req.params.get("probe").and_then(|v| v.as_str()) {
        None => None,
        Some(raw) => match Probe::parse(raw) {
            Some(p) => Some(p),
            None => {
                return err(
                    &req.id,
                    "bad_params",
                    "probe must be one of: Ea, Ec, Ed",
                    Some(json!({ "probe": raw })),
                )
            }
        },
    };

    let class = opt_class(req);
    let filtered = roster.filtered(class.as_deref());
    let series = stats::chart_series(&filtered, probe);
    ok(
        &req.id,
        json!({
            "datasetId": roster.dataset_id.to_string(),
            "series": series,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "stats.classSummary" => Some(handle_class_summary(state, req)),
        "stats.chartSeries" => Some(handle_chart_series(state, req)),
        _ => None,
    }
}
