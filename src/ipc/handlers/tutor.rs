use serde_json::json;
use uuid::Uuid;

use crate::algebra::latex_rat;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_i64, tutor_mut};
use crate::ipc::types::{AppState, Request, TutorKind, TutorSession};
use crate::tutor::linear::{self, LinearOutcome};
use crate::tutor::nav::StepSession;
use crate::tutor::plot;
use crate::tutor::quadratic::{self, QuadOutcome};

fn linear_outcome_json(outcome: &LinearOutcome) -> serde_json::Value {
    match outcome {
        LinearOutcome::Unique { solution } => json!({
            "kind": "unique",
            "solutionLatex": latex_rat(solution),
        }),
        LinearOutcome::Infinite => json!({ "kind": "infinite" }),
        LinearOutcome::Empty => json!({ "kind": "empty" }),
    }
}

fn quad_outcome_json(outcome: &QuadOutcome) -> serde_json::Value {
    match outcome {
        QuadOutcome::ReducedToLinear(inner) => json!({
            "kind": "reducedToLinear",
            "linear": linear_outcome_json(inner),
        }),
        QuadOutcome::RationalPair { r1, r2 } => json!({
            "kind": "rationalPair",
            "rootsLatex": [latex_rat(r1), latex_rat(r2)],
        }),
        QuadOutcome::IrrationalPair => json!({ "kind": "irrationalPair" }),
        QuadOutcome::Repeated { root } => json!({
            "kind": "repeated",
            "rootLatex": latex_rat(root),
        }),
        QuadOutcome::ComplexPair => json!({ "kind": "complexPair" }),
    }
}

fn session_json(session: &TutorSession, extra: serde_json::Value) -> serde_json::Value {
    let mut result = json!({
        "sessionId": session.session_id.to_string(),
        "stepCount": session.nav.len(),
        "cursor": session.nav.cursor(),
        "steps": session.nav.steps(),
        "current": session.nav.current(),
    });
    if let Some(obj) = extra.as_object() {
        for (k, v) in obj {
            result[k.as_str()] = v.clone();
        }
    }
    result
}

fn handle_linear_solve(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (a, b, c, d) = match (
        required_i64(req, "a"),
        required_i64(req, "b"),
        required_i64(req, "c"),
        required_i64(req, "d"),
    ) {
        (Ok(a), Ok(b), Ok(c), Ok(d)) => (a, b, c, d),
        (Err(e), _, _, _) | (_, Err(e), _, _) | (_, _, Err(e), _) | (_, _, _, Err(e)) => return e,
    };

    let solution = linear::solve(a, b, c, d);
    let session = TutorSession {
        session_id: Uuid::new_v4(),
        kind: TutorKind::Linear,
        nav: StepSession::new(solution.steps),
    };
    let resp = ok(
        &req.id,
        session_json(
            &session,
            json!({
                "kind": "linear",
                "outcome": linear_outcome_json(&solution.outcome),
            }),
        ),
    );
    // Replaces any previous session; the old narrative is discarded.
    state.tutor = Some(session);
    resp
}

fn handle_quadratic_solve(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (a, b, c) = match (
        required_i64(req, "a"),
        required_i64(req, "b"),
        required_i64(req, "c"),
    ) {
        (Ok(a), Ok(b), Ok(c)) => (a, b, c),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return e,
    };

    let solution = quadratic::solve(a, b, c);
    let session = TutorSession {
        session_id: Uuid::new_v4(),
        kind: TutorKind::Quadratic { a, b, c },
        nav: StepSession::new(solution.steps),
    };
    let resp = ok(
        &req.id,
        session_json(
            &session,
            json!({
                "kind": "quadratic",
                "discriminant": solution.discriminant.as_ref().map(|d| d.to_string()),
                "outcome": quad_outcome_json(&solution.outcome),
            }),
        ),
    );
    state.tutor = Some(session);
    resp
}

fn handle_step(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match tutor_mut(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let cursor = match req.method.as_str() {
        "tutor.step.next" => session.nav.advance(),
        "tutor.step.prev" => session.nav.retreat(),
        _ => {
            let index = match required_i64(req, "index") {
                Ok(v) => v,
                Err(resp) => return resp,
            };
            session.nav.jump(index)
        }
    };

    ok(
        &req.id,
        json!({
            "sessionId": session.session_id.to_string(),
            "cursor": cursor,
            "stepCount": session.nav.len(),
            "step": session.nav.current(),
        }),
    )
}

fn handle_plot(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match tutor_mut(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match session.kind {
        TutorKind::Quadratic { a, b, c } => {
            let curve = plot::sample_quadratic(a, b, c);
            ok(
                &req.id,
                json!({
                    "sessionId": session.session_id.to_string(),
                    "curve": curve,
                }),
            )
        }
        TutorKind::Linear => err(
            &req.id,
            "no_plot",
            "linear sessions have no function plot",
            None,
        ),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "tutor.linear.solve" => Some(handle_linear_solve(state, req)),
        "tutor.quadratic.solve" => Some(handle_quadratic_solve(state, req)),
        "tutor.step.next" | "tutor.step.prev" | "tutor.step.jump" => Some(handle_step(state, req)),
        "tutor.plot" => Some(handle_plot(state, req)),
        _ => None,
    }
}
