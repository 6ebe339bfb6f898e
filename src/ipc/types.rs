use serde::Deserialize;
use uuid::Uuid;

use crate::roster::Roster;
use crate::tutor::nav::StepSession;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorKind {
    Linear,
    Quadratic { a: i64, b: i64, c: i64 },
}

/// One tutor session: the generated narrative plus its cursor. Solving a
/// new equation replaces the whole session.
pub struct TutorSession {
    pub session_id: Uuid,
    pub kind: TutorKind,
    pub nav: StepSession,
}

pub struct AppState {
    pub roster: Option<Roster>,
    pub tutor: Option<TutorSession>,
}
