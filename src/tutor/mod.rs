pub mod linear;
pub mod nav;
pub mod plot;
pub mod quadratic;

use serde::Serialize;

/// One entry of the solving narrative: a plain-text title plus the
/// LaTeX-rendered explanation. Sequences are deterministic per
/// coefficient tuple and their order carries the pedagogy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub title: String,
    pub latex: String,
}

impl Step {
    pub fn new(title: impl Into<String>, latex: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            latex: latex.into(),
        }
    }
}
