//! Step generator for `a·x + b = c·x + d`.
//!
//! The narrative is fixed: state, expand, move the x term left, move the
//! constant right, simplify, then branch on the collected coefficient and
//! constant. The branch is decided on exact rationals carried from the
//! input, never by inspecting rendered expressions.

use num_traits::Zero;

use crate::algebra::{latex_rat, latex_terms, rat, Rat};
use crate::tutor::Step;

#[derive(Debug, Clone, PartialEq)]
pub enum LinearOutcome {
    /// Unique solution `x = konst / coeff`, already in lowest terms.
    Unique { solution: Rat },
    /// `0 = 0` after collection: every x satisfies the equation.
    Infinite,
    /// `0 = q` with `q != 0`: no x satisfies the equation.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearSolution {
    pub steps: Vec<Step>,
    pub outcome: LinearOutcome,
}

/// Total over all integer inputs; division only happens after the
/// coefficient is confirmed nonzero.
pub fn solve(a: i64, b: i64, c: i64, d: i64) -> LinearSolution {
    let solution = generate(a, b, c, d);
    let mut steps = Vec::with_capacity(solution.steps.len() + 1);
    let (ar, br, cr, dr) = (rat(a), rat(b), rat(c), rat(d));
    steps.push(Step::new(
        "Equation",
        format!(
            "{} = {}",
            latex_terms(&[(ar, "x"), (br, "")]),
            latex_terms(&[(cr, "x"), (dr, "")])
        ),
    ));
    steps.extend(solution.steps);
    LinearSolution {
        steps,
        outcome: solution.outcome,
    }
}

/// The narrative minus the leading "state the equation" step, so the
/// quadratic generator can splice these after its own reduction step
/// without restating the problem.
pub fn generate(a: i64, b: i64, c: i64, d: i64) -> LinearSolution {
    let (ar, br, cr, dr) = (rat(a), rat(b), rat(c), rat(d));
    let mut steps: Vec<Step> = Vec::new();

    // Both sides are already expanded; the stage is kept as an explicit
    // part of the narrative.
    steps.push(Step::new(
        "Expand both sides",
        format!(
            "{} = {}",
            latex_terms(&[(ar.clone(), "x"), (br.clone(), "")]),
            latex_terms(&[(cr.clone(), "x"), (dr.clone(), "")])
        ),
    ));

    steps.push(Step::new(
        format!("Subtract {}x from both sides", c),
        format!(
            "{} = {}",
            latex_terms(&[(ar.clone(), "x"), (br.clone(), ""), (-cr.clone(), "x")]),
            latex_terms(&[(dr.clone(), "")])
        ),
    ));

    steps.push(Step::new(
        format!("Subtract {} from both sides", b),
        format!(
            "{} = {}",
            latex_terms(&[(ar.clone(), "x"), (-cr.clone(), "x")]),
            latex_terms(&[(dr.clone(), ""), (-br.clone(), "")])
        ),
    ));

    let coeff = &ar - &cr;
    let konst = &dr - &br;

    steps.push(Step::new(
        "Simplify both sides",
        format!(
            "{} = {}",
            latex_terms(&[(coeff.clone(), "x")]),
            latex_rat(&konst)
        ),
    ));

    if coeff.is_zero() {
        if konst.is_zero() {
            steps.push(Step::new(
                "Infinitely many solutions",
                "0 = 0 \\quad \\Rightarrow \\quad x \\in \\mathbb{R}".to_string(),
            ));
            return LinearSolution {
                steps,
                outcome: LinearOutcome::Infinite,
            };
        }
        steps.push(Step::new(
            "No solution",
            format!("0 = {} \\quad \\Rightarrow \\quad x \\in \\emptyset", latex_rat(&konst)),
        ));
        return LinearSolution {
            steps,
            outcome: LinearOutcome::Empty,
        };
    }

    steps.push(Step::new(
        format!("Divide both sides by {}", latex_rat(&coeff)),
        format!("x = \\frac{{{}}}{{{}}}", latex_rat(&konst), latex_rat(&coeff)),
    ));

    let solution = &konst / &coeff;
    steps.push(Step::new(
        "Solution",
        format!("x = {}", latex_rat(&solution)),
    ));

    LinearSolution {
        steps,
        outcome: LinearOutcome::Unique { solution },
    }
}
