//! Step generator for `a·x² + b·x + c = 0`.
//!
//! After stating (and, for `a != 1`, normalizing) the equation, the
//! narrative computes the discriminant, shows the general formula, then
//! branches on an explicit case: discriminant sign plus a perfect-square
//! flag. `a = 0` degenerates to the linear generator.

use num_bigint::BigInt;
use num_traits::{One, Signed};

use crate::algebra::{
    int, latex_int_parens, latex_quadratic, latex_rat, latex_root_factor, perfect_square_root,
    rat, Rat,
};
use crate::tutor::linear::{self, LinearOutcome};
use crate::tutor::Step;

#[derive(Debug, Clone, PartialEq)]
pub enum QuadOutcome {
    /// `a = 0`: the equation collapsed to `b·x = -c`.
    ReducedToLinear(LinearOutcome),
    /// Positive perfect-square discriminant: two rational roots.
    RationalPair { r1: Rat, r2: Rat },
    /// Positive non-square discriminant: two irrational real roots,
    /// left in closed radical form.
    IrrationalPair,
    /// Zero discriminant: one repeated root.
    Repeated { root: Rat },
    /// Negative discriminant: complex conjugate pair in closed form.
    ComplexPair,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuadSolution {
    pub steps: Vec<Step>,
    /// `None` only in the degenerate linear case.
    pub discriminant: Option<BigInt>,
    pub outcome: QuadOutcome,
}

/// Total over all integer inputs; every branch is exhaustive.
pub fn solve(a: i64, b: i64, c: i64) -> QuadSolution {
    if a == 0 {
        return solve_degenerate(b, c);
    }

    let (ar, br, cr) = (rat(a), rat(b), rat(c));
    let mut steps: Vec<Step> = Vec::new();

    steps.push(Step::new(
        "Equation",
        format!("{} = 0", latex_quadratic(&ar, &br, &cr)),
    ));

    if a != 1 {
        steps.push(Step::new(
            format!("Divide the equation by {}", a),
            format!(
                "{} = 0",
                latex_quadratic(&rat(1), &(&br / &ar), &(&cr / &ar))
            ),
        ));
    }

    let (ai, bi, ci) = (int(a), int(b), int(c));
    let delta: BigInt = &bi * &bi - int(4) * &ai * &ci;
    steps.push(Step::new(
        "Discriminant",
        format!(
            "\\Delta = b^{{2}} - 4ac = {}^{{2}} - 4 \\cdot {} \\cdot {} = {}",
            latex_int_parens(&bi),
            latex_int_parens(&ai),
            latex_int_parens(&ci),
            delta
        ),
    ));

    let minus_b = -&bi;
    let two_a = int(2) * &ai;
    steps.push(Step::new(
        "Quadratic formula",
        format!(
            "x_{{1,2}} = \\frac{{-b \\pm \\sqrt{{\\Delta}}}}{{2a}} = \\frac{{{} \\pm \\sqrt{{{}}}}}{{{}}}",
            minus_b, delta, two_a
        ),
    ));

    let outcome = if delta.is_positive() {
        match perfect_square_root(&delta) {
            Some(s) => {
                let r1 = Rat::new(&minus_b - &s, two_a.clone());
                let r2 = Rat::new(&minus_b + &s, two_a.clone());
                steps.push(Step::new(
                    "Two rational roots",
                    format!(
                        "\\sqrt{{\\Delta}} = {} \\quad \\Rightarrow \\quad x_{{1}} = {},\\; x_{{2}} = {}",
                        s,
                        latex_rat(&r1),
                        latex_rat(&r2)
                    ),
                ));
                let lead = if ar.is_one() {
                    String::new()
                } else {
                    latex_rat(&ar)
                };
                steps.push(Step::new(
                    "Factorization",
                    format!(
                        "{} = {}{}{}",
                        latex_quadratic(&ar, &br, &cr),
                        lead,
                        latex_root_factor(&r1),
                        latex_root_factor(&r2)
                    ),
                ));
                QuadOutcome::RationalPair { r1, r2 }
            }
            None => {
                steps.push(Step::new(
                    "Two irrational roots",
                    format!(
                        "x_{{1}} = \\frac{{{} - \\sqrt{{{}}}}}{{{}}},\\quad x_{{2}} = \\frac{{{} + \\sqrt{{{}}}}}{{{}}}",
                        minus_b, delta, two_a, minus_b, delta, two_a
                    ),
                ));
                QuadOutcome::IrrationalPair
            }
        }
    } else if delta.is_negative() {
        let neg = -&delta;
        steps.push(Step::new(
            "Two complex conjugate roots",
            format!(
                "x_{{1}} = \\frac{{{} - i\\sqrt{{{}}}}}{{{}}},\\quad x_{{2}} = \\frac{{{} + i\\sqrt{{{}}}}}{{{}}}",
                minus_b, neg, two_a, minus_b, neg, two_a
            ),
        ));
        QuadOutcome::ComplexPair
    } else {
        let root = Rat::new(minus_b.clone(), two_a.clone());
        steps.push(Step::new(
            "Repeated root",
            format!("\\Delta = 0 \\quad \\Rightarrow \\quad x_{{1}} = x_{{2}} = {}", latex_rat(&root)),
        ));
        let lead = if ar.is_one() {
            String::new()
        } else {
            latex_rat(&ar)
        };
        steps.push(Step::new(
            "Perfect square form",
            format!(
                "{} = {}{}^{{2}}",
                latex_quadratic(&ar, &br, &cr),
                lead,
                latex_root_factor(&root)
            ),
        ));
        QuadOutcome::Repeated { root }
    };

    QuadSolution {
        steps,
        discriminant: Some(delta),
        outcome,
    }
}

/// `a = 0`: note the reduction, then splice the linear narrative for
/// `b·x = -c` minus its own "state the equation" step.
fn solve_degenerate(b: i64, c: i64) -> QuadSolution {
    let mut steps = vec![Step::new(
        "Degenerate equation",
        format!(
            "a = 0 \\quad \\Rightarrow \\quad {} = 0",
            crate::algebra::latex_linear(&rat(b), &rat(c))
        ),
    )];

    let linear = linear::generate(b, 0, 0, -c);
    steps.extend(linear.steps);

    QuadSolution {
        steps,
        discriminant: None,
        outcome: QuadOutcome::ReducedToLinear(linear.outcome),
    }
}
