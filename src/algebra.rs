//! Exact arithmetic and LaTeX rendering for degree-<=2 integer polynomials.
//! Fixed-purpose: just enough symbolic support for the two equation
//! families the tutor teaches, not a general algebra system.

use num_bigint::BigInt;
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

pub type Rat = BigRational;

pub fn int(n: i64) -> BigInt {
    BigInt::from(n)
}

pub fn rat(n: i64) -> Rat {
    BigRational::from_integer(BigInt::from(n))
}

/// Exact integer square root test: `Some(r)` iff `n >= 0` and `r * r == n`.
pub fn perfect_square_root(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let r = n.sqrt();
    if (&r * &r) == *n {
        Some(r)
    } else {
        None
    }
}

/// Renders a reduced rational: bare integer when the denominator is 1,
/// otherwise a signed `\frac`.
pub fn latex_rat(r: &Rat) -> String {
    if r.is_integer() {
        r.numer().to_string()
    } else {
        let sign = if r.is_negative() { "-" } else { "" };
        format!("{}\\frac{{{}}}{{{}}}", sign, r.numer().abs(), r.denom())
    }
}

/// Integer wrapped in parentheses when negative, for substitution into
/// formulas like `b^{2} - 4 \cdot a \cdot c`.
pub fn latex_int_parens(n: &BigInt) -> String {
    if n.is_negative() {
        format!("({})", n)
    } else {
        n.to_string()
    }
}

fn latex_coeff(coeff: &Rat) -> String {
    if coeff.is_integer() {
        coeff.numer().to_string()
    } else {
        latex_rat(coeff)
    }
}

/// Renders a sum of `(coefficient, symbol)` terms without collecting or
/// reordering them, so intermediate pedagogical forms like
/// `2x + 5 - x` survive as written. Zero-coefficient terms are dropped;
/// an all-zero sum renders as `0`.
pub fn latex_terms(terms: &[(Rat, &str)]) -> String {
    let mut out = String::new();
    for (coeff, symbol) in terms {
        if coeff.is_zero() {
            continue;
        }
        let negative = coeff.is_negative();
        let magnitude = coeff.abs();

        if out.is_empty() {
            if negative {
                out.push('-');
            }
        } else if negative {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }

        if symbol.is_empty() {
            out.push_str(&latex_coeff(&magnitude));
        } else if magnitude.is_one() {
            out.push_str(symbol);
        } else {
            out.push_str(&latex_coeff(&magnitude));
            out.push_str(symbol);
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

/// `a x + b` with sign folding.
pub fn latex_linear(a: &Rat, b: &Rat) -> String {
    latex_terms(&[(a.clone(), "x"), (b.clone(), "")])
}

/// `a x^2 + b x + c` with sign folding.
pub fn latex_quadratic(a: &Rat, b: &Rat, c: &Rat) -> String {
    latex_terms(&[(a.clone(), "x^{2}"), (b.clone(), "x"), (c.clone(), "")])
}

/// `(x - r)` with the sign folded into the factor, so a negative root
/// renders as `(x + |r|)`.
pub fn latex_root_factor(root: &Rat) -> String {
    if root.is_zero() {
        "x".to_string()
    } else if root.is_negative() {
        format!("(x + {})", latex_rat(&root.abs()))
    } else {
        format!("(x - {})", latex_rat(root))
    }
}
