//! Turns equation text into numerically evaluable right-hand sides.
//!
//! First-order input yields `f(x, y)`. Second-order input is reduced to the
//! pair `(y, z)' = (z, f(x, y, z))` with `z` standing in for `y'`.

use std::fmt;

use log::debug;

use crate::{
    Float,
    core::ode::{ODE, ODESystem},
    error::{Error, Result},
};

use super::{
    compiler::{CompiledExpr, compile},
    parser::{BinOp, Expr, Statement, parse},
};

/// Names of the independent and dependent variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variables {
    pub independent: String,
    pub dependent: String,
}

impl Default for Variables {
    fn default() -> Self {
        Self {
            independent: "x".into(),
            dependent: "y".into(),
        }
    }
}

impl Variables {
    pub fn new(independent: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self {
            independent: independent.into(),
            dependent: dependent.into(),
        }
    }

    /// Prime notation for the `order`-th derivative, e.g. `y''`.
    pub fn derivative(&self, order: usize) -> String {
        format!("{}{}", self.dependent, "'".repeat(order))
    }
}

/// y' = f(x, y) compiled from text.
#[derive(Debug, Clone)]
pub struct FirstOrderProblem {
    rhs: Expr,
    compiled: CompiledExpr,
    lhs: String,
}

impl FirstOrderProblem {
    /// Isolated right-hand side.
    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }
}

impl ODE for FirstOrderProblem {
    fn ode(&self, x: Float, y: Float) -> Float {
        self.compiled.eval_slots(&[x, y])
    }
}

impl fmt::Display for FirstOrderProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// y'' = f(x, y, y') compiled from text, evaluated as a first-order pair.
#[derive(Debug, Clone)]
pub struct SecondOrderProblem {
    rhs: Expr,
    compiled: CompiledExpr,
    lhs: String,
}

impl SecondOrderProblem {
    /// Isolated right-hand side of the second derivative.
    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// f(x, y, z) alone, without the `z` component of the pair.
    pub fn acceleration(&self, x: Float, y: Float, z: Float) -> Float {
        self.compiled.eval_slots(&[x, y, z])
    }
}

impl ODESystem for SecondOrderProblem {
    fn ode(&self, x: Float, y: Float, z: Float) -> (Float, Float) {
        (z, self.compiled.eval_slots(&[x, y, z]))
    }
}

impl fmt::Display for SecondOrderProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// Build y' = f(x, y) from an expression or an equation in `y'`.
pub fn first_order(input: &str, vars: &Variables) -> Result<FirstOrderProblem> {
    let lhs = vars.derivative(1);
    let rhs = right_hand_side(input, &lhs)?;
    let compiled = compile(&rhs, &[&vars.independent, &vars.dependent])?;
    debug!("first-order right-hand side: {lhs} = {rhs}");
    Ok(FirstOrderProblem { rhs, compiled, lhs })
}

/// Build the first-order pair for y'' = f(x, y, y') from an expression or an
/// equation in `y''`.
pub fn second_order(input: &str, vars: &Variables) -> Result<SecondOrderProblem> {
    let lhs = vars.derivative(2);
    let rhs = right_hand_side(input, &lhs)?;
    let slope = vars.derivative(1);
    let compiled = compile(&rhs, &[&vars.independent, &vars.dependent, &slope])?;
    debug!("second-order right-hand side: {lhs} = {rhs}, reduced with z = {slope}");
    Ok(SecondOrderProblem { rhs, compiled, lhs })
}

fn right_hand_side(input: &str, derivative: &str) -> Result<Expr> {
    match parse(input)? {
        Statement::Expr(rhs) => Ok(rhs),
        Statement::Equation(lhs, rhs) => isolate(lhs, rhs, derivative),
    }
}

/// Solve `lhs = rhs` for the symbol `target`, which must appear linearly.
pub fn isolate(lhs: Expr, rhs: Expr, target: &str) -> Result<Expr> {
    if matches!(&lhs, Expr::Symbol(s) if s == target) && !rhs.contains_symbol(target) {
        return Ok(rhs);
    }
    if matches!(&rhs, Expr::Symbol(s) if s == target) && !lhs.contains_symbol(target) {
        return Ok(lhs);
    }

    // lhs - rhs = a*target + b
    let residual = Expr::sub(lhs, rhs);
    let (a, b) = split_affine(&residual, target)
        .ok_or_else(|| Error::Isolation(format!("{target} does not appear linearly in {residual} = 0")))?;
    if a.is_zero() {
        return Err(Error::Isolation(format!("equation does not contain {target}")));
    }
    Ok(Expr::div(Expr::neg(b), a))
}

/// Write `expr` as `a*target + b` with `a` and `b` free of `target`.
fn split_affine(expr: &Expr, target: &str) -> Option<(Expr, Expr)> {
    if !expr.contains_symbol(target) {
        return Some((Expr::Number(0.0), expr.clone()));
    }
    match expr {
        Expr::Symbol(_) => Some((Expr::Number(1.0), Expr::Number(0.0))),
        Expr::Neg(inner) => {
            let (a, b) = split_affine(inner, target)?;
            Some((Expr::neg(a), Expr::neg(b)))
        }
        Expr::Binary(l, op, r) => {
            let (la, lb) = split_affine(l, target)?;
            let (ra, rb) = split_affine(r, target)?;
            match op {
                BinOp::Add => Some((Expr::add(la, ra), Expr::add(lb, rb))),
                BinOp::Sub => Some((Expr::sub(la, ra), Expr::sub(lb, rb))),
                BinOp::Mul if la.is_zero() => Some((Expr::mul(lb.clone(), ra), Expr::mul(lb, rb))),
                BinOp::Mul if ra.is_zero() => Some((Expr::mul(la, rb.clone()), Expr::mul(lb, rb))),
                BinOp::Div if ra.is_zero() => Some((Expr::div(la, rb.clone()), Expr::div(lb, rb))),
                _ => None,
            }
        }
        Expr::Number(_) | Expr::Call(..) => None,
    }
}

/// Evaluate a closed expression such as `"pi/2"` or `"sqrt(2)"`.
pub fn evaluate_constant(input: &str) -> Result<Float> {
    let expr = super::parser::parse_expr(input)?;
    let compiled = compile(&expr, &[])?;
    match compiled.as_constant() {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(Error::Domain(format!("'{input}' does not evaluate to a finite number"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vars() -> Variables {
        Variables::default()
    }

    #[test]
    fn bare_expression_is_the_right_hand_side() {
        let p = first_order("-2*y", &vars()).unwrap();
        assert_eq!(p.ode(0.0, 3.0), -6.0);
        assert_eq!(p.to_string(), "y' = -2*y");
    }

    #[test]
    fn explicit_equation_uses_its_right_side() {
        let p = first_order("y' = x - y", &vars()).unwrap();
        assert_eq!(p.ode(2.0, 0.5), 1.5);

        let flipped = first_order("x*y = y'", &vars()).unwrap();
        assert_eq!(flipped.ode(2.0, 3.0), 6.0);
    }

    #[test]
    fn isolates_scaled_and_shifted_derivative() {
        // 2*y' + y = x  ->  y' = (x - y)/2
        let p = first_order("2*y' + y = x", &vars()).unwrap();
        assert_relative_eq!(p.ode(4.0, 1.0), 1.5);

        // y'/3 = sin(x)  ->  y' = 3*sin(x)
        let q = first_order("y'/3 = sin(x)", &vars()).unwrap();
        assert_relative_eq!(q.ode(0.5, 0.0), 3.0 * (0.5 as Float).sin(), epsilon = 1e-12);
    }

    #[test]
    fn second_order_equation_reduces_to_pair() {
        let p = second_order("y'' + y = 0", &vars()).unwrap();
        assert_eq!(p.ode(0.0, 1.0, 0.25), (0.25, -1.0));
        assert_eq!(p.to_string(), "y'' = -y");

        // damped oscillator with forcing
        let d = second_order("y'' + 0.5*y' + 4*y = cos(x)", &vars()).unwrap();
        let (dy, dz) = d.ode(0.0, 1.0, 2.0);
        assert_eq!(dy, 2.0);
        assert_relative_eq!(dz, 1.0 - 0.5 * 2.0 - 4.0 * 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.acceleration(0.0, 1.0, 2.0), dz);
    }

    #[test]
    fn nonlinear_or_missing_derivative_cannot_be_isolated() {
        assert!(matches!(first_order("y'^2 = y", &vars()), Err(Error::Isolation(_))));
        assert!(matches!(first_order("sin(y') = x", &vars()), Err(Error::Isolation(_))));
        assert!(matches!(first_order("y'*y' = 1", &vars()), Err(Error::Isolation(_))));
        assert!(matches!(first_order("y = x", &vars()), Err(Error::Isolation(_))));
        assert!(matches!(second_order("y' = -y", &vars()), Err(Error::Isolation(_))));
    }

    #[test]
    fn rejects_foreign_symbols() {
        assert_eq!(
            first_order("-k*y", &vars()).unwrap_err(),
            Error::UnresolvedSymbol("k".into())
        );
        // y' only resolves once it is the auxiliary state of a second-order problem
        assert_eq!(
            first_order("y'", &vars()).unwrap_err(),
            Error::UnresolvedSymbol("y'".into())
        );
        assert_eq!(
            second_order("y''' - y", &vars()).unwrap_err(),
            Error::UnresolvedSymbol("y'''".into())
        );
        assert!(second_order("-y'", &vars()).is_ok());
    }

    #[test]
    fn custom_variable_names() {
        let vars = Variables::new("t", "u");
        let p = second_order("u'' = -t*u'", &vars).unwrap();
        assert_eq!(p.ode(2.0, 0.0, 3.0), (3.0, -6.0));
        assert_eq!(second_order("-y", &vars).unwrap_err(), Error::UnresolvedSymbol("y".into()));
    }

    #[test]
    fn problems_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FirstOrderProblem>();
        assert_send_sync::<SecondOrderProblem>();
    }

    #[test]
    fn constants_evaluate_to_numbers() {
        assert_relative_eq!(evaluate_constant("pi/2").unwrap(), std::f64::consts::FRAC_PI_2 as Float);
        assert_relative_eq!(evaluate_constant("-sqrt(4) + e^0").unwrap(), -1.0);
        assert_eq!(evaluate_constant("x").unwrap_err(), Error::UnresolvedSymbol("x".into()));
        assert!(matches!(evaluate_constant("1/0"), Err(Error::Domain(_))));
        assert!(matches!(evaluate_constant("@@@invalid@@@"), Err(Error::Parse { .. })));
    }
}
