//! Symbolic-to-numeric translation.
//!
//! An [`Expr`] is lowered once into an evaluation tree over numbered variable
//! slots. Function names resolve through the fixed tables below to plain
//! function pointers, so evaluation never looks at names again.

use crate::{
    Float,
    error::{Error, Result},
};

use super::parser::{BinOp, Expr};

type UnaryFn = fn(Float) -> Float;
type BinaryFn = fn(Float, Float) -> Float;

static UNARY_FUNCTIONS: &[(&str, UnaryFn)] = &[
    ("sin", Float::sin),
    ("cos", Float::cos),
    ("tan", Float::tan),
    ("asin", Float::asin),
    ("acos", Float::acos),
    ("atan", Float::atan),
    ("sinh", Float::sinh),
    ("cosh", Float::cosh),
    ("tanh", Float::tanh),
    ("exp", Float::exp),
    ("log", Float::ln),
    ("ln", Float::ln),
    ("sqrt", Float::sqrt),
    ("abs", Float::abs),
];

static BINARY_FUNCTIONS: &[(&str, BinaryFn)] = &[
    ("atan2", Float::atan2),
    ("pow", Float::powf),
    ("min", Float::min),
    ("max", Float::max),
];

static CONSTANTS: &[(&str, Float)] = &[
    ("pi", std::f64::consts::PI as Float),
    ("e", std::f64::consts::E as Float),
];

pub fn unary_function(name: &str) -> Option<UnaryFn> {
    UNARY_FUNCTIONS.iter().find(|(n, _)| *n == name).map(|&(_, f)| f)
}

pub fn binary_function(name: &str) -> Option<BinaryFn> {
    BINARY_FUNCTIONS.iter().find(|(n, _)| *n == name).map(|&(_, f)| f)
}

pub fn constant(name: &str) -> Option<Float> {
    CONSTANTS.iter().find(|(n, _)| *n == name).map(|&(_, c)| c)
}

#[derive(Debug, Clone)]
enum Node {
    Const(Float),
    Var(usize),
    Neg(Box<Node>),
    Binary(Box<Node>, BinOp, Box<Node>),
    Unary(UnaryFn, Box<Node>),
    Call2(BinaryFn, Box<Node>, Box<Node>),
}

impl Node {
    fn eval(&self, vars: &[Float]) -> Float {
        match self {
            Node::Const(c) => *c,
            Node::Var(i) => vars[*i],
            Node::Neg(a) => -a.eval(vars),
            Node::Binary(a, op, b) => apply(*op, a.eval(vars), b.eval(vars)),
            Node::Unary(f, a) => f(a.eval(vars)),
            Node::Call2(f, a, b) => f(a.eval(vars), b.eval(vars)),
        }
    }

    fn as_const(&self) -> Option<Float> {
        match self {
            Node::Const(c) => Some(*c),
            _ => None,
        }
    }
}

fn apply(op: BinOp, a: Float, b: Float) -> Float {
    match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => a / b,
        BinOp::Pow => a.powf(b),
    }
}

/// A numerically evaluable expression over an ordered list of variables.
#[derive(Debug, Clone)]
pub struct CompiledExpr {
    root: Node,
    variables: Vec<String>,
}

impl CompiledExpr {
    /// Evaluate with `vars` given in the order passed to [`compile`].
    ///
    /// Returns `None` if `vars` is shorter than the variable list.
    pub fn eval(&self, vars: &[Float]) -> Option<Float> {
        (vars.len() >= self.variables.len()).then(|| self.root.eval(vars))
    }

    /// Evaluate without checking the slot count. Callers pass one value per
    /// variable of a fixed variable order.
    pub(crate) fn eval_slots(&self, vars: &[Float]) -> Float {
        self.root.eval(vars)
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variables
    }

    /// The value if the expression does not depend on any variable.
    pub fn as_constant(&self) -> Option<Float> {
        self.root.as_const()
    }
}

/// Lower `expr` to a [`CompiledExpr`] whose variable slots follow `var_order`.
///
/// Names in `var_order` shadow the built-in constants. Any other symbol, or
/// an unknown function, fails with [`Error::UnresolvedSymbol`].
pub fn compile(expr: &Expr, var_order: &[&str]) -> Result<CompiledExpr> {
    Ok(CompiledExpr {
        root: lower(expr, var_order)?,
        variables: var_order.iter().map(|v| v.to_string()).collect(),
    })
}

fn lower(expr: &Expr, vars: &[&str]) -> Result<Node> {
    let node = match expr {
        Expr::Number(x) => Node::Const(*x),
        Expr::Symbol(name) => match vars.iter().position(|v| v == name) {
            Some(slot) => Node::Var(slot),
            None => Node::Const(constant(name).ok_or_else(|| Error::UnresolvedSymbol(name.clone()))?),
        },
        Expr::Neg(inner) => match lower(inner, vars)? {
            Node::Const(c) => Node::Const(-c),
            inner => Node::Neg(Box::new(inner)),
        },
        Expr::Binary(l, op, r) => {
            let (a, b) = (lower(l, vars)?, lower(r, vars)?);
            match (a.as_const(), b.as_const()) {
                (Some(x), Some(y)) => Node::Const(apply(*op, x, y)),
                _ => Node::Binary(Box::new(a), *op, Box::new(b)),
            }
        }
        Expr::Call(name, args) => lower_call(name, args, vars)?,
    };
    Ok(node)
}

fn lower_call(name: &str, args: &[Expr], vars: &[&str]) -> Result<Node> {
    let mut lowered = args.iter().map(|a| lower(a, vars)).collect::<Result<Vec<_>>>()?;
    let node = match (lowered.len(), unary_function(name), binary_function(name)) {
        (1, Some(f), _) => {
            let a = lowered.remove(0);
            match a.as_const() {
                Some(c) => Node::Const(f(c)),
                None => Node::Unary(f, Box::new(a)),
            }
        }
        (2, _, Some(f)) => {
            let b = lowered.remove(1);
            let a = lowered.remove(0);
            match (a.as_const(), b.as_const()) {
                (Some(x), Some(y)) => Node::Const(f(x, y)),
                _ => Node::Call2(f, Box::new(a), Box::new(b)),
            }
        }
        (n, Some(_), _) | (n, _, Some(_)) => {
            return Err(Error::UnresolvedSymbol(format!(
                "{name} (called with {n} argument{})",
                if n == 1 { "" } else { "s" }
            )));
        }
        _ => return Err(Error::UnresolvedSymbol(name.to_string())),
    };
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parser::parse_expr;
    use approx::assert_relative_eq;

    fn compiled(input: &str, vars: &[&str]) -> CompiledExpr {
        compile(&parse_expr(input).unwrap(), vars).unwrap()
    }

    #[test]
    fn evaluates_with_variable_order() {
        let f = compiled("y - x", &["x", "y"]);
        assert_eq!(f.variable_names(), &["x".to_string(), "y".to_string()]);
        assert_eq!(f.eval(&[1.0, 5.0]), Some(4.0));
        assert_eq!(f.eval(&[1.0]), None);
    }

    #[test]
    fn elementary_functions_map_to_float_methods() {
        let f = compiled("sin(x) + cos(x) + tan(x) + exp(x) + log(x) + sqrt(x)", &["x"]);
        let x: Float = 0.7;
        let expected = x.sin() + x.cos() + x.tan() + x.exp() + x.ln() + x.sqrt();
        assert_relative_eq!(f.eval(&[x]).unwrap(), expected, epsilon = 1e-12);

        let g = compiled("atan2(y, x) + max(x, y)^2", &["x", "y"]);
        assert_relative_eq!(g.eval(&[1.0, 1.0]).unwrap(), std::f64::consts::FRAC_PI_4 as Float + 1.0);
    }

    #[test]
    fn constants_fold_and_variables_shadow_them() {
        let c = compiled("2*pi + e^0", &[]);
        assert_relative_eq!(c.as_constant().unwrap(), 2.0 * std::f64::consts::PI as Float + 1.0);

        let shadowed = compiled("e + 1", &["x", "e"]);
        assert!(shadowed.as_constant().is_none());
        assert_eq!(shadowed.eval(&[0.0, 41.0]), Some(42.0));
    }

    #[test]
    fn unknown_names_are_unresolved() {
        let expr = parse_expr("k*y").unwrap();
        assert_eq!(
            compile(&expr, &["x", "y"]).unwrap_err(),
            Error::UnresolvedSymbol("k".into())
        );

        let expr = parse_expr("gamma(x)").unwrap();
        assert_eq!(
            compile(&expr, &["x"]).unwrap_err(),
            Error::UnresolvedSymbol("gamma".into())
        );

        let expr = parse_expr("sin(x, y)").unwrap();
        assert!(matches!(compile(&expr, &["x", "y"]), Err(Error::UnresolvedSymbol(_))));
    }

    #[test]
    fn domain_errors_evaluate_to_nan_instead_of_failing() {
        let f = compiled("sqrt(y)", &["y"]);
        assert!(f.eval(&[-1.0]).is_some_and(Float::is_nan));
    }
}
