//! Text right-hand sides: lexing, parsing, compilation to numeric form and
//! reduction of second-order equations.

mod adapter;
mod compiler;
mod lexer;
mod parser;

pub use adapter::{
    FirstOrderProblem, SecondOrderProblem, Variables, evaluate_constant, first_order, isolate,
    second_order,
};
pub use compiler::{CompiledExpr, binary_function, compile, constant, unary_function};
pub use lexer::{Spanned, Token, tokenize};
pub use parser::{BinOp, Expr, Statement, parse, parse_expr};
