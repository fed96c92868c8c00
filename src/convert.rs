//! Conversion from parsed operator trees into the internal expression type.
//!
//! The formula text is parsed by the evalexpr crate; this module converts
//! the resulting AST nodes into our own [`Expr`] representation, mapping
//! the bound variable, the named constants, and the whitelisted functions.
//! Every operator or identifier outside the allowed grammar is rejected
//! with a [`ConvertError`]; the conversion is the gate that makes the
//! evaluator's symbol set closed.
//!
//! The main entry point is the `build_ast` function which recursively
//! traverses the evalexpr AST and builds up our expression tree.

use std::f64::consts::{E, PI};

use crate::{errors::ConvertError, expr::Expr};
use evalexpr::{Node, Operator};

/// Converts an evalexpr AST node into our internal expression representation.
///
/// Allowed constructs:
/// * Basic arithmetic: `+`, `-`, `*`, `/`, unary minus
/// * Exponentiation `^` with any exponent (integer constants evaluate
///   through `powi`, everything else through `powf`)
/// * The bound variable `x`; the constants `pi` and `e`, folded to their
///   values here
/// * The unary functions `sin`, `cos`, `tan`, `exp`, `log`, `sqrt`
///
/// # Errors
/// Returns [`ConvertError`] for any identifier, function, literal kind, or
/// operator outside that set, including assignments, statement chains, and
/// tuples.
pub fn build_ast(node: &Node) -> Result<Expr, ConvertError> {
    match node.operator() {
        // Addition - evalexpr flattens chains, so fold children into binary Adds
        Operator::Add => {
            let children = node.children();
            children
                .iter()
                .skip(1)
                .try_fold(build_ast(&children[0])?, |acc, child| {
                    Ok(Expr::Add(Box::new(acc), Box::new(build_ast(child)?)))
                })
        }
        // Multiplication - same flattened-chain handling as addition
        Operator::Mul => {
            let children = node.children();
            children.iter().skip(1).try_fold(
                build_ast(&children[0])?,
                |acc, child| -> Result<Expr, ConvertError> {
                    Ok(Expr::Mul(Box::new(acc), Box::new(build_ast(child)?)))
                },
            )
        }
        Operator::Sub => {
            let children = node.children();
            Ok(Expr::Sub(
                Box::new(build_ast(&children[0])?),
                Box::new(build_ast(&children[1])?),
            ))
        }
        Operator::Div => {
            let children = node.children();
            Ok(Expr::Div(
                Box::new(build_ast(&children[0])?),
                Box::new(build_ast(&children[1])?),
            ))
        }
        Operator::Neg => {
            let children = node.children();
            Ok(Expr::Neg(Box::new(build_ast(&children[0])?)))
        }
        // Literals - only numeric constants are meaningful in a formula
        Operator::Const { value } => match value {
            evalexpr::Value::Float(f) => Ok(Expr::Const(*f)),
            evalexpr::Value::Int(i) => Ok(Expr::Const(*i as f64)),
            _ => Err(ConvertError::NonNumericConstant(format!("{:?}", value))),
        },
        // Identifiers - the bound variable and the two named constants
        Operator::VariableIdentifierRead { identifier } => match identifier.as_str() {
            "x" => Ok(Expr::Var),
            "pi" => Ok(Expr::Const(PI)),
            "e" => Ok(Expr::Const(E)),
            _ => Err(ConvertError::UnknownSymbol(identifier.to_string())),
        },
        // Function calls - whitelisted unary functions only
        Operator::FunctionIdentifier { identifier } => {
            let children = node.children();
            if children.len() != 1 {
                return Err(ConvertError::MalformedCall(identifier.to_string()));
            }
            let arg = Box::new(build_ast(&children[0])?);
            match identifier.as_str() {
                "sin" => Ok(Expr::Sin(arg)),
                "cos" => Ok(Expr::Cos(arg)),
                "tan" => Ok(Expr::Tan(arg)),
                "exp" => Ok(Expr::Exp(arg)),
                "log" => Ok(Expr::Ln(arg)),
                "sqrt" => Ok(Expr::Sqrt(arg)),
                _ => Err(ConvertError::UnsupportedFunction(identifier.to_string())),
            }
        }
        // Root node - a formula is exactly one expression, never a chain
        Operator::RootNode => {
            let children = node.children();
            if children.len() == 1 {
                build_ast(&children[0])
            } else {
                Err(ConvertError::NotAnExpression)
            }
        }
        // Exponentiation - integer constants stay exact via powi
        Operator::Exp => {
            let children = node.children();
            let (base, exponent) = match children {
                [base, exponent] => (base, exponent),
                _ => {
                    return Err(ConvertError::UnsupportedOperator(format!(
                        "{:?}",
                        node.operator()
                    )))
                }
            };
            if let Operator::Const { value } = exponent.operator() {
                match value {
                    evalexpr::Value::Int(exp) => {
                        return Ok(Expr::Pow(Box::new(build_ast(base)?), *exp))
                    }
                    evalexpr::Value::Float(exp) => {
                        return Ok(Expr::PowFloat(Box::new(build_ast(base)?), *exp))
                    }
                    _ => {}
                }
            }
            Ok(Expr::PowExpr(
                Box::new(build_ast(base)?),
                Box::new(build_ast(exponent)?),
            ))
        }
        // Everything else (assignment, comparison, logic, tuples, ...) is
        // outside the formula grammar
        _ => Err(ConvertError::UnsupportedOperator(format!(
            "{:?}",
            node.operator()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalexpr::build_operator_tree;

    fn convert(formula: &str) -> Result<Expr, ConvertError> {
        let node = build_operator_tree(formula).unwrap();
        build_ast(&node)
    }

    #[test]
    fn test_integer_exponent_stays_exact() {
        assert_eq!(convert("x^2").unwrap(), Expr::Pow(Box::new(Expr::Var), 2));
    }

    #[test]
    fn test_float_exponent() {
        assert_eq!(
            convert("x^0.5").unwrap(),
            Expr::PowFloat(Box::new(Expr::Var), 0.5)
        );
    }

    #[test]
    fn test_expression_exponent() {
        assert_eq!(
            convert("2^x").unwrap(),
            Expr::PowExpr(Box::new(Expr::Const(2.0)), Box::new(Expr::Var))
        );
    }

    #[test]
    fn test_named_constants_fold() {
        assert_eq!(convert("pi").unwrap(), Expr::Const(std::f64::consts::PI));
        assert_eq!(convert("e").unwrap(), Expr::Const(std::f64::consts::E));
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        assert!(matches!(
            convert("x + y"),
            Err(ConvertError::UnknownSymbol(name)) if name == "y"
        ));
    }

    #[test]
    fn test_unsupported_function_rejected() {
        assert!(matches!(
            convert("abs(x)"),
            Err(ConvertError::UnsupportedFunction(name)) if name == "abs"
        ));
    }

    #[test]
    fn test_assignment_rejected() {
        assert!(matches!(
            convert("x = 2"),
            Err(ConvertError::UnsupportedOperator(_))
        ));
    }

    #[test]
    fn test_statement_chain_rejected() {
        assert!(convert("1; 2").is_err());
    }

    #[test]
    fn test_boolean_literal_rejected() {
        assert!(matches!(
            convert("true"),
            Err(ConvertError::NonNumericConstant(_))
        ));
    }

    #[test]
    fn test_tuple_argument_rejected() {
        assert!(convert("sin(1, 2)").is_err());
    }
}
