use pest::Parser;

use crate::errors::*;
use crate::stack::{evaluate, to_postfix, BinOp, Token};
use crate::value::{format_result, normalize, ERR_RESULT};

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

/// Splits an expression buffer into numeric and operator tokens. Numeric
/// literals are parsed to `f64` right here so the later stages never deal
/// with raw text. Characters outside the keypad alphabet produce no token.
pub fn tokenize(text: &str) -> Result<Vec<Token>, CalcError> {
    let pairs = match CalcParser::parse(Rule::expr, text) {
        Ok(p) => p,
        // the grammar consumes arbitrary input, so this is defensive only
        Err(..) => return Err(CalcError::ParseFailed("invalid expression".to_string())),
    };

    let mut tokens = Vec::new();
    for pair in pairs {
        let rule = pair.as_rule();
        let val = pair.as_span().as_str();
        match rule {
            Rule::num | Rule::neg_num => {
                let n: f64 = match val.parse() {
                    Ok(n) => n,
                    Err(..) => return Err(CalcError::StrToFloat(val.to_string())),
                };
                tokens.push(Token::Num(n));
            }
            Rule::operator => match val.chars().next().and_then(BinOp::from_char) {
                Some(op) => tokens.push(Token::Op(op)),
                None => return Err(CalcError::InvalidOp(val.to_string())),
            },
            Rule::percent => tokens.push(Token::Percent),
            Rule::EOI => {}
            _ => return Err(CalcError::Unreachable),
        }
    }
    Ok(tokens)
}

/// Evaluates a whole expression string and returns the display result.
/// The empty string reads as `0`. Any tokenization or evaluation error,
/// and any non-finite value, comes back as the literal `Err` marker -
/// this function never panics and never reports a platform infinity.
pub fn compute(text: &str) -> String {
    if text.is_empty() {
        return "0".to_string();
    }

    let tokens = match tokenize(text) {
        Ok(t) => t,
        Err(..) => return ERR_RESULT.to_string(),
    };
    match evaluate(&to_postfix(tokens)) {
        Ok(v) if v.is_finite() => format_result(normalize(v)),
        _ => ERR_RESULT.to_string(),
    }
}
