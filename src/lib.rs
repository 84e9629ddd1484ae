//! # Keypad expression calculator
//!
//! The engine behind a four-function calculator input surface. It accepts
//! one logical key at a time, incrementally builds a syntactically valid
//! infix expression string, derives the user-visible display value after
//! every edit, and evaluates the whole buffer on demand.
//!
//! Two entry points:
//! * [`keypad::Calculator`] - the input state machine. Feed it keys with
//! `press`, read back the expression buffer and the display string
//! * [`parse::compute`] - one-shot evaluation of an expression string,
//! for callers that do not need incremental entry
//!
//! The logical key alphabet is `0`..`9`, `.`, the operator glyphs `＋`,
//! `−`, `×`, `÷`, then `%`, `=`, `C` (clear), and `DEL` (backspace).
//! The operator glyphs are deliberately not the ASCII `+-*/` so that the
//! ASCII minus stays free to mark a negative computed result fed back into
//! the buffer. [`keypad::from_keyboard`] maps physical keyboard characters
//! (`+`, `-`, `*`, `/`, Enter, Backspace, Escape) to logical keys.
//!
//! Operators, starting from highest priority:
//! * `%` - percent, postfix unary: `50%` is `0.5`. Applies to the
//! immediately preceding operand only
//! * `×`, `÷` - multiplication, division
//! * `＋`, `−` - addition, subtraction
//!
//! Equal-priority binary operators evaluate left to right.
//!
//! Evaluation never panics and never returns a platform infinity. Division
//! by zero, operator/operand arity mismatches, and non-finite intermediate
//! results all surface as the literal display string `Err`; the empty
//! expression evaluates to `0`. Results are rounded to 12 fractional
//! digits before display, so `0.1＋0.2` shows `0.3` rather than the raw
//! binary-float tail.

#[macro_use]
extern crate pest_derive;

pub mod errors;
pub mod keypad;
pub mod parse;
pub mod stack;
pub mod value;
