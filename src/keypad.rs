use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::parse::compute;
use crate::stack::BinOp;
use crate::value::ERR_RESULT;

/// One logical calculator key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Key {
    Digit(u8),
    Point,
    Op(BinOp),
    Percent,
    Equals,
    Clear,
    Delete,
}

impl Key {
    /// Parses a logical key symbol: `"0"`..`"9"`, `"."`, `"＋"`, `"−"`,
    /// `"×"`, `"÷"`, `"%"`, `"="`, `"C"`, and `"DEL"`. Anything else is
    /// not a key.
    pub fn from_symbol(s: &str) -> Option<Key> {
        match s {
            "C" => Some(Key::Clear),
            "DEL" => Some(Key::Delete),
            "=" => Some(Key::Equals),
            "." => Some(Key::Point),
            "%" => Some(Key::Percent),
            _ => {
                let mut chars = s.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                if let Some(d) = c.to_digit(10) {
                    return Some(Key::Digit(d as u8));
                }
                BinOp::from_char(c).map(Key::Op)
            }
        }
    }
}

lazy_static! {
    static ref KEY_MAP: HashMap<char, Key> = {
        let mut m = HashMap::new();
        for d in 0..10u8 {
            m.insert(char::from(b'0' + d), Key::Digit(d));
        }
        m.insert('.', Key::Point);
        m.insert('+', Key::Op(BinOp::Add));
        m.insert('-', Key::Op(BinOp::Sub));
        m.insert('*', Key::Op(BinOp::Mul));
        m.insert('/', Key::Op(BinOp::Div));
        m.insert('%', Key::Percent);
        m.insert('=', Key::Equals);
        m.insert('\r', Key::Equals);
        m.insert('\n', Key::Equals);
        m.insert('\u{8}', Key::Delete);
        m.insert('\u{7f}', Key::Delete);
        m.insert('\u{1b}', Key::Clear);
        m
    };
}

/// Maps a physical keyboard character to its logical key: ASCII `+`, `-`,
/// `*`, and `/` become the operator glyph keys, Enter evaluates, Backspace
/// deletes, Escape clears.
pub fn from_keyboard(c: char) -> Option<Key> {
    KEY_MAP.get(&c).copied()
}

// the longest expression suffix that forms a single operand: a digit run
// with at most one decimal point in it
fn current_operand(expr: &str) -> &str {
    let mut start = expr.len();
    let mut seen_point = false;
    for (i, c) in expr.char_indices().rev() {
        match c {
            '0'..='9' => start = i,
            '.' if !seen_point => {
                seen_point = true;
                start = i;
            }
            _ => break,
        }
    }
    &expr[start..]
}

/// Derives the user-visible value from the tail of the expression buffer.
/// A trailing operator or percent shows as that symbol alone (operator just
/// pressed, awaiting the next operand); otherwise the in-progress operand
/// shows; an empty tail falls back to the whole buffer.
pub fn tail_display(expr: &str) -> String {
    match expr.chars().last() {
        Some(c) if BinOp::from_char(c).is_some() || c == '%' => c.to_string(),
        _ => {
            let tail = current_operand(expr);
            if tail.is_empty() {
                expr.to_string()
            } else {
                tail.to_string()
            }
        }
    }
}

fn ends_with_digit(expr: &str) -> bool {
    expr.chars().last().map_or(false, |c| c.is_ascii_digit())
}

/// The input state machine: the accumulating infix expression buffer and
/// the display value derived from it. Both fields change only through
/// [`press`](Calculator::press); a rejected key leaves them untouched, so
/// every transition is atomic.
pub struct Calculator {
    expr: String,
    display: String,
}

impl Default for Calculator {
    fn default() -> Calculator {
        Calculator {
            expr: String::new(),
            display: "0".to_string(),
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Default::default()
    }

    /// The full infix expression entered so far.
    pub fn expression(&self) -> &str {
        &self.expr
    }

    /// The value currently shown to the user.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Feeds one logical key into the state machine.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Clear => *self = Calculator::new(),
            Key::Delete => self.press_delete(),
            Key::Equals => self.press_equals(),
            Key::Point => self.press_point(),
            Key::Percent => self.press_percent(),
            Key::Op(op) => self.press_op(op),
            Key::Digit(d) => self.press_digit(d),
        }
    }

    /// Feeds a key given by its logical symbol. Unknown symbols are ignored.
    pub fn press_symbol(&mut self, symbol: &str) {
        if let Some(key) = Key::from_symbol(symbol) {
            self.press(key);
        }
    }

    fn press_delete(&mut self) {
        self.expr.pop();
        self.display = if self.expr.is_empty() {
            "0".to_string()
        } else {
            tail_display(&self.expr)
        };
    }

    fn press_equals(&mut self) {
        // an empty buffer re-evaluates the shown value, so a repeated `=`
        // keeps the previous result instead of resetting to zero
        let src = if self.expr.is_empty() {
            self.display.clone()
        } else {
            self.expr.clone()
        };
        let res = compute(&src);
        if res == ERR_RESULT {
            self.expr.clear();
        } else {
            self.expr = res.clone();
        }
        self.display = res;
    }

    fn press_point(&mut self) {
        // one decimal point per operand
        if current_operand(&self.expr).contains('.') {
            return;
        }
        if ends_with_digit(&self.expr) {
            self.expr.push('.');
        } else {
            // empty buffer or trailing operator: seed an implicit zero
            self.expr.push_str("0.");
        }
        self.display = tail_display(&self.expr);
    }

    fn press_percent(&mut self) {
        // percent must follow a completed operand
        if !ends_with_digit(&self.expr) {
            return;
        }
        self.expr.push('%');
        self.display = tail_display(&self.expr);
    }

    fn press_op(&mut self, op: BinOp) {
        if self.expr.is_empty() {
            // only subtraction may open an expression: it seeds an implicit
            // zero so a leading negative number can be entered
            if op == BinOp::Sub {
                self.expr.push_str("0−");
                self.display = "−".to_string();
            }
            return;
        }

        // the newest operator key supersedes a pending one
        if self.expr.chars().last().and_then(BinOp::from_char).is_some() {
            self.expr.pop();
        }
        // an operand left mid-decimal-entry loses its bare point
        if self.expr.ends_with('.') {
            self.expr.pop();
        }
        self.expr.push(op.symbol());
        self.display = op.symbol().to_string();
    }

    fn press_digit(&mut self, d: u8) {
        if d > 9 {
            return;
        }
        if d != 0 && self.has_lone_leading_zero() {
            self.expr.pop();
        }
        self.expr.push(char::from(b'0' + d));
        self.display = tail_display(&self.expr);
    }

    // true when the buffer ends with a zero that opens the current operand:
    // either the very first character or right after an operator
    fn has_lone_leading_zero(&self) -> bool {
        let mut it = self.expr.chars().rev();
        if it.next() != Some('0') {
            return false;
        }
        match it.next() {
            None => true,
            Some(p) => BinOp::from_char(p).is_some(),
        }
    }
}
