//! Keypad keys and the text syntax used to type them.

use thiserror::Error;

/// Function keys that open a call, e.g. `sin(`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
}

/// Operator keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    /// Accepted as input, but no expression shape evaluates it.
    Percent,
}

/// How a key behaves when pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// Digits, the decimal point and constants.
    Number,
    /// Function calls and the square key.
    Function,
    Operator,
    /// Parentheses.
    Special,
}

/// A decimal digit, `0` through `9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecimalDigit(u8);

impl DecimalDigit {
    /// Returns `None` for values above 9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// A key that inserts text into the expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(DecimalDigit),
    Point,
    Pi,
    Euler,
    Function(Function),
    /// Appends `^2`.
    Square,
    Operator(Operator),
    OpenParen,
    CloseParen,
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Key {
    /// The key for a digit, or `None` for values above 9.
    pub fn digit(value: u8) -> Option<Self> {
        DecimalDigit::new(value).map(Self::Digit)
    }

    /// Text appended to the expression when the key is pressed.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Digit(d) => DIGITS[d.value() as usize],
            Self::Point => ".",
            // Shortest round-trip text of the constants.
            Self::Pi => "3.141592653589793",
            Self::Euler => "2.718281828459045",
            Self::Function(Function::Sin) => "sin(",
            Self::Function(Function::Cos) => "cos(",
            Self::Function(Function::Tan) => "tan(",
            Self::Function(Function::Log) => "log(",
            Self::Function(Function::Ln) => "ln(",
            Self::Function(Function::Sqrt) => "sqrt(",
            Self::Square => "^2",
            Self::Operator(Operator::Add) => "+",
            Self::Operator(Operator::Subtract) => "-",
            Self::Operator(Operator::Multiply) => "×",
            Self::Operator(Operator::Divide) => "÷",
            Self::Operator(Operator::Power) => "^",
            Self::Operator(Operator::Percent) => "%",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
        }
    }

    pub fn kind(self) -> KeyKind {
        match self {
            Self::Digit(_) | Self::Point | Self::Pi | Self::Euler => KeyKind::Number,
            Self::Function(_) | Self::Square => KeyKind::Function,
            Self::Operator(_) => KeyKind::Operator,
            Self::OpenParen | Self::CloseParen => KeyKind::Special,
        }
    }

    /// Whether pressing this key opens a function call.
    pub fn opens_call(self) -> bool {
        self.symbol().ends_with('(')
    }

    fn from_char(c: char) -> Option<Self> {
        let key = match c {
            '0'..='9' => Self::Digit(DecimalDigit(c as u8 - b'0')),
            '.' => Self::Point,
            'π' => Self::Pi,
            '+' => Self::Operator(Operator::Add),
            '-' => Self::Operator(Operator::Subtract),
            '×' | '*' => Self::Operator(Operator::Multiply),
            '÷' | '/' => Self::Operator(Operator::Divide),
            '^' => Self::Operator(Operator::Power),
            '%' => Self::Operator(Operator::Percent),
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            _ => return None,
        };
        Some(key)
    }

    fn from_word(word: &str) -> Option<Self> {
        let key = match word.to_ascii_lowercase().as_str() {
            "sin" | "sin(" => Self::Function(Function::Sin),
            "cos" | "cos(" => Self::Function(Function::Cos),
            "tan" | "tan(" => Self::Function(Function::Tan),
            "log" | "log(" => Self::Function(Function::Log),
            "ln" | "ln(" => Self::Function(Function::Ln),
            "sqrt" | "sqrt(" | "√" => Self::Function(Function::Sqrt),
            "sq" | "x²" | "^2" => Self::Square,
            "pow" => Self::Operator(Operator::Power),
            "pi" => Self::Pi,
            "e" => Self::Euler,
            _ => return None,
        };
        Some(key)
    }
}

/// Anything the keypad can be asked to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Press(Key),
    Equals,
    ClearAll,
    Delete,
    ToggleSign,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// Parse a line of typed keys into keypad actions.
///
/// Words are separated by whitespace. A word is either a named key
/// (`sin`, `sq`, `pi`, `AC`, `DEL`, `+/-`, ...) or a run of single-character
/// keys such as `12.5`, `2+3=` or `)`.
pub fn parse_actions(line: &str) -> Result<Vec<Action>, KeyError> {
    let mut actions = Vec::new();

    for word in line.split_whitespace() {
        match word.to_ascii_lowercase().as_str() {
            "ac" | "clear" => actions.push(Action::ClearAll),
            "del" | "delete" => actions.push(Action::Delete),
            "+/-" | "neg" => actions.push(Action::ToggleSign),
            _ => {
                if let Some(key) = Key::from_word(word) {
                    actions.push(Action::Press(key));
                    continue;
                }

                for c in word.chars() {
                    let action = if c == '=' {
                        Action::Equals
                    } else {
                        Key::from_char(c)
                            .map(Action::Press)
                            .ok_or_else(|| KeyError::UnknownKey(word.to_string()))?
                    };
                    actions.push(action);
                }
            }
        }
    }

    Ok(actions)
}
