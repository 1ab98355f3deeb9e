//! The virtual keypad. Each key inserts its literal label at the cursor.
//!
//! Function keys carry both parentheses; the editor leaves the cursor between them.
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum Key {
    #[strum(serialize = "0")]
    Zero,
    #[strum(serialize = "1")]
    One,
    #[strum(serialize = "2")]
    Two,
    #[strum(serialize = "3")]
    Three,
    #[strum(serialize = "4")]
    Four,
    #[strum(serialize = "5")]
    Five,
    #[strum(serialize = "6")]
    Six,
    #[strum(serialize = "7")]
    Seven,
    #[strum(serialize = "8")]
    Eight,
    #[strum(serialize = "9")]
    Nine,
    #[strum(serialize = ".")]
    Point,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "*")]
    Times,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "^")]
    Power,
    #[strum(serialize = "(")]
    Open,
    #[strum(serialize = ")")]
    Close,
    #[strum(serialize = "x")]
    X,
    #[strum(serialize = "y")]
    Y,
    #[strum(serialize = "z")]
    Z,
    #[strum(serialize = "e")]
    Euler,
    #[strum(serialize = "sin()")]
    Sin,
    #[strum(serialize = "cos()")]
    Cos,
    #[strum(serialize = "tan()")]
    Tan,
    #[strum(serialize = "log()")]
    Log,
    #[strum(serialize = "ln()")]
    Ln,
    #[strum(serialize = "sqrt()")]
    Sqrt,
}

impl Key {
    /// the text the key inserts
    pub fn payload(&self) -> &'static str {
        self.into()
    }

    pub fn from_payload(payload: &str) -> Option<Key> {
        Key::iter().find(|key| key.payload() == payload)
    }

    pub fn all_payloads() -> Vec<&'static str> {
        Key::iter().map(|key| key.payload()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_lookup() {
        assert_eq!(Key::from_payload("sin()"), Some(Key::Sin));
        assert_eq!(Key::from_payload("7"), Some(Key::Seven));
        assert_eq!(Key::from_payload("exp()"), None);
        assert_eq!(Key::Sqrt.payload(), "sqrt()");
    }

    #[test]
    fn test_payloads_are_distinct() {
        let payloads = Key::all_payloads();
        let mut sorted = payloads.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), payloads.len());
    }
}
