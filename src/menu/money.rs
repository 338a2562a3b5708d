use std::fmt::{self, Display, Formatter};

/// An exact price in euro cents.
///
/// The meal plan markup writes prices like `3,80 €`; keeping the minor
/// units as an integer avoids floating point entirely. A price the source
/// does not state is represented as `Option<Cents>`, never as a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cents(u32);

impl Cents {
    pub const fn new(minor_units: u32) -> Self {
        Self(minor_units)
    }

    /// Reads a price from markup text by keeping only its decimal digits,
    /// so `"3,80 €"` becomes 380 and `"10,00€"` becomes 1000. Returns
    /// `None` when the text contains no digits at all.
    pub fn from_markup_text(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        digits.parse().ok().map(Self)
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Console rendering of an optional price, `--€` when the source stated
/// none.
pub fn format_price(price: Option<Cents>) -> String {
    match price {
        Some(cents) => format!("{cents}€"),
        None => "--€".to_string(),
    }
}
