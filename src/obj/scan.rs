//! A cursor reproducing formatted-scan (`scanf`) matching over one line.
//!
//! Ordinary characters must match exactly, a whitespace directive consumes any
//! amount of whitespace including none, and an integer conversion skips
//! leading whitespace before reading an optionally signed run of digits.

#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        Scanner { rest: line }
    }

    pub(crate) fn literal(&mut self, expected: char) -> Option<()> {
        self.rest = self.rest.strip_prefix(expected)?;
        Some(())
    }

    pub(crate) fn whitespace(&mut self) {
        self.rest = self.rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
    }

    /// Reads a decimal integer; `None` when there are no digits or the value
    /// does not fit.
    pub(crate) fn integer(&mut self) -> Option<i64> {
        self.whitespace();

        let unsigned = self.rest.trim_start_matches(|c: char| c == '+' || c == '-');
        let sign_len = self.rest.len() - unsigned.len();
        if sign_len > 1 {
            return None;
        }

        let digits = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        if digits == 0 {
            return None;
        }

        let (number, rest) = self.rest.split_at(sign_len + digits);
        let value = number.parse().ok()?;
        self.rest = rest;
        Some(value)
    }

    /// Reads an integer that is usable as a 1-based index.
    pub(crate) fn index(&mut self) -> Option<u32> {
        self.integer()
            .filter(|&value| value > 0)
            .and_then(|value| u32::try_from(value).ok())
    }
}
