//! Configuration flags and locale settings for parsing and evaluation.

use bitflags::bitflags;

bitflags! {
    /// Flags controlling literal parsing, arithmetic and comparison.
    ///
    /// Flags combine freely:
    ///
    /// ```
    /// use reckon_core::api::ExpressionOptions;
    ///
    /// let options = ExpressionOptions::DECIMAL_AS_DEFAULT | ExpressionOptions::OVERFLOW_PROTECTION;
    /// assert!(options.contains(ExpressionOptions::OVERFLOW_PROTECTION));
    /// assert!(ExpressionOptions::default().is_empty());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExpressionOptions: u32 {
        /// Match built-in function names regardless of case.
        const IGNORE_CASE_AT_BUILTIN_FUNCTIONS = 1 << 0;
        /// Never consult or populate the expression cache.
        const NO_CACHE = 1 << 1;
        /// `Round` resolves midpoints away from zero instead of to even.
        const ROUND_AWAY_FROM_ZERO = 1 << 2;
        /// Numeric literals and arithmetic use fixed-point decimal.
        const DECIMAL_AS_DEFAULT = 1 << 3;
        /// Checked arithmetic; infinite float results are overflow errors.
        const OVERFLOW_PROTECTION = 1 << 4;
        /// Booleans take part in arithmetic as 1 and 0.
        const ALLOW_BOOLEAN_CALCULATION = 1 << 5;
        /// One-character single-quoted literals are characters, and
        /// characters take part in arithmetic as their code point.
        const ALLOW_CHAR_VALUES = 1 << 6;
        /// Values of different representations never compare equal.
        const STRICT_TYPE_MATCHING = 1 << 7;
        /// String comparison and `like` ignore case.
        const CASE_INSENSITIVE_STRING_COMPARER = 1 << 8;
        /// String comparison uses code point order.
        const ORDINAL_STRING_COMPARER = 1 << 9;
        /// `+` always concatenates the text of its operands.
        const STRING_CONCAT = 1 << 10;
    }
}

impl ExpressionOptions {
    /// Flags that change the tree the parser produces for the same text.
    pub const LITERAL_FLAGS: ExpressionOptions = ExpressionOptions::DECIMAL_AS_DEFAULT
        .union(ExpressionOptions::ALLOW_CHAR_VALUES);

    pub fn affects_parsing(self) -> bool {
        self.intersects(Self::LITERAL_FLAGS)
    }
}

/// Locale settings used when numbers are read from or written to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Culture {
    pub decimal_separator: char,
    pub group_separator: char,
}

impl Culture {
    pub const INVARIANT: Culture = Culture {
        decimal_separator: '.',
        group_separator: ',',
    };

    pub const fn new(decimal_separator: char, group_separator: char) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }

    /// Rewrites culture-formatted numeric text into the invariant form,
    /// dropping group separators.
    pub fn normalize_number(&self, text: &str) -> String {
        let text = text.trim();
        if *self == Culture::INVARIANT {
            return text.replace(self.group_separator, "");
        }
        text.chars()
            .filter(|c| *c != self.group_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect()
    }

    /// Rewrites invariant numeric text into this culture's form.
    pub fn localize_number(&self, text: &str) -> String {
        if self.decimal_separator == '.' {
            return text.to_string();
        }
        text.replace('.', &self.decimal_separator.to_string())
    }
}

impl Default for Culture {
    fn default() -> Self {
        Culture::INVARIANT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_flags() {
        assert!(ExpressionOptions::DECIMAL_AS_DEFAULT.affects_parsing());
        assert!(ExpressionOptions::ALLOW_CHAR_VALUES.affects_parsing());
        assert!(!ExpressionOptions::OVERFLOW_PROTECTION.affects_parsing());
        assert!(!ExpressionOptions::empty().affects_parsing());
    }

    #[test]
    fn test_culture_number_text() {
        let german = Culture::new(',', '.');
        assert_eq!(german.normalize_number("1.234,5"), "1234.5");
        assert_eq!(german.localize_number("1234.5"), "1234,5");
        assert_eq!(Culture::INVARIANT.normalize_number(" 1,234.5 "), "1234.5");
        assert_eq!(Culture::INVARIANT.localize_number("0.25"), "0.25");
    }
}
