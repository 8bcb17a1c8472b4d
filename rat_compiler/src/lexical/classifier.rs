//! Character classification for the scanner and validator automata

/// Input alphabet of the lexical automata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Letter,
    Digit,
    Dot,
    Other,
}

impl CharClass {
    /// Number of classes; width of a transition table row
    pub const COUNT: usize = 4;

    /// Column index into a transition table
    pub const fn index(self) -> usize {
        match self {
            Self::Letter => 0,
            Self::Digit => 1,
            Self::Dot => 2,
            Self::Other => 3,
        }
    }

    /// Letters and digits may continue an identifier
    pub const fn is_alphanumeric(self) -> bool {
        matches!(self, Self::Letter | Self::Digit)
    }
}

/// Classify a single character. Total and side-effect free.
pub fn classify(ch: char) -> CharClass {
    if ch.is_alphabetic() {
        CharClass::Letter
    } else if ch.is_numeric() {
        CharClass::Digit
    } else if ch == '.' {
        CharClass::Dot
    } else {
        CharClass::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify('a'), CharClass::Letter);
        assert_eq!(classify('Z'), CharClass::Letter);
        assert_eq!(classify('7'), CharClass::Digit);
        assert_eq!(classify('.'), CharClass::Dot);
        assert_eq!(classify('_'), CharClass::Other);
        assert_eq!(classify(' '), CharClass::Other);
        assert_eq!(classify('@'), CharClass::Other);
    }

    #[test]
    fn test_classify_non_ascii() {
        assert_eq!(classify('é'), CharClass::Letter);
        assert_eq!(classify('\u{0663}'), CharClass::Digit);
        assert_eq!(classify('\u{00A0}'), CharClass::Other);
    }

    #[test]
    fn test_indices_are_distinct() {
        let classes = [
            CharClass::Letter,
            CharClass::Digit,
            CharClass::Dot,
            CharClass::Other,
        ];
        for (expected, class) in classes.iter().enumerate() {
            assert_eq!(class.index(), expected);
        }
        assert!(classes.iter().all(|c| c.index() < CharClass::COUNT));
    }
}
