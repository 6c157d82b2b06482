//! Reading data from its presentation format.
//!
//! Domain names and character strings can be created from strings in the
//! format used by zone files. The [`Symbol`] type represents a single
//! character of such a string, which may be an escape sequence.

use core::fmt;

//------------ Symbol --------------------------------------------------------

/// The presentation format of a single octet.
///
/// This is either a regular character or an escape sequence. See the
/// variants for more details.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// An unescaped Unicode character.
    Char(char),

    /// A character escaped via a preceding backslash.
    ///
    /// This escape sequence is only allowed for printable ASCII characters.
    SimpleEscape(u8),

    /// A raw octet escaped using the decimal escape sequence.
    ///
    /// This escape sequence consists of a backslash followed by exactly three
    /// decimal digits with the value of the octets.
    DecimalEscape(u8),
}

impl Symbol {
    /// Reads a symbol from a character source.
    ///
    /// Returns the next symbol in the source, `Ok(None)` if the source has
    /// been exhausted, or an error if there wasn’t a valid symbol.
    pub fn from_chars<C>(chars: C) -> Result<Option<Self>, SymbolCharsError>
    where
        C: IntoIterator<Item = char>,
    {
        let mut chars = chars.into_iter();
        let ch = match chars.next() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        if ch != '\\' {
            return Ok(Some(Symbol::Char(ch)));
        }
        match chars.next() {
            Some(ch) => match ch.to_digit(10) {
                Some(hundreds) => {
                    let mut res = hundreds;
                    for _ in 0..2 {
                        let digit = chars
                            .next()
                            .ok_or(SymbolCharsError::ShortInput)?
                            .to_digit(10)
                            .ok_or(SymbolCharsError::BadEscape)?;
                        res = res * 10 + digit;
                    }
                    u8::try_from(res)
                        .map(|ch| Some(Symbol::DecimalEscape(ch)))
                        .map_err(|_| SymbolCharsError::BadEscape)
                }
                None => {
                    let ch = u8::try_from(ch)
                        .map_err(|_| SymbolCharsError::BadEscape)?;
                    if !(0x20..0x7F).contains(&ch) {
                        Err(SymbolCharsError::BadEscape)
                    } else {
                        Ok(Some(Symbol::SimpleEscape(ch)))
                    }
                }
            },
            None => Err(SymbolCharsError::ShortInput),
        }
    }

    /// Provides the best symbol for an octet.
    ///
    /// The quote and backslash are escaped, other printable ASCII
    /// characters are kept as is, and everything else is turned into a
    /// decimal escape.
    #[must_use]
    pub fn from_octet(ch: u8) -> Self {
        if ch == b'"' || ch == b'\\' {
            Symbol::SimpleEscape(ch)
        } else if !(0x20..0x7F).contains(&ch) {
            Symbol::DecimalEscape(ch)
        } else {
            Symbol::Char(ch as char)
        }
    }

    /// Converts the symbol into an octet if it represents one.
    ///
    /// Only printable ASCII characters and escape sequences do.
    pub fn into_octet(self) -> Result<u8, BadSymbol> {
        match self {
            Symbol::Char(ch) if (' '..='~').contains(&ch) => Ok(ch as u8),
            Symbol::SimpleEscape(ch) | Symbol::DecimalEscape(ch) => Ok(ch),
            _ => Err(BadSymbol(self)),
        }
    }
}

//--- Display

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Char(ch) => write!(f, "{}", ch),
            Symbol::SimpleEscape(ch) => write!(f, "\\{}", ch as char),
            Symbol::DecimalEscape(ch) => write!(f, "\\{:03}", ch),
        }
    }
}

//------------ SymbolCharsError ----------------------------------------------

/// An error happened when reading a symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SymbolCharsError {
    /// An illegal escape sequence was encountered.
    BadEscape,

    /// Unexpected end of input.
    ///
    /// This can only happen in an escape sequence.
    ShortInput,
}

impl fmt::Display for SymbolCharsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SymbolCharsError::BadEscape => {
                f.write_str("illegal escape sequence")
            }
            SymbolCharsError::ShortInput => {
                f.write_str("unexpected end of input")
            }
        }
    }
}

impl std::error::Error for SymbolCharsError {}

//------------ BadSymbol -----------------------------------------------------

/// A symbol with an unexpected value was encountered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BadSymbol(pub Symbol);

impl fmt::Display for BadSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unexpected symbol '{}'", self.0)
    }
}

impl std::error::Error for BadSymbol {}

//============ Testing =======================================================
