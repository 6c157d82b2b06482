//! Character strings.
//!
//! The somewhat ill-named `<character-string>` is defined in [RFC 1035] as
//! binary information of up to 255 octets. As such, it doesn’t necessarily
//! contain (ASCII-) characters nor is it a string in a Rust-sense.
//!
//! In wire-format, character strings are encoded as one octet giving the
//! length followed by the actual data in that many octets. The length octet
//! is not part of the content wrapped by [`CharStr`], it contains the data
//! only.
//!
//! A [`CharStr`] can be constructed from a string via the `FromStr`
//! trait. In this case, the string must consist only of printable ASCII
//! characters. Space and double quote are allowed and will be accepted with
//! their ASCII value. Other values need to be escaped via a backslash
//! followed by the three-digit decimal representation of the value. In
//! addition, a backslash followed by a non-digit printable ASCII character
//! is accepted, too, with the ASCII value of this character used.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::scan::{BadSymbol, Symbol, SymbolCharsError};
use super::wire::{parse_owned, Compose, Parse, ParseError};
use core::{cmp, fmt, hash, ops, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

/// The maximum length of the content of a character string.
pub const MAX_CHARSTR_LEN: usize = 255;

//------------ CharStr -------------------------------------------------------

/// The content of a DNS character string.
///
/// A character string consists of up to 255 octets of binary data. This
/// type owns these octets and guarantees that there are never more than
/// 255 of them. It derefs into the underlying octets slice for working with
/// the content in a familiar way.
///
/// As per [RFC 1035], character strings compare ignoring ASCII case.
/// `CharStr`’s implementations of the `std::cmp` traits act accordingly.
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
#[derive(Clone, Default)]
pub struct CharStr(Vec<u8>);

impl CharStr {
    /// Creates a new empty character string.
    #[must_use]
    pub fn empty() -> Self {
        CharStr(Vec::new())
    }

    /// Creates a new character string from an octets vector.
    ///
    /// Returns succesfully if `octets` can indeed be used as a
    /// character string, i.e., it is not longer than 255 bytes.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, CharStrError> {
        if octets.len() > MAX_CHARSTR_LEN {
            Err(CharStrError::LongString)
        } else {
            Ok(CharStr(octets))
        }
    }

    /// Creates a character string without checking the length.
    ///
    /// The caller has to make sure `octets` is at most 255 octets long.
    pub(crate) fn from_octets_unchecked(octets: Vec<u8>) -> Self {
        CharStr(octets)
    }

    /// Creates a character string from a copy of an octets slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CharStrError> {
        Self::from_octets(slice.into())
    }

    /// Returns a reference to the content.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Converts the character string into its content.
    pub fn into_octets(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length of the wire format of the character string.
    pub fn compose_len(&self) -> u16 {
        // The length is limited to 255 so this fits.
        (self.0.len() + 1) as u16
    }

    /// Returns an object that formats the string in double quotes.
    pub fn display_quoted(&self) -> DisplayQuoted {
        DisplayQuoted(self)
    }
}

//--- Parse and Compose

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for CharStr {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        let len = usize::from(parser.parse_u8()?);
        parse_owned(parser, len).map(CharStr)
    }
}

impl Compose for CharStr {
    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        // The length is limited to 255 so this fits.
        (self.0.len() as u8).compose(target)?;
        target.append_slice(self.as_slice())
    }
}

//--- FromStr

impl str::FromStr for CharStr {
    type Err = CharStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let mut res = Vec::new();
        while let Some(symbol) = Symbol::from_chars(&mut chars)? {
            if res.len() == MAX_CHARSTR_LEN {
                return Err(CharStrError::LongString);
            }
            res.push(symbol.into_octet()?);
        }
        Ok(CharStr(res))
    }
}

//--- Deref and AsRef

impl ops::Deref for CharStr {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for CharStr {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- PartialEq and Eq

impl PartialEq for CharStr {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl Eq for CharStr {}

//--- PartialOrd and Ord

impl PartialOrd for CharStr {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CharStr {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.iter()
            .map(u8::to_ascii_lowercase)
            .cmp(other.iter().map(u8::to_ascii_lowercase))
    }
}

//--- Hash

impl hash::Hash for CharStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.iter()
            .map(u8::to_ascii_lowercase)
            .for_each(|ch| ch.hash(state))
    }
}

//--- Display and Debug

impl fmt::Display for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.as_slice() {
            fmt::Display::fmt(&Symbol::from_octet(ch), f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CharStr")
            .field(&format_args!("{}", self))
            .finish()
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for CharStr {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_newtype_struct(
                "CharStr",
                &format_args!("{}", self),
            )
        } else {
            serializer.serialize_newtype_struct(
                "CharStr",
                &octseq::serde::SerializeOctets::as_serialized_octets(
                    &self.as_slice(),
                ),
            )
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CharStr {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        use core::str::FromStr;

        struct InnerVisitor;

        impl<'de> serde::de::Visitor<'de> for InnerVisitor {
            type Value = CharStr;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a character string")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                CharStr::from_str(v).map_err(E::custom)
            }

            fn visit_bytes<E: serde::de::Error>(
                self,
                value: &[u8],
            ) -> Result<Self::Value, E> {
                CharStr::from_slice(value).map_err(E::custom)
            }

            fn visit_byte_buf<E: serde::de::Error>(
                self,
                value: Vec<u8>,
            ) -> Result<Self::Value, E> {
                CharStr::from_octets(value).map_err(E::custom)
            }
        }

        struct NewtypeVisitor;

        impl<'de> serde::de::Visitor<'de> for NewtypeVisitor {
            type Value = CharStr;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a character string")
            }

            fn visit_newtype_struct<D: serde::Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Self::Value, D::Error> {
                if deserializer.is_human_readable() {
                    deserializer.deserialize_str(InnerVisitor)
                } else {
                    deserializer.deserialize_byte_buf(InnerVisitor)
                }
            }
        }

        deserializer.deserialize_newtype_struct("CharStr", NewtypeVisitor)
    }
}

//------------ DisplayQuoted -------------------------------------------------

/// Helper struct for displaying a character string in double quotes.
#[derive(Clone, Copy, Debug)]
pub struct DisplayQuoted<'a>(&'a CharStr);

impl<'a> fmt::Display for DisplayQuoted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\"")?;
        fmt::Display::fmt(self.0, f)?;
        f.write_str("\"")
    }
}

//============ Error Types ===================================================

//------------ CharStrError --------------------------------------------------

/// A character string could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CharStrError {
    /// A character string has more than 255 octets.
    LongString,

    /// An illegal escape sequence was encountered.
    BadEscape,

    /// An illegal character was encountered.
    ///
    /// Only printable ASCII characters are allowed.
    BadChar,
}

//--- From

impl From<SymbolCharsError> for CharStrError {
    fn from(_: SymbolCharsError) -> Self {
        CharStrError::BadEscape
    }
}

impl From<BadSymbol> for CharStrError {
    fn from(_: BadSymbol) -> Self {
        CharStrError::BadChar
    }
}

//--- Display and Error

impl fmt::Display for CharStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CharStrError::LongString => {
                f.write_str("character string with more than 255 octets")
            }
            CharStrError::BadEscape => f.write_str("illegal escape sequence"),
            CharStrError::BadChar => f.write_str("illegal character"),
        }
    }
}

impl std::error::Error for CharStrError {}

//============ Testing =======================================================
