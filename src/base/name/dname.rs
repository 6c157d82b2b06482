//! Uncompressed, absolute domain names.
//!
//! This is a private module. Its public types are re-exported by the parent.

use super::label::{Label, LabelType};
use super::{MAX_LABEL_LEN, MAX_NAME_LEN};
use crate::base::scan::{BadSymbol, Symbol, SymbolCharsError};
use crate::base::wire::{Compose, ParseError};
use core::str::FromStr;
use core::{cmp, fmt, hash, iter};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Name ----------------------------------------------------------

/// An uncompressed, absolute domain name.
///
/// The type owns an octets vector and guarantees that it always contains a
/// correctly encoded, absolute domain name in wire format: a sequence of
/// labels, each preceded by its length, ending in the empty root label.
/// The name is never longer than 255 octets and no label is longer than 63.
///
/// You can construct a domain name from a string via the `FromStr` trait,
/// from a sequence of label contents via [`from_labels`][Self::from_labels],
/// or parse it from a message, in which case compression pointers are
/// resolved and the result is a self-contained copy.
///
/// Comparison and hashing ignore ASCII case. The ordering is the canonical
/// ordering of [RFC 4034], which compares names label by label starting
/// from the right.
///
/// [RFC 4034]: https://tools.ietf.org/html/rfc4034
#[derive(Clone)]
pub struct Name(Vec<u8>);

/// # Creating Values
///
impl Name {
    /// Creates a domain name from wire format octets without any check.
    pub(super) fn from_wire_unchecked(octets: Vec<u8>) -> Self {
        Name(octets)
    }

    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name(vec![0])
    }

    /// Creates a domain name from an octets vector in wire format.
    ///
    /// The octets must contain an uncompressed, absolute domain name and
    /// nothing else.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, NameError> {
        if octets.len() > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }
        let mut parser = Parser::from_ref(octets.as_slice());
        loop {
            match LabelType::parse(&mut parser)
                .map_err(|_| NameError::BadWireFormat)?
            {
                LabelType::Normal(0) => break,
                LabelType::Normal(len) => parser
                    .advance(len)
                    .map_err(|_| NameError::BadWireFormat)?,
                LabelType::Compressed(_) => {
                    return Err(NameError::BadWireFormat)
                }
            }
        }
        if parser.remaining() != 0 {
            return Err(NameError::BadWireFormat);
        }
        Ok(Name(octets))
    }

    /// Creates a domain name from the contents of its labels.
    ///
    /// The root label is appended automatically and must not be included.
    /// Each label must be between 1 and 63 octets long.
    ///
    /// ```
    /// use dnscodec::base::name::Name;
    ///
    /// let name = Name::from_labels(["www", "example", "com"]).unwrap();
    /// assert_eq!(name.to_string(), "www.example.com");
    /// ```
    pub fn from_labels<I>(labels: I) -> Result<Self, NameError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut res = Vec::new();
        for label in labels {
            push_label(&mut res, label.as_ref())?;
        }
        finish(res)
    }

    /// Creates a domain name from a sequence of characters.
    ///
    /// The characters must be in presentation format: labels are separated
    /// by dots, a trailing dot is optional, and the root name is `"."`.
    /// Within a label, `\.` and `\\` stand for a literal dot and backslash,
    /// `\DDD` for the octet with the decimal value `DDD`, and a backslash
    /// followed by any other printable character for that character.
    pub fn from_chars<C>(chars: C) -> Result<Self, NameError>
    where
        C: IntoIterator<Item = char>,
    {
        let mut chars = chars.into_iter().peekable();
        if chars.peek().is_none() {
            return Err(NameError::EmptyLabel);
        }
        let mut res = Vec::new();
        let mut label = Vec::new();
        let mut first = true;
        while let Some(symbol) = Symbol::from_chars(&mut chars)? {
            if symbol == Symbol::Char('.') {
                if first && chars.peek().is_none() {
                    return Ok(Self::root());
                }
                push_label(&mut res, &label)?;
                label.clear();
            } else {
                label.push(symbol.into_octet()?);
                if label.len() > MAX_LABEL_LEN {
                    return Err(NameError::LongLabel);
                }
            }
            first = false;
        }
        if !label.is_empty() {
            push_label(&mut res, &label)?;
        }
        finish(res)
    }
}

/// # Properties
///
impl Name {
    /// Returns a reference to the wire format octets of the name.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Converts the name into its wire format octets.
    pub fn into_octets(self) -> Vec<u8> {
        self.0
    }

    /// Returns whether the name is the root name.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns the length of the name in wire format.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over the labels of the name.
    ///
    /// The iterator starts with the leftmost label and ends with the root
    /// label.
    pub fn iter(&self) -> NameIter {
        NameIter {
            slice: self.as_slice(),
        }
    }

    /// Returns the number of labels, including the root label.
    pub fn label_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns the leftmost label.
    pub fn first(&self) -> &Label {
        self.iter().next().unwrap_or_else(|| Label::root())
    }

    /// Returns whether `self` is equal to `base` or a subdomain of it.
    pub fn ends_with(&self, base: &Name) -> bool {
        let own = self.iter().rev_labels();
        let base = base.iter().rev_labels();
        base.len() <= own.len()
            && own.iter().zip(base.iter()).all(|(left, right)| left == right)
    }
}

//--- Compose

impl Compose for Name {
    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.as_slice())
    }
}

//--- FromStr

impl FromStr for Name {
    type Err = NameError;

    /// Parses a string into an absolute domain name.
    ///
    /// The name will be interpreted as an absolute name whether or not it
    /// ends in a dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_chars(s.chars())
    }
}

//--- AsRef

impl AsRef<[u8]> for Name {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- PartialEq and Eq

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        // Length octets never fall into the range of ASCII letters, so
        // comparing the wire format ignoring case compares the labels.
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl Eq for Name {}

//--- PartialOrd and Ord

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.iter().rev_labels().cmp(&other.iter().rev_labels())
    }
}

//--- Hash

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for label in self.iter() {
            label.hash(state)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    /// Formats the domain name.
    ///
    /// This will produce the domain name in ‘common display format’ without
    /// the trailing dot with the exception of a root name which will be just
    /// a dot. The alternate form `{:#}` adds the trailing dot.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        let mut first = true;
        for label in self.iter() {
            if label.is_root() {
                continue;
            }
            if first {
                first = false;
            } else {
                f.write_str(".")?;
            }
            fmt::Display::fmt(label, f)?;
        }
        if f.alternate() {
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({:#})", self)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer
                .serialize_newtype_struct("Name", &format_args!("{}", self))
        } else {
            serializer.serialize_newtype_struct(
                "Name",
                &octseq::serde::SerializeOctets::as_serialized_octets(
                    &self.as_slice(),
                ),
            )
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct InnerVisitor;

        impl<'de> serde::de::Visitor<'de> for InnerVisitor {
            type Value = Name;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an absolute domain name")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                Name::from_str(v).map_err(E::custom)
            }

            fn visit_bytes<E: serde::de::Error>(
                self,
                value: &[u8],
            ) -> Result<Self::Value, E> {
                Name::from_octets(value.into()).map_err(E::custom)
            }

            fn visit_byte_buf<E: serde::de::Error>(
                self,
                value: Vec<u8>,
            ) -> Result<Self::Value, E> {
                Name::from_octets(value).map_err(E::custom)
            }
        }

        struct NewtypeVisitor;

        impl<'de> serde::de::Visitor<'de> for NewtypeVisitor {
            type Value = Name;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an absolute domain name")
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

        deserializer.deserialize_newtype_struct("Name", NewtypeVisitor)
    }
}

//------------ NameIter ------------------------------------------------------

/// An iterator over the labels in a domain name.
#[derive(Clone, Debug)]
pub struct NameIter<'a> {
    slice: &'a [u8],
}

impl<'a> NameIter<'a> {
    /// Collects the remaining labels in reverse order, root label first.
    fn rev_labels(self) -> Vec<&'a Label> {
        let mut res: Vec<_> = self.collect();
        res.reverse();
        res
    }
}

impl<'a> Iterator for NameIter<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, rest) = self.slice.split_first()?;
        let len = usize::from(len);
        let (label, rest) = rest.split_at(len);
        self.slice = if len == 0 { &[] } else { rest };
        // Names are valid by construction so the label is short enough.
        Some(unsafe { Label::from_slice_unchecked(label) })
    }
}

impl<'a> iter::FusedIterator for NameIter<'a> {}

impl<'a> IntoIterator for &'a Name {
    type Item = &'a Label;
    type IntoIter = NameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//------------ Helper Functions ----------------------------------------------

/// Appends a label in wire format to `target`.
fn push_label(target: &mut Vec<u8>, label: &[u8]) -> Result<(), NameError> {
    if label.is_empty() {
        return Err(NameError::EmptyLabel);
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(NameError::LongLabel);
    }
    // Leave room for the root label.
    if target.len() + label.len() + 2 > MAX_NAME_LEN {
        return Err(NameError::LongName);
    }
    target.push(label.len() as u8);
    target.extend_from_slice(label);
    Ok(())
}

/// Terminates the name with the root label.
fn finish(mut target: Vec<u8>) -> Result<Name, NameError> {
    target.push(0);
    Ok(Name(target))
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// A label other than the root label was empty.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets.
    LongName,

    /// An illegal escape sequence was encountered.
    BadEscape,

    /// A character other than printable ASCII was encountered.
    BadChar,

    /// The octets did not contain an uncompressed, absolute name.
    BadWireFormat,
}

//--- From

impl From<SymbolCharsError> for NameError {
    fn from(_: SymbolCharsError) -> Self {
        NameError::BadEscape
    }
}

impl From<BadSymbol> for NameError {
    fn from(_: BadSymbol) -> Self {
        NameError::BadChar
    }
}

impl From<NameError> for ParseError {
    fn from(err: NameError) -> Self {
        ParseError::form_error(match err {
            NameError::LongLabel => "long label",
            NameError::LongName => "long domain name",
            _ => "invalid domain name",
        })
    }
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::EmptyLabel => "an empty label was encountered",
            NameError::LongLabel => "label length limit exceeded",
            NameError::LongName => "long domain name",
            NameError::BadEscape => "illegal escape sequence",
            NameError::BadChar => "illegal character",
            NameError::BadWireFormat => "invalid domain name wire format",
        })
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn root() {
        assert_eq!(Name::root().as_slice(), b"\0");
        assert_eq!(Name::from_str(".").unwrap(), Name::root());
        assert!(Name::root().is_root());
        assert_eq!(Name::root().to_string(), ".");
        assert_eq!(Name::root().label_count(), 1);
    }

    #[rstest]
    #[case("example.com", b"\x07example\x03com\0")]
    #[case("example.com.", b"\x07example\x03com\0")]
    #[case("a\\.b.c", b"\x03a.b\x01c\0")]
    #[case("a\\\\b", b"\x03a\\b\0")]
    #[case("\\065\\000z", b"\x03A\0z\0")]
    #[case("*.example", b"\x01*\x07example\0")]
    fn from_str(#[case] s: &str, #[case] wire: &[u8]) {
        assert_eq!(Name::from_str(s).unwrap().as_slice(), wire);
    }

    #[rstest]
    #[case("", NameError::EmptyLabel)]
    #[case("..", NameError::EmptyLabel)]
    #[case("a..b", NameError::EmptyLabel)]
    #[case(".a", NameError::EmptyLabel)]
    #[case("a\\", NameError::BadEscape)]
    #[case("a\\25", NameError::BadEscape)]
    #[case("a\\256", NameError::BadEscape)]
    #[case("ä.com", NameError::BadChar)]
    fn from_str_errors(#[case] s: &str, #[case] err: NameError) {
        assert_eq!(Name::from_str(s), Err(err));
    }

    #[test]
    fn label_length_limit() {
        let label = "x".repeat(63);
        let name = Name::from_str(&format!("{}.com", label)).unwrap();
        assert_eq!(name.first().len(), 63);

        let label = "x".repeat(64);
        assert_eq!(
            Name::from_str(&format!("{}.com", label)),
            Err(NameError::LongLabel)
        );
        assert_eq!(
            Name::from_labels([label.as_bytes()]),
            Err(NameError::LongLabel)
        );
    }

    #[test]
    fn name_length_limit() {
        // Four labels of 62 octets plus a label of 1 octet make 255 octets
        // in wire format including the root label.
        let label = "x".repeat(62);
        let ok = format!("{0}.{0}.{0}.{0}.a", label);
        assert_eq!(Name::from_str(&ok).unwrap().len(), 255);
        let long = format!("{0}.{0}.{0}.{0}.ab", label);
        assert_eq!(Name::from_str(&long), Err(NameError::LongName));
    }

    #[test]
    fn from_octets() {
        let name =
            Name::from_octets(b"\x03www\x07example\0".to_vec()).unwrap();
        assert_eq!(name.to_string(), "www.example");
        assert_eq!(
            Name::from_octets(b"\x03www".to_vec()),
            Err(NameError::BadWireFormat)
        );
        assert_eq!(
            Name::from_octets(b"\x03www\xc0\x00".to_vec()),
            Err(NameError::BadWireFormat)
        );
        assert_eq!(
            Name::from_octets(b"\0\0".to_vec()),
            Err(NameError::BadWireFormat)
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            Name::from_str("www.example.com.").unwrap().to_string(),
            "www.example.com"
        );
        assert_eq!(
            format!("{:#}", Name::from_str("www.example.com").unwrap()),
            "www.example.com."
        );
        assert_eq!(format!("{:#}", Name::root()), ".");
        assert_eq!(
            Name::from_labels([&b"a.b"[..], b"c d", b"\x07"])
                .unwrap()
                .to_string(),
            "a\\.b.c\\ d.\\007"
        );
    }

    #[test]
    fn eq_and_hash_ignore_case() {
        use std::collections::HashSet;

        let a = Name::from_str("www.Example.COM").unwrap();
        let b = Name::from_str("WWW.example.com.").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Name::from_str("www.example.org").unwrap());
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn canonical_ord() {
        let names = [
            "example",
            "a.example",
            "yljkjljk.a.example",
            "Z.a.example",
            "zABC.a.EXAMPLE",
            "z.example",
            "\\001.z.example",
            "*.z.example",
            "\\200.z.example",
        ];
        let names: Vec<_> =
            names.iter().map(|s| Name::from_str(s).unwrap()).collect();
        for pair in names.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn ends_with() {
        let name = Name::from_str("www.example.com").unwrap();
        assert!(name.ends_with(&Name::from_str("example.com").unwrap()));
        assert!(name.ends_with(&Name::from_str("EXAMPLE.com").unwrap()));
        assert!(name.ends_with(&Name::root()));
        assert!(name.ends_with(&name));
        assert!(!name.ends_with(&Name::from_str("xample.com").unwrap()));
        assert!(
            !name.ends_with(&Name::from_str("a.www.example.com").unwrap())
        );
    }

    #[test]
    fn labels() {
        let name = Name::from_str("www.example.com").unwrap();
        let labels: Vec<_> = name.iter().map(Label::as_slice).collect();
        assert_eq!(labels, [&b"www"[..], b"example", b"com", b""]);
        assert_eq!(name.label_count(), 4);
    }

    #[test]
    fn first_label() {
        let name = Name::from_str("www.example.com").unwrap();
        assert_eq!(name.first().as_slice(), b"www");
        assert!(Name::root().first().is_root());
        assert_eq!(Name::root().first(), Label::root());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        let name = Name::from_str("www.example.com").unwrap();
        assert_tokens(
            &name.clone().compact(),
            &[
                Token::NewtypeStruct { name: "Name" },
                Token::ByteBuf(b"\x03www\x07example\x03com\0"),
            ],
        );
        assert_tokens(
            &name.readable(),
            &[
                Token::NewtypeStruct { name: "Name" },
                Token::Str("www.example.com"),
            ],
        );
    }
}
