//! Domain name labels.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use super::super::wire::{FormError, ParseError};
use core::{cmp, fmt, hash, iter, mem, slice};
use octseq::parse::Parser;

//------------ Label ---------------------------------------------------------

/// An octets slice with the content of a domain name label.
///
/// This is an unsized type wrapping the content of a valid label. It only
/// contains the label’s content, not the length octet it is preceded by in
/// wire format. As an unsized type, it needs to be used behind some kind of
/// pointer, most likely a reference.
///
/// [`Label`] differs from an octets slice in how it compares: as labels are
/// to be case-insensitive, all the comparison traits as well as `Hash` are
/// implemented ignoring ASCII-case.
#[repr(transparent)]
pub struct Label([u8]);

/// # Creation
///
impl Label {
    /// Domain name labels have a maximum length of 63 octets.
    pub const MAX_LEN: usize = 63;

    /// Creates a label from the underlying slice without any checking.
    ///
    /// # Safety
    ///
    /// The `slice` must be at most 63 octets long.
    pub(super) unsafe fn from_slice_unchecked(slice: &[u8]) -> &Self {
        // SAFETY: Label has repr(transparent)
        mem::transmute(slice)
    }

    /// Returns a static reference to the root label.
    ///
    /// The root label is an empty label.
    #[must_use]
    pub fn root() -> &'static Self {
        unsafe { Self::from_slice_unchecked(b"") }
    }

    /// Converts an octets slice into a label.
    ///
    /// This will fail if the slice is longer than 63 octets.
    pub fn from_slice(slice: &[u8]) -> Result<&Self, LongLabelError> {
        if slice.len() > Label::MAX_LEN {
            Err(LongLabelError(()))
        } else {
            Ok(unsafe { Self::from_slice_unchecked(slice) })
        }
    }
}

/// # Properties
///
impl Label {
    /// Returns whether the label is the root label.
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Returns whether the label is the wildcard label `*`.
    pub fn is_wildcard(&self) -> bool {
        self.0.len() == 1 && self.0[0] == b'*'
    }

    /// Returns the length of the label’s content.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the label is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the length of the composed version of the label.
    ///
    /// This length is one more than the length of the content.
    pub fn compose_len(&self) -> u16 {
        // Label::MAX_LEN ensures this fits.
        (self.len() + 1) as u16
    }

    /// Returns a reference to the underlying octets slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns an iterator over the octets of the label.
    pub fn iter(&self) -> iter::Copied<slice::Iter<u8>> {
        self.as_slice().iter().copied()
    }
}

//--- AsRef

impl AsRef<[u8]> for Label {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- PartialEq, Eq, PartialOrd, and Ord

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl Eq for Label {}

impl PartialOrd for Label {
    /// Returns an ordering between `self` and `other`.
    ///
    /// Labels are ordered like octet strings except that the case of ASCII
    /// letters is ignored. This is the canonical order of [RFC 4034].
    ///
    /// [RFC 4034]: https://tools.ietf.org/html/rfc4034
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.iter()
            .map(|ch| ch.to_ascii_lowercase())
            .cmp(other.iter().map(|ch| ch.to_ascii_lowercase()))
    }
}

//--- Hash

impl hash::Hash for Label {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        // Include the length in the hash so we can simply hash over the
        // labels when building a name’s hash.
        (self.len() as u8).hash(state);
        for ch in self.iter() {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a Label {
    type Item = u8;
    type IntoIter = iter::Copied<slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Display and Debug

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for ch in self.iter() {
            if ch == b' ' || ch == b'.' || ch == b'\\' {
                write!(f, "\\{}", ch as char)?;
            } else if !(0x20..0x7F).contains(&ch) {
                write!(f, "\\{:03}", ch)?;
            } else {
                write!(f, "{}", (ch as char))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Label(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//------------ LabelType -----------------------------------------------------

/// The type of a label as found in the wire format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelType {
    /// A normal label with its size in octets.
    Normal(usize),

    /// A compressed label with the position of where to continue.
    Compressed(usize),
}

impl LabelType {
    /// Parses the label type from the start of `parser`.
    ///
    /// For a compressed label, both octets of the pointer are consumed.
    /// For a normal label, only the length octet is.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let ltype = parser.parse_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype.into())),
            0xC0..=0xFF => {
                let res = usize::from(parser.parse_u8()?);
                let res = res | ((usize::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(ParseError::Form(FormError::new("invalid label type"))),
        }
    }
}

//------------ LongLabelError ------------------------------------------------

/// A label was longer than the allowed 63 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongLabelError(());

//--- Display and Error

impl fmt::Display for LongLabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long label")
    }
}

impl std::error::Error for LongLabelError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_slice() {
        let x = [0u8; 63];
        assert_eq!(Label::from_slice(&x).map(Label::as_slice), Ok(&x[..]));
        let x = [0u8; 64];
        assert!(Label::from_slice(&x).is_err());
    }

    #[test]
    fn eq_ignores_case() {
        assert_eq!(
            Label::from_slice(b"example").unwrap(),
            Label::from_slice(b"eXAMple").unwrap()
        );
        assert_ne!(
            Label::from_slice(b"example").unwrap(),
            Label::from_slice(b"examp1e").unwrap()
        );
    }

    #[test]
    fn cmp() {
        use core::cmp::Ordering;

        let a = Label::from_slice(b"aBc").unwrap();
        let b = Label::from_slice(b"abd").unwrap();
        assert_eq!(a.cmp(b), Ordering::Less);
        assert_eq!(
            a.cmp(Label::from_slice(b"ABC").unwrap()),
            Ordering::Equal
        );
    }

    #[test]
    fn display() {
        let label = Label::from_slice(b"a.b\\c d\x07").unwrap();
        assert_eq!(format!("{}", label), "a\\.b\\\\c\\ d\\007");
    }

    #[test]
    fn parse_label_type() {
        let mut parser = Parser::from_static(b"\x03\xc0\x0c\x40");
        assert_eq!(LabelType::parse(&mut parser), Ok(LabelType::Normal(3)));
        assert_eq!(
            LabelType::parse(&mut parser),
            Ok(LabelType::Compressed(12))
        );
        assert!(matches!(
            LabelType::parse(&mut parser),
            Err(ParseError::Form(_))
        ));
    }
}
