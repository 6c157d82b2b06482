//! Record data for the TXT record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::charstr::{CharStr, MAX_CHARSTR_LEN};
use crate::base::iana::Rtype;
use crate::base::rdata::{
    ComposeRecordData, LongRecordData, ParseRecordData, RecordData,
};
use crate::base::wire::{Compose, Composer, Parse, ParseError};
use core::{fmt, slice};
use octseq::parse::Parser;

//------------ Txt ----------------------------------------------------------

/// TXT record data.
///
/// TXT records hold descriptive text. While it may appear as a single text,
/// it internally consists of a sequence of [character strings][CharStr].
/// Each of these is at most 255 octets long which is guaranteed by
/// [`CharStr`] itself. The sequence as a whole has to fit into the record
/// data, i.e., its wire format can’t be longer than 65,535 octets.
///
/// The type provides means to iterate over these strings via
/// [`iter`][Self::iter]. The method [`text`][Self::text] combines the
/// content into one single octets vector.
///
/// The TXT record type is defined in [RFC 1035, section 3.3.14].
///
/// # `Display`
///
/// The `Display` implementation prints the sequence of character strings in
/// their quoted presentation format separated by a single space.
///
/// [RFC 1035, section 3.3.14]: https://tools.ietf.org/html/rfc1035#section-3.3.14
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Txt(Vec<CharStr>);

impl Txt {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::TXT;

    /// Creates new TXT record data from a sequence of character strings.
    ///
    /// Returns an error if the wire format of the strings would exceed the
    /// maximum record data length.
    pub fn new(strings: Vec<CharStr>) -> Result<Self, LongRecordData> {
        LongRecordData::check_len(Self::wire_len(&strings))?;
        Ok(Txt(strings))
    }

    /// Creates a new Txt record from a single slice.
    ///
    /// If the slice is longer than 255 octets, it will be broken up into
    /// multiple character strings where all but the last string will be
    /// 255 octets long.
    pub fn build_from_slice(text: &[u8]) -> Result<Self, LongRecordData> {
        Self::new(
            text.chunks(MAX_CHARSTR_LEN)
                .map(|chunk| CharStr::from_octets_unchecked(chunk.into()))
                .collect(),
        )
    }

    /// Returns an iterator over the character strings.
    pub fn iter(&self) -> TxtIter {
        TxtIter(self.0.iter())
    }

    /// Returns the number of character strings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no character strings at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the concatenated content of all character strings.
    pub fn text(&self) -> Vec<u8> {
        self.0.iter().flat_map(|s| s.as_slice()).copied().collect()
    }

    /// Converts the record data into its character strings.
    pub fn into_charstrs(self) -> Vec<CharStr> {
        self.0
    }

    fn wire_len(strings: &[CharStr]) -> usize {
        strings.iter().map(|s| usize::from(s.compose_len())).sum()
    }

    /// Parses TXT record data from the beginning of a parser.
    ///
    /// Character strings are read until the parser is exhausted. If the
    /// last string claims more octets than are left, the data is rejected.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let mut strings = Vec::new();
        while parser.remaining() > 0 {
            let len = usize::from(parser.peek(1)?[0]);
            if len >= parser.remaining() {
                return Err(ParseError::form_error(
                    "incomplete TXT character string",
                ));
            }
            strings.push(CharStr::parse(parser)?);
        }
        Ok(Txt(strings))
    }
}

//--- TryFrom

impl TryFrom<Vec<CharStr>> for Txt {
    type Error = LongRecordData;

    fn try_from(strings: Vec<CharStr>) -> Result<Self, Self::Error> {
        Self::new(strings)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Txt {
    fn rtype(&self) -> Rtype {
        Txt::RTYPE
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Txt {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Txt::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Txt {
    fn rdlen(&self) -> Option<u16> {
        u16::try_from(Self::wire_len(&self.0)).ok()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.0.iter().try_for_each(|s| s.compose(target))
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a Txt {
    type Item = &'a CharStr;
    type IntoIter = TxtIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Display

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for s in &self.0 {
            if first {
                first = false;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{}", s.display_quoted())?;
        }
        Ok(())
    }
}

//------------ TxtIter -------------------------------------------------------

/// An iterator over the character strings of a Txt record.
#[derive(Clone, Debug)]
pub struct TxtIter<'a>(slice::Iter<'a, CharStr>);

impl<'a> Iterator for TxtIter<'a> {
    type Item = &'a CharStr;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen};
    use core::str::FromStr;

    #[test]
    fn txt_compose_parse() {
        let rdata = Txt::new(vec![
            CharStr::from_str("v=spf1 -all").unwrap(),
            CharStr::empty(),
            CharStr::from_slice(&[b'x'; 255]).unwrap(),
        ])
        .unwrap();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, Txt::parse);
    }

    #[test]
    fn txt_wire_format() {
        let rdata = Txt::build_from_slice(b"hello").unwrap();
        let mut buf = Vec::new();
        rdata.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf, b"\x05hello");
    }

    #[test]
    fn txt_build_from_long_slice() {
        let rdata = Txt::build_from_slice(&[b'a'; 300]).unwrap();
        let lens: Vec<_> = rdata.iter().map(|s| s.len()).collect();
        assert_eq!(lens, [255, 45]);
        assert_eq!(rdata.text(), vec![b'a'; 300]);
    }

    #[test]
    fn txt_too_long() {
        assert!(Txt::build_from_slice(&[0; 0x1_0000]).is_err());
    }

    #[test]
    fn txt_misaligned() {
        let mut parser = Parser::from_static(b"\x03foo\x05ba");
        assert_eq!(
            Txt::parse_rdata(Rtype::TXT, &mut parser),
            Err(ParseError::form_error("incomplete TXT character string"))
        );
    }

    #[test]
    fn txt_display() {
        let rdata = Txt::new(vec![
            CharStr::from_str("hello world").unwrap(),
            CharStr::from_slice(b"a\"b").unwrap(),
        ])
        .unwrap();
        assert_eq!(rdata.to_string(), "\"hello world\" \"a\\\"b\"");
    }
}
