//! Resource record data.
//!
//! Each resource record type has it’s own definition of the content and
//! formatting of its data. This module provides the basics for implementing
//! specific types for this record data. The concrete implementations for
//! well-known record types live in the top-level [`dnscodec::rdata`] module.
//!
//! There are three traits herein: Any type that represents record data
//! implements [`RecordData`]. Such a type can be added to a message. If
//! the data can also be composed into wire format, it implements
//! [`ComposeRecordData`]. If it can be parsed from a message, it implements
//! [`ParseRecordData`].
//!
//! In addition, the module provides a type for record data of any record
//! type, [`UnknownRecordData`], that keeps the data in its raw wire format.
//!
//! [`dnscodec::rdata`]: crate::rdata

use super::iana::Rtype;
use super::wire::{parse_owned, Composer, ParseError};
use crate::rdata::RecordCodec;
use core::fmt;
use octseq::parse::Parser;

//----------- RecordData -----------------------------------------------------

/// A type that represents record data.
///
/// The type needs to be able to to be able to provide the record type of a
/// record with a value’s data via the [`rtype`][RecordData::rtype] method.
pub trait RecordData {
    /// Returns the record type associated with this record data instance.
    ///
    /// This is a method rather than an associated function to allow one
    /// type to be used for several real record types.
    fn rtype(&self) -> Rtype;
}

impl<'a, T: RecordData> RecordData for &'a T {
    fn rtype(&self) -> Rtype {
        (*self).rtype()
    }
}

//----------- ComposeRecordData ----------------------------------------------

/// A type of record data that can be composed.
pub trait ComposeRecordData: RecordData {
    /// Returns the length of the record data if available.
    ///
    /// The method should return `None`, if the length is not known or is
    /// too long for the 16 bit length field.
    fn rdlen(&self) -> Option<u16>;

    /// Appends the wire format of the record data into `target`.
    ///
    /// Names contained in the data are always composed uncompressed.
    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

impl<'a, T: ComposeRecordData> ComposeRecordData for &'a T {
    fn rdlen(&self) -> Option<u16> {
        (*self).rdlen()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose_rdata(target)
    }
}

//------------ ParseRecordData -----------------------------------------------

/// A record data type that can be parsed from a message.
///
/// When record data types are generic – typically over a domain name type –,
/// they may not in all cases be parseable. They may still represent record
/// data to be used when constructing the message.
///
/// To reflect this asymmetry, parsing of record data has its own trait.
pub trait ParseRecordData<'a, Octs: ?Sized>: RecordData + Sized {
    /// Parses the record data.
    ///
    /// The record data is for a record of type `rtype`. The function may
    /// decide whether it wants to parse data for that type. It should return
    /// `Ok(None)` if it doesn’t.
    ///
    /// The `parser` is positioned at the beginning of the record data and is
    /// is limited to the length of the data. The method only needs to parse
    /// as much data as it needs. The caller has to make sure to deal with
    /// data remaining in the parser.
    ///
    /// If the function doesn’t want to process the data, it must not touch
    /// the parser. In particual, it must not advance it.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
///
/// This type accepts any record type and stores the plain, unparsed record
/// data as an octets sequence.
///
/// Because some record types allow compressed domain names in their record
/// data, this type cannot be used safely with these record types. For these
/// record types, the structure of the content needs to be known.
///
/// [RFC 3597] limits the types for which compressed names are allowed in the
/// record data to those defined in [RFC 1035] itself. Specific types for all
/// these record types exist in [`crate::rdata`].
///
/// Consequently, this type can be used for any record type other than those
/// and keeps the data exactly as it was received, so composing it again
/// produces the same octets.
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 3597]: https://tools.ietf.org/html/rfc3597
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    data: Vec<u8>,
}

impl UnknownRecordData {
    /// Creates generic record data from a bytes value contain the data.
    ///
    /// Fails if the data is too long or if `rtype` is one of the types with
    /// a dedicated record data type in [`crate::rdata`]. Data for these
    /// types would come back as that type when parsed.
    pub fn from_octets(
        rtype: Rtype,
        data: Vec<u8>,
    ) -> Result<Self, UnknownRecordDataError> {
        if RecordCodec::find(rtype).is_some() {
            return Err(UnknownRecordDataError::KnownType(rtype));
        }
        LongRecordData::check_len(data.len())?;
        Ok(UnknownRecordData { rtype, data })
    }

    /// Returns the record type this data is for.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Converts the record data into its raw octets.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Parses any record type as unknown record data.
    ///
    /// This is used as a fallback for all record types that don’t have a
    /// specific implementation. The complete content of the parser is
    /// taken.
    pub fn parse_any<Octs: AsRef<[u8]> + ?Sized>(
        rtype: Rtype,
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let rdlen = parser.remaining();
        parse_owned(parser, rdlen)
            .map(|data| UnknownRecordData { rtype, data })
    }
}

//--- RecordData, ParseRecordData, and ComposeRecordData

impl RecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs>
    for UnknownRecordData
{
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        Self::parse_any(rtype, parser).map(Some)
    }
}

impl ComposeRecordData for UnknownRecordData {
    fn rdlen(&self) -> Option<u16> {
        u16::try_from(self.data.len()).ok()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.data)
    }
}

//--- Display

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        for ch in &self.data {
            write!(f, " {:02x}", *ch)?
        }
        Ok(())
    }
}

//--- Debug

impl fmt::Debug for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("UnknownRecordData(")?;
        fmt::Display::fmt(&self.rtype, f)?;
        f.write_str(" ")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//------------ LongRecordData ------------------------------------------------

/// The octets sequence to be used for record data is too long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongRecordData(());

impl LongRecordData {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        "record data too long"
    }

    pub fn check_len(len: usize) -> Result<(), Self> {
        if len > usize::from(u16::MAX) {
            Err(Self(()))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for LongRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for LongRecordData {}

//------------ UnknownRecordDataError ----------------------------------------

/// Unknown record data could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnknownRecordDataError {
    /// The data is longer than 65,535 octets.
    LongRecordData,

    /// The record type has a dedicated record data type.
    KnownType(Rtype),
}

impl From<LongRecordData> for UnknownRecordDataError {
    fn from(_: LongRecordData) -> Self {
        UnknownRecordDataError::LongRecordData
    }
}

impl fmt::Display for UnknownRecordDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UnknownRecordDataError::LongRecordData => {
                f.write_str(LongRecordData(()).as_str())
            }
            UnknownRecordDataError::KnownType(rtype) => {
                write!(f, "record type {} needs specific record data", rtype)
            }
        }
    }
}

impl std::error::Error for UnknownRecordDataError {}

//============ Testing ======================================================

#[cfg(test)]
pub(crate) mod test {
    use super::super::wire::ParseError;
    use super::*;
    use core::fmt::Debug;
    use octseq::builder::infallible;

    /// Check that `rdlen` produces the correct length.
    ///
    /// The test composes `data` and checks that the length of the composed
    /// data matches what `rdlen` returns.
    pub fn test_rdlen<R: ComposeRecordData>(data: R) {
        let mut buf = Vec::new();
        infallible(data.compose_rdata(&mut buf));
        assert_eq!(buf.len(), usize::from(data.rdlen().unwrap()));
    }

    /// Check that composing and parsing are reverse operations.
    pub fn test_compose_parse<In, F, Out>(data: &In, parse: F)
    where
        In: ComposeRecordData + PartialEq<Out> + Debug,
        F: FnOnce(&mut Parser<[u8]>) -> Result<Out, ParseError>,
        Out: Debug,
    {
        let mut buf = Vec::new();
        infallible(data.compose_rdata(&mut buf));
        let mut parser = Parser::from_ref(buf.as_slice());
        let parsed = (parse)(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 0);
        assert_eq!(*data, parsed);
    }

    #[test]
    fn unknown_keeps_octets() {
        let data = UnknownRecordData::from_octets(
            Rtype::from_int(0xff00),
            b"\x00\x01\x02\x03\x04\x05\x06\x07\x08\x09".to_vec(),
        )
        .unwrap();
        test_rdlen(&data);
        test_compose_parse(&data, |parser| {
            UnknownRecordData::parse_any(Rtype::from_int(0xff00), parser)
        });
        assert_eq!(
            format!("{}", data),
            "\\# 10 00 01 02 03 04 05 06 07 08 09"
        );
    }

    #[test]
    fn unknown_too_long() {
        assert_eq!(
            UnknownRecordData::from_octets(Rtype::NULL, vec![0; 0x1_0000]),
            Err(UnknownRecordDataError::LongRecordData)
        );
    }

    #[test]
    fn unknown_rejects_known_types() {
        for rtype in [Rtype::A, Rtype::AAAA, Rtype::CNAME, Rtype::TXT] {
            assert_eq!(
                UnknownRecordData::from_octets(rtype, vec![1, 2, 3, 4]),
                Err(UnknownRecordDataError::KnownType(rtype))
            );
        }
        assert!(UnknownRecordData::from_octets(Rtype::NULL, vec![]).is_ok());
    }

    #[test]
    fn build_rejects_opaque_known_type() {
        use crate::base::message::{Message, Section};
        use crate::base::name::Name;
        use crate::base::record::{Record, Ttl};
        use crate::base::wire::ComposeError;
        use crate::rdata::AllRecordData;

        // Values like this can still arrive through deserialization.
        let data = UnknownRecordData {
            rtype: Rtype::A,
            data: vec![192, 0, 2, 1],
        };
        let mut message = Message::default();
        message.push_record(
            Section::Answer,
            Record::new_in(
                Name::root(),
                Ttl::MINUTE,
                AllRecordData::from(data),
            ),
        );
        assert_eq!(crate::build(&message), Err(ComposeError::KnownRtype));
    }
}
