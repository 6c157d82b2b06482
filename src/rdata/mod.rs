//! Resource data implementations.
//!
//! This module contains the record data for the record types the crate
//! knows how to decode and encode: A, AAAA, NS, CNAME, SOA, PTR, MX, and
//! TXT.
//!
//! The types are named identically to the [`Rtype`] constant they implement.
//! They are grouped into submodules for the RFCs they are defined in. All
//! types are also re-exported at the top level here. Ie., for the AAAA
//! record type, you can simply `use dnscodec::rdata::Aaaa` instead of
//! `use dnscodec::rdata::aaaa::Aaaa`.
//!
//! The enum [`AllRecordData`] collects all these types plus a variant for
//! any other record type which keeps the data in its raw form. Parsing of
//! record data into this enum goes through the [`CODECS`] table which maps
//! a record type to the function decoding its data. Record types missing
//! from the table end up in the raw variant.
//!
//! [`Rtype`]: crate::base::iana::Rtype

#[macro_use]
mod macros;

pub mod aaaa;
pub mod rfc1035;

use crate::base::iana::Rtype;
use crate::base::rdata::{
    ComposeRecordData, ParseRecordData, RecordData, UnknownRecordData,
};
use crate::base::wire::{Composer, ParseError};
use core::fmt;
use octseq::parse::Parser;
use tracing::trace;

//------------ Record Types --------------------------------------------------

rdata_types! {
    rfc1035::{
        A,
        Cname,
        Mx,
        Ns,
        Ptr,
        Soa,
        Txt,
    }
    aaaa::{
        Aaaa,
    }
}

//------------ RecordCodec ---------------------------------------------------

/// A function decoding the record data of one record type.
///
/// The function receives the record type and a parser limited to the record
/// data. It returns `Ok(None)` if it doesn’t handle the given type.
pub type ParseFn =
    for<'a> fn(
        Rtype,
        &mut Parser<'a, [u8]>,
    ) -> Result<Option<AllRecordData>, ParseError>;

/// An entry in the codec table.
///
/// Encoding doesn’t need a table entry since the record data value itself
/// knows how to compose itself.
#[derive(Clone, Copy)]
pub struct RecordCodec {
    /// The record type this entry is for.
    pub rtype: Rtype,

    /// The function decoding record data of this type.
    pub parse: ParseFn,
}

impl RecordCodec {
    /// Returns the codec for the given record type if there is one.
    pub fn find(rtype: Rtype) -> Option<&'static RecordCodec> {
        CODECS.iter().find(|codec| codec.rtype == rtype)
    }
}

impl fmt::Debug for RecordCodec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RecordCodec")
            .field("rtype", &self.rtype)
            .finish()
    }
}

//--- ParseRecordData for AllRecordData

impl<'a> ParseRecordData<'a, [u8]> for AllRecordData {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if let Some(codec) = RecordCodec::find(rtype) {
            if let Some(data) = (codec.parse)(rtype, parser)? {
                return Ok(Some(data));
            }
        }
        trace!(%rtype, len = parser.remaining(), "keeping raw record data");
        UnknownRecordData::parse_any(rtype, parser)
            .map(|data| Some(AllRecordData::Unknown(data)))
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::name::Name;
    use core::str::FromStr;
    use rstest::rstest;

    #[rstest]
    #[case(Rtype::A)]
    #[case(Rtype::AAAA)]
    #[case(Rtype::NS)]
    #[case(Rtype::CNAME)]
    #[case(Rtype::SOA)]
    #[case(Rtype::PTR)]
    #[case(Rtype::MX)]
    #[case(Rtype::TXT)]
    fn codec_table_covers(#[case] rtype: Rtype) {
        assert_eq!(RecordCodec::find(rtype).map(|c| c.rtype), Some(rtype));
    }

    #[rstest]
    #[case(Rtype::NULL)]
    #[case(Rtype::SRV)]
    #[case(Rtype::OPT)]
    #[case(Rtype::from_int(0xff00))]
    fn codec_table_misses(#[case] rtype: Rtype) {
        assert!(RecordCodec::find(rtype).is_none());
    }

    #[test]
    fn dispatch_matches_type() {
        let mut parser = Parser::from_static(b"\x00\x0a\x00");
        let data = AllRecordData::parse_rdata(Rtype::MX, &mut parser)
            .unwrap()
            .unwrap();
        assert_eq!(data.rtype(), Rtype::MX);
        assert_eq!(data, AllRecordData::Mx(Mx::new(10, Name::root())));
    }

    #[test]
    fn unknown_fallback() {
        let mut parser = Parser::from_static(b"\x00\x01\x02\x03");
        let data = AllRecordData::parse_rdata(Rtype::NULL, &mut parser)
            .unwrap()
            .unwrap();
        assert_eq!(data.rtype(), Rtype::NULL);
        assert_eq!(parser.remaining(), 0);
        match data {
            AllRecordData::Unknown(ref raw) => {
                assert_eq!(raw.data(), b"\x00\x01\x02\x03")
            }
            _ => panic!("expected unknown record data"),
        }
    }

    #[test]
    fn compose_dispatch() {
        let data = AllRecordData::from(
            Cname::from_str("target.example").unwrap(),
        );
        assert_eq!(data.rtype(), Rtype::CNAME);
        let mut buf = Vec::new();
        data.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf, b"\x06target\x07example\x00");
        assert_eq!(data.rdlen(), Some(16));
        assert_eq!(data.to_string(), "target.example.");
    }
}
