//! Record data for the SOA record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::record::Ttl;
use crate::base::wire::{Compose, Composer, Parse, ParseError};
use core::fmt;
use octseq::parse::Parser;

//------------ Soa ----------------------------------------------------------

/// Soa record data.
///
/// Soa records mark the top of a zone and contain information pertinent to
/// name server maintenance operations.
///
/// The Soa record type is defined in RFC 1035, section 3.3.13.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Soa {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: Ttl,
    retry: Ttl,
    expire: Ttl,
    minimum: Ttl,
}

impl Soa {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::SOA;

    /// The length of the five 32 bit fields following the names.
    const FIELDS_LEN: u16 = 5 * u32::COMPOSE_LEN;

    /// Creates new Soa record data from content.
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: Ttl,
        retry: Ttl,
        expire: Ttl,
        minimum: Ttl,
    ) -> Self {
        Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The primary name server for the zone.
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The mailbox for the person responsible for this zone.
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The serial number of the original copy of the zone.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The time interval before the zone should be refreshed.
    pub fn refresh(&self) -> Ttl {
        self.refresh
    }

    /// The time before a failed refresh is retried.
    pub fn retry(&self) -> Ttl {
        self.retry
    }

    /// The upper limit of time the zone is authoritative.
    pub fn expire(&self) -> Ttl {
        self.expire
    }

    /// The minimum TTL to be exported with any RR from this zone.
    pub fn minimum(&self) -> Ttl {
        self.minimum
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        Ok(Self::new(
            Name::parse(parser)?,
            Name::parse(parser)?,
            u32::parse(parser)?,
            Ttl::parse(parser)?,
            Ttl::parse(parser)?,
            Ttl::parse(parser)?,
            Ttl::parse(parser)?,
        ))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Soa {
    fn rtype(&self) -> Rtype {
        Soa::RTYPE
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Soa {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Soa::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Soa {
    fn rdlen(&self) -> Option<u16> {
        Some(
            self.mname.len() as u16
                + self.rname.len() as u16
                + Soa::FIELDS_LEN,
        )
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.mname.compose(target)?;
        self.rname.compose(target)?;
        self.serial.compose(target)?;
        self.refresh.compose(target)?;
        self.retry.compose(target)?;
        self.expire.compose(target)?;
        self.minimum.compose(target)
    }
}

//--- Display

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:#} {:#} {} {} {} {} {}",
            self.mname,
            self.rname,
            self.serial,
            self.refresh.as_secs(),
            self.retry.as_secs(),
            self.expire.as_secs(),
            self.minimum.as_secs()
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen};
    use core::str::FromStr;

    fn soa() -> Soa {
        Soa::new(
            Name::from_str("ns1.example.com").unwrap(),
            Name::from_str("hostmaster.example.com").unwrap(),
            2024010101,
            Ttl::from_hours(2),
            Ttl::from_mins(15),
            Ttl::from_days(14),
            Ttl::from_hours(1),
        )
    }

    #[test]
    fn soa_compose_parse() {
        let rdata = soa();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, Soa::parse);
    }

    #[test]
    fn soa_display() {
        assert_eq!(
            soa().to_string(),
            "ns1.example.com. hostmaster.example.com. \
             2024010101 7200 900 1209600 3600"
        );
    }

    #[test]
    fn soa_short() {
        let mut buf = Vec::new();
        soa().compose_rdata(&mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(
            Soa::parse_rdata(Rtype::SOA, &mut parser),
            Err(ParseError::ShortInput)
        );
    }
}
