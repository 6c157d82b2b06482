//! Record data for the MX record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{Compose, Composer, Parse, ParseError};
use core::fmt;
use octseq::parse::Parser;

//------------ Mx -----------------------------------------------------------

/// Mx record data.
///
/// The Mx record specifies a host willing to serve as a mail exchange for
/// the owner name.
///
/// The Mx record type is defined in [RFC 1035, section 3.3.9][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.9
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mx {
    preference: u16,
    exchange: Name,
}

impl Mx {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::MX;

    /// Creates a new Mx record data from the components.
    pub fn new(preference: u16, exchange: Name) -> Self {
        Mx {
            preference,
            exchange,
        }
    }

    /// The preference for this record.
    ///
    /// Defines an order if there are several Mx records for the same owner.
    /// Lower values are preferred.
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// The name of the host that is the exchange.
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        Ok(Self::new(u16::parse(parser)?, Name::parse(parser)?))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Mx {
    fn rtype(&self) -> Rtype {
        Mx::RTYPE
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Mx {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Mx::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Mx {
    fn rdlen(&self) -> Option<u16> {
        Some(u16::COMPOSE_LEN + self.exchange.len() as u16)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.preference.compose(target)?;
        self.exchange.compose(target)
    }
}

//--- Display

impl fmt::Display for Mx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:#}", self.preference, self.exchange)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen};
    use core::str::FromStr;

    #[test]
    fn mx_compose_parse() {
        let rdata = Mx::new(12, Name::from_str("mail.example.com").unwrap());
        test_rdlen(&rdata);
        test_compose_parse(&rdata, Mx::parse);
        assert_eq!(rdata.to_string(), "12 mail.example.com.");
    }

    #[test]
    fn mx_compressed_exchange() {
        let buf = b"\x07example\x03com\x00\x00\x0a\x04mail\xc0\x00";
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(13).unwrap();
        let mx = Mx::parse(&mut parser).unwrap();
        assert_eq!(mx.preference(), 10);
        assert_eq!(
            mx.exchange(),
            &Name::from_str("mail.example.com").unwrap()
        );
    }
}
