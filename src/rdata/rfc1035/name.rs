//! Record data type from RFC 1035 that consist of a single domain name.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::name::{Name, NameError};
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{Compose, Composer, Parse, ParseError};
use core::str::FromStr;
use core::{fmt, ops};
use octseq::parse::Parser;

//------------ Cname --------------------------------------------------------

name_type! {
    /// CNAME record data.
    ///
    /// The CNAME record specifies the canonical or primary name for domain
    /// name alias.
    ///
    /// The CNAME type is defined in [RFC 1035, section 3.3.1][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.1
    (Cname, CNAME, cname, into_cname)
}

//------------ Ns -----------------------------------------------------------

name_type! {
    /// NS record data.
    ///
    /// NS records specify hosts that are authoritative for a class and
    /// domain.
    ///
    /// The NS record type is defined in [RFC 1035, section 3.3.11][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.11
    (Ns, NS, nsdname, into_nsdname)
}

//------------ Ptr ----------------------------------------------------------

name_type! {
    /// PTR record data.
    ///
    /// PTR records are used in special domains to point to some other
    /// location in the domain space.
    ///
    /// The PTR record type is defined in [RFC 1035, section 3.3.12][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.12
    (Ptr, PTR, ptrdname, into_ptrdname)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen};

    #[test]
    fn cname_compose_parse() {
        let rdata = Cname::from_str("www.example.com").unwrap();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, Cname::parse);
        assert_eq!(rdata.to_string(), "www.example.com.");
    }

    #[test]
    fn ns_accessors() {
        let name = Name::from_str("ns1.example.com").unwrap();
        let rdata = Ns::new(name.clone());
        assert_eq!(rdata.nsdname(), &name);
        assert_eq!(rdata.label_count(), 4);
        assert_eq!(rdata.rtype(), Rtype::NS);
        assert_eq!(rdata.into_nsdname(), name);
    }

    #[test]
    fn ptr_compressed() {
        // Owner at 0, rdata with a pointer back to it at 13.
        let buf = b"\x07example\x03com\x00\x03www\xc0\x00";
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(13).unwrap();
        let ptr = Ptr::parse_rdata(Rtype::PTR, &mut parser)
            .unwrap()
            .unwrap();
        assert_eq!(
            ptr.ptrdname(),
            &Name::from_str("www.example.com").unwrap()
        );
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn ns_other_type() {
        let mut parser = Parser::from_static(b"\x00");
        assert_eq!(Ns::parse_rdata(Rtype::CNAME, &mut parser), Ok(None));
    }
}
