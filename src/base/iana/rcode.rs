//! DNS response codes.
//!
//! The original DNS specification in [RFC 1035] specified four bits of the
//! message header as response code. Later extensions widen the code via
//! the OPT pseudo-record or TSIG, but those live outside the header and are
//! not represented here.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

//------------ Rcode --------------------------------------------------------

int_enum! {
    /// DNS Response Codes.
    ///
    /// The response code of a response indicates what happend on the
    /// server when trying to answer the query. The code is a 4 bit value
    /// and part of the header of a DNS message. Values above 15 can be
    /// represented by the type but are refused by the message builder.
    ///
    /// The values are defined in the DNS RCODEs [IANA registry].
    ///
    /// [IANA registry]: https://www.iana.org/assignments/dns-parameters/
    =>
    Rcode, u8;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// Format error.
    ///
    /// The name server was unable to interpret the query.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    ///
    /// The name server was unable to process this query due to a problem
    /// with the name server.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    ///
    /// The domain name given in the query does not exist at the name
    /// server.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    ///
    /// The name server does not support the requested kind of query.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    ///
    /// The name server refused to perform the operation requested by the
    /// query for policy reasons.
    (REFUSED => 5, "REFUSED")

    /// Name exists when it should not.
    ///
    /// Defined in [RFC 2136].
    ///
    /// [RFC 2136]: https://tools.ietf.org/html/rfc2136
    (YXDOMAIN => 6, "YXDOMAIN")

    /// RR set exists when it should not.
    (YXRRSET => 7, "YXRRSET")

    /// RR set that should exist does not.
    (NXRRSET => 8, "NXRRSET")

    /// Server not authoritative for zone or client not authorized.
    (NOTAUTH => 9, "NOTAUTH")

    /// Name not contained in zone.
    (NOTZONE => 10, "NOTZONE")
}

int_enum_str_with_decimal!(Rcode, u8, "unknown rcode");

impl Rcode {
    /// The largest value that fits into the header field.
    pub const MAX: u8 = 0x0F;

    /// Returns whether the value fits into the four bit header field.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::MAX
    }
}

impl Default for Rcode {
    fn default() -> Self {
        Rcode::NOERROR
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Rcode;

    #[test]
    fn range() {
        assert!(Rcode::NOTZONE.is_valid());
        assert!(!Rcode::from_int(16).is_valid());
    }

    #[test]
    fn str() {
        assert_eq!("nxdomain".parse::<Rcode>().unwrap(), Rcode::NXDOMAIN);
        assert_eq!(Rcode::SERVFAIL.to_string(), "SERVFAIL");
        assert_eq!(Rcode::from_int(13).to_string(), "13");
    }
}
