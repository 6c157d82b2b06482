//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind
    /// of information is represented by the record. Normal query includes
    /// the type of record information is requested for. A few aditional
    /// types, called query types, are defined as well and can only be used
    /// in questions. This type represents both these types.
    ///
    /// The currently assigned values are maintained in an [IANA registry].
    /// Only the more common ones have constants here. All other values can
    /// still be created via [`Rtype::from_int`].
    ///
    /// [IANA registry]: https://www.iana.org/assignments/dns-parameters/
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A null RR.
    ///
    /// (Experimental.)
    (NULL => 10, "NULL")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    ///
    /// See RFC 3596.
    (AAAA => 28, "AAAA")

    /// Server selection.
    ///
    /// See RFC 2782.
    (SRV => 33, "SRV")

    /// Non-terminal DNS name redirection.
    ///
    /// See RFC 6672.
    (DNAME => 39, "DNAME")

    /// OPT pseudo-RR.
    ///
    /// See RFC 6891.
    (OPT => 41, "OPT")

    /// Delegation signer.
    ///
    /// See RFC 4034.
    (DS => 43, "DS")

    /// RRSIG.
    ///
    /// See RFC 4034.
    (RRSIG => 46, "RRSIG")

    /// NSEC.
    ///
    /// See RFC 4034.
    (NSEC => 47, "NSEC")

    /// DNSKEY.
    ///
    /// See RFC 4034.
    (DNSKEY => 48, "DNSKEY")

    /// Service binding.
    ///
    /// See RFC 9460.
    (SVCB => 64, "SVCB")

    /// HTTPS service binding.
    ///
    /// See RFC 9460.
    (HTTPS => 65, "HTTPS")

    /// Incremental transfer.
    ///
    /// See RFC 1995.
    (IXFR => 251, "IXFR")

    /// Transfer of entire zone.
    ///
    /// See RFC 1035 and RFC 5936.
    (AXFR => 252, "AXFR")

    /// A request for all records the server/cache has available.
    ///
    /// See RFC 1035 and RFC 6895.
    (ANY => 255, "ANY")

    /// Certification Authority Restriction.
    ///
    /// See RFC 6844.
    (CAA => 257, "CAA")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16, "unknown record type");

impl Rtype {
    /// Returns true if this record type is a pseudo type.
    ///
    /// Pseudo types only ever appear in questions or carry data about the
    /// message itself rather than the domain name space.
    #[must_use]
    pub fn is_pseudo(self) -> bool {
        self == Rtype::OPT || self.0 >= 251 && self.0 <= 255
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Rtype;
    use core::str::FromStr;

    #[test]
    fn from_str() {
        assert_eq!(Rtype::from_str("aaaa").unwrap(), Rtype::AAAA);
        assert_eq!(Rtype::from_str("TYPE28").unwrap(), Rtype::AAAA);
        assert_eq!(Rtype::from_str("type65280").unwrap().to_int(), 65280);
        assert!(Rtype::from_str("TYPE65536").is_err());
        assert!(Rtype::from_str("BOGUS").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Rtype::MX.to_string(), "MX");
        assert_eq!(Rtype::from_int(65280).to_string(), "TYPE65280");
    }

    #[test]
    fn pseudo() {
        assert!(Rtype::OPT.is_pseudo());
        assert!(Rtype::ANY.is_pseudo());
        assert!(!Rtype::TXT.is_pseudo());
        assert!(!Rtype::CAA.is_pseudo());
    }
}
