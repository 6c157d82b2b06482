//! DNS OpCodes.

//------------ Opcode --------------------------------------------------------

int_enum! {
    /// DNS OpCodes.
    ///
    /// The opcode specifies the kind of query to be performed.
    ///
    /// The opcode and its initial set of values are defined in [RFC 1035].
    /// Additional values have been defined over time. All currently
    /// assigned values can be found in the [IANA registry].
    ///
    /// In the message header, the opcode occupies four bits. The type
    /// itself can hold larger values, which the message builder refuses
    /// to compose.
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    /// [IANA registry]: https://www.iana.org/assignments/dns-parameters/
    =>
    Opcode, u8;

    /// A standard query (0).
    ///
    /// This query requests all records matching the name, class, and record
    /// type given in the query’s question section.
    (QUERY => 0, "QUERY")

    /// An inverse query (IQUERY) (1, obsolete).
    ///
    /// This value was defined in [RFC 1035] and obsoleted by [RFC 3425].
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    /// [RFC 3425]: https://tools.ietf.org/html/rfc3425
    (IQUERY => 1, "IQUERY")

    /// A server status request (2).
    (STATUS => 2, "STATUS")

    /// A NOTIFY query (4).
    ///
    /// NOTIFY queries allow primary servers to inform secondary servers
    /// when a zone has changed. Defined in [RFC 1996].
    ///
    /// [RFC 1996]: https://tools.ietf.org/html/rfc1996
    (NOTIFY => 4, "NOTIFY")

    /// An UPDATE query (5).
    ///
    /// Defined in [RFC 2136].
    ///
    /// [RFC 2136]: https://tools.ietf.org/html/rfc2136
    (UPDATE => 5, "UPDATE")

    /// DNS Stateful operations (DSO) (6).
    ///
    /// Defined in [RFC 8490].
    ///
    /// [RFC 8490]: https://tools.ietf.org/html/rfc8490
    (DSO => 6, "DSO")
}

int_enum_str_with_decimal!(Opcode, u8, "unknown opcode");

impl Opcode {
    /// The largest value that fits into the header field.
    pub const MAX: u8 = 0x0F;

    /// Returns whether the value fits into the four bit header field.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::MAX
    }
}

impl Default for Opcode {
    fn default() -> Self {
        Opcode::QUERY
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Opcode;

    #[test]
    fn range() {
        assert!(Opcode::QUERY.is_valid());
        assert!(Opcode::from_int(15).is_valid());
        assert!(!Opcode::from_int(16).is_valid());
    }

    #[test]
    fn str() {
        assert_eq!("notify".parse::<Opcode>().unwrap(), Opcode::NOTIFY);
        assert_eq!("12".parse::<Opcode>().unwrap(), Opcode::from_int(12));
        assert_eq!(Opcode::from_int(12).to_string(), "12");
        assert_eq!(Opcode::UPDATE.to_string(), "UPDATE");
        assert!("bogus".parse::<Opcode>().is_err());
    }
}
