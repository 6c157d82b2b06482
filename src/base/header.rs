//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the
//! header. Its content and format are defined in section 4.1.1 of
//! [RFC 1035].
//!
//! In order to reflect the fact that the section counts are a property of
//! the message’s content whereas the other elements of the header section
//! can be freely chosen, the whole header has been split into two separate
//! types: [`Header`] contains the freely choosable part at the beginning
//! and [`HeaderCounts`] contains the section counts. In addition, the
//! [`HeaderSection`] type wraps both of them into a single type which is
//! what actually appears on the wire.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::iana::{Opcode, Rcode};
use super::wire::{Compose, ComposeError, Parse, ParseError};
use core::{fmt, str::FromStr};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Header --------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID, opcode, rcode, and the various flags. The
/// data is layed out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Methods are available for accessing each of these fields. For more
/// information on the fields, see these methods in the section
/// [Field Access] below.
///
/// The opcode and rcode types can hold values wider than their four bit
/// fields. Such a header can be created but composing it fails.
///
/// The basic structure and most of the fields re defined in [RFC 1035],
/// except for the AD and CD flags, which are defined in [RFC 4035].
///
/// [Field Access]: #field-access
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 4035]: https://tools.ietf.org/html/rfc4035
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    id: u16,
    flags: Flags,
    opcode: Opcode,
    rcode: Rcode,
}

/// # Creation
///
impl Header {
    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::QUERY`] and the response code will be
    /// [`Rcode::NOERROR`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Defines a getter and a setter for each of the given flag bits.
macro_rules! flag_accessors {
    ( $( ($flag:ident, $set_flag:ident, $name:literal), )* ) => {
        $(
            #[doc = concat!("Returns whether the ", $name, " bit is set.")]
            pub fn $flag(self) -> bool {
                self.flags.$flag
            }

            #[doc = concat!("Sets the value of the ", $name, " bit.")]
            pub fn $set_flag(&mut self, set: bool) {
                self.flags.$flag = set
            }
        )*
    };
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    ///
    /// When choosing an ID for an outgoing message, make sure it is random
    /// to avoid spoofing through guessing the message ID. The method
    /// [`set_random_id`][Self::set_random_id] can be used for this purpose.
    pub fn id(self) -> u16 {
        self.id
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.id = value
    }

    /// Sets the value of the ID field to a randomly chosen number.
    #[cfg(feature = "rand")]
    pub fn set_random_id(&mut self) {
        self.set_id(::rand::random())
    }

    /// Returns whether the [QR](Flags::qr) bit is set.
    pub fn qr(self) -> bool {
        self.flags.qr
    }

    /// Sets the value of the [QR](Flags::qr) bit.
    pub fn set_qr(&mut self, set: bool) {
        self.flags.qr = set
    }

    /// Returns the value of the Opcode field.
    ///
    /// This field specifies the kind of query a message contains. See
    /// the [`Opcode`] type for more information on the possible values and
    /// their meaning. Normal queries have the value [`Opcode::QUERY`]
    /// which is also the default value when creating a new header.
    pub fn opcode(self) -> Opcode {
        self.opcode
    }

    /// Sets the value of the opcode field.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.opcode = opcode
    }

    /// Returns all flags contained in the header.
    ///
    /// This is a virtual field composed of all the flag bits that are
    /// present in the header. The returned [`Flags`] type can be useful
    /// when you’re working with all flags, rather than a single one, which
    /// can be easily obtained from the header directly.
    pub fn flags(self) -> Flags {
        self.flags
    }

    /// Sets all flag bits.
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags
    }

    flag_accessors! {
        (aa, set_aa, "AA"),
        (tc, set_tc, "TC"),
        (rd, set_rd, "RD"),
        (ra, set_ra, "RA"),
        (z, set_z, "Z"),
        (ad, set_ad, "AD"),
        (cd, set_cd, "CD"),
    }

    /// Returns the value of the RCODE field.
    ///
    /// The *response code* is used in a response to indicate what happened
    /// when processing the query. See the [`Rcode`] type for information on
    /// possible values and their meaning.
    pub fn rcode(self) -> Rcode {
        self.rcode
    }

    /// Sets the value of the RCODE field.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.rcode = rcode
    }
}

/// # Parsing and Composing
///
impl Header {
    /// The length of the composed header.
    pub const COMPOSE_LEN: u16 = 4;

    /// Parses the header from the beginning of `parser`.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let id = u16::parse(parser)?;
        let bits = u16::parse(parser)?;
        let bit = |shift: u16| bits & (1 << shift) != 0;
        Ok(Header {
            id,
            flags: Flags {
                qr: bit(15),
                aa: bit(10),
                tc: bit(9),
                rd: bit(8),
                ra: bit(7),
                z: bit(6),
                ad: bit(5),
                cd: bit(4),
            },
            opcode: Opcode::from_int(((bits >> 11) & 0x0F) as u8),
            rcode: Rcode::from_int((bits & 0x0F) as u8),
        })
    }

    /// Appends the wire format of the header to `target`.
    ///
    /// Fails if either the opcode or the rcode don’t fit into their four
    /// bit fields.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        if !self.opcode.is_valid() {
            return Err(ComposeError::OpcodeRange);
        }
        if !self.rcode.is_valid() {
            return Err(ComposeError::RcodeRange);
        }
        let flag = |set: bool, shift: u16| u16::from(set) << shift;
        let bits = flag(self.flags.qr, 15)
            | u16::from(self.opcode.to_int()) << 11
            | flag(self.flags.aa, 10)
            | flag(self.flags.tc, 9)
            | flag(self.flags.rd, 8)
            | flag(self.flags.ra, 7)
            | flag(self.flags.z, 6)
            | flag(self.flags.ad, 5)
            | flag(self.flags.cd, 4)
            | u16::from(self.rcode.to_int());
        self.id.compose(target)?;
        bits.compose(target)?;
        Ok(())
    }
}

//------------ Flags ---------------------------------------------------

/// The flags contained in the DNS message header.
///
/// This is a utility type that makes it easier to work with flags. It
/// contains only standard DNS message flags that are part of the
/// [`Header`], i.e., EDNS flags are not included.
///
/// This type has a text notation and can be created from it as well. Each
/// flags that is set is represented by a two-letter token, which is the
/// uppercase version of the flag name.  If mutliple flags are set, the
/// tokens are separated by space.
///
/// ```
/// use core::str::FromStr;
/// use dnscodec::base::header::Flags;
///
/// let flags = Flags::from_str("QR AA").unwrap();
/// assert!(flags.qr && flags.aa);
/// assert_eq!(format!("{}", flags), "QR AA");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Query response: the message is a response rather than a query.
    pub qr: bool,

    /// Authoritative answer, only meaningful in responses.
    pub aa: bool,

    /// Truncation: the message didn’t fit the transport.
    pub tc: bool,

    /// Recursion desired. Copied from the query into the response.
    pub rd: bool,

    /// Recursion available, only meaningful in responses.
    pub ra: bool,

    /// The reserved bit.
    ///
    /// It should be unset but is kept as received so a parsed header
    /// composes into the same octets.
    pub z: bool,

    /// Authentic data as defined in [RFC 4035].
    ///
    /// [RFC 4035]: https://tools.ietf.org/html/rfc4035
    pub ad: bool,

    /// Checking disabled as defined in [RFC 4035].
    ///
    /// [RFC 4035]: https://tools.ietf.org/html/rfc4035
    pub cd: bool,
}

/// # Creation and Conversion
///
impl Flags {
    /// Creates new flags.
    ///
    /// All flags will be unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

//--- Display & FromStr

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tokens = [
            (self.qr, "QR"),
            (self.aa, "AA"),
            (self.tc, "TC"),
            (self.rd, "RD"),
            (self.ra, "RA"),
            (self.z, "Z"),
            (self.ad, "AD"),
            (self.cd, "CD"),
        ];
        let mut sep = "";
        for (_, token) in tokens.iter().filter(|(set, _)| *set) {
            write!(f, "{}{}", sep, token)?;
            sep = " ";
        }
        Ok(())
    }
}

impl FromStr for Flags {
    type Err = FlagsFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::new();
        for token in s.to_uppercase().split(' ') {
            match token {
                "QR" => flags.qr = true,
                "AA" => flags.aa = true,
                "TC" => flags.tc = true,
                "RD" => flags.rd = true,
                "RA" => flags.ra = true,
                "Z" => flags.z = true,
                "AD" => flags.ad = true,
                "CD" => flags.cd = true,
                "" => {}
                _ => return Err(FlagsFromStrError),
            }
        }
        Ok(flags)
    }
}

//------------ HeaderCounts -------------------------------------------------

/// The section count part of the header section of a DNS message.
///
/// This part consists of four 16 bit counters for the number of entries in
/// the four sections of a DNS message.
///
/// The counters are arranged in the same order as the sections themselves:
/// QDCOUNT for the question section, ANCOUNT for the answer section,
/// NSCOUNT for the authority section, and ARCOUNT for the additional
/// section. These are defined in [RFC 1035].
///
/// For each field there are three methods for getting, setting, and
/// incrementing. Incrementing fails once the counter would leave its
/// 16 bit range.
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderCounts {
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl HeaderCounts {
    /// Creates a new value with all counters set to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates counts for sections of the given lengths.
    ///
    /// Fails if any of the lengths is larger than 65535.
    pub fn from_lens(
        qd: usize,
        an: usize,
        ns: usize,
        ar: usize,
    ) -> Result<Self, ComposeError> {
        let conv = |len: usize| {
            u16::try_from(len).map_err(|_| ComposeError::LongSection)
        };
        Ok(HeaderCounts {
            qdcount: conv(qd)?,
            ancount: conv(an)?,
            nscount: conv(ns)?,
            arcount: conv(ar)?,
        })
    }

    /// Returns the total number of entries in all four sections.
    pub fn total(self) -> usize {
        usize::from(self.qdcount)
            + usize::from(self.ancount)
            + usize::from(self.nscount)
            + usize::from(self.arcount)
    }
}

/// # Field Access
///
impl HeaderCounts {
    /// Returns the value of the QDCOUNT field.
    ///
    /// This field contains the number of questions in the first
    /// section of the message, normally the question section.
    pub fn qdcount(self) -> u16 {
        self.qdcount
    }

    /// Sets the value of the QDCOUNT field.
    pub fn set_qdcount(&mut self, value: u16) {
        self.qdcount = value
    }

    /// Increases the value of the QDCOUNT field by one.
    pub fn inc_qdcount(&mut self) -> Result<(), ComposeError> {
        Self::inc(&mut self.qdcount)
    }

    /// Returns the value of the ANCOUNT field.
    ///
    /// This field contains the number of resource records in the second
    /// section of the message, normally the answer section.
    pub fn ancount(self) -> u16 {
        self.ancount
    }

    /// Sets the value of the ANCOUNT field.
    pub fn set_ancount(&mut self, value: u16) {
        self.ancount = value
    }

    /// Increases the value of the ANCOUNT field by one.
    pub fn inc_ancount(&mut self) -> Result<(), ComposeError> {
        Self::inc(&mut self.ancount)
    }

    /// Returns the value of the NSCOUNT field.
    ///
    /// This field contains the number of resource records in the third
    /// section of the message, normally the authority section.
    pub fn nscount(self) -> u16 {
        self.nscount
    }

    /// Sets the value of the NSCOUNT field.
    pub fn set_nscount(&mut self, value: u16) {
        self.nscount = value
    }

    /// Increases the value of the NSCOUNT field by one.
    pub fn inc_nscount(&mut self) -> Result<(), ComposeError> {
        Self::inc(&mut self.nscount)
    }

    /// Returns the value of the ARCOUNT field.
    ///
    /// This field contains the number of resource records in the fourth
    /// section of the message, normally the additional section.
    pub fn arcount(self) -> u16 {
        self.arcount
    }

    /// Sets the value of the ARCOUNT field.
    pub fn set_arcount(&mut self, value: u16) {
        self.arcount = value
    }

    /// Increases the value of the ARCOUNT field by one.
    pub fn inc_arcount(&mut self) -> Result<(), ComposeError> {
        Self::inc(&mut self.arcount)
    }

    fn inc(count: &mut u16) -> Result<(), ComposeError> {
        *count = count.checked_add(1).ok_or(ComposeError::LongSection)?;
        Ok(())
    }
}

/// # Parsing and Composing
///
impl HeaderCounts {
    /// The length of the composed counts.
    pub const COMPOSE_LEN: u16 = 8;

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Ok(HeaderCounts {
            qdcount: u16::parse(parser)?,
            ancount: u16::parse(parser)?,
            nscount: u16::parse(parser)?,
            arcount: u16::parse(parser)?,
        })
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.qdcount.compose(target)?;
        self.ancount.compose(target)?;
        self.nscount.compose(target)?;
        self.arcount.compose(target)
    }
}

//------------ HeaderSection -------------------------------------------------

/// The complete header section of a DNS message.
///
/// Consists of a [`Header`] directly followed by a [`HeaderCounts`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct HeaderSection {
    header: Header,
    counts: HeaderCounts,
}

impl HeaderSection {
    /// The length of the header section on the wire.
    pub const LEN: usize = 12;

    /// Creates a new header section from its two parts.
    #[must_use]
    pub fn new(header: Header, counts: HeaderCounts) -> Self {
        HeaderSection { header, counts }
    }

    /// Returns a reference to the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns a reference to the header counts.
    pub fn counts(&self) -> &HeaderCounts {
        &self.counts
    }

    /// Returns a mutable reference to the header counts.
    pub fn counts_mut(&mut self) -> &mut HeaderCounts {
        &mut self.counts
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Ok(HeaderSection {
            header: Header::parse(parser)?,
            counts: HeaderCounts::parse(parser)?,
        })
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.header.compose(target)?;
        self.counts.compose(target)?;
        Ok(())
    }
}

//--- AsRef and AsMut

impl AsRef<Header> for HeaderSection {
    fn as_ref(&self) -> &Header {
        &self.header
    }
}

impl AsMut<Header> for HeaderSection {
    fn as_mut(&mut self) -> &mut Header {
        &mut self.header
    }
}

impl AsRef<HeaderCounts> for HeaderSection {
    fn as_ref(&self) -> &HeaderCounts {
        &self.counts
    }
}

impl AsMut<HeaderCounts> for HeaderSection {
    fn as_mut(&mut self) -> &mut HeaderCounts {
        &mut self.counts
    }
}

//============ Error Types ===================================================

//------------ FlagsFromStrError --------------------------------------------

/// An error happened when converting string to flags.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FlagsFromStrError;

impl fmt::Display for FlagsFromStrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal flags token")
    }
}

impl std::error::Error for FlagsFromStrError {}

//============ Testing ======================================================

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! test_field {
        ($get:ident, $set:ident, $default:expr, $($value:expr),*) => {
            $({
                let mut h = Header::new();
                assert_eq!(h.$get(), $default);
                h.$set($value);
                assert_eq!(h.$get(), $value);
            })*
        }
    }

    #[test]
    fn header() {
        test_field!(id, set_id, 0, 0x1234);
        test_field!(qr, set_qr, false, true, false);
        test_field!(opcode, set_opcode, Opcode::QUERY, Opcode::NOTIFY);
        test_field!(
            flags,
            set_flags,
            Flags::new(),
            Flags {
                qr: true,
                ..Default::default()
            }
        );
        test_field!(aa, set_aa, false, true, false);
        test_field!(tc, set_tc, false, true, false);
        test_field!(rd, set_rd, false, true, false);
        test_field!(ra, set_ra, false, true, false);
        test_field!(z, set_z, false, true, false);
        test_field!(ad, set_ad, false, true, false);
        test_field!(cd, set_cd, false, true, false);
        test_field!(rcode, set_rcode, Rcode::NOERROR, Rcode::REFUSED);
    }

    fn compose(header: Header) -> Vec<u8> {
        let mut buf = Vec::new();
        header.compose(&mut buf).unwrap();
        buf
    }

    #[test]
    fn compose_bits() {
        let mut h = Header::new();
        h.set_id(0x1234);
        h.set_rd(true);
        assert_eq!(compose(h), b"\x12\x34\x01\x00");

        h.set_qr(true);
        h.set_opcode(Opcode::UPDATE);
        h.set_aa(true);
        h.set_ra(true);
        h.set_rcode(Rcode::NXDOMAIN);
        assert_eq!(compose(h), b"\x12\x34\xad\x83");

        let mut h = Header::new();
        h.set_tc(true);
        h.set_z(true);
        h.set_ad(true);
        h.set_cd(true);
        assert_eq!(compose(h), b"\x00\x00\x02\x70");
    }

    #[test]
    fn parse_composed() {
        let mut h = Header::new();
        h.set_id(0xbeef);
        h.set_flags(Flags::from_str("QR AA TC RD RA Z AD CD").unwrap());
        h.set_opcode(Opcode::from_int(15));
        h.set_rcode(Rcode::from_int(15));
        let buf = compose(h);
        assert_eq!(buf, b"\xbe\xef\xff\xff");
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(Header::parse(&mut parser), Ok(h));
    }

    #[test]
    fn compose_out_of_range() {
        let mut buf = Vec::new();
        let mut h = Header::new();
        h.set_opcode(Opcode::from_int(16));
        assert_eq!(h.compose(&mut buf), Err(ComposeError::OpcodeRange));
        let mut h = Header::new();
        h.set_rcode(Rcode::from_int(0x10));
        assert_eq!(h.compose(&mut buf), Err(ComposeError::RcodeRange));
        assert!(buf.is_empty());
    }

    #[test]
    fn counts() {
        let mut c = HeaderCounts::from_lens(1, 2, 3, 4).unwrap();
        assert_eq!(c.qdcount(), 1);
        assert_eq!(c.ancount(), 2);
        assert_eq!(c.nscount(), 3);
        assert_eq!(c.arcount(), 4);
        assert_eq!(c.total(), 10);
        c.inc_qdcount().unwrap();
        c.inc_ancount().unwrap();
        c.inc_nscount().unwrap();
        c.inc_arcount().unwrap();
        let mut buf = Vec::new();
        c.compose(&mut buf).unwrap();
        assert_eq!(buf, b"\x00\x02\x00\x03\x00\x04\x00\x05");
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(HeaderCounts::parse(&mut parser), Ok(c));
    }

    #[test]
    fn count_overflow() {
        let mut c = HeaderCounts::new();
        c.set_arcount(0xFFFF);
        assert_eq!(c.inc_arcount(), Err(ComposeError::LongSection));
        assert_eq!(c.arcount(), 0xFFFF);
        assert_eq!(
            HeaderCounts::from_lens(0, 0x1_0000, 0, 0),
            Err(ComposeError::LongSection)
        );
    }

    #[test]
    fn short_header_section() {
        let mut parser = Parser::from_static(b"\x12\x34\x01\x00\x00\x01");
        assert_eq!(
            HeaderSection::parse(&mut parser),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn flags_display() {
        let f = Flags::new();
        assert_eq!(format!("{}", f), "");
        let f = Flags {
            qr: true,
            aa: true,
            tc: true,
            rd: true,
            ra: true,
            z: false,
            ad: true,
            cd: true,
        };
        assert_eq!(format!("{}", f), "QR AA TC RD RA AD CD");
        let f = Flags {
            qr: true,
            rd: true,
            ..Default::default()
        };
        assert_eq!(format!("{}", f), "QR RD");
    }

    #[test]
    fn flags_from_str() {
        let f1 = Flags::from_str("").unwrap();
        let f2 = Flags::new();
        assert_eq!(f1, f2);

        let f1 = Flags::from_str("qr rd").unwrap();
        let f2 = Flags {
            qr: true,
            rd: true,
            ..Default::default()
        };
        assert_eq!(f1, f2);

        assert!(Flags::from_str("XY").is_err());
    }
}
