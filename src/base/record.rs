//! Resource Records.
//!
//! This module defines types related to DNS resource records. The most
//! complete type is [`Record`] which contains a complete record for a
//! certain record type. [`RecordHeader`] contains the data from a record’s
//! header, the first couple of octets common to all records. Finally,
//! [`Ttl`] is the record’s time to live.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use super::wire::{
    compose_len_prefixed, Compose, ComposeError, Composer, Parse, ParseError,
};
use core::time::Duration;
use core::{fmt, ops};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. The domain name is called the *owner* of the record.
///
/// The record type describes the kind of data the record holds, such as IP
/// addresses. The class, finally, describes which sort of network the
/// information is for. In practice, the only relevant class is IN, the
/// Internet.
///
/// The payload of a resource record is its data. Its purpose, meaning, and
/// format is determined by the record type. Because of this, the record
/// type is not stored separately but always taken from the data. A record
/// can therefore never claim a type that doesn’t match its data.
///
/// There is one more piece of data: the TTL or time to live. This value
/// says how long a record remains valid before it should be refreshed from
/// its original source.
///
/// The `Record` type is generic over the record data. When dealing with
/// records of mixed types, such as in a message, the data type is
/// [`AllRecordData`].
///
/// [`AllRecordData`]: crate::rdata::AllRecordData
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record<Data> {
    /// The owner of the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: Ttl,

    /// The record data. The value also specifies the record’s type.
    data: Data,
}

/// # Creation and Element Access
///
impl<Data> Record<Data> {
    /// Creates a new record from its parts.
    pub fn new(owner: Name, class: Class, ttl: Ttl, data: Data) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
        }
    }

    /// Creates a new record of class IN from its remaining parts.
    pub fn new_in(owner: Name, ttl: Ttl, data: Data) -> Self {
        Self::new(owner, Class::IN, ttl, data)
    }

    /// Returns a reference to the owner domain name.
    ///
    /// The owner of a record is the domain name that specifies the node in
    /// the DNS tree this record belongs to.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype
    where
        Data: RecordData,
    {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Sets the record’s class.
    pub fn set_class(&mut self, class: Class) {
        self.class = class
    }

    /// Returns the record’s time-to-live.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Sets the record’s time-to-live.
    pub fn set_ttl(&mut self, ttl: Ttl) {
        self.ttl = ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Returns a mutable reference to the record data.
    pub fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> Data {
        self.data
    }

    /// Trades the record for its owner name and data.
    pub fn into_owner_and_data(self) -> (Name, Data) {
        (self.owner, self.data)
    }

    /// Converts the record data into a different type.
    pub fn map_data<Other: From<Data>>(self) -> Record<Other> {
        Record::new(self.owner, self.class, self.ttl, self.data.into())
    }
}

/// # Parsing and Composing
///
impl<Data> Record<Data> {
    /// Parses a record from the beginning of `parser`.
    ///
    /// Returns `Ok(None)` if `Data` doesn’t accept the record’s type. The
    /// record data is skipped in this case.
    pub fn parse<'a, Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError>
    where
        Data: ParseRecordData<'a, Octs>,
    {
        RecordHeader::parse(parser)?.parse_into_record(parser)
    }

    /// Appends the wire format of the record to `target`.
    ///
    /// The owner and any names within the data are composed uncompressed.
    /// The record data length is filled in once the data has been composed.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError>
    where
        Data: ComposeRecordData,
    {
        compose_record(target, &self.owner, self.class, self.ttl, &self.data)
    }
}

/// Appends the wire format of a record given by its parts.
fn compose_record<Target, Data>(
    target: &mut Target,
    owner: &Name,
    class: Class,
    ttl: Ttl,
    data: &Data,
) -> Result<(), ComposeError>
where
    Target: Composer + ?Sized,
    Data: ComposeRecordData,
{
    owner.compose(target)?;
    data.rtype().compose(target)?;
    class.compose(target)?;
    ttl.compose(target)?;
    compose_len_prefixed(target, |target| {
        data.compose_rdata(target)?;
        Ok(())
    })
}

//--- From

impl<Data> From<(Name, Class, u32, Data)> for Record<Data> {
    fn from((owner, class, ttl, data): (Name, Class, u32, Data)) -> Self {
        Self::new(owner, class, Ttl::from_secs(ttl), data)
    }
}

impl<Data> From<(Name, u32, Data)> for Record<Data> {
    fn from((owner, ttl, data): (Name, u32, Data)) -> Self {
        Self::new(owner, Class::IN, Ttl::from_secs(ttl), data)
    }
}

//--- Display

impl<Data> fmt::Display for Record<Data>
where
    Data: RecordData + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:#} {} {} {} {}",
            self.owner,
            self.ttl.as_secs(),
            self.class,
            self.data.rtype(),
            self.data
        )
    }
}

//------------ ComposeRecord -------------------------------------------------

/// A helper trait allowing construction of records on the fly.
///
/// The trait’s primary users are the record section builders of the
/// [`MessageBuilder`]. It allows adding a [`Record`], a reference to one,
/// or a tuple of owner, optional class, TTL in seconds, and record data.
///
/// [`MessageBuilder`]: super::message_builder::MessageBuilder
pub trait ComposeRecord {
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError>;
}

impl<'a, T: ComposeRecord> ComposeRecord for &'a T {
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        (*self).compose_record(target)
    }
}

impl<Data: ComposeRecordData> ComposeRecord for Record<Data> {
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose(target)
    }
}

impl<Data: ComposeRecordData> ComposeRecord for (Name, Class, u32, Data) {
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        compose_record(
            target,
            &self.0,
            self.1,
            Ttl::from_secs(self.2),
            &self.3,
        )
    }
}

impl<Data: ComposeRecordData> ComposeRecord for (Name, u32, Data) {
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        compose_record(
            target,
            &self.0,
            Class::IN,
            Ttl::from_secs(self.1),
            &self.2,
        )
    }
}

//------------ RecordHeader --------------------------------------------------

/// The header of a resource record.
///
/// This type contains the first four fields of a resource record plus the
/// length of the record data that follows: the owner, record type, class,
/// TTL, and RDLENGTH. It is parsed separately so the record data can be
/// handed to the record data parser within a parser limited to exactly the
/// announced length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordHeader {
    owner: Name,
    rtype: Rtype,
    class: Class,
    ttl: Ttl,
    rdlen: u16,
}

impl RecordHeader {
    /// Creates a new record header from its components.
    pub fn new(
        owner: Name,
        rtype: Rtype,
        class: Class,
        ttl: Ttl,
        rdlen: u16,
    ) -> Self {
        RecordHeader {
            owner,
            rtype,
            class,
            ttl,
            rdlen,
        }
    }

    /// Returns a reference to the owner of the record.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type of the record.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the class of the record.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL of the record.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Returns the data length of the record.
    pub fn rdlen(&self) -> u16 {
        self.rdlen
    }

    /// Converts the header into an actual record.
    pub fn into_record<Data>(self, data: Data) -> Record<Data> {
        Record::new(self.owner, self.class, self.ttl, data)
    }
}

/// # Parsing and Composing
///
impl RecordHeader {
    /// Parses a record header from the beginning of `parser`.
    pub fn parse<'a, Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Self, ParseError> {
        Ok(RecordHeader::new(
            Name::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
            Ttl::parse(parser)?,
            u16::parse(parser)?,
        ))
    }

    /// Parses the remainder of the record and returns it.
    ///
    /// The method assumes that the parser is currently positioned right
    /// after the end of the record header. The record data is handed to
    /// `Data` in a parser limited to RDLENGTH octets. The outer parser is
    /// advanced past the record data in any case. If the data wants more
    /// octets than announced, parsing fails.
    pub fn parse_into_record<'a, Octs, Data>(
        self,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Record<Data>>, ParseError>
    where
        Octs: AsRef<[u8]> + ?Sized,
        Data: ParseRecordData<'a, Octs>,
    {
        let mut parser = parser.parse_parser(usize::from(self.rdlen))?;
        Ok(Data::parse_rdata(self.rtype, &mut parser)?
            .map(|data| self.into_record(data)))
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.owner.compose(target)?;
        self.rtype.compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.rdlen.compose(target)
    }
}

//------------ Ttl -----------------------------------------------------------

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 3600;
const SECS_PER_DAY: u32 = 86400;

/// A span of time, typically used to describe the time a given DNS record
/// is valid.
///
/// On the wire, the TTL is an unsigned 32 bit number of seconds. This type
/// wraps exactly that. Values can be created from seconds or larger units.
/// Signed values are converted via `TryFrom<i64>`, which rejects negative
/// numbers. Conversion from and to [`Duration`] is available, too.
///
/// `Ttl` implements `Default` by returning a zero-length `Ttl`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ttl(u32);

impl Ttl {
    /// A time-to-live of one second.
    pub const SECOND: Ttl = Ttl::from_secs(1);

    /// A time-to-live of one minute.
    pub const MINUTE: Ttl = Ttl::from_mins(1);

    /// A time-to-live of one hour.
    pub const HOUR: Ttl = Ttl::from_hours(1);

    /// A time-to-live of one day.
    pub const DAY: Ttl = Ttl::from_days(1);

    /// A duration of zero time.
    pub const ZERO: Ttl = Ttl::from_secs(0);

    /// The maximum theoretical time to live.
    pub const MAX: Ttl = Ttl::from_secs(u32::MAX);

    pub const COMPOSE_LEN: u16 = 4;

    /// Returns the total time to live in seconds.
    ///
    /// ```
    /// use dnscodec::base::Ttl;
    ///
    /// let ttl = Ttl::from_secs(120);
    /// assert_eq!(ttl.as_secs(), 120);
    /// ```
    #[must_use]
    pub const fn as_secs(&self) -> u32 {
        self.0
    }

    /// Returns the total time to live in minutes.
    #[must_use]
    pub const fn as_minutes(&self) -> u32 {
        self.0 / SECS_PER_MINUTE
    }

    /// Returns the total time to live in hours.
    #[must_use]
    pub const fn as_hours(&self) -> u32 {
        self.0 / SECS_PER_HOUR
    }

    /// Returns the total time to live in days.
    #[must_use]
    pub const fn as_days(&self) -> u16 {
        (self.0 / SECS_PER_DAY) as u16
    }

    /// Converts the `Ttl` into a [`Duration`].
    #[must_use]
    pub const fn into_duration(&self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }

    /// Creates a new `Ttl` from the specified number of seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Creates a new `Ttl` from the specified number of minutes.
    ///
    /// Saturates at [`Ttl::MAX`].
    #[must_use]
    pub const fn from_mins(minutes: u32) -> Self {
        Self(minutes.saturating_mul(SECS_PER_MINUTE))
    }

    /// Creates a new `Ttl` from the specified number of hours.
    ///
    /// Saturates at [`Ttl::MAX`].
    #[must_use]
    pub const fn from_hours(hours: u32) -> Self {
        Self(hours.saturating_mul(SECS_PER_HOUR))
    }

    /// Creates a new `Ttl` from the specified number of days.
    #[must_use]
    pub const fn from_days(days: u16) -> Self {
        Self((days as u32).saturating_mul(SECS_PER_DAY))
    }

    /// Creates a new `Ttl` from a [`Duration`].
    ///
    /// Sub-second precision is dropped and durations longer than
    /// [`Ttl::MAX`] saturate.
    #[must_use]
    pub const fn from_duration_lossy(duration: Duration) -> Self {
        let secs = duration.as_secs();
        if secs > u32::MAX as u64 {
            Self::MAX
        } else {
            Self(secs as u32)
        }
    }

    /// Returns whether the time to live is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked `Ttl` addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Ttl) -> Option<Ttl> {
        match self.0.checked_add(rhs.0) {
            Some(secs) => Some(Ttl(secs)),
            None => None,
        }
    }

    /// Saturating `Ttl` subtraction.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Ttl) -> Ttl {
        Ttl(self.0.saturating_sub(rhs.0))
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        u32::parse(parser).map(Ttl::from_secs)
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.0.compose(target)
    }
}

//--- Conversion

impl From<Ttl> for Duration {
    fn from(value: Ttl) -> Self {
        value.into_duration()
    }
}

impl From<u32> for Ttl {
    fn from(secs: u32) -> Self {
        Ttl::from_secs(secs)
    }
}

impl TryFrom<i64> for Ttl {
    type Error = TtlError;

    /// Converts a signed number of seconds into a `Ttl`.
    ///
    /// Negative values and values beyond the 32 bit range are rejected.
    fn try_from(secs: i64) -> Result<Self, Self::Error> {
        if secs < 0 {
            Err(TtlError::Negative)
        } else {
            u32::try_from(secs)
                .map(Ttl::from_secs)
                .map_err(|_| TtlError::Overflow)
        }
    }
}

//--- Add and Sub

impl ops::Add for Ttl {
    type Output = Ttl;

    fn add(self, rhs: Self) -> Self::Output {
        Ttl(self.0.saturating_add(rhs.0))
    }
}

impl ops::Sub for Ttl {
    type Output = Ttl;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

//--- Display

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

//------------ TtlError ------------------------------------------------------

/// A signed value could not be converted into a TTL.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TtlError {
    /// The value was negative.
    Negative,

    /// The value was larger than 32 bits.
    Overflow,
}

impl fmt::Display for TtlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TtlError::Negative => f.write_str("negative TTL"),
            TtlError::Overflow => f.write_str("TTL exceeds 32 bits"),
        }
    }
}

impl std::error::Error for TtlError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::UnknownRecordData;
    use crate::rdata::{AllRecordData, A};
    use core::str::FromStr;

    fn owner() -> Name {
        Name::from_str("a.example").unwrap()
    }

    #[test]
    fn compose_a() {
        let record = Record::new_in(
            owner(),
            Ttl::from_secs(300),
            A::from_octets(192, 0, 2, 1),
        );
        let mut buf = Vec::new();
        record.compose(&mut buf).unwrap();
        assert_eq!(
            buf,
            b"\x01a\x07example\0\x00\x01\x00\x01\x00\x00\x01\x2c\
              \x00\x04\xc0\x00\x02\x01"
        );
    }

    #[test]
    fn parse_a() {
        let buf = b"\x01a\x07example\0\x00\x01\x00\x01\x00\x00\x01\x2c\
                    \x00\x04\xc0\x00\x02\x01\xff";
        let mut parser = Parser::from_ref(buf.as_slice());
        let record = Record::<AllRecordData>::parse(&mut parser)
            .unwrap()
            .unwrap();
        assert_eq!(record.owner(), &owner());
        assert_eq!(record.rtype(), Rtype::A);
        assert_eq!(record.class(), Class::IN);
        assert_eq!(record.ttl(), Ttl::from_secs(300));
        assert_eq!(
            record.data(),
            &AllRecordData::from(A::from_octets(192, 0, 2, 1))
        );
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn parse_skips_other_types() {
        let buf = b"\x00\x00\x02\x00\x01\x00\x00\x00\x00\x00\x01\x00\x07";
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(Record::<A>::parse(&mut parser), Ok(None));
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn parse_short_rdata() {
        // RDLENGTH says 4 but only 3 octets follow.
        let buf = b"\x00\x00\x01\x00\x01\x00\x00\x00\x00\x00\x04\xc0\x00\x02";
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(
            Record::<AllRecordData>::parse(&mut parser),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn compose_long_rdata() {
        let record = Record::new_in(
            owner(),
            Ttl::ZERO,
            LongData(UnknownRecordData::parse_any(
                Rtype::NULL,
                &mut Parser::from_ref(vec![0u8; 0x1_0000].as_slice()),
            )
            .unwrap()),
        );
        let mut buf = Vec::new();
        assert_eq!(
            record.compose(&mut buf),
            Err(ComposeError::LongRecordData)
        );
    }

    /// Record data that skips the length check of `UnknownRecordData`.
    #[derive(Debug)]
    struct LongData(UnknownRecordData);

    impl RecordData for LongData {
        fn rtype(&self) -> Rtype {
            self.0.rtype()
        }
    }

    impl ComposeRecordData for LongData {
        fn rdlen(&self) -> Option<u16> {
            None
        }

        fn compose_rdata<Target: Composer + ?Sized>(
            &self,
            target: &mut Target,
        ) -> Result<(), Target::AppendError> {
            self.0.compose_rdata(target)
        }
    }

    #[test]
    fn display() {
        let record: Record<AllRecordData> = Record::from((
            owner(),
            3600,
            AllRecordData::from(A::from_octets(192, 0, 2, 1)),
        ));
        assert_eq!(record.to_string(), "a.example. 3600 IN A 192.0.2.1");
    }

    #[test]
    fn ttl_conversions() {
        assert_eq!(Ttl::from_mins(2).as_secs(), 120);
        assert_eq!(Ttl::from_hours(2).as_minutes(), 120);
        assert_eq!(Ttl::from_days(2).as_hours(), 48);
        assert_eq!(Ttl::DAY.as_days(), 1);
        assert_eq!(
            Ttl::from_secs(90).into_duration(),
            Duration::from_secs(90)
        );
        assert_eq!(
            Ttl::from_duration_lossy(Duration::from_millis(1500)),
            Ttl::SECOND
        );
        assert_eq!(
            Ttl::from_duration_lossy(Duration::from_secs(u64::MAX)),
            Ttl::MAX
        );
        assert_eq!(Ttl::MAX + Ttl::SECOND, Ttl::MAX);
        assert_eq!(Ttl::ZERO - Ttl::SECOND, Ttl::ZERO);
        assert_eq!(Ttl::SECOND.checked_add(Ttl::MAX), None);
    }

    #[test]
    fn ttl_from_signed() {
        assert_eq!(Ttl::try_from(300i64), Ok(Ttl::from_secs(300)));
        assert_eq!(Ttl::try_from(-1i64), Err(TtlError::Negative));
        assert_eq!(Ttl::try_from(1i64 << 32), Err(TtlError::Overflow));
        assert_eq!(
            Ttl::try_from(i64::from(u32::MAX)),
            Ok(Ttl::MAX)
        );
    }
}
