//! Creating and consuming data in wire format.

use core::fmt;
use octseq::builder::{OctetsBuilder, ShortBuf, Truncate};
use octseq::parse::{Parser, ShortInput};
use std::net::{Ipv4Addr, Ipv6Addr};

//------------ compose functions ---------------------------------------------

/// Composes some data prefixed by its length.
///
/// Two zero octets are appended as a placeholder, `op` composes the data
/// right behind them, and the placeholder is then overwritten with the
/// length of whatever `op` appended. If that length doesn’t fit into 16
/// bits, the function fails with [`ComposeError::LongRecordData`].
///
/// On error, the target is truncated back to where it was before the call.
pub fn compose_len_prefixed<Target, F>(
    target: &mut Target,
    op: F,
) -> Result<(), ComposeError>
where
    Target: Composer + ?Sized,
    F: FnOnce(&mut Target) -> Result<(), ComposeError>,
{
    let start = target.as_ref().len();
    target.append_slice(&[0; 2])?;
    let pos = start + 2;
    let res = op(target).and_then(|_| {
        u16::try_from(target.as_ref().len() - pos)
            .map_err(|_| ComposeError::LongRecordData)
    });
    match res {
        Ok(len) => {
            target.as_mut()[start..pos].copy_from_slice(&len.to_be_bytes());
            Ok(())
        }
        Err(err) => {
            target.truncate(start);
            Err(err)
        }
    }
}

//------------ Composer ------------------------------------------------------

/// An octets builder that whole messages can be composed into.
///
/// Composing record data requires going back and fixing up the length
/// prefix, hence the need for `AsMut<[u8]>` and `Truncate` on top of the
/// plain builder.
pub trait Composer:
    OctetsBuilder + AsRef<[u8]> + AsMut<[u8]> + Truncate
{
}

impl Composer for std::vec::Vec<u8> {}

#[cfg(feature = "bytes")]
impl Composer for bytes::BytesMut {}

//------------ Compose -------------------------------------------------------

/// A type that knows how to append itself in wire format.
pub trait Compose {
    /// The length of the composed value if it has a fixed size.
    const COMPOSE_LEN: u16 = 0;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

impl<'a, T: Compose + ?Sized> Compose for &'a T {
    const COMPOSE_LEN: u16 = T::COMPOSE_LEN;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose(target)
    }
}

impl Compose for u8 {
    const COMPOSE_LEN: u16 = 1;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&[*self])
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            const COMPOSE_LEN: u16 = ($type::BITS >> 3) as u16;

            fn compose<Target: OctetsBuilder + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                target.append_slice(&self.to_be_bytes())
            }
        }
    };
}

compose_to_be_bytes!(u16);
compose_to_be_bytes!(u32);

impl Compose for Ipv4Addr {
    const COMPOSE_LEN: u16 = 4;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.octets())
    }
}

impl Compose for Ipv6Addr {
    const COMPOSE_LEN: u16 = 16;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.octets())
    }
}

//------------ Parse ------------------------------------------------------

/// A type that can extract a value from a parser.
///
/// The parser always covers the complete message, even if it has been
/// limited to the record data of a single record. This is necessary
/// because domain names may refer to earlier parts of the message via
/// compression pointers.
///
/// All values produced are owned. Nothing keeps referring to the octets
/// of the parser once parsing is done.
pub trait Parse<'a, Octs: ?Sized>: Sized {
    /// Extracts a value from the beginning of `parser`.
    ///
    /// If parsing fails and an error is returned, the parser’s position
    /// should be considered to be undefined.
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError>;
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u8 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u8().map_err(Into::into)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u16 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u16_be().map_err(Into::into)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u32 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u32_be().map_err(Into::into)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Ipv4Addr {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 4];
        parser.parse_buf(&mut buf)?;
        Ok(buf.into())
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Ipv6Addr {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 16];
        parser.parse_buf(&mut buf)?;
        Ok(buf.into())
    }
}

/// Takes `len` octets from the parser and returns an owned copy of them.
pub fn parse_owned<Octs: AsRef<[u8]> + ?Sized>(
    parser: &mut Parser<Octs>,
    len: usize,
) -> Result<Vec<u8>, ParseError> {
    let res = parser.peek(len)?.to_vec();
    parser.advance(len)?;
    Ok(res)
}

//============ Error Types ===================================================

//------------ ComposeError --------------------------------------------------

/// An error happened while composing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeError {
    /// The target buffer ran out of space.
    ShortBuf,

    /// A section would contain more than 65535 entries.
    LongSection,

    /// The record data of a record is longer than 65535 octets.
    LongRecordData,

    /// The opcode doesn’t fit into the four bits of its header field.
    OpcodeRange,

    /// The response code doesn’t fit into the four bits of its header
    /// field.
    RcodeRange,

    /// Opaque record data was given for a record type that has its own
    /// record data type.
    KnownRtype,
}

impl<T: Into<ShortBuf>> From<T> for ComposeError {
    fn from(_: T) -> Self {
        ComposeError::ShortBuf
    }
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::ShortBuf => f.write_str("buffer size exceeded"),
            ComposeError::LongSection => {
                f.write_str("too many entries in section")
            }
            ComposeError::LongRecordData => f.write_str("long record data"),
            ComposeError::OpcodeRange => f.write_str("opcode out of range"),
            ComposeError::RcodeRange => f.write_str("rcode out of range"),
            ComposeError::KnownRtype => {
                f.write_str("opaque record data for a known record type")
            }
        }
    }
}

impl std::error::Error for ComposeError {}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),

    /// A compression pointer was not acceptable.
    Compression(CompressionError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

impl From<CompressionError> for ParseError {
    fn from(err: CompressionError) -> Self {
        ParseError::Compression(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => err.fmt(f),
            ParseError::Compression(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }

    /// Returns the diagnostics string.
    pub fn msg(self) -> &'static str {
        self.0
    }
}

//--- Display and Error

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//------------ CompressionError ----------------------------------------------

/// A compression pointer in a domain name could not be followed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionError {
    /// The pointer doesn’t point to a position before itself.
    ForwardPointer,

    /// The name uses more compression pointers than allowed.
    TooManyPointers,
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CompressionError::ForwardPointer => {
                f.write_str("compression pointer points forward")
            }
            CompressionError::TooManyPointers => {
                f.write_str("too many compression pointers")
            }
        }
    }
}

impl std::error::Error for CompressionError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compose_len_prefixed_backpatches() {
        let mut buf = vec![0xAA];
        compose_len_prefixed(&mut buf, |target| {
            target.append_slice(b"hello")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(buf, b"\xAA\x00\x05hello");
    }

    #[test]
    fn compose_len_prefixed_rewinds_on_error() {
        let mut buf = vec![0xAA];
        let res = compose_len_prefixed(&mut buf, |target| {
            target.append_slice(b"junk")?;
            Err(ComposeError::LongSection)
        });
        assert_eq!(res, Err(ComposeError::LongSection));
        assert_eq!(buf, b"\xAA");
    }

    #[test]
    fn compose_len_prefixed_long_data() {
        let mut buf = Vec::new();
        let res = compose_len_prefixed(&mut buf, |target| {
            target.append_slice(&[0; 0x1_0000])?;
            Ok(())
        });
        assert_eq!(res, Err(ComposeError::LongRecordData));
        assert!(buf.is_empty());
    }

    #[test]
    fn compose_len() {
        assert_eq!(u8::COMPOSE_LEN, 1);
        assert_eq!(u16::COMPOSE_LEN, 2);
        assert_eq!(u32::COMPOSE_LEN, 4);
    }

    #[test]
    fn parse_integers() {
        let mut parser = Parser::from_static(b"\x12\x34\x00\x00\x01\x2c\x07");
        assert_eq!(u16::parse(&mut parser), Ok(0x1234));
        assert_eq!(u32::parse(&mut parser), Ok(300));
        assert_eq!(u8::parse(&mut parser), Ok(7));
        assert_eq!(u8::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn parse_owned_copies() {
        let mut parser = Parser::from_static(b"abcd");
        assert_eq!(parse_owned(&mut parser, 3).unwrap(), b"abc");
        assert_eq!(parser.remaining(), 1);
        assert_eq!(parse_owned(&mut parser, 2), Err(ParseError::ShortInput));
    }
}
