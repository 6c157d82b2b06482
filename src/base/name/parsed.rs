//! Parsing domain names from DNS messages.
//!
//! This is a private module. The parsing function is exposed through the
//! [`Parse`] impl of [`Name`].

use super::dname::Name;
use super::label::LabelType;
use super::{MAX_NAME_LEN, MAX_POINTER_HOPS};
use crate::base::wire::{CompressionError, Parse, ParseError};
use octseq::parse::Parser;

//------------ Parse for Name ------------------------------------------------

/// Parses a possibly compressed domain name.
///
/// The parser may be limited to part of a message, such as the record data
/// of a single record. Compression pointers still refer to the complete
/// message. After a successful parse, the parser is positioned right after
/// the name as it appears at the original position, i.e., after the root
/// label or the first compression pointer.
///
/// The name is decompressed into an owned value. A compression pointer must
/// point to a position strictly before the pointer itself and no more than
/// [`MAX_POINTER_HOPS`] pointers are followed for one name. Both rules
/// guarantee that parsing terminates even for malicious messages.
impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Name {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        let mut target = Vec::new();

        // Phase One: No compression pointers have been found yet.
        //
        // Parse labels. If we encounter the root label, we are done.
        // Otherwise continue to phase two.
        let mut ptr = loop {
            match LabelType::parse(parser)? {
                LabelType::Normal(0) => {
                    target.push(0);
                    return Ok(Name::from_wire_unchecked(target));
                }
                LabelType::Normal(label_len) => {
                    push_label(&mut target, parser, label_len)?;
                }
                LabelType::Compressed(ptr) => {
                    break ptr;
                }
            }
        };

        // Phase Two: Compression has occured.
        //
        // The actual parser has already reached the end of the name. We
        // jump around the complete message on a fresh parser from here.
        let mut ptr_pos = parser.pos() - 2;
        let mut parser = Parser::from_ref(parser.octets_ref());
        let mut hops = 0;
        loop {
            // Only pointers to somewhere before themselves are allowed.
            // A pointer can still jump back to labels that lead to itself
            // again. Such a loop ends at the hop limit or once the name
            // exceeds its maximum length.
            if ptr >= ptr_pos {
                return Err(CompressionError::ForwardPointer.into());
            }
            hops += 1;
            if hops > MAX_POINTER_HOPS {
                return Err(CompressionError::TooManyPointers.into());
            }
            parser.seek(ptr)?;
            ptr = loop {
                match LabelType::parse(&mut parser)? {
                    LabelType::Normal(0) => {
                        target.push(0);
                        return Ok(Name::from_wire_unchecked(target));
                    }
                    LabelType::Normal(label_len) => {
                        push_label(&mut target, &mut parser, label_len)?;
                    }
                    LabelType::Compressed(ptr) => {
                        ptr_pos = parser.pos() - 2;
                        break ptr;
                    }
                }
            };
        }
    }
}

/// Takes a label of `len` octets from `parser` and appends it to `target`.
fn push_label<Octs: AsRef<[u8]> + ?Sized>(
    target: &mut Vec<u8>,
    parser: &mut Parser<Octs>,
    len: usize,
) -> Result<(), ParseError> {
    // Leave room for the root label.
    if target.len() + len + 2 > MAX_NAME_LEN {
        return Err(ParseError::form_error("long domain name"));
    }
    target.push(len as u8);
    target.extend_from_slice(parser.peek(len)?);
    parser.advance(len)?;
    Ok(())
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::wire::FormError;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn parse_uncompressed() {
        let mut parser =
            Parser::from_static(b"\x03www\x07example\x03com\0\x01");
        assert_eq!(Name::parse(&mut parser), Ok(name("www.example.com")));
        assert_eq!(parser.remaining(), 1);

        let mut parser = Parser::from_static(b"\0");
        assert_eq!(Name::parse(&mut parser), Ok(Name::root()));
    }

    #[test]
    fn parse_compressed() {
        // "example.com" at 2, "www" + pointer at 15, pointer only at 21.
        let buf = b"\xff\xff\x07example\x03com\0\x03www\xc0\x02\xc0\x0f";
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(2).unwrap();
        assert_eq!(Name::parse(&mut parser), Ok(name("example.com")));
        assert_eq!(Name::parse(&mut parser), Ok(name("www.example.com")));
        assert_eq!(parser.pos(), 21);
        assert_eq!(Name::parse(&mut parser), Ok(name("www.example.com")));
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn parse_within_limited_parser() {
        // The pointer reaches out of the sub-parser into the message.
        let buf = b"\x07example\0\x03www\xc0\x00";
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(9).unwrap();
        let mut sub = parser.parse_parser(6).unwrap();
        assert_eq!(Name::parse(&mut sub), Ok(name("www.example")));
        assert_eq!(sub.remaining(), 0);
    }

    #[test]
    fn reject_self_pointer() {
        let mut parser = Parser::from_static(b"\xc0\x00");
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::Compression(CompressionError::ForwardPointer))
        );
    }

    #[test]
    fn reject_forward_pointer() {
        let mut parser = Parser::from_static(b"\x01a\xc0\x05\x00\x01b\0");
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::Compression(CompressionError::ForwardPointer))
        );
    }

    #[test]
    fn reject_loop() {
        // A pointer at 2 to 0 and a label at 0 pointing to 2 again.
        let mut parser =
            Parser::from_static(b"\x00\x00\xc0\x04\x01a\xc0\x02");
        parser.advance(4).unwrap();
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::Compression(CompressionError::ForwardPointer))
        );
    }

    #[test]
    fn reject_backward_loop() {
        // The pointer at 2 leads back to the label before it.
        let mut parser = Parser::from_static(b"\x01a\xc0\x00");
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::Form(FormError::new("long domain name")))
        );
    }

    #[test]
    fn reject_too_many_pointers() {
        // A long chain of pointers each pointing to the one before it.
        let mut buf = vec![0u8];
        for i in 0..=MAX_POINTER_HOPS {
            let target = if i == 0 { 0 } else { 1 + (i - 1) * 2 };
            buf.push(0xc0 | (target >> 8) as u8);
            buf.push(target as u8);
        }
        let start = buf.len() - 2;
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(start).unwrap();
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::Compression(CompressionError::TooManyPointers))
        );

        // One hop less is fine.
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(start - 2).unwrap();
        assert_eq!(Name::parse(&mut parser), Ok(Name::root()));
    }

    #[test]
    fn reject_bad_label_type() {
        let mut parser = Parser::from_static(b"\x01a\x40");
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::Form(FormError::new("invalid label type")))
        );
    }

    #[test]
    fn reject_long_name() {
        let mut buf = Vec::new();
        for _ in 0..4 {
            buf.push(63);
            buf.extend_from_slice(&[b'x'; 63]);
        }
        buf.push(0);
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::Form(FormError::new("long domain name")))
        );

        // Length limits apply across compression pointers, too.
        let mut buf = Vec::new();
        for _ in 0..3 {
            buf.push(63);
            buf.extend_from_slice(&[b'x'; 63]);
        }
        buf.push(0);
        let start = buf.len();
        buf.push(63);
        buf.extend_from_slice(&[b'x'; 63]);
        buf.extend_from_slice(b"\xc0\x00");
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(start).unwrap();
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::Form(FormError::new("long domain name")))
        );
    }

    #[test]
    fn short_input() {
        let mut parser = Parser::from_static(b"\x03ww");
        assert_eq!(Name::parse(&mut parser), Err(ParseError::ShortInput));
        let mut parser = Parser::from_static(b"\x03www");
        assert_eq!(Name::parse(&mut parser), Err(ParseError::ShortInput));
        let mut parser = Parser::from_static(b"\xc0");
        assert_eq!(Name::parse(&mut parser), Err(ParseError::ShortInput));
    }
}
