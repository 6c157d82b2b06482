//! Building and parsing DNS messages.
//!
//! This crate converts DNS messages between their wire format as defined
//! in [RFC 1035] and a set of owned Rust types. It does nothing else: there
//! is no networking, no resolving, and no zone file handling. Transport of
//! the octets produced and consumed here is up to the user.
//!
//! The two entry points are [`build`] which turns a [`Message`] into
//! octets and [`parse`] which does the reverse. Both are pure functions
//! that can be used concurrently from as many threads as you like.
//!
//! ```
//! use std::str::FromStr;
//! use dnscodec::base::{Message, Name, Rtype};
//!
//! let query = Message::query(
//!     0x1234, Name::from_str("example.com").unwrap(), Rtype::AAAA
//! );
//! let octets = dnscodec::build(&query).unwrap();
//! assert_eq!(&octets[..2], b"\x12\x34");
//! assert_eq!(dnscodec::parse(&octets).unwrap(), query);
//! ```
//!
//! # Modules
//!
//! * [base] contains the fundamental types for DNS data: domain names,
//!   the message header, questions, records, and the message itself
//!   together with the machinery for parsing and composing it, and
//! * [rdata] contains types and implementations for the record data of
//!   the record types this crate knows about as well as the table
//!   dispatching record data parsing by record type.
//!
//! # Limits
//!
//! The crate enforces the limits of the DNS wire format. Labels are at
//! most [`MAX_LABEL_LEN`] octets long, names at most [`MAX_NAME_LEN`]
//! octets, and character strings at most [`MAX_CHARSTR_LEN`] octets. When
//! decompressing names, at most [`MAX_POINTER_HOPS`] compression pointers
//! are followed for a single name.
//!
//! # Reference of Feature Flags
//!
//! The following is the complete list of the feature flags available.
//!
//! * `bytes`: Enables using the type `BytesMut` from the
//!   [bytes](https://github.com/tokio-rs/bytes) crate as a target for
//!   building messages.
//! * `rand`: Enables a method to set a random message ID via the
//!   [rand](https://github.com/rust-random/rand) crate. This feature is
//!   enabled by default.
//! * `serde`: Enables serde serialization for a number of basic types.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;

pub use self::base::charstr::MAX_CHARSTR_LEN;
pub use self::base::name::{MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_HOPS};

use self::base::message::Message;
use self::base::wire::{ComposeError, ParseError};
use tracing::debug;

/// Produces the wire format of a message.
///
/// The section counts of the header are taken from the message’s sections.
/// Domain names are not compressed.
///
/// See [`base::message_builder::build`] for the cases where this fails.
pub fn build(message: &Message) -> Result<Vec<u8>, ComposeError> {
    base::message_builder::build(message).map_err(|err| {
        debug!(%err, "message build failed");
        err
    })
}

/// Parses a message from its wire format.
///
/// Either the complete message including all questions and records
/// announced in the header is parsed or an error is returned.
pub fn parse(octets: &[u8]) -> Result<Message, ParseError> {
    Message::from_octets(octets)
}
