//! Basics.
//!
//! This module provides types and traits for working with DNS data. The types
//! allow creating such data from scratch and processing it. Crucially, the
//! module provides means to extract the data from wire-format DNS messages
//! and assemble such messages.
//!
//!
//! ## Parsing and Composing Messages
//!
//! In order to easily distinguish the process of creating and disecting
//! wire-format messages from other forms of representation conversion such
//! as reading from a zone file, we use the term *parsing* for extracting
//! data from a wire-format representation and *composing* for producing
//! such a representation.
//!
//! Both parsing and composing happen on buffers holding a complete DNS
//! message. This seems to be a reasonable choice given the limited
//! size of DNS messages and the complexities introduced by compressing
//! domain names in message by referencing other parts of the message.
//! The fundamental traits for parsing and composing live in the [wire]
//! module. But unless you are implementing your own resource record
//! types, you are unlikely to ever having to deal with parsing and composing
//! directly.
//!
//! Instead, the types [`Message`] and [`MessageBuilder`] are there to make
//! parsing and constructing DNS messages easy. A [`Message`] holds the
//! header and the four sections of a message as owned values and can be
//! parsed from the binary data of a DNS message. A [`MessageBuilder`] takes
//! a bytes vector (or creates one for you) and has functionality to build
//! the sections of the message step-by-step.
//!
//!
//! # Types for DNS Data
//!
//! The module contains a number of types for DNS data, both fundamental
//! and composed. Because they often come with a number of support types,
//! they are arranged in submodules. You will find detailed explanations for
//! all of them in their module. These are:
//!
//! * [charstr] for DNS character strings,
//! * [header] for the header of DNS messages,
//! * [name] for domain names,
//! * [question] for questions,
//! * [rdata] for the traits of record data, and
//! * [record] for DNS resource records.
//!
//! The concrete types for the record data of the various record types live
//! in the top-level [rdata][crate::rdata] module.

//--- Re-exports

pub use self::charstr::CharStr;
pub use self::header::{Header, HeaderCounts, HeaderSection};
pub use self::iana::{Class, Opcode, Rcode, Rtype};
pub use self::message::{Message, Section};
pub use self::message_builder::{
    AdditionalBuilder, AnswerBuilder, AuthorityBuilder, MessageBuilder,
    QuestionBuilder, RecordSectionBuilder,
};
pub use self::name::{Name, NameError};
pub use self::question::Question;
pub use self::rdata::{
    ParseRecordData, RecordData, UnknownRecordData, UnknownRecordDataError,
};
pub use self::record::{Record, RecordHeader, Ttl};
pub use self::wire::{ComposeError, ParseError};

//--- Modules

pub mod charstr;
pub mod header;
pub mod iana;
pub mod message;
pub mod message_builder;
pub mod name;
pub mod question;
pub mod rdata;
pub mod record;
pub mod scan;
pub mod wire;
