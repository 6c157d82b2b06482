//! Building a new DNS message.
//!
//! The types in this module allow building a DNS message consecutively from
//! its parts. Since messages consist of five parts, a number of types are
//! involved. The concept is that you start out with a [`MessageBuilder`] and
//! work your way step by step through the sections by trading the builder in
//! for one of another type representing the following section. The sequence
//! is [`MessageBuilder`], [`QuestionBuilder`], [`AnswerBuilder`],
//! [`AuthorityBuilder`], and finally [`AdditionalBuilder`].
//!
//! You can skip forward over unwanted sections. The four methods
//! `question`, `answer`, `authority`, and `additional` progress to the
//! respective section. Finally, `finish` completes building by writing the
//! header section and returns the octets builder holding the message.
//!
//! Each of the section builders offers a `push` method to add elements to
//! the section. For the question section, the method accepts anything that
//! resembles a [`Question`] while the three record sections accept
//! something that looks like a [`Record`]. Apart from actual values
//! of these types, tuples of the components also work, such as a pair of a
//! domain name and a record type for a question or a triple of the owner
//! name, TTL, and record data for a record. The `push` method of the record
//! section builders is also available via the [`RecordSectionBuilder`]
//! trait so you can build code that works with all three record sections.
//!
//! The counts in the header section are maintained by the builder. Each
//! successful push increases the count of its section. A section can hold
//! at most 65,535 elements, pushing beyond that fails with
//! [`ComposeError::LongSection`].
//!
//! Domain names are always added uncompressed.
//!
//! If you have a complete [`Message`] already, the function [`build`] turns
//! it into its wire format in one go.
//!
//! # Example
//!
//! The following example builds a message with a question and two A
//! records.
//!
//! ```
//! use std::str::FromStr;
//! use dnscodec::base::{MessageBuilder, Name, Rtype};
//! use dnscodec::rdata::A;
//!
//! // Make a domain name we can use later on.
//! let name = Name::from_str("example.com").unwrap();
//!
//! // Create a message builder atop a vec.
//! let mut msg = MessageBuilder::new_vec();
//!
//! // Set the RD bit in the header and proceed to the question section.
//! msg.header_mut().set_rd(true);
//! let mut msg = msg.question();
//!
//! // Add a question and proceed to the answer section.
//! msg.push((name.clone(), Rtype::A)).unwrap();
//! let mut msg = msg.answer();
//!
//! // Add two answers.
//! msg.push((name.clone(), 86400, A::from_octets(192, 0, 2, 1))).unwrap();
//! msg.push((name, 86400, A::from_octets(192, 0, 2, 2))).unwrap();
//!
//! // Convert the builder into the actual message.
//! let octets = msg.finish().unwrap();
//! assert_eq!(&octets[6..8], b"\x00\x02");
//! ```
//!
//! [`Message`]: super::message::Message
//! [`Question`]: super::question::Question
//! [`Record`]: super::record::Record

use super::header::{Header, HeaderCounts, HeaderSection};
use super::message::Message;
use super::question::ComposeQuestion;
use super::record::ComposeRecord;
use super::wire::{ComposeError, Composer};
#[cfg(feature = "bytes")]
use bytes::BytesMut;
use crate::rdata::{AllRecordData, RecordCodec};
use core::ops::{Deref, DerefMut};

//------------ build ---------------------------------------------------------

/// Produces the wire format of a complete message.
///
/// The header counts are taken from the lengths of the sections. The
/// function fails if a section has more than 65,535 elements, if the data
/// of a record is too long, if the opcode or rcode of the header don’t fit
/// into their four bit fields, or if a record carries opaque data for a
/// record type with its own record data type. No octets are returned in
/// this case.
pub fn build(message: &Message) -> Result<Vec<u8>, ComposeError> {
    // Catch oversized sections before composing anything.
    message.counts()?;
    // Opaque data for a type with a codec would parse back differently.
    let opaque_known = message.all_records().any(|(record, _)| {
        matches!(
            record.data(),
            AllRecordData::Unknown(data)
                if RecordCodec::find(data.rtype()).is_some()
        )
    });
    if opaque_known {
        return Err(ComposeError::KnownRtype);
    }

    let mut builder = MessageBuilder::new_vec();
    *builder.header_mut() = message.header();

    let mut builder = builder.question();
    for question in message.question() {
        builder.push(question)?;
    }
    let mut builder = builder.answer();
    push_all(&mut builder, message.answer())?;
    let mut builder = builder.authority();
    push_all(&mut builder, message.authority())?;
    let mut builder = builder.additional();
    push_all(&mut builder, message.additional())?;
    builder.finish()
}

/// Pushes all `records` to a record section builder.
fn push_all<B, R>(builder: &mut B, records: &[R]) -> Result<(), ComposeError>
where
    B: RecordSectionBuilder,
    R: ComposeRecord,
{
    records.iter().try_for_each(|record| builder.push(record))
}

//------------ MessageBuilder -----------------------------------------------

/// Starts building a DNS message.
///
/// This type wraps an [`OctetsBuilder`] and starts the process of building a
/// message. It allows access to the header section. The message builder can
/// be traded in for any section builder or the underlying octets builder.
///
/// For more details see the [module documentation].
///
/// [module documentation]: crate::base::message_builder
/// [`OctetsBuilder`]: octseq::builder::OctetsBuilder
#[derive(Clone, Debug)]
pub struct MessageBuilder<Target> {
    /// The octets builder holding the message.
    ///
    /// The first twelve octets are reserved for the header section which
    /// is only written by `finish`.
    target: Target,

    /// The header of the message.
    header: Header,

    /// The section counts of the message.
    counts: HeaderCounts,
}

/// # Creating Message Builders
///
impl<Target: Composer> MessageBuilder<Target> {
    /// Creates a new message builder using the given target.
    ///
    /// The target will be truncated to zero size before appending the
    /// header section. That is, all data that was in the builder before
    /// will be lost.
    ///
    /// The function will result in an error if the builder doesn’t have
    /// enough space for the header section.
    pub fn from_target(mut target: Target) -> Result<Self, ComposeError> {
        target.truncate(0);
        target.append_slice(&[0; HeaderSection::LEN])?;
        Ok(MessageBuilder {
            target,
            header: Header::new(),
            counts: HeaderCounts::new(),
        })
    }
}

impl MessageBuilder<Vec<u8>> {
    /// Creates a new message builder atop a `Vec<u8>`.
    #[must_use]
    pub fn new_vec() -> Self {
        MessageBuilder {
            target: vec![0; HeaderSection::LEN],
            header: Header::new(),
            counts: HeaderCounts::new(),
        }
    }
}

#[cfg(feature = "bytes")]
impl MessageBuilder<BytesMut> {
    /// Creates a new message builder atop a bytes value.
    #[must_use]
    pub fn new_bytes() -> Self {
        MessageBuilder {
            target: BytesMut::from(&[0u8; HeaderSection::LEN][..]),
            header: Header::new(),
            counts: HeaderCounts::new(),
        }
    }
}

/// # Access to the Message Header
///
impl<Target> MessageBuilder<Target> {
    /// Return the current value of the message header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the message header for manipulations.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Return the current value of the message header counts.
    pub fn counts(&self) -> HeaderCounts {
        self.counts
    }
}

/// # Conversions
///
impl<Target: Composer> MessageBuilder<Target> {
    /// Converts the message builder into a question builder.
    pub fn question(self) -> QuestionBuilder<Target> {
        QuestionBuilder::new(self)
    }

    /// Converts the message builder into an answer builder.
    ///
    /// This will leave the question section empty.
    pub fn answer(self) -> AnswerBuilder<Target> {
        self.question().answer()
    }

    /// Converts the message builder into an authority builder.
    ///
    /// This will leave the question and answer sections empty.
    pub fn authority(self) -> AuthorityBuilder<Target> {
        self.question().answer().authority()
    }

    /// Converts the message builder into an additional builder.
    ///
    /// This will leave the question, answer, and authority sections empty.
    pub fn additional(self) -> AdditionalBuilder<Target> {
        self.question().answer().authority().additional()
    }

    /// Finishes the message and returns the octets builder.
    ///
    /// This writes the header section to the beginning of the message. It
    /// fails if the opcode or rcode of the header are out of range.
    pub fn finish(mut self) -> Result<Target, ComposeError> {
        let mut section = Vec::with_capacity(HeaderSection::LEN);
        HeaderSection::new(self.header, self.counts).compose(&mut section)?;
        self.target.as_mut()[..HeaderSection::LEN]
            .copy_from_slice(&section);
        Ok(self.target)
    }

    /// Returns the message as it has been built so far.
    ///
    /// The header section is still all zeros at this point.
    pub fn as_slice(&self) -> &[u8] {
        self.target.as_ref()
    }

    /// Appends something to the message and increases a count.
    ///
    /// If either step fails, the message is reset to where it was before.
    fn push<Push, Inc>(
        &mut self,
        push: Push,
        inc: Inc,
    ) -> Result<(), ComposeError>
    where
        Push: FnOnce(&mut Target) -> Result<(), ComposeError>,
        Inc: FnOnce(&mut HeaderCounts) -> Result<(), ComposeError>,
    {
        let pos = self.target.as_ref().len();
        let res = push(&mut self.target).and_then(|_| inc(&mut self.counts));
        if res.is_err() {
            self.target.truncate(pos);
        }
        res
    }

    /// Truncates the message to `pos` octets.
    fn rewind(&mut self, pos: usize) {
        self.target.truncate(pos)
    }
}

//------------ QuestionBuilder ----------------------------------------------

/// Builds the question section of a DNS message.
///
/// A value of this type can be acquired by calling the `question` method on
/// any other builder type. See the [module documentation] for an overview of
/// how to build a message.
///
/// You can push questions to the end of the question section via the
/// [`push`] method. It accepts various things that represent a question:
/// question values and references; tuples of a domain name, record type,
/// and class; and, using the regular class of IN, a pair of just a domain
/// name and record type.
///
/// [`push`]: QuestionBuilder::push
/// [module documentation]: crate::base::message_builder
#[derive(Clone, Debug)]
pub struct QuestionBuilder<Target> {
    builder: MessageBuilder<Target>,
}

impl<Target: Composer> QuestionBuilder<Target> {
    /// Creates a new question builder from a message builder.
    ///
    /// Assumes that all four sections are empty.
    fn new(builder: MessageBuilder<Target>) -> Self {
        QuestionBuilder { builder }
    }

    /// Appends a question to the question section.
    ///
    /// This method accepts anything that implements the [`ComposeQuestion`]
    /// trait. Apart from an actual [`Question`][super::question::Question]
    /// or a reference to it, this can also be a tuple of a domain name,
    /// record type, and class or, if the class is the usual IN, a pair of
    /// just the name and type.
    pub fn push(
        &mut self,
        question: impl ComposeQuestion,
    ) -> Result<(), ComposeError> {
        self.builder.push(
            |target| {
                question.compose_question(target).map_err(ComposeError::from)
            },
            |counts| counts.inc_qdcount(),
        )
    }

    /// Rewinds to an empty question section.
    ///
    /// All previously added questions will be lost.
    pub fn rewind(&mut self) {
        self.builder.rewind(HeaderSection::LEN);
        self.builder.counts.set_qdcount(0);
    }

    /// Converts the question builder into an answer builder.
    pub fn answer(self) -> AnswerBuilder<Target> {
        AnswerBuilder::new(self.builder)
    }

    /// Converts the question builder into an authority builder.
    ///
    /// This will leave the answer section empty.
    pub fn authority(self) -> AuthorityBuilder<Target> {
        self.answer().authority()
    }

    /// Converts the question builder into an additional builder.
    ///
    /// This will leave the answer and authority sections empty.
    pub fn additional(self) -> AdditionalBuilder<Target> {
        self.answer().authority().additional()
    }

    /// Finishes the message and returns the underlying target.
    pub fn finish(self) -> Result<Target, ComposeError> {
        self.builder.finish()
    }
}

//------------ RecordSectionBuilder ------------------------------------------

/// A section builder that can have records pushed to it.
///
/// This trait is implemented by [`AnswerBuilder`], [`AuthorityBuilder`],
/// and [`AdditionalBuilder`]. It allows code to be generic over the record
/// section it adds to.
pub trait RecordSectionBuilder {
    /// Appends a record to a record section.
    fn push(
        &mut self,
        record: impl ComposeRecord,
    ) -> Result<(), ComposeError>;
}

//------------ Record section builders ---------------------------------------

/// Defines the builder for one of the three record sections.
macro_rules! record_section_builder {
    (
        $(#[$attr:meta])*
        ( $name:ident, $set_count:ident, $inc_count:ident )
    ) => {
        $(#[$attr])*
        #[derive(Clone, Debug)]
        pub struct $name<Target> {
            /// The message builder we work on.
            builder: MessageBuilder<Target>,

            /// The index in the octets builder where the section starts.
            start: usize,
        }

        impl<Target: Composer> $name<Target> {
            /// Creates a new builder from an underlying message builder.
            ///
            /// Assumes that this and all following sections are empty.
            fn new(builder: MessageBuilder<Target>) -> Self {
                $name {
                    start: builder.target.as_ref().len(),
                    builder,
                }
            }

            /// Appends a record to the section.
            ///
            /// This method accepts anything that implements the
            /// [`ComposeRecord`] trait. Apart from record values and
            /// references, this are tuples of an owner domain name, a class
            /// (which can be left out to use IN), a TTL in seconds, and
            /// record data.
            pub fn push(
                &mut self,
                record: impl ComposeRecord,
            ) -> Result<(), ComposeError> {
                self.builder.push(
                    |target| record.compose_record(target),
                    |counts| counts.$inc_count(),
                )
            }

            /// Rewinds to an empty section.
            ///
            /// All previously added records will be lost.
            pub fn rewind(&mut self) {
                self.builder.rewind(self.start);
                self.builder.counts.$set_count(0);
            }

            /// Finishes the message and returns the underlying target.
            pub fn finish(self) -> Result<Target, ComposeError> {
                self.builder.finish()
            }
        }

        impl<Target: Composer> RecordSectionBuilder for $name<Target> {
            fn push(
                &mut self,
                record: impl ComposeRecord,
            ) -> Result<(), ComposeError> {
                $name::push(self, record)
            }
        }
    };
}

record_section_builder! {
    /// Builds the answer section of a DNS message.
    ///
    /// A value of this type can be acquired by calling the `answer` method
    /// on any other builder type before the answer section. See the
    /// [module documentation] for an overview of how to build a message.
    ///
    /// [module documentation]: crate::base::message_builder
    (AnswerBuilder, set_ancount, inc_ancount)
}

record_section_builder! {
    /// Builds the authority section of a DNS message.
    ///
    /// A value of this type can be acquired by calling the `authority`
    /// method on any other builder type before the authority section.
    (AuthorityBuilder, set_nscount, inc_nscount)
}

record_section_builder! {
    /// Builds the additional section of a DNS message.
    ///
    /// A value of this type can be acquired by calling the `additional`
    /// method on any other builder type.
    (AdditionalBuilder, set_arcount, inc_arcount)
}

impl<Target: Composer> AnswerBuilder<Target> {
    /// Converts the answer builder into an authority builder.
    pub fn authority(self) -> AuthorityBuilder<Target> {
        AuthorityBuilder::new(self.builder)
    }

    /// Converts the answer builder into an additional builder.
    ///
    /// This will leave the authority section empty.
    pub fn additional(self) -> AdditionalBuilder<Target> {
        self.authority().additional()
    }
}

impl<Target: Composer> AuthorityBuilder<Target> {
    /// Converts the authority builder into an additional builder.
    pub fn additional(self) -> AdditionalBuilder<Target> {
        AdditionalBuilder::new(self.builder)
    }
}

//--- Deref and DerefMut
//
// All section builders give access to the header via the message builder.

macro_rules! deref_builder {
    ( $( $name:ident, )* ) => {
        $(
            impl<Target> Deref for $name<Target> {
                type Target = MessageBuilder<Target>;

                fn deref(&self) -> &Self::Target {
                    &self.builder
                }
            }

            impl<Target> DerefMut for $name<Target> {
                fn deref_mut(&mut self) -> &mut Self::Target {
                    &mut self.builder
                }
            }
        )*
    };
}

deref_builder! {
    QuestionBuilder, AnswerBuilder, AuthorityBuilder, AdditionalBuilder,
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Class, Opcode, Rcode, Rtype};
    use crate::base::message::Section;
    use crate::base::name::Name;
    use crate::base::question::Question;
    use crate::base::record::{Record, Ttl};
    use crate::rdata::{Mx, A};
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn question_wire_format() {
        let mut msg = MessageBuilder::new_vec();
        msg.header_mut().set_id(0x1234);
        msg.header_mut().set_rd(true);
        let mut msg = msg.question();
        msg.push((name("example.com"), Rtype::AAAA)).unwrap();
        let octets = msg.finish().unwrap();
        assert_eq!(
            octets,
            b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
              \x07example\x03com\x00\x00\x1c\x00\x01"
        );
    }

    #[test]
    fn counts_follow_pushes() {
        let mut msg = MessageBuilder::new_vec().question();
        msg.push((name("example.com"), Rtype::A, Class::IN)).unwrap();
        let mut msg = msg.answer();
        msg.push((name("example.com"), 60, A::from_octets(192, 0, 2, 1)))
            .unwrap();
        msg.push((name("example.com"), 60, A::from_octets(192, 0, 2, 2)))
            .unwrap();
        let mut msg = msg.additional();
        msg.push((
            name("example.com"),
            Class::IN,
            60,
            Mx::new(10, name("mail.example.com")),
        ))
        .unwrap();
        let counts = msg.counts();
        assert_eq!(counts.qdcount(), 1);
        assert_eq!(counts.ancount(), 2);
        assert_eq!(counts.nscount(), 0);
        assert_eq!(counts.arcount(), 1);

        let octets = msg.finish().unwrap();
        assert_eq!(&octets[4..12], b"\x00\x01\x00\x02\x00\x00\x00\x01");
    }

    #[test]
    fn rewind_section() {
        let mut msg = MessageBuilder::new_vec().answer();
        let empty_len = msg.as_slice().len();
        msg.push((name("a.example"), 60, A::from_octets(1, 2, 3, 4)))
            .unwrap();
        msg.rewind();
        assert_eq!(msg.as_slice().len(), empty_len);
        assert_eq!(msg.counts().ancount(), 0);
    }

    #[test]
    fn header_range() {
        let mut msg = MessageBuilder::new_vec();
        msg.header_mut().set_opcode(Opcode::from_int(16));
        assert_eq!(msg.finish(), Err(ComposeError::OpcodeRange));

        let mut msg = MessageBuilder::new_vec();
        msg.header_mut().set_rcode(Rcode::from_int(16));
        assert_eq!(msg.finish(), Err(ComposeError::RcodeRange));
    }

    #[test]
    fn section_overflow() {
        let mut msg = MessageBuilder::new_vec().question();
        let question = Question::new_in(Name::root(), Rtype::A);
        for _ in 0..u16::MAX {
            msg.push(&question).unwrap();
        }
        let len = msg.as_slice().len();
        assert_eq!(msg.push(&question), Err(ComposeError::LongSection));
        assert_eq!(msg.as_slice().len(), len);
        assert_eq!(msg.counts().qdcount(), u16::MAX);
    }

    #[test]
    fn build_ignores_preset_counts() {
        let mut message = Message::query(7, name("example.com"), Rtype::A);
        message.push_record(
            Section::Answer,
            Record::new_in(
                name("example.com"),
                Ttl::MINUTE,
                AllRecordData::from(A::from_octets(192, 0, 2, 1)),
            ),
        );
        let octets = build(&message).unwrap();
        assert_eq!(&octets[..2], b"\x00\x07");
        assert_eq!(&octets[4..12], b"\x00\x01\x00\x01\x00\x00\x00\x00");
    }

    #[test]
    fn build_rejects_bad_rcode() {
        let mut message = Message::default();
        message.header_mut().set_rcode(Rcode::from_int(0xff));
        assert_eq!(build(&message), Err(ComposeError::RcodeRange));
    }

    #[cfg(feature = "bytes")]
    #[test]
    fn bytes_target() {
        let mut msg = MessageBuilder::new_bytes().question();
        msg.push((name("example.com"), Rtype::A)).unwrap();
        let octets = msg.finish().unwrap();
        assert_eq!(octets.len(), 12 + 13 + 4);
    }
}
