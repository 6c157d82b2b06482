//! Accessing existing DNS messages.
//!
//! This module defines the [`Message`] type. It holds a complete DNS
//! message in decoded form: the header and the four sections with their
//! questions and records. A message is either assembled by hand and then
//! turned into its wire format through the [`MessageBuilder`], or it is
//! parsed from wire format via [`Message::from_octets`].
//!
//! Parsing is all or nothing. Either all questions and records announced
//! in the header are successfully parsed or an error is returned. Since all
//! data is copied out of the octets sequence during parsing, the message
//! doesn’t keep a reference to it.
//!
//! [`MessageBuilder`]: super::message_builder::MessageBuilder

use super::header::{Header, HeaderCounts, HeaderSection};
use super::iana::{Rcode, Rtype};
use super::message_builder;
use super::name::Name;
use super::question::Question;
use super::record::Record;
use super::wire::{ComposeError, Parse, ParseError};
use crate::rdata::AllRecordData;
use core::{cmp, fmt, slice};
use octseq::parse::Parser;
use tracing::{debug, trace};

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The type holds the header of the message and the content of its four
/// sections as owned values. The counts of the header are not stored but
/// always derived from the length of the sections, available via
/// [`counts`][Self::counts].
///
/// Two messages are equal if their headers are equal and their sections
/// contain equal elements in the same order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// The header of the message.
    header: Header,

    /// The question section.
    question: Vec<Question>,

    /// The answer section.
    answer: Vec<Record<AllRecordData>>,

    /// The authority section.
    authority: Vec<Record<AllRecordData>>,

    /// The additional section.
    additional: Vec<Record<AllRecordData>>,
}

/// # Creation and Conversion
///
impl Message {
    /// Creates a new, empty message with the given header.
    pub fn new(header: Header) -> Self {
        Message {
            header,
            ..Default::default()
        }
    }

    /// Creates a standard recursive query for a single question.
    ///
    /// The message has the given ID, the RD flag set, and one question for
    /// `qname` and `qtype` with class IN.
    pub fn query(id: u16, qname: Name, qtype: Rtype) -> Self {
        let mut header = Header::new();
        header.set_id(id);
        header.set_rd(true);
        let mut res = Self::new(header);
        res.push_question(Question::new_in(qname, qtype));
        res
    }

    /// Parses a message from an octets sequence.
    ///
    /// Trailing data after the last record announced in the header is
    /// ignored.
    pub fn from_octets<Octs: AsRef<[u8]>>(
        octets: Octs,
    ) -> Result<Self, ParseError> {
        let res = Self::parse(&mut Parser::from_ref(octets.as_ref()));
        if let Err(ref err) = res {
            debug!(%err, len = octets.as_ref().len(), "message parse failed");
        }
        res
    }

    /// Parses a message from the beginning of a parser.
    ///
    /// The parser needs to start at the beginning of the message since
    /// compression pointers are resolved relative to the start of its
    /// octets.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let section = HeaderSection::parse(parser)?;
        let counts = *section.counts();
        let mut res = Self::new(*section.header());

        res.question = Vec::with_capacity(cmp::min(
            usize::from(counts.qdcount()),
            parser.remaining(),
        ));
        for _ in 0..counts.qdcount() {
            res.question.push(Question::parse(parser)?);
        }
        res.answer = parse_records(parser, counts.ancount())?;
        res.authority = parse_records(parser, counts.nscount())?;
        res.additional = parse_records(parser, counts.arcount())?;

        if parser.remaining() > 0 {
            trace!(
                len = parser.remaining(),
                "ignoring trailing message data"
            );
        }
        Ok(res)
    }

    /// Returns the wire format of the message.
    ///
    /// This is a shortcut for [`message_builder::build`].
    pub fn to_vec(&self) -> Result<Vec<u8>, ComposeError> {
        message_builder::build(self)
    }
}

/// Parses `count` records from `parser`.
fn parse_records(
    parser: &mut Parser<'_, [u8]>,
    count: u16,
) -> Result<Vec<Record<AllRecordData>>, ParseError> {
    let mut res = Vec::with_capacity(cmp::min(
        usize::from(count),
        parser.remaining(),
    ));
    for _ in 0..count {
        // AllRecordData accepts every record type.
        if let Some(record) = Record::parse(parser)? {
            res.push(record)
        }
    }
    Ok(res)
}

/// # Header Access
///
impl Message {
    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the header counts derived from the sections.
    ///
    /// Fails if a section has more than 65,535 entries.
    pub fn counts(&self) -> Result<HeaderCounts, ComposeError> {
        HeaderCounts::from_lens(
            self.question.len(),
            self.answer.len(),
            self.authority.len(),
            self.additional.len(),
        )
    }

    /// Returns whether the rcode of the header is NoError.
    pub fn no_error(&self) -> bool {
        self.header.rcode() == Rcode::NOERROR
    }

    /// Returns whether the rcode of the header is one of the error values.
    pub fn is_error(&self) -> bool {
        !self.no_error()
    }
}

/// # Section Access
///
impl Message {
    /// Returns the question section.
    pub fn question(&self) -> &[Question] {
        &self.question
    }

    /// Returns the answer section.
    pub fn answer(&self) -> &[Record<AllRecordData>] {
        &self.answer
    }

    /// Returns the authority section.
    pub fn authority(&self) -> &[Record<AllRecordData>] {
        &self.authority
    }

    /// Returns the additional section.
    pub fn additional(&self) -> &[Record<AllRecordData>] {
        &self.additional
    }

    /// Returns the record section given by `section`.
    pub fn section(&self, section: Section) -> &[Record<AllRecordData>] {
        match section {
            Section::Answer => &self.answer,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        }
    }

    /// Returns a mutable reference to the question section.
    pub fn question_mut(&mut self) -> &mut Vec<Question> {
        &mut self.question
    }

    /// Returns a mutable reference to the record section `section`.
    pub fn section_mut(
        &mut self,
        section: Section,
    ) -> &mut Vec<Record<AllRecordData>> {
        match section {
            Section::Answer => &mut self.answer,
            Section::Authority => &mut self.authority,
            Section::Additional => &mut self.additional,
        }
    }

    /// Appends a question to the question section.
    pub fn push_question(&mut self, question: impl Into<Question>) {
        self.question.push(question.into())
    }

    /// Appends a record to the record section `section`.
    pub fn push_record(
        &mut self,
        section: Section,
        record: impl Into<Record<AllRecordData>>,
    ) {
        self.section_mut(section).push(record.into())
    }

    /// Returns an iterator over all records of the message.
    ///
    /// The iterator walks the answer, authority, and additional sections
    /// in this order and returns each record alongside the section it was
    /// found in.
    pub fn all_records(&self) -> MessageIter {
        MessageIter {
            message: self,
            section: Some(Section::first()),
            records: self.answer.iter(),
        }
    }
}

/// # Helpers for Common Tasks
///
impl Message {
    /// Returns whether this is the answer to some other message.
    ///
    /// The method checks whether the ID fields of the headers are the same,
    /// whether the QR flag is set in this message, and whether the questions
    /// are the same.
    pub fn is_answer(&self, query: &Message) -> bool {
        self.header.qr()
            && self.header.id() == query.header.id()
            && self.question == query.question
    }

    /// Returns the first question, if there is any.
    pub fn first_question(&self) -> Option<&Question> {
        self.question.first()
    }

    /// Returns the query type of the first question, if any.
    pub fn qtype(&self) -> Option<Rtype> {
        self.first_question().map(Question::qtype)
    }

    /// Resolves the canonical name of the answer.
    ///
    /// Returns `None` if the message doesn’t have a question. Otherwise
    /// starts with the question’s name, follows any CNAME trail in the
    /// answer section and returns the name answers should be for.
    pub fn canonical_name(&self) -> Option<&Name> {
        let mut name = self.first_question()?.qname();
        // Each CNAME can be followed at most once, so this terminates even
        // with loops.
        for _ in 0..self.answer.len() {
            let next = self.answer.iter().find_map(|record| {
                match record.data() {
                    AllRecordData::Cname(cname)
                        if record.owner() == name =>
                    {
                        Some(cname.cname())
                    }
                    _ => None,
                }
            });
            match next {
                Some(next) => name = next,
                None => break,
            }
        }
        Some(name)
    }
}

//--- Display

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header = self.header;
        writeln!(
            f,
            ";; opcode: {}, status: {}, id: {}",
            header.opcode(),
            header.rcode(),
            header.id()
        )?;
        writeln!(f, ";; flags: {}", header.flags())?;
        writeln!(f, "\n;; QUESTION SECTION:")?;
        for question in &self.question {
            writeln!(f, ";{}", question)?;
        }
        let sections =
            [Section::Answer, Section::Authority, Section::Additional];
        for section in sections {
            let records = self.section(section);
            if records.is_empty() {
                continue;
            }
            writeln!(f, "\n;; {} SECTION:", section)?;
            for record in records {
                writeln!(f, "{}", record)?;
            }
        }
        Ok(())
    }
}

//------------ Section -------------------------------------------------------

/// A helper type enumerating the three kinds of record sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl Section {
    /// Returns the first section.
    #[must_use]
    pub fn first() -> Self {
        Section::Answer
    }

    /// Returns the value for the following section or `None` if this is last.
    pub(crate) fn next_section(self) -> Option<Self> {
        match self {
            Section::Answer => Some(Section::Authority),
            Section::Authority => Some(Section::Additional),
            Section::Additional => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Section::Answer => "ANSWER",
            Section::Authority => "AUTHORITY",
            Section::Additional => "ADDITIONAL",
        })
    }
}

//------------ MessageIter ---------------------------------------------------

/// An iterator over the records in a message.
///
/// The type is returned by [`Message::all_records`].
#[derive(Clone, Debug)]
pub struct MessageIter<'a> {
    message: &'a Message,
    section: Option<Section>,
    records: slice::Iter<'a, Record<AllRecordData>>,
}

impl<'a> Iterator for MessageIter<'a> {
    type Item = (&'a Record<AllRecordData>, Section);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let section = self.section?;
            if let Some(record) = self.records.next() {
                return Some((record, section));
            }
            self.section = section.next_section();
            if let Some(section) = self.section {
                self.records = self.message.section(section).iter();
            }
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Class;
    use crate::base::record::Ttl;
    use crate::rdata::{Aaaa, Cname, Ns, A};
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn test_message() -> Message {
        let mut msg = Message::query(0x1234, name("example.com"), Rtype::A);
        msg.header_mut().set_qr(true);
        msg.push_record(
            Section::Answer,
            Record::new_in(
                name("example.com"),
                Ttl::from_secs(300),
                AllRecordData::from(A::from_octets(192, 0, 2, 1)),
            ),
        );
        msg.push_record(
            Section::Authority,
            Record::new_in(
                name("example.com"),
                Ttl::HOUR,
                AllRecordData::from(Ns::new(name("ns.example.com"))),
            ),
        );
        msg.push_record(
            Section::Additional,
            Record::new_in(
                name("ns.example.com"),
                Ttl::HOUR,
                AllRecordData::from(Aaaa::from_str("2001:db8::53").unwrap()),
            ),
        );
        msg
    }

    #[test]
    fn short_message() {
        assert_eq!(
            Message::from_octets([0u8; 11]),
            Err(ParseError::ShortInput)
        );
        assert_eq!(Message::from_octets([0u8; 12]), Ok(Message::default()));
    }

    #[test]
    fn query() {
        let msg = Message::query(7, name("example.com"), Rtype::MX);
        assert_eq!(msg.header().id(), 7);
        assert!(msg.header().rd());
        assert!(!msg.header().qr());
        assert_eq!(msg.qtype(), Some(Rtype::MX));
        assert_eq!(msg.first_question().unwrap().qclass(), Class::IN);
    }

    #[test]
    fn counts_follow_sections() {
        let msg = test_message();
        let counts = msg.counts().unwrap();
        assert_eq!(counts.qdcount(), 1);
        assert_eq!(counts.ancount(), 1);
        assert_eq!(counts.nscount(), 1);
        assert_eq!(counts.arcount(), 1);
    }

    #[test]
    fn message_iterator() {
        let msg = test_message();
        let sections: Vec<_> =
            msg.all_records().map(|(_, section)| section).collect();
        assert_eq!(
            sections,
            [Section::Answer, Section::Authority, Section::Additional]
        );
        let types: Vec<_> =
            msg.all_records().map(|(record, _)| record.rtype()).collect();
        assert_eq!(types, [Rtype::A, Rtype::NS, Rtype::AAAA]);
    }

    #[test]
    fn message_iterator_skips_empty_sections() {
        let mut msg = Message::default();
        msg.push_record(
            Section::Additional,
            (
                name("a.example"),
                60,
                AllRecordData::from(A::from_octets(1, 2, 3, 4)),
            ),
        );
        let sections: Vec<_> =
            msg.all_records().map(|(_, section)| section).collect();
        assert_eq!(sections, [Section::Additional]);
    }

    #[test]
    fn is_answer() {
        let query = Message::query(0x1234, name("example.com"), Rtype::A);
        let answer = test_message();
        assert!(answer.is_answer(&query));
        assert!(!query.is_answer(&query));
        let other = Message::query(0x1234, name("example.org"), Rtype::A);
        assert!(!answer.is_answer(&other));
    }

    #[test]
    fn canonical_name() {
        let mut msg = Message::query(1, name("example.com"), Rtype::A);
        assert_eq!(msg.canonical_name(), Some(&name("example.com")));

        for (owner, target) in [
            ("bar.example.com", "baz.example.com"),
            ("example.com", "foo.example.com"),
            ("foo.example.com", "bar.example.com"),
        ] {
            msg.push_record(
                Section::Answer,
                (
                    name(owner),
                    86400,
                    AllRecordData::from(Cname::new(name(target))),
                ),
            );
        }
        assert_eq!(msg.canonical_name(), Some(&name("baz.example.com")));
    }

    #[test]
    fn canonical_name_loop() {
        let mut msg = Message::query(1, name("a.example"), Rtype::A);
        for (owner, target) in
            [("a.example", "b.example"), ("b.example", "a.example")]
        {
            msg.push_record(
                Section::Answer,
                (
                    name(owner),
                    60,
                    AllRecordData::from(Cname::new(name(target))),
                ),
            );
        }
        assert!(msg.canonical_name().is_some());
    }

    #[test]
    fn display() {
        let text = test_message().to_string();
        assert!(
            text.contains(";; QUESTION SECTION:\n;example.com.\tIN\tA\n")
        );
        assert!(text.contains(
            ";; ANSWER SECTION:\nexample.com. 300 IN A 192.0.2.1\n"
        ));
        assert!(text.contains(";; ADDITIONAL SECTION:\n"));
    }
}
