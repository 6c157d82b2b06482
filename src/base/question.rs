//! A single question in a DNS message.
//!
//! This module defines the type [`Question`] which represents an entry in
//! the question section of a DNS message.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::wire::{Compose, Parse, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class. This type
/// represents such a question.
///
/// When read from a message, the name is decompressed, so the question
/// doesn’t depend on the message any more.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    /// The domain name of the question.
    qname: Name,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the quesiton.
    qclass: Class,
}

/// # Creation and Conversion
///
impl Question {
    /// Creates a new question from its three componets.
    pub fn new(qname: Name, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Creates a new question from a name and record type, assuming class IN.
    pub fn new_in(qname: Name, qtype: Rtype) -> Self {
        Question {
            qname,
            qtype,
            qclass: Class::IN,
        }
    }

    /// Converts the question into the qname.
    pub fn into_qname(self) -> Name {
        self.qname
    }
}

/// # Field Access
///
impl Question {
    /// Returns a reference to the domain nmae in the question,
    pub fn qname(&self) -> &Name {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

//--- From

impl From<(Name, Rtype, Class)> for Question {
    fn from((name, rtype, class): (Name, Rtype, Class)) -> Self {
        Question::new(name, rtype, class)
    }
}

impl From<(Name, Rtype)> for Question {
    fn from((name, rtype): (Name, Rtype)) -> Self {
        Question::new(name, rtype, Class::IN)
    }
}

//--- Parse and Compose

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Question {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        Ok(Question::new(
            Name::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
        ))
    }
}

impl Compose for Question {
    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.qname.compose(target)?;
        self.qtype.compose(target)?;
        self.qclass.compose(target)
    }
}

//--- Display

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#}\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}

//------------ ComposeQuestion -----------------------------------------------

/// A helper trait allowing construction of questions on the fly.
///
/// The trait’s primary user is the [`QuestionBuilder`]. It allows adding
/// questions to the builder from a [`Question`], a reference to one, or a
/// tuple of a name and a record type with an optional class.
///
/// [`QuestionBuilder`]: super::message_builder::QuestionBuilder
pub trait ComposeQuestion {
    fn compose_question<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

impl<'a, Q: ComposeQuestion> ComposeQuestion for &'a Q {
    fn compose_question<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose_question(target)
    }
}

impl ComposeQuestion for Question {
    fn compose_question<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.compose(target)
    }
}

impl ComposeQuestion for (Name, Rtype, Class) {
    fn compose_question<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.0.compose(target)?;
        self.1.compose(target)?;
        self.2.compose(target)
    }
}

impl ComposeQuestion for (Name, Rtype) {
    fn compose_question<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.0.compose(target)?;
        self.1.compose(target)?;
        Class::IN.compose(target)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn parse_and_compose() {
        let question = Question::new_in(
            Name::from_str("example.com").unwrap(),
            Rtype::AAAA,
        );
        let mut buf = Vec::new();
        question.compose(&mut buf).unwrap();
        assert_eq!(buf, b"\x07example\x03com\0\x00\x1c\x00\x01");
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(Question::parse(&mut parser), Ok(question));
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn parse_short() {
        let mut parser = Parser::from_static(b"\x07example\0\x00\x01\x00");
        assert_eq!(Question::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn compose_tuples() {
        let name = Name::from_str("example.com").unwrap();
        let mut left = Vec::new();
        (name.clone(), Rtype::A).compose_question(&mut left).unwrap();
        let mut right = Vec::new();
        Question::new(name, Rtype::A, Class::IN)
            .compose_question(&mut right)
            .unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn display() {
        let question: Question =
            (Name::from_str("example.com").unwrap(), Rtype::MX).into();
        assert_eq!(question.to_string(), "example.com.\tIN\tMX");
    }
}
