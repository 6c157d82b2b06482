//! Domain names.
//!
//! Domain names are a sequence of *labels* which are in turn a sequence of
//! up to 63 octets. While they are limited to a subset of ASCII by
//! convention, all octet values are allowed. In their wire-format
//! representation labels are prefixed with an octet containing the number
//! of octets in the label. The labels in a domain name are nominally
//! arranged backwards. That is, the ‘most significant’ label is the last
//! one. In an *absolute* domain name, this last label is an empty label,
//! called the *root label*. Only absolute names appear inside DNS messages.
//!
//! In order to save space in DNS messages, a name can end in a pointer to
//! another name stored elsewhere in the message. The parser resolves these
//! pointers right away, so all names handed out by this crate are
//! self-contained values of type [`Name`] that don’t refer back to the
//! message they were taken from.

pub use self::dname::{Name, NameError, NameIter};
pub use self::label::{Label, LabelType, LongLabelError};

mod dname;
mod label;
mod parsed;

/// The maximum length of a label in octets.
pub const MAX_LABEL_LEN: usize = Label::MAX_LEN;

/// The maximum length of a domain name in wire format.
///
/// This includes the length octets of all labels and the root label.
pub const MAX_NAME_LEN: usize = 255;

/// The maximum number of compression pointers followed for a single name.
///
/// A name has at most 127 labels, so a well-formed message never needs
/// more pointers than that.
pub const MAX_POINTER_HOPS: usize = 128;
