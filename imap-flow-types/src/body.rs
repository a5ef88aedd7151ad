//! `BODYSTRUCTURE`/`BODY` data item types
//! ([RFC 3501 §7.4.2](https://datatracker.ietf.org/doc/html/rfc3501#section-7.4.2)).
//!
//! The extension data that trails a non-multipart or multipart body is a chain of optional
//! fields: a server may stop early and omit everything from some point onward, but it must never
//! skip a field in the middle and send a later one. `tail` models this: each field either carries
//! no further extension data (`tail: None`) or carries the next field in the chain.

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    core::{IString, NString, Vec1},
    envelope::Envelope,
};

#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Body<'a> {
    /// Basic fields, shared by every body type.
    pub basic: BasicFields<'a>,
    /// Type-specific fields.
    pub specific: SpecificFields<'a>,
}

/// The basic fields of a non-multipart body part.
#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasicFields<'a> {
    /// List of attribute/value pairs ([MIME-IMB]).
    pub parameter_list: Vec<(IString<'a>, IString<'a>)>,
    /// Content id ([MIME-IMB]).
    pub id: NString<'a>,
    /// Content description ([MIME-IMB]).
    pub description: NString<'a>,
    /// Content transfer encoding ([MIME-IMB]).
    pub content_transfer_encoding: IString<'a>,
    /// Size of the body in octets, in its transfer encoding.
    pub size: u32,
}

#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecificFields<'a> {
    /// `message/rfc822`: the basic fields are followed by the encapsulated message's envelope,
    /// its body structure, and its size in text lines.
    Message {
        envelope: Envelope<'a>,
        body_structure: Box<BodyStructure<'a>>,
        number_of_lines: u32,
    },

    /// `text/*`: the basic fields are followed by the size of the body in text lines.
    Text {
        subtype: IString<'a>,
        number_of_lines: u32,
    },

    /// Any other single body type.
    Basic {
        r#type: IString<'a>,
        subtype: IString<'a>,
    },
}

/// A non-multipart or multipart body structure
/// ([RFC 3501 §7.4.2](https://datatracker.ietf.org/doc/html/rfc3501#section-7.4.2)).
#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyStructure<'a> {
    /// e.g. `("TEXT" "PLAIN" ("CHARSET" "US-ASCII") NIL NIL "7BIT" 2279 48)`
    Single {
        body: Body<'a>,
        /// `BODYSTRUCTURE` extension data; never present in a plain `BODY` response.
        extension_data: Option<SinglePartExtensionData<'a>>,
    },

    /// Multiple parts are indicated by parenthesis nesting: a sequence of one or more nested
    /// body structures, followed by the multipart subtype (mixed, digest, parallel,
    /// alternative, ...), e.g.
    /// `(("TEXT" "PLAIN" ... 1152 23) ("TEXT" "PLAIN" ... 4554 73) "MIXED")`
    Multi {
        bodies: Vec1<BodyStructure<'a>>,
        subtype: IString<'a>,
        extension_data: Option<MultiPartExtensionData<'a>>,
    },
}

/// Extension data for a non-multipart body, in the order the RFC defines it:
/// `body MD5`, `body disposition`, `body language`, `body location`, then opaque extensions.
#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SinglePartExtensionData<'a> {
    /// A string giving the body MD5 value as defined in [MD5].
    pub md5: NString<'a>,
    pub tail: Option<Disposition<'a>>,
}

/// Extension data for a multipart body, in the order the RFC defines it:
/// `body parameter parenthesized list`, `body disposition`, `body language`, `body location`,
/// then opaque extensions.
#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiPartExtensionData<'a> {
    pub parameter_list: Vec<(IString<'a>, IString<'a>)>,
    pub tail: Option<Disposition<'a>>,
}

/// `body disposition`, as defined in [DISPOSITION].
#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Disposition<'a> {
    pub disposition: Option<(IString<'a>, Vec<(IString<'a>, IString<'a>)>)>,
    pub tail: Option<Language<'a>>,
}

/// `body language`, as defined in [LANGUAGE-TAGS].
#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language<'a> {
    pub language: Vec<IString<'a>>,
    pub tail: Option<Location<'a>>,
}

/// `body location`, as defined in [LOCATION], plus any trailing opaque extensions.
#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location<'a> {
    pub location: NString<'a>,
    pub extensions: Vec<BodyExtension<'a>>,
}

/// Extension data whose grammar is not yet defined by any revision of the protocol; a client
/// fetching `BODYSTRUCTURE` must be prepared to accept it, and a server must not send it until
/// a future RFC defines it.
#[cfg_attr(feature = "bounded-static", derive(ToStatic))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyExtension<'a> {
    NString(NString<'a>),
    Number(u32),
    List(Vec1<BodyExtension<'a>>),
}
