#![deny(missing_debug_implementations)]

//! A streaming encoder for the IMAP4rev1 wire format.
//!
//! This crate turns the typed AST exposed by [`imap_types`] into bytes. Encoding never fails and
//! never blocks: [`codec::encode::Encoder::encode`] returns an [`codec::encode::Encoded`], a
//! sequence of [`codec::encode::Fragment`]s that already marks every point at which a sender must
//! pause and wait for a command continuation request (`+`) before it may write the next chunk.
//!
//! [`options`] models which of the optional wire forms (non-synchronizing literals, binary
//! literals, ...) a peer is allowed to use, derived from a negotiated `CAPABILITY` list.
//! [`pipelining`] classifies commands so a client can decide whether a command may be pipelined
//! in front of one that is still running. [`modutf7`] implements the Modified UTF-7 mailbox-name
//! encoding used nowhere else in the wire format.

pub mod codec;
pub mod modutf7;
pub mod options;
pub mod pipelining;

pub use imap_types;
