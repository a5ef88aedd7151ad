//! IMAP extensions.
//!
//! Each submodule models the additional types introduced by one RFC on top of the RFC 3501
//! core grammar. The modules themselves are always compiled, because a few (`binary`, for the
//! `APPEND ... LITERAL8` payload and `FETCH BINARY`) are reached from unconditional core-command
//! fields; the corresponding Cargo features instead gate the *capability* variants and
//! constructors that only make sense once a server has advertised the extension.

pub mod binary;
pub mod compress;
pub mod condstore_qresync;
pub mod enable;
pub mod idle;
pub mod metadata;
pub mod namespace;
pub mod quota;
pub mod sort;
pub mod thread;
pub mod utf8;
