//! # Serialization of messages.
//!
//! All messages implement the `Encoder` trait.
//! You can `use imap_flow_codec::encode::Encoder` and call the `.encode(&message)` method
//! (or `.encode(&message).dump()`) to serialize a message.
//! Note that IMAP traces are not guaranteed to be UTF-8. Thus, be careful when using things like
//! `std::str::from_utf8(...).unwrap()`. It should generally be better not to think about IMAP
//! as being UTF-8. This is also why `Display` is not implemented on the AST types. All types
//! implement `Debug`, though.
//!
//! ## Example
//!
//! ```
//! use imap_flow_codec::{
//!     codec::{CommandCodec, encode::Encoder},
//!     imap_types::command::{Command, CommandBody},
//! };
//!
//! // Create some command.
//! let cmd = Command::new("A123", CommandBody::login("alice", "password").unwrap()).unwrap();
//!
//! // Encode the `cmd` into `out`.
//! let out = CommandCodec.encode(&cmd).dump();
//!
//! // Print the command.
//! // (Note that IMAP traces are not guaranteed to be valid UTF-8.)
//! println!("{}", std::str::from_utf8(&out).unwrap());
//! ```

pub mod encode;

/// Codec for greetings.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreetingCodec;

/// Codec for commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandCodec;

/// Codec for authenticate data lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthenticateDataCodec;

/// Codec for responses.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseCodec;

/// Codec for idle dones.
#[cfg(feature = "ext_idle")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_idle")))]
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleDoneCodec;
