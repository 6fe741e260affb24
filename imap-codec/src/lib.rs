#![deny(missing_debug_implementations)]

//! Parsing and serialization ("codec") for IMAP4rev1 ([RFC 3501]) and a number of widely deployed
//! extensions, built on top of the type definitions in [`imap_types`].
//!
//! The core of this crate is the [`Decoder`](decode::Decoder) trait: its `decode` method never
//! blocks on I/O and never panics on truncated input. Instead it returns one of a small number of
//! outcomes -- "need more bytes", "a literal announcement was seen, the caller must supply its
//! octets out of band", or "the input is syntactically invalid" -- so that callers can drive
//! parsing incrementally from any transport (a blocking socket, a non-blocking event loop, a test
//! fixture replaying captured traffic).
//!
//! [RFC 3501]: https://datatracker.ietf.org/doc/html/rfc3501

pub mod auth;
pub mod body;
pub mod codec;
pub mod command;
pub mod core;
pub mod datetime;
pub mod envelope;
pub mod extensions;
pub mod fetch;
pub mod flag;
pub mod fragmentizer;
pub mod mailbox;
pub mod response;
pub mod search;
pub mod sequence;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

// `decode` and `encode` are nested under `codec` on disk but are re-exported at the crate root
// because every other module in this crate addresses them as `crate::decode`/`crate::encode`.
pub use codec::{decode, encode};

pub use crate::codec::{AuthenticateDataCodec, CommandCodec, GreetingCodec, ResponseCodec};
#[cfg(feature = "ext_idle")]
pub use crate::codec::IdleDoneCodec;

/// Re-export of `imap-types`, so downstream crates don't need to depend on it directly to
/// construct the types this crate parses and encodes.
pub use imap_types;
