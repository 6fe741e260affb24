//! A blocking IMAP4rev1 client built on top of `imap-codec`'s streaming grammar and encoder.
//!
//! [`Session`] owns a `Read + Write` transport and drives the command/response protocol one
//! command at a time (§4.4), folding capability and mailbox state as responses arrive. The
//! [`ops`] module groups the public command surface (§4.6) by RFC.

pub mod error;
pub mod fetch_stream;
#[cfg(feature = "ext_idle")]
pub mod idle;
pub mod ops;
pub mod session;
pub mod state;
mod stream;

pub use error::Error;
pub use session::{Outcome, Session};
pub use state::{Capabilities, Compression, ConnectionState, MailboxAccess, SelectedMailbox};
