//! # (De)serialization of messages.
//!
//! Each message type has a matching codec (e.g. [`CommandCodec`] for [`Command`](imap_types::command::Command)).
//! Codecs implement the [`Encoder`](encode::Encoder) trait to serialize a message, and the
//! [`Decoder`](decode::Decoder) trait to parse one back.
//! Note that IMAP traces are not guaranteed to be UTF-8. Thus, be careful when using things like `std::str::from_utf8(...).unwrap()`.
//! It should generally be better not to think about IMAP as being UTF-8.
//! This is also why `Display` is not implemented.
//! All types implement `Debug`, though.
//!
//! ## Example
//!
//! ```
//! use imap_codec::{
//!     encode::Encoder,
//!     imap_types::command::{Command, CommandBody},
//!     CommandCodec,
//! };
//!
//! // Create some command.
//! let cmd = Command::new("A123", CommandBody::login("alice", "password").unwrap()).unwrap();
//!
//! // Encode the `cmd` into `out`.
//! let out = CommandCodec::default().encode(&cmd).dump();
//!
//! // Print the command.
//! // (Note that IMAP traces are not guaranteed to be valid UTF-8.)
//! println!("{}", std::str::from_utf8(&out).unwrap());
//! ```

pub mod decode;
pub mod encode;

/// Codec for greetings.
///
/// # Example
///
/// ```rust
/// # use imap_codec::{
/// #     decode::Decoder,
/// #     imap_types::{
/// #         core::Text,
/// #         response::{Code, Greeting, GreetingKind},
/// #     },
/// #     GreetingCodec,
/// #  };
/// let (remaining, greeting) =
///     GreetingCodec::default().decode(b"* OK [ALERT] Hello, World!\r\n<remaining>").unwrap();
///
/// assert_eq!(
///     greeting,
///     Greeting {
///         kind: GreetingKind::Ok,
///         code: Some(Code::Alert),
///         text: Text::try_from("Hello, World!").unwrap(),
///     }
/// );
/// assert_eq!(remaining, &b"<remaining>"[..])
/// ```
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
