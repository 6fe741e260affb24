use imap_codec::{decode::ResponseDecodeError, imap_types::response::Code};
use thiserror::Error;

use crate::state::ConnectionState;

/// Everything that can go wrong while driving a [`crate::session::Session`].
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying stream failed. The session is [`ConnectionState::Broken`] afterward.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server sent a frame that does not parse as IMAP. The session is
    /// [`ConnectionState::Broken`] afterward.
    #[error("malformed response from server: {0:?}")]
    ProtocolParse(ResponseDecodeError),

    /// A command could not even be encoded (a builder rejected one of its arguments).
    #[error("could not build command: {0}")]
    Build(String),

    /// The command completed with a tagged `NO`. The session remains usable.
    #[error("command rejected (NO): {}", .text.inner())]
    No {
        code: Option<Code<'static>>,
        text: imap_codec::imap_types::response::Text<'static>,
    },

    /// The command completed with a tagged `BAD`. The session is
    /// [`ConnectionState::Broken`] afterward.
    #[error("command rejected (BAD): {}", .text.inner())]
    Bad {
        code: Option<Code<'static>>,
        text: imap_codec::imap_types::response::Text<'static>,
    },

    /// The server sent an unsolicited `BYE`. The session is [`ConnectionState::Logout`]
    /// afterward, awaiting the connection to close.
    #[error("server said goodbye: {}", .text.inner())]
    Bye {
        code: Option<Code<'static>>,
        text: imap_codec::imap_types::response::Text<'static>,
    },

    /// A `+` continuation request arrived outside of a literal or SASL exchange. The session is
    /// [`ConnectionState::Broken`] afterward.
    #[error("unexpected continuation request")]
    UnexpectedContinuation,

    /// An operation was attempted that the current connection state doesn't allow (e.g. `fetch`
    /// before `select`). The wire was not touched.
    #[error("operation requires {expected}, but the session is {actual:?}")]
    SessionState {
        expected: &'static str,
        actual: ConnectionState,
    },
}
