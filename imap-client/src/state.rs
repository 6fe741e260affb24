use std::num::{NonZeroU32, NonZeroU64};

use imap_codec::imap_types::{
    flag::{Flag, FlagPerm},
    response::Capability,
};

/// The session state machine from §4.4: `Greeting -> NotAuthenticated -> Authenticated <->
/// Selected -> Logout -> Closed`, with `Broken` reachable from anywhere on a fatal I/O or parse
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// `connect` has been called, the greeting has not yet been read.
    Greeting,
    /// Greeting was `OK`; `LOGIN`/`AUTHENTICATE` is required before most commands.
    NotAuthenticated,
    /// Greeting was `PREAUTH`, or `LOGIN`/`AUTHENTICATE` succeeded. No mailbox selected.
    Authenticated,
    /// `SELECT`/`EXAMINE` succeeded; mailbox-scoped commands are available.
    Selected,
    /// A `BYE` was seen (or `LOGOUT` issued); the connection is closing.
    Logout,
    /// `LOGOUT` completed and the stream was shut down cleanly.
    Closed,
    /// A fatal I/O error, parse error, `BAD` completion, or unexpected continuation occurred.
    /// The session is unusable; only dropping it is meaningful.
    Broken,
}

impl ConnectionState {
    pub fn is_authenticated_or_selected(&self) -> bool {
        matches!(self, ConnectionState::Authenticated | ConnectionState::Selected)
    }
}

/// Whether a `SELECT` or `EXAMINE` granted read-write or read-only access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxAccess {
    ReadOnly,
    ReadWrite,
}

/// Mailbox state accumulated from the untagged data and response codes of a `SELECT`/`EXAMINE`,
/// and kept current by subsequent `EXISTS`/`RECENT`/`FLAGS`/`FETCH` traffic while selected.
#[derive(Debug, Clone)]
pub struct SelectedMailbox {
    pub name: String,
    pub exists: u32,
    pub recent: u32,
    pub uidvalidity: Option<NonZeroU32>,
    pub uidnext: Option<NonZeroU32>,
    pub highest_mod_seq: Option<NonZeroU64>,
    pub flags: Vec<Flag<'static>>,
    pub permanent_flags: Vec<FlagPerm<'static>>,
    pub access: MailboxAccess,
}

impl SelectedMailbox {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            exists: 0,
            recent: 0,
            uidvalidity: None,
            uidnext: None,
            highest_mod_seq: None,
            flags: Vec::new(),
            permanent_flags: Vec::new(),
            // RFC 3501 says the tagged completion carries `[READ-WRITE]` or `[READ-ONLY]`;
            // `SELECT` without an explicit code defaults to read-write.
            access: MailboxAccess::ReadWrite,
        }
    }
}

/// The server's latest advertised capability set, overwritten on every `CAPABILITY`
/// response/code seen (including the greeting).
#[derive(Debug, Clone, Default)]
pub struct Capabilities(pub(crate) Vec<Capability<'static>>);

impl Capabilities {
    pub fn as_slice(&self) -> &[Capability<'static>] {
        &self.0
    }

    pub fn contains(&self, capability: &Capability<'static>) -> bool {
        self.0.contains(capability)
    }
}

/// DEFLATE transport compression state (RFC 4978). `imap-client` only tracks whether
/// compression is active; actually wrapping the stream in a deflate codec is left to the
/// caller's stream implementation (see SPEC_FULL.md §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Off,
    Deflate,
}
