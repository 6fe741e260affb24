//! The connection engine: drives one command to completion at a time, folding untagged data and
//! response codes into session state as it goes.

use imap_codec::{
    encode::{Encoder, Fragment},
    imap_types::{
        auth::{AuthMechanism, AuthenticateData},
        command::{Command, CommandBody},
        core::{LiteralMode, Tag},
        response::{Code, Data, Greeting, GreetingKind, Response, Status, Text},
    },
    AuthenticateDataCodec, CommandCodec,
};

use crate::{
    error::Error,
    state::{Capabilities, Compression, ConnectionState, MailboxAccess, SelectedMailbox},
    stream::FrameReader,
};

/// The raw result of a completed command: the tagged completion's code and text, plus every
/// untagged [`Data`] response seen while it was in flight (already folded into session state, but
/// also handed back so a façade method can interpret command-specific payloads like `SEARCH`
/// numbers or `FETCH` items).
#[derive(Debug)]
pub struct Outcome {
    pub code: Option<Code<'static>>,
    pub text: Text<'static>,
    pub data: Vec<Data<'static>>,
}

/// A live IMAP connection, generic over any `Read + Write` transport.
///
/// `Session` owns the byte-level framing ([`FrameReader`]) and the protocol state machine from
/// §4.4: [`ConnectionState`], the server's advertised [`Capabilities`], and (while a mailbox is
/// selected) a [`SelectedMailbox`]. It exposes one primitive, [`Session::execute`], that higher
/// level façade methods build commands around.
#[derive(Debug)]
pub struct Session<S> {
    reader: FrameReader<S>,
    state: ConnectionState,
    capabilities: Capabilities,
    selected: Option<SelectedMailbox>,
    tag_counter: u32,
    compression: Compression,
}

impl<S> Session<S>
where
    S: std::io::Read + std::io::Write,
{
    /// Read the server greeting and construct a session in the resulting initial state.
    pub fn connect(stream: S) -> Result<(Self, Greeting<'static>), Error> {
        let mut reader = FrameReader::new(stream);
        let greeting = reader.read_greeting()?;

        let state = match greeting.kind {
            GreetingKind::Ok => ConnectionState::NotAuthenticated,
            GreetingKind::PreAuth => ConnectionState::Authenticated,
            GreetingKind::Bye => ConnectionState::Logout,
        };

        let mut session = Self {
            reader,
            state,
            capabilities: Capabilities::default(),
            selected: None,
            tag_counter: 0,
            compression: Compression::Off,
        };

        if let Some(code) = &greeting.code {
            session.fold_code(code);
        }

        Ok((session, greeting))
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn selected(&self) -> Option<&SelectedMailbox> {
        self.selected.as_ref()
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub(crate) fn stream_mut(&mut self) -> &mut S {
        self.reader.get_mut()
    }

    pub(crate) fn set_compression(&mut self, compression: Compression) {
        self.compression = compression;
    }

    /// Prepare [`Self::selected`] to receive untagged data for an in-flight `SELECT`/`EXAMINE`.
    pub(crate) fn begin_select(&mut self, name: String) {
        self.selected = Some(SelectedMailbox::new(name));
    }

    pub(crate) fn set_state_authenticated(&mut self) {
        self.state = ConnectionState::Authenticated;
    }

    pub(crate) fn set_state_selected(&mut self) {
        self.state = ConnectionState::Selected;
    }

    pub(crate) fn clear_selected_mailbox(&mut self) {
        self.selected = None;
        self.state = ConnectionState::Authenticated;
    }

    fn next_tag(&mut self) -> Tag<'static> {
        self.tag_counter += 1;
        Tag::try_from(format!("A{:04}", self.tag_counter)).expect("generated tag is always valid")
    }

    /// Guard against issuing commands on a session that can no longer make progress.
    fn require_not(&self, forbidden: ConnectionState, expected: &'static str) -> Result<(), Error> {
        if self.state == forbidden {
            Err(Error::SessionState {
                expected,
                actual: self.state,
            })
        } else {
            Ok(())
        }
    }

    /// Build a tagged command from `body`, send it, and drive the connection until its tagged
    /// completion arrives (or the connection breaks).
    pub fn execute(&mut self, body: CommandBody<'static>) -> Result<Outcome, Error> {
        self.require_not(ConnectionState::Broken, "a usable connection")?;
        self.require_not(ConnectionState::Closed, "a usable connection")?;

        let tag = self.next_tag();
        let command = Command::new(tag.clone(), body)
            .map_err(|_| Error::Build("invalid tag".to_string()))?;

        if let Err(err) = self.write_command(&command) {
            self.state = ConnectionState::Broken;
            return Err(err);
        }

        self.drive_to_completion(&tag)
    }

    /// Run a single-exchange SASL mechanism (`PLAIN`, `XOAUTH2`, ...): send `AUTHENTICATE
    /// <mechanism>`, wait for the server's continuation request, answer it with `response`
    /// (raw, not yet base64-encoded — [`imap_codec::AuthenticateDataCodec`] does that), then
    /// drive the exchange to its tagged completion.
    ///
    /// Mechanisms that need more than one challenge/response round (e.g. `CRAM-MD5`) aren't
    /// representable through this entry point; `imap-client` only constructs the single-step
    /// mechanisms named in its scope.
    pub(crate) fn execute_sasl(
        &mut self,
        mechanism: AuthMechanism<'static>,
        response: Vec<u8>,
    ) -> Result<Outcome, Error> {
        self.require_not(ConnectionState::Broken, "a usable connection")?;
        self.require_not(ConnectionState::Closed, "a usable connection")?;

        let tag = self.next_tag();
        let command = Command::new(tag.clone(), CommandBody::authenticate(mechanism))
            .map_err(|_| Error::Build("invalid tag".to_string()))?;

        if let Err(err) = self.write_command(&command) {
            self.state = ConnectionState::Broken;
            return Err(err);
        }

        match self.reader.read_frame() {
            Ok(Response::Continue(_)) => {}
            Ok(Response::Status(Status::Bye { code, text })) => {
                self.state = ConnectionState::Logout;
                return Err(Error::Bye { code, text });
            }
            Ok(other) => {
                self.state = ConnectionState::Broken;
                return Err(unexpected_frame(other));
            }
            Err(err) => {
                self.state = ConnectionState::Broken;
                return Err(err);
            }
        }

        let mut encoded =
            AuthenticateDataCodec::default().encode(&AuthenticateData::r#continue(response));
        while let Some(fragment) = encoded.next() {
            let data = match fragment {
                Fragment::Line { data } => data,
                Fragment::Literal { data, .. } => data,
            };
            if let Err(err) = self.reader.send_raw(&data) {
                self.state = ConnectionState::Broken;
                return Err(err.into());
            }
        }

        self.drive_to_completion(&tag)
    }

    fn write_command(&mut self, command: &Command<'static>) -> Result<(), Error> {
        let mut encoded = CommandCodec::default().encode(command);

        while let Some(fragment) = encoded.next() {
            match fragment {
                Fragment::Line { data } => self.reader.send_raw(&data)?,
                Fragment::Literal { data, mode } => {
                    if mode == LiteralMode::Sync {
                        match self.reader.read_frame()? {
                            Response::Continue(_) => {}
                            Response::Status(Status::Bye { code, text }) => {
                                self.state = ConnectionState::Logout;
                                return Err(Error::Bye { code, text });
                            }
                            other => {
                                self.state = ConnectionState::Broken;
                                return Err(unexpected_frame(other));
                            }
                        }
                    }
                    self.reader.send_raw(&data)?;
                }
            }
        }

        Ok(())
    }

    /// Read frames until the tagged completion matching `tag` arrives, folding every untagged
    /// data response and interleaved status response into session state along the way.
    fn drive_to_completion(&mut self, tag: &Tag<'static>) -> Result<Outcome, Error> {
        let mut data = Vec::new();

        loop {
            let frame = match self.reader.read_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    self.state = ConnectionState::Broken;
                    return Err(err);
                }
            };

            match frame {
                Response::Data(d) => {
                    self.fold_data(&d);
                    data.push(d);
                }
                Response::Status(Status::Ok {
                    tag: Some(t),
                    code,
                    text,
                }) if &t == tag => {
                    if let Some(code) = &code {
                        self.fold_code(code);
                    }
                    return Ok(Outcome { code, text, data });
                }
                Response::Status(Status::No {
                    tag: Some(t),
                    code,
                    text,
                }) if &t == tag => {
                    return Err(Error::No { code, text });
                }
                Response::Status(Status::Bad {
                    tag: Some(t),
                    code,
                    text,
                }) if &t == tag => {
                    self.state = ConnectionState::Broken;
                    return Err(Error::Bad { code, text });
                }
                Response::Status(Status::Bye { code, text }) => {
                    self.state = ConnectionState::Logout;
                    return Err(Error::Bye { code, text });
                }
                Response::Status(status) => {
                    // Untagged OK/NO/BAD, or a tagged status for some other (stale) tag: folds
                    // its code, if any, and keeps waiting for our completion.
                    if let Some(code) = status.code() {
                        self.fold_code(code);
                    }
                }
                Response::Continue(_) => {
                    self.state = ConnectionState::Broken;
                    return Err(Error::UnexpectedContinuation);
                }
            }
        }
    }

    fn fold_data(&mut self, data: &Data<'static>) {
        match data {
            Data::Capability(caps) => {
                self.capabilities = Capabilities(caps.as_ref().to_vec());
            }
            Data::Flags(flags) => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.flags = flags.clone();
                }
            }
            Data::Exists(n) => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.exists = *n;
                }
            }
            Data::Recent(n) => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.recent = *n;
                }
            }
            Data::Expunge(seq) => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.exists = mailbox.exists.saturating_sub(1);
                    let _ = seq;
                }
            }
            _ => {}
        }
    }

    fn fold_code(&mut self, code: &Code<'static>) {
        match code {
            Code::Capability(caps) => {
                self.capabilities = Capabilities(caps.as_ref().to_vec());
            }
            Code::PermanentFlags(flags) => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.permanent_flags = flags.clone();
                }
            }
            Code::UidNext(uid) => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.uidnext = Some(*uid);
                }
            }
            Code::UidValidity(uid) => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.uidvalidity = Some(*uid);
                }
            }
            Code::ReadOnly => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.access = MailboxAccess::ReadOnly;
                }
            }
            Code::ReadWrite => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.access = MailboxAccess::ReadWrite;
                }
            }
            #[cfg(feature = "ext_compress")]
            Code::CompressionActive => {
                self.compression = Compression::Deflate;
            }
            #[cfg(feature = "ext_condstore_qresync")]
            Code::HighestModSeq(value) => {
                if let Some(mailbox) = &mut self.selected {
                    mailbox.highest_mod_seq = std::num::NonZeroU64::new(*value);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn read_frame(&mut self) -> Result<Response<'static>, Error> {
        self.reader.read_frame()
    }

    /// Exposed for [`crate::fetch_stream::FetchStream`], which reads frames directly off the
    /// session instead of going through [`Self::execute`].
    pub(crate) fn fold_data_pub(&mut self, data: &Data<'static>) {
        self.fold_data(data);
    }

    pub(crate) fn fold_code_pub(&mut self, code: &Code<'static>) {
        self.fold_code(code);
    }

    pub(crate) fn mark_broken(&mut self) {
        self.state = ConnectionState::Broken;
    }

    pub(crate) fn mark_logout(&mut self) {
        self.state = ConnectionState::Logout;
    }

    /// Issue a `FETCH`/`UID FETCH` command and stream its results instead of buffering them.
    ///
    /// The caller must drain the returned [`crate::fetch_stream::FetchStream`] (or drop it,
    /// which drains it automatically) before issuing another command.
    pub fn execute_fetch(
        &mut self,
        body: CommandBody<'static>,
    ) -> Result<crate::fetch_stream::FetchStream<'_, S>, Error> {
        self.require_not(ConnectionState::Broken, "a usable connection")?;
        self.require_not(ConnectionState::Closed, "a usable connection")?;

        let tag = self.next_tag();
        let command = Command::new(tag.clone(), body)
            .map_err(|_| Error::Build("invalid tag".to_string()))?;

        if let Err(err) = self.write_command(&command) {
            self.state = ConnectionState::Broken;
            return Err(err);
        }

        Ok(crate::fetch_stream::FetchStream::new(self, tag))
    }

    /// Send `IDLE` and wait for the server's continuation request, returning a handle that reads
    /// updates until [`crate::idle::IdleHandle::done`] sends `DONE`.
    #[cfg(feature = "ext_idle")]
    pub fn idle(&mut self) -> Result<crate::idle::IdleHandle<'_, S>, Error> {
        self.require_not(ConnectionState::Broken, "a usable connection")?;
        self.require_not(ConnectionState::Closed, "a usable connection")?;

        let tag = self.next_tag();
        let command = Command::new(tag.clone(), CommandBody::Idle)
            .map_err(|_| Error::Build("invalid tag".to_string()))?;

        if let Err(err) = self.write_command(&command) {
            self.state = ConnectionState::Broken;
            return Err(err);
        }

        match self.reader.read_frame() {
            Ok(Response::Continue(_)) => {}
            Ok(Response::Status(Status::Bye { code, text })) => {
                self.state = ConnectionState::Logout;
                return Err(Error::Bye { code, text });
            }
            Ok(other) => {
                self.state = ConnectionState::Broken;
                return Err(unexpected_frame(other));
            }
            Err(err) => {
                self.state = ConnectionState::Broken;
                return Err(err);
            }
        }

        Ok(crate::idle::IdleHandle::new(self, tag))
    }

    pub(crate) fn send_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.reader.send_raw(bytes).map_err(Error::from)
    }

    pub(crate) fn drive_to_completion_pub(&mut self, tag: &Tag<'static>) -> Result<Outcome, Error> {
        self.drive_to_completion(tag)
    }
}

fn unexpected_frame(frame: Response<'static>) -> Error {
    match frame {
        Response::Status(Status::No { code, text, .. }) => Error::No { code, text },
        Response::Status(Status::Bad { code, text, .. }) => Error::Bad { code, text },
        _ => Error::UnexpectedContinuation,
    }
}
