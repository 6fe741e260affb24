//! The public command surface (§4.6), grouped by the RFC that defines each command.
//!
//! Every method builds a [`CommandBody`] with the smart constructors from `imap-types`, executes
//! it via [`Session::execute`] or [`Session::execute_fetch`], and turns the resulting
//! [`Outcome`]/[`FetchStream`] into something a caller doesn't need `imap-codec` in scope to use.

use std::num::NonZeroU32;

use imap_codec::imap_types::{
    auth::AuthMechanism,
    command::CommandBody,
    core::{Charset, Literal, Vec1},
    datetime::DateTime,
    extensions::compress::CompressionAlgorithm,
    fetch::MacroOrMessageDataItemNames,
    flag::{Flag, StoreResponse, StoreType},
    mailbox::{ListMailbox, Mailbox},
    response::Data,
    search::SearchKey,
    sequence::SequenceSet,
    status::StatusDataItemName,
};

use crate::{
    error::Error,
    fetch_stream::FetchStream,
    session::{Outcome, Session},
    state::ConnectionState,
};

/// The result of a successful `SELECT`/`EXAMINE`: a snapshot of what the tagged completion and
/// its untagged data said about the mailbox. Matches [`crate::state::SelectedMailbox`], which the
/// session keeps up to date afterward.
#[derive(Debug, Clone)]
pub struct SelectOutcome {
    pub exists: u32,
    pub recent: u32,
    pub read_only: bool,
}

/// The result of a `SEARCH`. ESEARCH results (RFC 4731) surface through
/// [`imap_codec::imap_types::extensions::esearch::EsearchResponse`] inside
/// [`Outcome::data`] instead, since their shape depends on what was requested.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub seqs: Vec<NonZeroU32>,
}

fn mailbox_name(mailbox: &Mailbox<'_>) -> String {
    match mailbox {
        Mailbox::Inbox => "INBOX".to_string(),
        Mailbox::Other(other) => String::from_utf8_lossy(other.inner().as_ref()).into_owned(),
    }
}

impl<S> Session<S>
where
    S: std::io::Read + std::io::Write,
{
    fn require_state(&self, state: ConnectionState, what: &'static str) -> Result<(), Error> {
        if self.state() == state {
            Ok(())
        } else {
            Err(Error::SessionState {
                expected: what,
                actual: self.state(),
            })
        }
    }

    // ----- 6.1 Client Commands - Any State -----

    pub fn capability(&mut self) -> Result<Outcome, Error> {
        self.execute(CommandBody::Capability)
    }

    pub fn noop(&mut self) -> Result<Outcome, Error> {
        self.execute(CommandBody::Noop)
    }

    pub fn logout(&mut self) -> Result<Outcome, Error> {
        let outcome = self.execute(CommandBody::Logout);
        // RFC 3501 §6.1.3: the server sends an untagged BYE before the tagged OK, which
        // `drive_to_completion` turns into `Error::Bye` rather than a normal `Outcome`.
        match outcome {
            Ok(outcome) => Ok(outcome),
            Err(Error::Bye { code, text }) => Ok(Outcome {
                code,
                text,
                data: Vec::new(),
            }),
            Err(err) => Err(err),
        }
    }

    // ----- 6.2 Client Commands - Not Authenticated State -----

    pub fn login(&mut self, username: &str, password: &str) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::NotAuthenticated, "not authenticated")?;
        let body = CommandBody::login(username, password)
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        let outcome = self.execute(body)?;
        self.set_state_authenticated();
        Ok(outcome)
    }

    pub fn authenticate(&mut self, mechanism: AuthMechanism<'static>) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::NotAuthenticated, "not authenticated")?;
        let outcome = self.execute(CommandBody::authenticate(mechanism))?;
        self.set_state_authenticated();
        Ok(outcome)
    }

    /// `AUTHENTICATE PLAIN` (RFC 4616), responding to the server's continuation request with
    /// `authzid\0authcid\0password`.
    pub fn authenticate_plain(
        &mut self,
        authzid: &str,
        authcid: &str,
        password: &str,
    ) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::NotAuthenticated, "not authenticated")?;
        let mut response = Vec::new();
        response.extend_from_slice(authzid.as_bytes());
        response.push(0);
        response.extend_from_slice(authcid.as_bytes());
        response.push(0);
        response.extend_from_slice(password.as_bytes());
        let outcome = self.execute_sasl(AuthMechanism::Plain, response)?;
        self.set_state_authenticated();
        Ok(outcome)
    }

    /// `AUTHENTICATE XOAUTH2`, responding with the conventional
    /// `user=<user>\x01auth=Bearer <token>\x01\x01` challenge response.
    pub fn authenticate_xoauth2(&mut self, user: &str, token: &str) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::NotAuthenticated, "not authenticated")?;
        let response = format!("user={user}\x01auth=Bearer {token}\x01\x01").into_bytes();
        let outcome = self.execute_sasl(AuthMechanism::XOAuth2, response)?;
        self.set_state_authenticated();
        Ok(outcome)
    }

    // ----- 6.3 Client Commands - Authenticated State -----

    pub fn select(&mut self, mailbox: &str) -> Result<SelectOutcome, Error> {
        self.require_authenticated_or_selected()?;
        let mailbox: Mailbox<'static> = Mailbox::try_from(mailbox.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.begin_select(mailbox_name(&mailbox));
        let body = CommandBody::select(mailbox).map_err(|err| Error::Build(format!("{err:?}")))?;
        let outcome = self.execute(body)?;
        self.set_state_selected();
        Ok(select_outcome(&outcome))
    }

    pub fn examine(&mut self, mailbox: &str) -> Result<SelectOutcome, Error> {
        self.require_authenticated_or_selected()?;
        let mailbox: Mailbox<'static> = Mailbox::try_from(mailbox.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.begin_select(mailbox_name(&mailbox));
        let body = CommandBody::examine(mailbox).map_err(|err| Error::Build(format!("{err:?}")))?;
        let outcome = self.execute(body)?;
        self.set_state_selected();
        Ok(select_outcome(&outcome))
    }

    pub fn create(&mut self, mailbox: &str) -> Result<Outcome, Error> {
        self.require_authenticated_or_selected()?;
        let body = CommandBody::create(mailbox.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute(body)
    }

    pub fn delete(&mut self, mailbox: &str) -> Result<Outcome, Error> {
        self.require_authenticated_or_selected()?;
        let body = CommandBody::delete(mailbox.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute(body)
    }

    pub fn rename(&mut self, from: &str, to: &str) -> Result<Outcome, Error> {
        self.require_authenticated_or_selected()?;
        let body = CommandBody::rename(from.to_string(), to.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute(body)
    }

    pub fn subscribe(&mut self, mailbox: &str) -> Result<Outcome, Error> {
        self.require_authenticated_or_selected()?;
        let body = CommandBody::subscribe(mailbox.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute(body)
    }

    pub fn unsubscribe(&mut self, mailbox: &str) -> Result<Outcome, Error> {
        self.require_authenticated_or_selected()?;
        let body = CommandBody::unsubscribe(mailbox.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute(body)
    }

    pub fn list(&mut self, reference: &str, mailbox_wildcard: &str) -> Result<Vec<Data<'static>>, Error> {
        self.require_authenticated_or_selected()?;
        let wildcard: ListMailbox<'static> = ListMailbox::try_from(mailbox_wildcard.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        let body = CommandBody::list(reference.to_string(), wildcard)
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        Ok(self.execute(body)?.data)
    }

    pub fn lsub(&mut self, reference: &str, mailbox_wildcard: &str) -> Result<Vec<Data<'static>>, Error> {
        self.require_authenticated_or_selected()?;
        let wildcard: ListMailbox<'static> = ListMailbox::try_from(mailbox_wildcard.to_string())
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        let body = CommandBody::lsub(reference.to_string(), wildcard)
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        Ok(self.execute(body)?.data)
    }

    pub fn status(
        &mut self,
        mailbox: &str,
        items: Vec<StatusDataItemName>,
    ) -> Result<Vec<Data<'static>>, Error> {
        self.require_authenticated_or_selected()?;
        let body = CommandBody::status(mailbox.to_string(), items)
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        Ok(self.execute(body)?.data)
    }

    pub fn append(
        &mut self,
        mailbox: &str,
        flags: Vec<Flag<'static>>,
        date: Option<DateTime>,
        message: Vec<u8>,
    ) -> Result<Outcome, Error> {
        self.require_authenticated_or_selected()?;
        let literal: Literal<'static> =
            Literal::try_from(message).map_err(|err| Error::Build(format!("{err:?}")))?;
        let body = CommandBody::append(mailbox.to_string(), flags, date, literal)
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute(body)
    }

    #[cfg(feature = "ext_enable")]
    pub fn enable(
        &mut self,
        capabilities: Vec1<imap_codec::imap_types::extensions::enable::CapabilityEnable<'static>>,
    ) -> Result<Outcome, Error> {
        self.require_authenticated_or_selected()?;
        self.execute(CommandBody::Enable { capabilities })
    }

    #[cfg(feature = "ext_id")]
    pub fn id(
        &mut self,
        parameters: Option<Vec<(imap_codec::imap_types::core::IString<'static>, imap_codec::imap_types::core::NString<'static>)>>,
    ) -> Result<Outcome, Error> {
        self.execute(CommandBody::Id { parameters })
    }

    #[cfg(feature = "ext_namespace")]
    pub fn namespace(&mut self) -> Result<Outcome, Error> {
        self.require_authenticated_or_selected()?;
        self.execute(CommandBody::Namespace)
    }

    #[cfg(feature = "ext_compress")]
    pub fn compress_deflate(&mut self) -> Result<Outcome, Error> {
        let outcome = self.execute(CommandBody::Compress {
            algorithm: CompressionAlgorithm::Deflate,
        })?;
        self.set_compression(crate::state::Compression::Deflate);
        Ok(outcome)
    }

    // ----- 6.4 Client Commands - Selected State -----

    pub fn check(&mut self) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::Selected, "a selected mailbox")?;
        self.execute(CommandBody::Check)
    }

    pub fn close(&mut self) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::Selected, "a selected mailbox")?;
        let outcome = self.execute(CommandBody::Close)?;
        self.clear_selected_mailbox();
        Ok(outcome)
    }

    pub fn expunge(&mut self) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::Selected, "a selected mailbox")?;
        self.execute(CommandBody::Expunge)
    }

    #[cfg(feature = "ext_uidplus")]
    pub fn uid_expunge(&mut self, sequence_set: SequenceSet) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::Selected, "a selected mailbox")?;
        self.execute(CommandBody::ExpungeUid { sequence_set })
    }

    pub fn search(&mut self, criteria: Vec1<SearchKey<'static>>, uid: bool) -> Result<SearchOutcome, Error> {
        self.search_charset(None, criteria, uid)
    }

    pub fn search_charset(
        &mut self,
        charset: Option<Charset<'static>>,
        criteria: Vec1<SearchKey<'static>>,
        uid: bool,
    ) -> Result<SearchOutcome, Error> {
        self.require_state(ConnectionState::Selected, "a selected mailbox")?;
        let outcome = self.execute(CommandBody::search(charset, criteria, uid))?;
        let mut result = SearchOutcome::default();
        for data in &outcome.data {
            if let Data::Search { seqs, .. } = data {
                result.seqs.extend(seqs.iter().copied());
            }
        }
        Ok(result)
    }

    pub fn fetch<'se>(
        &'se mut self,
        sequence_set: SequenceSet,
        items: MacroOrMessageDataItemNames<'static>,
        uid: bool,
    ) -> Result<FetchStream<'se, S>, Error> {
        self.require_state(ConnectionState::Selected, "a selected mailbox")?;
        let body = CommandBody::fetch(sequence_set, items, uid)
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute_fetch(body)
    }

    pub fn store(
        &mut self,
        sequence_set: SequenceSet,
        kind: StoreType,
        response: StoreResponse,
        flags: Vec<Flag<'static>>,
        uid: bool,
    ) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::Selected, "a selected mailbox")?;
        let body = CommandBody::store(sequence_set, kind, response, flags, uid)
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute(body)
    }

    pub fn copy(&mut self, sequence_set: SequenceSet, mailbox: &str, uid: bool) -> Result<Outcome, Error> {
        self.require_state(ConnectionState::Selected, "a selected mailbox")?;
        let body = CommandBody::copy(sequence_set, mailbox.to_string(), uid)
            .map_err(|err| Error::Build(format!("{err:?}")))?;
        self.execute(body)
    }

    fn require_authenticated_or_selected(&self) -> Result<(), Error> {
        if self.state().is_authenticated_or_selected() {
            Ok(())
        } else {
            Err(Error::SessionState {
                expected: "authenticated or selected",
                actual: self.state(),
            })
        }
    }
}

fn select_outcome(outcome: &Outcome) -> SelectOutcome {
    use imap_codec::imap_types::response::Code;

    let mut result = SelectOutcome {
        exists: 0,
        recent: 0,
        read_only: false,
    };

    for data in &outcome.data {
        match data {
            Data::Exists(n) => result.exists = *n,
            Data::Recent(n) => result.recent = *n,
            _ => {}
        }
    }

    if let Some(Code::ReadOnly) = &outcome.code {
        result.read_only = true;
    }

    result
}
