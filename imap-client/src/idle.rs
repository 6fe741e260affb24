//! `IDLE` (RFC 2177): a long-lived command that keeps the connection open so the server can push
//! untagged data without a client poll, until the client sends `DONE`.

use imap_codec::{
    encode::{Encoder, Fragment},
    imap_types::{
        core::Tag,
        extensions::idle::IdleDone,
        response::{Data, Response, Status},
    },
    IdleDoneCodec,
};

use crate::{error::Error, session::Session, state::ConnectionState};

/// Returned by [`Session::idle`] once the server has accepted the `IDLE` command (the `+`
/// continuation has already been read). Holds the session for the duration of the idle period;
/// no other command can be issued until [`IdleHandle::done`] completes.
///
/// `session` is `None` only after [`Self::done`] has taken it; [`Drop`] uses that to tell a
/// completed idle from one abandoned mid-flight.
pub struct IdleHandle<'s, S> {
    session: Option<&'s mut Session<S>>,
    tag: Tag<'static>,
}

impl<'s, S> IdleHandle<'s, S>
where
    S: std::io::Read + std::io::Write,
{
    pub(crate) fn new(session: &'s mut Session<S>, tag: Tag<'static>) -> Self {
        Self {
            session: Some(session),
            tag,
        }
    }

    fn session_mut(&mut self) -> &mut Session<S> {
        self.session.as_deref_mut().expect("idle session still live")
    }

    /// Block until the next untagged update arrives, folding it into session state and
    /// returning it to the caller. Blocks on the underlying stream's `read`; set a read timeout
    /// on the transport if periodic polling is needed alongside idling.
    pub fn next_update(&mut self) -> Result<Data<'static>, Error> {
        loop {
            match self.session_mut().read_frame()? {
                Response::Data(data) => {
                    self.session_mut().fold_data_pub(&data);
                    return Ok(data);
                }
                Response::Status(Status::Bye { code, text }) => {
                    self.session_mut().mark_logout();
                    return Err(Error::Bye { code, text });
                }
                Response::Status(status) => {
                    if let Some(code) = status.code() {
                        self.session_mut().fold_code_pub(code);
                    }
                }
                Response::Continue(_) => {
                    self.session_mut().mark_broken();
                    return Err(Error::UnexpectedContinuation);
                }
            }
        }
    }

    /// Send `DONE` and wait for the tagged completion of the original `IDLE` command.
    pub fn done(mut self) -> Result<crate::session::Outcome, Error> {
        let session = self.session.take().expect("idle session still live");

        let mut encoded = IdleDoneCodec::default().encode(&IdleDone);
        while let Some(fragment) = encoded.next() {
            let data = match fragment {
                Fragment::Line { data } => data,
                Fragment::Literal { data, .. } => data,
            };
            session.send_raw(&data)?;
        }

        session.drive_to_completion_pub(&self.tag)
    }
}

impl<'s, S> Drop for IdleHandle<'s, S>
where
    S: std::io::Read + std::io::Write,
{
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if session.state() == ConnectionState::Broken {
            return;
        }
        // The server keeps sending updates for a command nobody will read `DONE` to; there is
        // no safe recovery but to mark the connection unusable rather than silently
        // desynchronize the next command's framing.
        session.mark_broken();
    }
}
