//! Streaming `FETCH`/`UID FETCH` responses item by item, instead of buffering the whole
//! response as [`crate::session::Outcome::data`] does.

use std::num::NonZeroU32;

use imap_codec::imap_types::{
    core::{Tag, Vec1},
    fetch::MessageDataItem,
    response::{Data, Response, Status},
};

use crate::{error::Error, session::Session, state::ConnectionState};

/// Yields one `(seq, items)` pair per `FETCH` response while a `FETCH`/`UID FETCH` command is in
/// flight, folding any other untagged data into the session as it arrives.
///
/// Must be driven to exhaustion (or dropped) before the next command is issued on the same
/// session; [`Drop`] does this automatically by draining whatever the caller didn't consume.
pub struct FetchStream<'s, S> {
    session: &'s mut Session<S>,
    tag: Tag<'static>,
    done: bool,
}

impl<'s, S> FetchStream<'s, S>
where
    S: std::io::Read + std::io::Write,
{
    pub(crate) fn new(session: &'s mut Session<S>, tag: Tag<'static>) -> Self {
        Self {
            session,
            tag,
            done: false,
        }
    }

    fn advance(&mut self) -> Option<Result<(NonZeroU32, Vec1<MessageDataItem<'static>>), Error>> {
        if self.done {
            return None;
        }

        loop {
            let frame = match self.session.read_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };

            match frame {
                Response::Data(Data::Fetch { seq, items }) => {
                    return Some(Ok((seq, items)));
                }
                Response::Data(other) => {
                    self.session.fold_data_pub(&other);
                }
                Response::Status(Status::Ok {
                    tag: Some(t), code, ..
                }) if t == self.tag => {
                    self.done = true;
                    if let Some(code) = &code {
                        self.session.fold_code_pub(code);
                    }
                    return None;
                }
                Response::Status(Status::No {
                    tag: Some(t), code, text,
                }) if t == self.tag => {
                    self.done = true;
                    return Some(Err(Error::No { code, text }));
                }
                Response::Status(Status::Bad {
                    tag: Some(t), code, text,
                }) if t == self.tag => {
                    self.done = true;
                    self.session.mark_broken();
                    return Some(Err(Error::Bad { code, text }));
                }
                Response::Status(Status::Bye { code, text }) => {
                    self.done = true;
                    self.session.mark_logout();
                    return Some(Err(Error::Bye { code, text }));
                }
                Response::Status(status) => {
                    if let Some(code) = status.code() {
                        self.session.fold_code_pub(code);
                    }
                }
                Response::Continue(_) => {
                    self.done = true;
                    self.session.mark_broken();
                    return Some(Err(Error::UnexpectedContinuation));
                }
            }
        }
    }
}

impl<'s, S> Iterator for FetchStream<'s, S>
where
    S: std::io::Read + std::io::Write,
{
    type Item = Result<(NonZeroU32, Vec1<MessageDataItem<'static>>), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl<'s, S> Drop for FetchStream<'s, S>
where
    S: std::io::Read + std::io::Write,
{
    fn drop(&mut self) {
        if self.session.state() == ConnectionState::Broken {
            return;
        }
        while self.advance().is_some() {}
    }
}
