//! Byte-level framing: turns a `Read + Write` stream into a sequence of [`Response`] frames.
//!
//! Generalizes `imap-codec`'s internal `stream::sync::client::Client<S>`, which decodes one
//! expected message type per call, into a loop that decodes an arbitrary number of `Response`
//! frames (tagged completions, untagged data, and continuation requests alike) off the same
//! connection.

use std::io::{Read, Write};

use bytes::{Buf, BytesMut};
use imap_codec::{
    decode::{Decoder, GreetingDecodeError, ResponseDecodeError},
    imap_types::response::{Greeting, Response},
    GreetingCodec, ResponseCodec,
};
use log::{error, trace};

use crate::error::Error;

/// Mirrors `imap-codec::stream::FramingState`: the protocol receiver is either reading a line, or
/// reading a known-length run of literal octets followed by the rest of its line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FramingState {
    ReadLine { to_consume_acc: usize },
    ReadLiteral { to_consume_acc: usize, length: u32 },
}

impl Default for FramingState {
    fn default() -> Self {
        FramingState::ReadLine { to_consume_acc: 0 }
    }
}

/// Skip the first `skip` bytes of `buf` and report how many more bytes are needed to cover the
/// next `\r\n`. `Some(Ok(n))` means `buf[..skip + n]` is a complete, correctly terminated line;
/// `Some(Err(n))` means a line was found but it ends in a bare `\n`; `None` means no line boundary
/// was found yet.
fn find_crlf_inclusive(skip: usize, buf: &[u8]) -> Option<Result<usize, usize>> {
    match buf.iter().skip(skip).position(|b| *b == b'\n') {
        Some(position) if skip + position > 0 && buf[skip + position - 1] == b'\r' => {
            Some(Ok(position + 1))
        }
        Some(position) => Some(Err(position + 1)),
        None => None,
    }
}

/// Reads [`Response`] frames off a stream, buffering and tracking literal boundaries.
#[derive(Debug)]
pub(crate) struct FrameReader<S> {
    state: FramingState,
    stream: S,
    buffer: BytesMut,
}

impl<S> FrameReader<S>
where
    S: Read,
{
    pub(crate) fn new(stream: S) -> Self {
        Self {
            state: FramingState::default(),
            stream,
            buffer: BytesMut::new(),
        }
    }

    pub(crate) fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Read and decode the server greeting. Must be called exactly once, before any
    /// [`Self::read_frame`] call; the greeting grammar never contains a literal.
    pub(crate) fn read_greeting(&mut self) -> Result<Greeting<'static>, Error> {
        let mut to_consume_acc = 0;

        loop {
            match find_crlf_inclusive(to_consume_acc, &self.buffer) {
                Some(Ok(to_consume)) => {
                    to_consume_acc += to_consume;
                    let line = &self.buffer[..to_consume_acc];

                    return match GreetingCodec::default().decode_static(line) {
                        Ok((remaining, greeting)) => {
                            debug_assert!(remaining.is_empty());
                            self.buffer.advance(to_consume_acc);
                            Ok(greeting)
                        }
                        Err(GreetingDecodeError::Incomplete) => {
                            Err(Error::Io(std::io::Error::new(
                                std::io::ErrorKind::InvalidData,
                                "truncated greeting",
                            )))
                        }
                        Err(GreetingDecodeError::Failed) => Err(Error::Io(std::io::Error::new(
                            std::io::ErrorKind::InvalidData,
                            "malformed greeting",
                        ))),
                    };
                }
                Some(Err(to_discard)) => {
                    to_consume_acc += to_discard;
                    return Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "malformed greeting (missing CR)",
                    )));
                }
                None => self.fill_buffer()?,
            }
        }
    }

    /// Read and decode exactly one complete response frame.
    pub(crate) fn read_frame(&mut self) -> Result<Response<'static>, Error> {
        loop {
            match self.state {
                FramingState::ReadLine {
                    mut to_consume_acc,
                } => match find_crlf_inclusive(to_consume_acc, &self.buffer) {
                    Some(Ok(to_consume)) => {
                        to_consume_acc += to_consume;
                        let line = &self.buffer[..to_consume_acc];

                        match ResponseCodec::default().decode_static(line) {
                            Ok((remaining, response)) => {
                                debug_assert!(remaining.is_empty());
                                self.buffer.advance(to_consume_acc);
                                self.state = FramingState::default();
                                trace!("read frame: {response:?}");
                                return Ok(response);
                            }
                            Err(ResponseDecodeError::Incomplete) => {
                                // A line without a trailing literal announcement is always
                                // complete; this only happens on a truncated/garbled line.
                                let discarded = self.buffer.split_to(to_consume_acc);
                                self.state = FramingState::default();
                                error!("incomplete parse on a full line, discarding: {discarded:?}");
                                return Err(Error::ProtocolParse(ResponseDecodeError::Incomplete));
                            }
                            Err(ResponseDecodeError::LiteralFound { length }) => {
                                self.buffer.reserve(length as usize);
                                self.state = FramingState::ReadLiteral {
                                    to_consume_acc,
                                    length,
                                };
                            }
                            Err(ResponseDecodeError::Failed) => {
                                let discarded = self.buffer.split_to(to_consume_acc);
                                self.state = FramingState::default();
                                error!("failed to parse response, discarding: {discarded:?}");
                                return Err(Error::ProtocolParse(ResponseDecodeError::Failed));
                            }
                        }
                    }
                    Some(Err(to_discard)) => {
                        to_consume_acc += to_discard;
                        let discarded = self.buffer.split_to(to_consume_acc);
                        self.state = FramingState::default();
                        error!("line missing `\\r`, discarding: {discarded:?}");
                        return Err(Error::ProtocolParse(ResponseDecodeError::Failed));
                    }
                    None => self.fill_buffer()?,
                },
                FramingState::ReadLiteral {
                    to_consume_acc,
                    length,
                } => {
                    if to_consume_acc + length as usize <= self.buffer.len() {
                        self.state = FramingState::ReadLine {
                            to_consume_acc: to_consume_acc + length as usize,
                        };
                    } else {
                        self.fill_buffer()?;
                    }
                }
            }
        }
    }

    pub(crate) fn fill_buffer(&mut self) -> Result<(), Error> {
        let mut chunk = [0u8; 4096];
        let amount = self.stream.read(&mut chunk)?;

        if amount == 0 {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "server closed the connection",
            )));
        }

        self.buffer.extend_from_slice(&chunk[..amount]);

        Ok(())
    }
}

impl<S> FrameReader<S>
where
    S: Write,
{
    /// Write raw bytes to the stream (one encoded [`imap_codec::encode::Fragment`] at a time).
    pub(crate) fn send_raw(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.stream.write_all(bytes)?;
        self.stream.flush()
    }
}
