//! Gmail's proprietary `X-GM-*` extension.
//!
//! Gmail exposes per-message thread/message IDs and user labels through IMAP FETCH attributes
//! and SEARCH keys prefixed `X-GM-`. None of this is registered with IANA or gated behind a
//! `CAPABILITY` string; it simply becomes available once a Gmail (or Google Workspace) account
//! authenticates. See <https://developers.google.com/workspace/gmail/imap/imap-extensions>.

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::IString;

/// A single Gmail label, e.g. `\Important` or `"Some/Nested Label"`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct GmailLabel<'a>(pub IString<'a>);

impl<'a> From<IString<'a>> for GmailLabel<'a> {
    fn from(value: IString<'a>) -> Self {
        Self(value)
    }
}
