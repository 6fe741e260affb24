//! `ESEARCH` extension ([RFC 4731]).
//!
//! Extends `SEARCH`/`UID SEARCH` with a tagged, extensible result format so a server can answer
//! with e.g. just the lowest/highest matching number or a count, instead of the full match list.
//!
//! [RFC 4731]: https://datatracker.ietf.org/doc/html/rfc4731

use std::num::NonZeroU32;

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{core::Tag, sequence::SequenceSet};

/// `search-correlator = SP "(" "TAG" SP tag-string ")"`
///
/// Ties an `ESEARCH` response back to the command (by tag) that produced it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct SearchCorrelator<'a> {
    pub tag: Tag<'a>,
}

/// `search-return-data` item.
///
/// Only the options actually observed in the wild -- the base RFC 4731 set plus CONDSTORE's
/// `MODSEQ` -- are modeled. Unrecognized `tagged-ext-label`s fail to parse rather than being
/// silently dropped.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum SearchReturnData {
    /// Lowest message number/UID that satisfied the SEARCH criteria.
    Min(NonZeroU32),
    /// Highest message number/UID that satisfied the SEARCH criteria.
    Max(NonZeroU32),
    /// All message numbers/UIDs that satisfied the SEARCH criteria.
    All(SequenceSet),
    /// Number of messages that satisfied the SEARCH criteria.
    Count(u32),
    /// Highest MODSEQ among the matching messages (RFC 7162 CONDSTORE).
    #[cfg(feature = "ext_condstore_qresync")]
    #[cfg_attr(docsrs, doc(cfg(feature = "ext_condstore_qresync")))]
    ModSeq(u64),
}

/// Parsed `* ESEARCH ...` untagged response.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct EsearchResponse<'a> {
    /// Present unless the response was generated by a SEARCHRES-style implicit correlation.
    pub correlator: Option<SearchCorrelator<'a>>,
    /// Whether the reported numbers are UIDs (`UID SEARCH`) or sequence numbers (`SEARCH`).
    pub uid: bool,
    pub data: Vec<SearchReturnData>,
}
