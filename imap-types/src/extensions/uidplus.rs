//! The IMAP UIDPLUS Extension
//!
//! This extends ...
//!
//! * [`CommandBody`] with a new variant:
//!
//!     - [`CommandBody::ExpungeUid`]
//!
//! * [`Code`](crate::response::Code) with new variants:
//!
//!     - [`Code::UidNotSticky`](crate::response::Code::UidNotSticky)
//!     - [`Code::AppendUid`](crate::response::Code::AppendUid)
//!     - [`Code::CopyUid`](crate::response::Code::CopyUid)

use std::num::NonZeroU32;

#[cfg(feature = "arbitrary")]
use arbitrary::Arbitrary;
use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::Vec1;

/// A non-empty list of [`UidElement`]s, as used in the `APPENDUID`/`COPYUID` response codes.
///
/// ```abnf
/// uid-set = (uniqueid / uid-range) *("," uid-set)
/// ```
#[cfg_attr(feature = "arbitrary", derive(Arbitrary))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct UidSet(pub Vec1<UidElement>);

impl From<UidElement> for UidSet {
    fn from(element: UidElement) -> Self {
        UidSet(Vec1::from(element))
    }
}

impl From<NonZeroU32> for UidSet {
    fn from(uid: NonZeroU32) -> Self {
        UidSet(Vec1::from(UidElement::Single(uid)))
    }
}

/// A single element of a [`UidSet`]: either a single UID or an inclusive range of two UIDs.
///
/// ```abnf
/// uid-range = (uniqueid ":" uniqueid)
/// ```
#[cfg_attr(feature = "arbitrary", derive(Arbitrary))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum UidElement {
    Single(NonZeroU32),
    /// `2:4` and `4:2` are equivalent; order is not normalized.
    Range(NonZeroU32, NonZeroU32),
}
