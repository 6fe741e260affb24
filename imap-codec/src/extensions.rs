//! Parsers and encoders for IMAP extensions.
//!
//! Each submodule here is gated behind the cargo feature of the same name (minus the `ext_`
//! prefix) and extends the core grammar in the sibling top-level modules with additional
//! productions. `condstore_qresync` is the exception: STATUS's `HIGHESTMODSEQ` attribute is
//! parsed unconditionally by `status.rs`, so its low-level mod-sequence grammar is always
//! compiled; only the richer CONDSTORE/QRESYNC response codes and data are feature-gated.
pub(crate) mod condstore_qresync;

#[cfg(feature = "ext_compress")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_compress")))]
pub mod compress;
#[cfg(feature = "ext_enable")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_enable")))]
pub mod enable;
#[cfg(feature = "ext_id")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_id")))]
pub mod id;
#[cfg(feature = "ext_idle")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_idle")))]
pub mod idle;
#[cfg(feature = "ext_namespace")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_namespace")))]
pub mod namespace;
#[cfg(feature = "ext_uidplus")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_uidplus")))]
pub mod uidplus;
#[cfg(feature = "ext_utf8")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_utf8")))]
pub mod utf8;

#[cfg(feature = "ext_gmail")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_gmail")))]
pub mod gmail;

#[cfg(feature = "ext_esearch")]
#[cfg_attr(docsrs, doc(cfg(feature = "ext_esearch")))]
pub mod esearch;
