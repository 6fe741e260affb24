//! Types for IMAP extensions.
//!
//! Each submodule here is gated behind the cargo feature of the same name (minus the `ext_`
//! prefix). `condstore_qresync` is the exception: [`CodeOther`](crate::response::CodeOther)-free
//! STATUS handling of `HIGHESTMODSEQ` needs its [`AttributeFlag`](condstore_qresync::AttributeFlag)
//! unconditionally, so that module is always compiled.
pub mod condstore_qresync;

#[cfg(feature = "ext_compress")]
pub mod compress;
#[cfg(feature = "ext_enable")]
pub mod enable;
#[cfg(feature = "ext_idle")]
pub mod idle;
#[cfg(feature = "ext_literal")]
pub mod literal;
#[cfg(feature = "ext_namespace")]
pub mod namespace;
#[cfg(feature = "ext_uidplus")]
pub mod uidplus;
#[cfg(feature = "ext_utf8")]
pub mod utf8;

#[cfg(feature = "ext_gmail")]
pub mod gmail;

#[cfg(feature = "ext_esearch")]
pub mod esearch;
