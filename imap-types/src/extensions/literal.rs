//! IMAP4 Non-synchronizing Literals ([RFC 7888]).
//!
//! This extension is realized through [`crate::core::LiteralMode`] (used on the parsing/sender
//! side to distinguish `{n}` from `{n+}`) and the
//! [`Capability::LiteralPlus`](crate::response::Capability::LiteralPlus) /
//! [`Capability::LiteralMinus`](crate::response::Capability::LiteralMinus) capability variants.
//! No additional types are required here.
