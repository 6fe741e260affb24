//! Gmail's proprietary `X-GM-*` extension.
//!
//! None of this is registered with IANA; it's documented only at
//! <https://developers.google.com/workspace/gmail/imap/imap-extensions>.

use abnf_core::streaming::sp;
use imap_types::{
    core::{AString, IString, Vec1},
    extensions::gmail::GmailLabel,
    fetch::{MessageDataItem, MessageDataItemName},
    search::SearchKey,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, recognize},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded},
};

use crate::{
    core::{astring, atom, number64, string},
    decode::IMAPResult,
    encode::{EncodeContext, EncodeIntoContext},
};

/// `fetch-att =/ "X-GM-MSGID" / "X-GM-THRID" / "X-GM-LABELS"`
pub(crate) fn fetch_att_gmail(input: &[u8]) -> IMAPResult<&[u8], MessageDataItemName> {
    alt((
        map(tag_no_case(b"X-GM-MSGID"), |_| MessageDataItemName::XGmMsgId),
        map(tag_no_case(b"X-GM-THRID"), |_| MessageDataItemName::XGmThrId),
        map(tag_no_case(b"X-GM-LABELS"), |_| MessageDataItemName::XGmLabels),
    ))(input)
}

/// `msg-att-static =/ "X-GM-MSGID" SP mod-sequence-value /`
/// `                  "X-GM-THRID" SP mod-sequence-value /`
/// `                  "X-GM-LABELS" SP "(" [gmail-label *(SP gmail-label)] ")"`
pub(crate) fn msg_att_gmail(input: &[u8]) -> IMAPResult<&[u8], MessageDataItem> {
    alt((
        map(
            preceded(tag_no_case(b"X-GM-MSGID "), number64),
            MessageDataItem::XGmMsgId,
        ),
        map(
            preceded(tag_no_case(b"X-GM-THRID "), number64),
            MessageDataItem::XGmThrId,
        ),
        map(
            preceded(tag_no_case(b"X-GM-LABELS "), gmail_label_list0),
            MessageDataItem::XGmLabels,
        ),
    ))(input)
}

/// `search-key =/ "X-GM-RAW" SP astring /`
/// `              "X-GM-MSGID" SP mod-sequence-value /`
/// `              "X-GM-THRID" SP mod-sequence-value /`
/// `              "X-GM-LABELS" SP "(" gmail-label *(SP gmail-label) ")"`
pub(crate) fn search_key_gmail(input: &[u8]) -> IMAPResult<&[u8], SearchKey> {
    alt((
        map(preceded(tag_no_case(b"X-GM-RAW "), astring), SearchKey::XGmRaw),
        map(
            preceded(tag_no_case(b"X-GM-MSGID "), number64),
            SearchKey::XGmMsgId,
        ),
        map(
            preceded(tag_no_case(b"X-GM-THRID "), number64),
            SearchKey::XGmThrId,
        ),
        map(
            preceded(tag_no_case(b"X-GM-LABELS "), gmail_label_list1),
            SearchKey::XGmLabels,
        ),
    ))(input)
}

/// A single Gmail label: either a backslash-prefixed system label (`\Inbox`) or an arbitrary
/// quoted-string/literal user label.
fn gmail_label(input: &[u8]) -> IMAPResult<&[u8], GmailLabel> {
    alt((
        map(recognize(preceded(tag(b"\\"), atom)), |bytes: &[u8]| {
            // # Safety
            //
            // `atom` only matches ATOM-CHAR bytes, and a leading backslash is a valid
            // TEXT-CHAR, so `bytes` is always acceptable as the value of a quoted string.
            GmailLabel(IString::try_from(bytes).unwrap())
        }),
        map(string, GmailLabel::from),
    ))(input)
}

fn gmail_label_list0(input: &[u8]) -> IMAPResult<&[u8], Vec<GmailLabel>> {
    delimited(tag(b"("), separated_list0(sp, gmail_label), tag(b")"))(input)
}

fn gmail_label_list1(input: &[u8]) -> IMAPResult<&[u8], Vec1<GmailLabel>> {
    map(
        delimited(tag(b"("), separated_list1(sp, gmail_label), tag(b")")),
        Vec1::unvalidated,
    )(input)
}

impl<'a> EncodeIntoContext for GmailLabel<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.0.encode_ctx(ctx)
    }
}

#[cfg(test)]
mod tests {
    use imap_types::core::Quoted;

    use super::*;

    #[test]
    fn test_gmail_label() {
        let (rem, got) = gmail_label(b"\\Inbox rest").unwrap();
        assert_eq!(rem, b" rest");
        assert_eq!(got, GmailLabel(IString::Quoted(Quoted::try_from("\\Inbox").unwrap())));

        let (rem, got) = gmail_label(b"\"Customer Support\" rest").unwrap();
        assert_eq!(rem, b" rest");
        assert_eq!(
            got,
            GmailLabel(IString::Quoted(Quoted::try_from("Customer Support").unwrap()))
        );
    }

    #[test]
    fn test_msg_att_gmail() {
        let (rem, got) = msg_att_gmail(b"X-GM-THRID 1266894529376519237???").unwrap();
        assert_eq!(rem, b"???");
        assert_eq!(got, MessageDataItem::XGmThrId(1266894529376519237));
    }

    #[test]
    fn test_search_key_gmail() {
        let (rem, got) = search_key_gmail(b"X-GM-RAW \"has:attachment\"???").unwrap();
        assert_eq!(rem, b"???");
        assert_eq!(
            got,
            SearchKey::XGmRaw(AString::try_from("has:attachment").unwrap())
        );
    }
}
