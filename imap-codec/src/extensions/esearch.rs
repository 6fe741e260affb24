//! `ESEARCH` extension ([RFC 4731]).
//!
//! [RFC 4731]: https://datatracker.ietf.org/doc/html/rfc4731

use std::io::Write;

use abnf_core::streaming::sp;
use imap_types::{
    extensions::esearch::{EsearchResponse, SearchCorrelator, SearchReturnData},
    response::Data,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded, tuple},
};

#[cfg(feature = "ext_condstore_qresync")]
use crate::extensions::condstore_qresync::mod_sequence_value;
use crate::{
    core::{nz_number, number, tag_imap},
    decode::IMAPResult,
    encode::{EncodeContext, EncodeIntoContext},
    sequence::sequence_set,
};

/// `ESEARCH [SP search-correlator] [SP "UID"] *(SP search-return-data)`
pub(crate) fn esearch_response(input: &[u8]) -> IMAPResult<&[u8], Data> {
    map(
        tuple((
            tag_no_case("ESEARCH"),
            opt(preceded(sp, search_correlator)),
            opt(preceded(sp, tag_no_case("UID"))),
            many0(preceded(sp, search_return_data)),
        )),
        |(_, correlator, uid, data)| {
            Data::Esearch(EsearchResponse {
                correlator,
                uid: uid.is_some(),
                data,
            })
        },
    )(input)
}

/// `search-correlator = SP "(" "TAG" SP tag-string ")"`
fn search_correlator(input: &[u8]) -> IMAPResult<&[u8], SearchCorrelator> {
    map(
        delimited(tag(b"("), preceded(tag_no_case("TAG "), tag_imap), tag(b")")),
        |tag| SearchCorrelator { tag },
    )(input)
}

/// `search-return-data = "MIN" SP nz-number /`
/// `                     "MAX" SP nz-number /`
/// `                     "ALL" SP sequence-set /`
/// `                     "COUNT" SP number /`
/// `                     "MODSEQ" SP mod-sequence-value` (RFC 7162 CONDSTORE)
fn search_return_data(input: &[u8]) -> IMAPResult<&[u8], SearchReturnData> {
    alt((
        map(preceded(tag_no_case("MIN "), nz_number), SearchReturnData::Min),
        map(preceded(tag_no_case("MAX "), nz_number), SearchReturnData::Max),
        map(preceded(tag_no_case("ALL "), sequence_set), SearchReturnData::All),
        map(preceded(tag_no_case("COUNT "), number), SearchReturnData::Count),
        #[cfg(feature = "ext_condstore_qresync")]
        map(preceded(tag_no_case("MODSEQ "), mod_sequence_value), |n| {
            SearchReturnData::ModSeq(n.into())
        }),
    ))(input)
}

impl<'a> EncodeIntoContext for EsearchResponse<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(b"* ESEARCH")?;

        if let Some(correlator) = &self.correlator {
            ctx.write_all(b" ")?;
            correlator.encode_ctx(ctx)?;
        }

        if self.uid {
            ctx.write_all(b" UID")?;
        }

        for item in &self.data {
            ctx.write_all(b" ")?;
            item.encode_ctx(ctx)?;
        }

        Ok(())
    }
}

impl<'a> EncodeIntoContext for SearchCorrelator<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(b"(TAG ")?;
        self.tag.encode_ctx(ctx)?;
        ctx.write_all(b")")
    }
}

impl EncodeIntoContext for SearchReturnData {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            SearchReturnData::Min(n) => write!(ctx, "MIN {n}"),
            SearchReturnData::Max(n) => write!(ctx, "MAX {n}"),
            SearchReturnData::All(seqs) => {
                ctx.write_all(b"ALL ")?;
                seqs.encode_ctx(ctx)
            }
            SearchReturnData::Count(n) => write!(ctx, "COUNT {n}"),
            #[cfg(feature = "ext_condstore_qresync")]
            SearchReturnData::ModSeq(n) => write!(ctx, "MODSEQ {n}"),
        }
    }
}
