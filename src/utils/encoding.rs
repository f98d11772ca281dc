use encoding_rs::EUC_KR;
use std::borrow::Cow;
use tracing::debug;

/// Decode a feed body: UTF-8 when valid, otherwise the feed's legacy EUC-KR
pub fn decode_feed_bytes(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _, had_errors) = EUC_KR.decode(bytes);
            if had_errors {
                debug!("Feed body contained bytes invalid in both UTF-8 and EUC-KR");
            }
            text
        }
    }
}
