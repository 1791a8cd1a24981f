//! Move-token collection from scraped move-list text.
//!
//! Move lists rendered in the page mix real moves with move numbers
//! (`12.`), result markers, and pseudo-element debris. These helpers turn
//! raw node texts into the ordered token list that [`crate::reconstruct`]
//! expects. Nothing here validates chess; that happens during replay.

use std::sync::LazyLock;

use regex::Regex;

static MOVE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("static move-number regex"));

static SAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=?[QRBN])?[+#]?|O-O-O|O-O|0-0-0|0-0")
        .expect("static SAN regex")
});

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}|\([^)]*\)").expect("static comment regex"));

/// Filter move-list node texts down to move tokens, in order.
///
/// Keeps every non-empty text that is not a move number or `:before`
/// marker. Malformed moves are kept on purpose: replay records them as
/// skipped.
pub fn collect_move_tokens<I, S>(node_texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    node_texts
        .into_iter()
        .filter_map(|text| {
            let text = text.as_ref().trim();
            if text.is_empty() || text == ":before" || MOVE_NUMBER_RE.is_match(text) {
                None
            } else {
                Some(text.to_string())
            }
        })
        .collect()
}

/// Extract SAN-looking moves from a flat move-list string such as
/// `"1. e4 e5 2. Nf3 {book} Nc6"`. Comments and variations are dropped.
pub fn extract_moves(text: &str) -> Vec<String> {
    let stripped = COMMENT_RE.replace_all(text, "");
    SAN_RE
        .find_iter(&stripped)
        .map(|m| m.as_str().to_string())
        .collect()
}
