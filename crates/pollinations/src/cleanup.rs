//! Scrubbing of conversational noise from model replies.
//!
//! The completion endpoint is asked for bare prompt text, but models still
//! open with pleasantries and wrap output in quotes. The reply is cleaned
//! in two passes: drop the first matching known preamble, then peel one
//! layer of surrounding matching quotes.

/// Conversational openers the model is known to produce, matched
/// case-insensitively against the start of the reply.
pub const KNOWN_PREAMBLES: &[&str] = &[
    "Okay, here's the refined prompt:",
    "Sure, here's the structured prompt:",
    "Here are the tags:",
    "Here is the refined prompt:",
    "Here's the enhanced prompt:",
    "Enhanced prompt:",
    "Structured prompt:",
    "Tags:",
    "Okay, here are the tags:",
    "Sure, here you go:",
    "Here it is:",
];

/// Strip the first matching preamble, if any, and any whitespace behind it.
pub fn strip_preamble(text: &str) -> &str {
    for preamble in KNOWN_PREAMBLES {
        let Some(head) = text.get(..preamble.len()) else {
            continue;
        };
        if head.eq_ignore_ascii_case(preamble) {
            return text[preamble.len()..].trim_start();
        }
    }
    text
}

/// Strip one layer of surrounding matching quotes (`"…"` or `'…'`).
pub fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Full scrub applied to a raw completion before it is returned.
pub fn scrub_reply(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = strip_preamble(trimmed).trim();
    strip_quotes(stripped).to_string()
}
