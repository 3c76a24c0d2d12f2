/// Compares `text` against `pattern`, where `*` in the pattern matches zero
/// or more bytes of text.
///
/// Comparison ends early when either side reaches end-of-string or the
/// alternate terminator byte, which lets a caller match a name up to a
/// delimiter (say, a function signature up to its `(`) without slicing the
/// input first. Case-insensitive comparison folds ASCII `A`-`Z` only;
/// other bytes compare verbatim.
///
/// Classic two-bookmark backtracking: O(text * pattern) time worst case,
/// constant extra memory. No capture groups, no partial-match information.
pub fn matches(text: &str, pattern: &str, case_sensitive: bool, alt_terminator: Option<u8>) -> bool {
    let text = text.as_bytes();
    let pattern = pattern.as_bytes();

    let at = |s: &[u8], i: usize| match s.get(i) {
        Some(&b) if Some(b) != alt_terminator => Some(b),
        _ => None,
    };
    let fold = |b: u8| {
        if !case_sensitive {
            b.to_ascii_lowercase()
        } else {
            b
        }
    };

    let mut text_pos = 0;
    let mut pat_pos = 0;
    // pattern position right after the most recent `*`, and the text
    // position that occurrence is currently anchored to
    let mut bookmark: Option<(usize, usize)> = None;

    loop {
        match (at(text, text_pos), at(pattern, pat_pos)) {
            (None, None) => return true,
            // a trailing `*` matches the empty remainder
            (None, Some(b'*')) => pat_pos += 1,
            (t, p) => {
                if let (Some(t), Some(p)) = (t, p) {
                    if p == b'*' {
                        bookmark = Some((pat_pos + 1, text_pos));
                        pat_pos += 1;
                        continue;
                    }
                    if fold(t) == fold(p) {
                        text_pos += 1;
                        pat_pos += 1;
                        continue;
                    }
                }
                // mismatch, or exactly one side exhausted: widen the most
                // recent `*` by one text byte and retry; with no `*` seen
                // (or no text left to give it) the match fails
                match bookmark {
                    Some((after_wild, anchor)) if at(text, anchor).is_some() => {
                        bookmark = Some((after_wild, anchor + 1));
                        text_pos = anchor + 1;
                        pat_pos = after_wild;
                    }
                    _ => return false,
                }
            }
        }
    }
}
