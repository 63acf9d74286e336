//! Word and sentence segmentation

/// Split text into word tokens
///
/// A token is a maximal run of alphanumeric characters, or a single
/// non-whitespace character that is not alphanumeric (punctuation, symbols).
/// Whitespace only separates tokens. Case is preserved.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    for (idx, c) in text.char_indices() {
        if c.is_alphanumeric() {
            if run_start.is_none() {
                run_start = Some(idx);
            }
            continue;
        }

        if let Some(start) = run_start.take() {
            tokens.push(&text[start..idx]);
        }
        if !c.is_whitespace() {
            tokens.push(&text[idx..idx + c.len_utf8()]);
        }
    }

    if let Some(start) = run_start {
        tokens.push(&text[start..]);
    }

    tokens
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split text into sentences
///
/// A sentence ends at a run of `.`, `!` or `?` followed by whitespace or the
/// end of the text, so "example.com" or "3.50" do not break a sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_terminator(c) {
            continue;
        }

        let mut end = idx + c.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            end = next_idx + next.len_utf8();
            chars.next();
        }

        let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
        if at_boundary {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}
