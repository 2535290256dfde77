/// Characters stripped from both ends of every token.
const TRIM_CHARS: [char; 2] = [' ', '\t'];

/// Split `line` on every `delimiter`, trim each piece of spaces and tabs,
/// and drop the pieces that end up empty.
///
/// Consecutive, leading and trailing delimiters therefore collapse:
/// `"a |  | b"` split on `'|'` gives `["a", "b"]`. There is no quoting or
/// escaping, so a delimiter can never be part of a token.
pub fn tokenize(line: &str, delimiter: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut buf = String::new();

    for ch in line.chars() {
        if ch == delimiter {
            push_trimmed(&mut tokens, &buf);
            buf.clear();
        } else {
            buf.push(ch);
        }
    }
    push_trimmed(&mut tokens, &buf);

    tokens
}

fn push_trimmed(tokens: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim_matches(&TRIM_CHARS[..]);
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}
