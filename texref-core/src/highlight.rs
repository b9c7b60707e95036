//! Lightweight TeX syntax highlighting for single source lines.
//!
//! Lines are split into tokens whose concatenation is the original line.
//! Commands are recognised as a run of letters directly before `{`, since
//! the report strips backslashes before highlighting.

/// Token classes distinguished by the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexToken {
    Text,
    Command,
    Brace,
    Math,
    Comment,
}

/// Splits `line` into highlighted tokens.
pub fn tokenize(line: &str) -> Vec<(TexToken, &str)> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                push_text(&mut tokens, line, text_start, i);
                tokens.push((TexToken::Comment, &line[i..]));
                i = bytes.len();
                text_start = i;
            }
            b'$' => {
                let end = line[i + 1..]
                    .find('$')
                    .map(|p| i + 1 + p + 1)
                    .unwrap_or(bytes.len());
                push_text(&mut tokens, line, text_start, i);
                tokens.push((TexToken::Math, &line[i..end]));
                i = end;
                text_start = end;
            }
            b'{' | b'}' => {
                let mut word_start = i;
                if bytes[i] == b'{' {
                    while word_start > text_start && bytes[word_start - 1].is_ascii_alphabetic() {
                        word_start -= 1;
                    }
                }
                push_text(&mut tokens, line, text_start, word_start);
                if word_start < i {
                    tokens.push((TexToken::Command, &line[word_start..i]));
                }
                tokens.push((TexToken::Brace, &line[i..i + 1]));
                i += 1;
                text_start = i;
            }
            _ => i += 1,
        }
    }

    push_text(&mut tokens, line, text_start, bytes.len());
    tokens
}

fn push_text<'a>(tokens: &mut Vec<(TexToken, &'a str)>, line: &'a str, start: usize, end: usize) {
    if start < end {
        tokens.push((TexToken::Text, &line[start..end]));
    }
}
