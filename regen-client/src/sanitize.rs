//! # Code Sanitizer
//!
//! Turns model output (prose, markdown fences, commentary) into a buffer that
//! can be handed straight to the execution service:
//!
//! 1. keep only the body of the first fenced code block, if there is one
//! 2. drop blank lines and lines starting with a line-comment marker
//! 3. strip `/* ... */` block comments and trailing `// ...` suffixes
//! 4. trim the result
//!
//! This is a heuristic, not a parser. Comment syntaxes other than `#` and
//! `//`/`/* */` are left alone.

use crate::language::Language;

/// Which comment conventions to strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitizer {
    /// Whole lines starting with `#` are comments
    hash_lines: bool,
    /// `//` lines, `// ...` suffixes and `/* ... */` blocks are comments
    c_style: bool,
    /// A lone `'` is a lifetime or label, not the start of a literal
    lifetimes: bool,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Strip both `#` and C-style comments
    pub fn new() -> Self {
        Self {
            hash_lines: true,
            c_style: true,
            lifetimes: false,
        }
    }

    /// Only strip the comment syntax `language` actually uses.
    ///
    /// `#` starts preprocessor directives and attributes in the C family and
    /// Rust, and `//` is floor division in Python, so neither is touched
    /// there.
    ///
    /// This deliberately departs from the literal rule that drops every `#`
    /// and `//` line; use [`sanitize`] for the literal behavior.
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Python | Language::Ruby => Self {
                hash_lines: true,
                c_style: false,
                lifetimes: false,
            },
            Language::Php => Self::new(),
            Language::Rust => Self {
                hash_lines: false,
                c_style: true,
                lifetimes: true,
            },
            Language::JavaScript
            | Language::TypeScript
            | Language::Java
            | Language::Cpp
            | Language::C
            | Language::CSharp
            | Language::Go
            | Language::Swift
            | Language::Kotlin => Self {
                hash_lines: false,
                c_style: true,
                lifetimes: false,
            },
        }
    }

    pub fn sanitize(&self, text: &str) -> String {
        let body = first_fenced_block(text).unwrap_or(text);

        let kept: Vec<&str> = body
            .lines()
            .filter(|line| !self.is_comment_line(line.trim()))
            .collect();
        let joined = kept.join("\n");

        let stripped = if self.c_style {
            strip_c_comments(&joined, self.lifetimes)
        } else {
            joined
        };

        stripped
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    fn is_comment_line(&self, trimmed: &str) -> bool {
        trimmed.is_empty()
            || (self.hash_lines && trimmed.starts_with('#'))
            || (self.c_style && trimmed.starts_with("//"))
    }
}

/// Sanitize with every supported comment convention enabled
pub fn sanitize(text: &str) -> String {
    Sanitizer::new().sanitize(text)
}

/// Body of the first fenced block (``` or ~~~), or None if there is no fence.
///
/// An unclosed fence runs to the end of the input.
pub fn first_fenced_block(text: &str) -> Option<&str> {
    let mut offset = 0;
    let mut opening: Option<(char, usize, usize)> = None;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let trimmed = line.trim();

        match opening {
            None => {
                if let Some((marker, len)) = fence(trimmed) {
                    opening = Some((marker, len, offset));
                }
            }
            Some((marker, len, body_start)) => {
                let closes = fence(trimmed)
                    .is_some_and(|(m, l)| m == marker && l >= len && trimmed.chars().all(|c| c == m));
                if closes {
                    return Some(trim_newline(&text[body_start..start]));
                }
            }
        }
    }

    opening.map(|(_, _, body_start)| trim_newline(&text[body_start..]))
}

/// Fence marker and run length when `line` opens or closes a fence
fn fence(line: &str) -> Option<(char, usize)> {
    let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = line.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some((marker, len))
}

fn trim_newline(s: &str) -> &str {
    s.strip_suffix('\n').map(|s| s.strip_suffix('\r').unwrap_or(s)).unwrap_or(s)
}

/// Remove `/* */` blocks and `//` suffixes outside of string literals.
///
/// Newlines inside block comments are kept so line structure survives. A
/// `//` directly after `:` is treated as part of a URL. With `lifetimes`, a
/// `'` only opens a char literal when one closes right after it (`'x'`,
/// `'\n'`, `'\u{..}'`).
fn strip_c_comments(text: &str, lifetimes: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;
    let mut prev = '\0';

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                    if escaped == '\n' && q != '`' {
                        quote = None;
                    }
                }
            } else if c == q || (c == '\n' && q != '`') {
                quote = None;
            }
            prev = c;
            continue;
        }

        match c {
            '\'' if lifetimes && !opens_char_literal(chars.clone()) => out.push(c),
            '"' | '\'' | '`' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut last = '\0';
                for inner in chars.by_ref() {
                    if last == '*' && inner == '/' {
                        break;
                    }
                    if inner == '\n' {
                        out.push('\n');
                    }
                    last = inner;
                }
            }
            '/' if chars.peek() == Some(&'/') && prev != ':' => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            _ => out.push(c),
        }
        prev = c;
    }

    out
}

/// Whether the text after a `'` reads as the rest of a char literal
fn opens_char_literal(mut ahead: impl Iterator<Item = char>) -> bool {
    match ahead.next() {
        Some('\\') => true,
        Some('\'' | '\n') | None => false,
        Some(_) => ahead.next() == Some('\''),
    }
}
