//! Literal text inside format sections

use std::str::CharIndices;

/// Iterator over the characters of a section that carry format meaning
///
/// Quoted text, `\x` escapes, `_x` spacers, `*x` fills and `[...]` blocks
/// are skipped.
pub(crate) struct FormatChars<'a> {
    chars: CharIndices<'a>,
}

impl<'a> FormatChars<'a> {
    pub fn new(section: &'a str) -> Self {
        Self {
            chars: section.char_indices(),
        }
    }
}

impl Iterator for FormatChars<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (idx, ch) = self.chars.next()?;
            match ch {
                '"' => {
                    for (_, c) in self.chars.by_ref() {
                        if c == '"' {
                            break;
                        }
                    }
                }
                '[' => {
                    for (_, c) in self.chars.by_ref() {
                        if c == ']' {
                            break;
                        }
                    }
                }
                '\\' | '_' | '*' => {
                    self.chars.next();
                }
                _ => return Some((idx, ch)),
            }
        }
    }
}

/// Section text with every literal removed, e.g. `[Red]"Due "d-mmm` -> `d-mmm`
pub(crate) fn strip_literals(section: &str) -> String {
    FormatChars::new(section).map(|(_, c)| c).collect()
}

/// Render the literal parts of a section
///
/// `@` is replaced by `text` when given. Bracketed currency markers such as
/// `[$€-407]` render their symbol; colors, locales and conditions render
/// nothing.
pub(crate) fn render_literal(segment: &str, text: Option<&str>) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.extend(chars.by_ref().take_while(|&c| c != '"')),
            '\\' => out.extend(chars.next()),
            '_' => {
                chars.next();
                out.push(' ');
            }
            '*' => {
                chars.next();
            }
            '[' => {
                let content: String = chars.by_ref().take_while(|&c| c != ']').collect();
                if let Some(symbol) = currency_symbol(&content) {
                    out.push_str(symbol);
                }
            }
            '@' => match text {
                Some(text) => out.push_str(text),
                None => out.push('@'),
            },
            _ => out.push(ch),
        }
    }
    out
}

fn currency_symbol(bracket: &str) -> Option<&str> {
    let rest = bracket.strip_prefix('$')?;
    let symbol = rest.split_once('-').map_or(rest, |(symbol, _)| symbol);
    (!symbol.is_empty()).then_some(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_chars_skip_literals() {
        assert_eq!(strip_literals(r##"[Red]"Total: "#,##0_);\(0\)"##), "#,##0;0");
        assert_eq!(strip_literals("*-0.00"), "0.00");
    }

    #[test]
    fn test_render_literal() {
        assert_eq!(render_literal(r#""Due "\$"#, None), "Due $");
        assert_eq!(render_literal("_(", None), " ");
        assert_eq!(render_literal("[Blue][$€-407] ", None), "€ ");
        assert_eq!(render_literal(r#""Name: "@"#, Some("Ada")), "Name: Ada");
    }
}
