use crate::error::{Error, Result};

/// テンプレート内でトラッカーのベースURLに置き換えられるトークン
pub const HOST_PLACEHOLDER: &str = "[host]";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Value,
}

/// 抽出した値を埋め込む出力テンプレート
///
/// `{}` または `{0}` が値のスロット、`{{` と `}}` はリテラルの波括弧。
/// 例: `[host]/browse/{}`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFormat {
    template: String,
    segments: Vec<Segment>,
}

impl ValueFormat {
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut auto_slots = 0;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut field = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => field.push(c),
                            None => return Err(invalid(template, "unterminated '{'")),
                        }
                    }
                    match field.as_str() {
                        "" => auto_slots += 1,
                        "0" => {}
                        other => {
                            return Err(invalid(
                                template,
                                format!("unsupported replacement field '{{{}}}'", other),
                            ));
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Value);
                }
                '}' => return Err(invalid(template, "single '}' encountered")),
                c => literal.push(c),
            }
        }

        if auto_slots > 1 {
            return Err(invalid(template, "more than one '{}' slot"));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// `[host]` をベースURLに、スロットを値に置き換えて出力
    pub fn render(&self, value: &str, host: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(&text.replace(HOST_PLACEHOLDER, host)),
                Segment::Value => out.push_str(value),
            }
        }
        out
    }
}

fn invalid(template: &str, reason: impl Into<String>) -> Error {
    Error::InvalidFormat {
        template: template.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_browse_link() {
        // Given: 課題リンクのテンプレート
        let format = ValueFormat::parse("[host]/browse/{}").unwrap();

        // When: キーとホストで展開
        let cell = format.render("ABC-1", "https://x.example");

        // Then: 完全なURLになる
        assert_eq!(cell, "https://x.example/browse/ABC-1");
    }

    #[test]
    fn test_render_positional_slot_and_escaped_braces() {
        let format = ValueFormat::parse("{{{0}}} = {0}").unwrap();

        assert_eq!(format.render("v", "h"), "{v} = v");
    }

    #[test]
    fn test_template_without_slot_is_literal() {
        let format = ValueFormat::parse("[host]/issues").unwrap();

        assert_eq!(format.render("ignored", "https://x.example"), "https://x.example/issues");
    }

    #[test]
    fn test_value_is_not_scanned_for_host_placeholder() {
        let format = ValueFormat::parse("{}").unwrap();

        assert_eq!(format.render("[host]", "https://x.example"), "[host]");
    }

    #[test]
    fn test_parse_rejects_invalid_templates() {
        for template in ["{} and {}", "{name}", "{", "oops }", "{:>10}"] {
            assert!(
                matches!(ValueFormat::parse(template), Err(Error::InvalidFormat { .. })),
                "expected error for {:?}",
                template
            );
        }
    }
}
