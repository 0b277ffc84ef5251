use crate::error::{Error, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// パス式を構成する1ステップ
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// オブジェクトのキー
    Key(String),
    /// 配列のインデックス（負の値は末尾から数える）
    Index(i64),
    /// 配列の全要素に残りのステップを適用する
    Project,
}

/// Issueドキュメント内の値を指すコンパイル済みのパス式
///
/// 対応する構文:
/// - `fields.status.name`: ドット区切りのキー
/// - `fields."customfield_10001"`: 任意の文字を含むキー
/// - `fields.components[0]` / `fields.versions[-1]`: 配列インデックス
/// - `fields.labels[*]` / `fields.components[*].name`: 配列の射影
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPath {
    source: String,
    steps: Vec<Step>,
}

impl FieldPath {
    /// パス文字列をコンパイル
    pub fn parse(source: &str) -> Result<Self> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(invalid(source, "empty path"));
        }

        let mut chars = trimmed.chars().peekable();
        let mut steps = Vec::new();

        if chars.peek() == Some(&'[') {
            chars.next();
            steps.push(parse_bracket(&mut chars, source)?);
        } else {
            steps.push(Step::Key(parse_key(&mut chars, source)?));
        }

        while let Some(c) = chars.next() {
            match c {
                '.' => steps.push(Step::Key(parse_key(&mut chars, source)?)),
                '[' => steps.push(parse_bracket(&mut chars, source)?),
                other => {
                    return Err(invalid(source, format!("unexpected character '{}'", other)));
                }
            }
        }

        Ok(Self {
            source: trimmed.to_string(),
            steps,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// ドキュメントに対してパスを評価
    ///
    /// 値が存在しない、または `null` の場合は `None`。評価自体は失敗しない。
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<Cow<'a, Value>> {
        walk(document, &self.steps)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn walk<'a>(value: &'a Value, steps: &[Step]) -> Option<Cow<'a, Value>> {
    let Some((step, rest)) = steps.split_first() else {
        return if value.is_null() {
            None
        } else {
            Some(Cow::Borrowed(value))
        };
    };

    match step {
        Step::Key(key) => walk(value.as_object()?.get(key)?, rest),
        Step::Index(index) => {
            let items = value.as_array()?;
            let position = if *index < 0 {
                items.len().checked_sub(index.unsigned_abs() as usize)?
            } else {
                *index as usize
            };
            walk(items.get(position)?, rest)
        }
        Step::Project => {
            let projected = value
                .as_array()?
                .iter()
                .filter_map(|item| walk(item, rest).map(Cow::into_owned))
                .collect();
            Some(Cow::Owned(Value::Array(projected)))
        }
    }
}

fn parse_key(chars: &mut Peekable<Chars<'_>>, source: &str) -> Result<String> {
    if chars.peek() == Some(&'"') {
        chars.next();
        let mut key = String::new();
        loop {
            match chars.next() {
                Some('"') => break,
                Some('\\') => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => key.push(escaped),
                    _ => return Err(invalid(source, "invalid escape in quoted key")),
                },
                Some(c) => key.push(c),
                None => return Err(invalid(source, "unterminated quoted key")),
            }
        }
        return Ok(key);
    }

    let mut key = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            key.push(c);
            chars.next();
        } else {
            break;
        }
    }

    if key.is_empty() {
        return Err(invalid(source, "expected a key"));
    }
    Ok(key)
}

// 先頭の '[' は呼び出し側で消費済み
fn parse_bracket(chars: &mut Peekable<Chars<'_>>, source: &str) -> Result<Step> {
    let mut body = String::new();
    loop {
        match chars.next() {
            Some(']') => break,
            Some(c) => body.push(c),
            None => return Err(invalid(source, "unterminated '['")),
        }
    }

    let body = body.trim();
    if body == "*" {
        return Ok(Step::Project);
    }

    body.parse::<i64>()
        .map(Step::Index)
        .map_err(|_| invalid(source, format!("invalid index '{}'", body)))
}

fn invalid(source: &str, reason: impl Into<String>) -> Error {
    Error::InvalidFieldPath {
        path: source.to_string(),
        reason: reason.into(),
    }
}
