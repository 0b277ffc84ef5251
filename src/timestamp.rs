use chrono::{DateTime, FixedOffset};
use std::borrow::Cow;

/// CSVに出力する日時の表示形式
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// JIRA形式のタイムスタンプ（小数秒とオフセット付き）をパース
///
/// `2024-01-02T03:04:05.000+0000` のように秒の後に小数部があるものだけを日時とみなす。
/// 日時でない文字列は `None` を返す。
pub fn parse_tracker_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    if s.as_bytes().get(19) != Some(&b'.') {
        return None;
    }
    parse_timestamp(s)
}

/// オフセット付きのISO 8601タイムスタンプをパース（小数秒は任意）
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&normalize_offset(s)).ok()
}

/// 日時を `YYYY/MM/DD HH:MM:SS` 形式に変換（オフセットは表示しない）
pub fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// 分単位の経過時間を表示用に変換
///
/// 整数値でも `1440.0` のように小数点を残す。絶対値が `1e-4` 未満または `1e16` 以上の
/// 場合は `1.6666666666666667e-05` のような指数表記（指数は符号付き2桁以上）。
pub fn format_minutes(minutes: f64) -> String {
    let magnitude = minutes.abs();
    if minutes.is_finite() && minutes != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(minutes);
    }
    if minutes.is_finite() && minutes.fract() == 0.0 {
        format!("{:.1}", minutes)
    } else {
        minutes.to_string()
    }
}

// "1.5e-5" → "1.5e-05", "1e16" → "1e+16"
fn exponent_form(value: f64) -> String {
    let formatted = format!("{:e}", value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return formatted;
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
}

// "+0000" → "+00:00"
fn normalize_offset(s: &str) -> Cow<'_, str> {
    let n = s.len();
    if n > 5 && s.is_char_boundary(n - 5) {
        let (head, tail) = s.split_at(n - 5);
        let bytes = tail.as_bytes();
        if (bytes[0] == b'+' || bytes[0] == b'-') && bytes[1..].iter().all(u8::is_ascii_digit) {
            return Cow::Owned(format!("{}{}:{}", head, &tail[..3], &tail[3..]));
        }
    }
    Cow::Borrowed(s)
}
