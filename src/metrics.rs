use chrono::{DateTime, FixedOffset};

use crate::models::Issue;
use crate::timestamp::{format_minutes, format_timestamp, parse_timestamp};

/// ステータス変更を表す履歴項目のフィールド名
pub const STATUS_FIELD: &str = "status";
/// 作業開始とみなすステータス
pub const IN_PROGRESS_STATUS: &str = "In Progress";
/// 完了とみなすステータス
pub const RESOLVED_STATUS: &str = "Resolved";

pub const CYCLE_COLUMNS: [&str; 3] = ["cycle_start", "cycle_end", "cycle_time"];
pub const LEAD_COLUMNS: [&str; 3] = ["lead_start", "lead_end", "lead_time"];

/// 開始と終了の組
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpan {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl MetricSpan {
    /// 経過時間（分）。履歴が不整合な場合は負の値になりうる
    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 60_000.0
    }
}

/// サイクルタイム・リードタイムの結果
///
/// 3つの値はすべて揃っているか、すべて空のどちらか。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricTuple(Option<MetricSpan>);

impl MetricTuple {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn span(&self) -> Option<&MetricSpan> {
        self.0.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// CSVの3列分（開始、終了、分）
    pub fn cells(&self) -> [String; 3] {
        match &self.0 {
            Some(span) => [
                format_timestamp(&span.start),
                format_timestamp(&span.end),
                format_minutes(span.duration_minutes()),
            ],
            None => Default::default(),
        }
    }
}

impl From<MetricSpan> for MetricTuple {
    fn from(span: MetricSpan) -> Self {
        Self(Some(span))
    }
}

/// 変更履歴から集めたステータス遷移の日時
#[derive(Debug, Clone, Default)]
struct Transitions {
    starts: Vec<DateTime<FixedOffset>>,
    ends: Vec<DateTime<FixedOffset>>,
}

impl Transitions {
    fn scan(issue: &Issue) -> Self {
        let mut transitions = Self::default();
        let Some(changelog) = issue.changelog() else {
            return transitions;
        };

        for history in &changelog.histories {
            // 日時がパースできない履歴は対象外
            let Some(created) = history.created.as_deref().and_then(parse_timestamp) else {
                continue;
            };

            for item in &history.items {
                if item.changed_to(STATUS_FIELD, IN_PROGRESS_STATUS) {
                    transitions.starts.push(created);
                }
                if item.changed_to(STATUS_FIELD, RESOLVED_STATUS) {
                    transitions.ends.push(created);
                }
            }
        }

        transitions
    }

    fn earliest_start(&self) -> Option<DateTime<FixedOffset>> {
        self.starts.iter().min().copied()
    }

    fn latest_end(&self) -> Option<DateTime<FixedOffset>> {
        self.ends.iter().max().copied()
    }
}

fn is_resolved(issue: &Issue) -> bool {
    issue.status_name() == Some(RESOLVED_STATUS)
}

/// サイクルタイム: 最初に "In Progress" になった時刻から最後に "Resolved" になった時刻まで
///
/// 再オープンを挟んでも最も早い開始と最も遅い完了を使う。
pub fn cycle_time(issue: &Issue) -> MetricTuple {
    if !is_resolved(issue) {
        return MetricTuple::empty();
    }

    let transitions = Transitions::scan(issue);
    match (transitions.earliest_start(), transitions.latest_end()) {
        (Some(start), Some(end)) => MetricSpan { start, end }.into(),
        _ => MetricTuple::empty(),
    }
}

/// リードタイム: Issueの作成時刻から最後に "Resolved" になった時刻まで
pub fn lead_time(issue: &Issue) -> MetricTuple {
    if !is_resolved(issue) {
        return MetricTuple::empty();
    }

    let Some(end) = Transitions::scan(issue).latest_end() else {
        return MetricTuple::empty();
    };
    match issue.created().and_then(parse_timestamp) {
        Some(start) => MetricSpan { start, end }.into(),
        None => MetricTuple::empty(),
    }
}
