//! Display helpers shared by the handler formatters.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const CURRENCY: &str = "VNĐ";

/// Inserts `,` every three digits of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `50000` → `50,000 VNĐ`; rounded half away from zero to whole units.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{} {}", sign, group_thousands(&digits), CURRENCY)
}

pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Collation key for Vietnamese names: tone and vowel marks dropped,
/// `đ` folded to `d`, lowercased. `"Đồ uống"` sorts as `"do uong"`.
pub fn sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            c => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Alphabetical order by [`sort_key`]; exact text breaks ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

/// Medals for the first three positions, a padded ordinal after that.
pub fn rank_prefix(index: usize) -> String {
    match MEDALS.get(index) {
        Some(medal) => medal.to_string(),
        None => format!("  {}.", index + 1),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    const SUFFIX: &str = "...";
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(SUFFIX.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(SUFFIX);
    out
}

/// `📅 Thời gian: a - b`, with either side optional; `None` when both are.
pub fn date_range_line(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    let range = match (start, end) {
        (None, None) => return None,
        (Some(s), None) => format_date(s),
        (None, Some(e)) => format_date(e),
        (Some(s), Some(e)) => format!("{} - {}", format_date(s), format_date(e)),
    };
    Some(format!("📅 Thời gian: {}", range))
}
