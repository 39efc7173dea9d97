//! Ordered keyword detectors in front of the LLM classifier.
//!
//! Detectors run on normalized text, most specific first. The first one
//! that fires wins; later ones are not evaluated.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{Intent, IntentKind};

const RANKING_KEYWORDS: &[&str] = &[
    "cao nhất", "thấp nhất", "top", "ranking", "xếp hạng", "nhiều nhất", "ít nhất", "best",
    "worst", "lowest", "highest",
];
const LOWEST_KEYWORDS: &[&str] = &["thấp nhất", "ít nhất", "worst", "lowest"];
const TABLE_REVENUE_KEYWORDS: &[&str] = &[
    "tổng bill", "bill bàn", "doanh thu bàn", "revenue table", "bàn", "chi tiêu", "thanh toán bàn",
];
const MONEY_KEYWORDS: &[&str] = &["bill", "doanh thu", "tiền", "revenue"];
const PEAK_KEYWORDS: &[&str] = &[
    "đông khách", "giờ đông", "peak", "cao điểm", "đông nhất", "nhiều khách", "giờ nào đông",
];
const REVENUE_KEYWORDS: &[&str] = &["doanh thu", "revenue", "tổng thu", "tiền", "bán được", "thu nhập"];
const DATE_KEYWORDS: &[&str] = &[
    "ngày", "tháng", "hôm nay", "hôm qua", "tuần", "date", "today", "yesterday", "theo ngày",
    "theo tháng", "theo tuần", "hàng ngày", "hàng tháng",
];
const POPULAR_KEYWORDS: &[&str] = &[
    "bán chạy", "popular", "hot", "nổi bật", "được yêu thích", "món hot", "best seller", "top",
    "phổ biến", "nhiều người", "bán nhiều",
];
const MENU_KEYWORDS: &[&str] = &[
    "thực đơn", "menu", "món ăn", "món", "có món gì", "có gì", "đồ ăn", "danh sách món", "list món",
];
const TABLE_KEYWORDS: &[&str] = &[
    "bàn", "table", "bàn trống", "còn bàn", "available", "đặt bàn", "booking", "tình trạng bàn",
    "bàn nào",
];
const TABLE_STATUS_KEYWORDS: &[(&str, &str)] = &[
    ("trống", "Empty"),
    ("available", "Empty"),
    ("empty", "Empty"),
    ("đang sử dụng", "Using"),
    ("đang dùng", "Using"),
    ("occupied", "Using"),
    ("using", "Using"),
    ("đã đặt", "Booked"),
    ("booked", "Booked"),
    ("reserved", "Booked"),
    ("bảo trì", "Maintenance"),
    ("maintenance", "Maintenance"),
];

const RANKING_CONFIDENCE: f64 = 0.80;
const REVENUE_CONFIDENCE: f64 = 0.80;
const KEYWORD_CONFIDENCE: f64 = 0.85;
const GREETING_CONFIDENCE: f64 = 0.90;

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-z]\d{2}|vip\d+)\b").unwrap());
static TOP_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"top\s*(\d+)").unwrap());
static CALENDAR_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{2}-\d{2})\b").unwrap());
static GREETING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(xin chào|chào|hello|hi|hey)\b").unwrap());

type Detect = fn(&str) -> Option<Intent>;

struct Rule {
    name: &'static str,
    detect: Detect,
}

const RULES: &[Rule] = &[
    Rule { name: "table_revenue_ranking", detect: table_revenue_ranking },
    Rule { name: "table_revenue", detect: table_revenue },
    Rule { name: "peak_hours", detect: peak_hours },
    Rule { name: "daily_revenue", detect: daily_revenue },
    Rule { name: "popular_dishes", detect: popular_dishes },
    Rule { name: "menu", detect: menu },
    Rule { name: "table_availability", detect: table_availability },
    Rule { name: "greeting", detect: greeting },
];

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleDetector;

impl RuleDetector {
    pub fn new() -> Self {
        Self
    }

    /// Runs the detectors in order over already-normalized text.
    pub fn detect(&self, normalized: &str) -> Option<Intent> {
        RULES.iter().find_map(|rule| {
            let intent = (rule.detect)(normalized)?;
            debug!(rule = rule.name, kind = %intent.kind, "Rule matched");
            Some(intent)
        })
    }

    /// Detector names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        RULES.iter().map(|r| r.name).collect()
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn top_count(text: &str) -> Option<i64> {
    capture(&TOP_COUNT, text)?.parse().ok()
}

fn table_revenue_ranking(text: &str) -> Option<Intent> {
    if !(contains_any(text, RANKING_KEYWORDS) && text.contains("bàn")) {
        return None;
    }

    let ranking = if contains_any(text, LOWEST_KEYWORDS) {
        "lowest"
    } else {
        "highest"
    };
    let mut intent = Intent::new(IntentKind::GetTableRevenueRanking, RANKING_CONFIDENCE)
        .with_param("type", ranking);
    if let Some(n) = top_count(text) {
        intent = intent.with_param("topCount", n);
    }
    Some(intent)
}

fn table_revenue(text: &str) -> Option<Intent> {
    if !(contains_any(text, TABLE_REVENUE_KEYWORDS) && contains_any(text, MONEY_KEYWORDS)) {
        return None;
    }

    let mut intent = Intent::new(IntentKind::GetTableRevenue, REVENUE_CONFIDENCE);
    if let Some(name) = capture(&TABLE_NAME, text) {
        intent = intent.with_param("tableName", name.to_uppercase());
    }
    Some(intent)
}

fn peak_hours(text: &str) -> Option<Intent> {
    contains_any(text, PEAK_KEYWORDS)
        .then(|| Intent::new(IntentKind::GetPeakHours, KEYWORD_CONFIDENCE))
}

fn daily_revenue(text: &str) -> Option<Intent> {
    let has_revenue = contains_any(text, REVENUE_KEYWORDS);
    let has_date = contains_any(text, DATE_KEYWORDS);
    let bare = !text.contains("bàn") && !text.contains("món");
    if !(has_revenue && (has_date || bare)) {
        return None;
    }

    let mut intent = Intent::new(IntentKind::GetDailyRevenue, REVENUE_CONFIDENCE);
    if text.contains("hôm qua") || text.contains("yesterday") {
        intent = intent.with_param("date", "yesterday");
    } else if text.contains("hôm nay") || text.contains("today") {
        intent = intent.with_param("date", "today");
    } else if let Some(date) = capture(&CALENDAR_DATE, text) {
        intent = intent.with_param("date", date);
    }
    Some(intent)
}

fn popular_dishes(text: &str) -> Option<Intent> {
    if !contains_any(text, POPULAR_KEYWORDS) {
        return None;
    }

    let mut intent = Intent::new(IntentKind::GetPopularDishes, KEYWORD_CONFIDENCE);
    if let Some(n) = top_count(text) {
        intent = intent.with_param("topCount", n);
    }
    Some(intent)
}

fn menu(text: &str) -> Option<Intent> {
    contains_any(text, MENU_KEYWORDS).then(|| Intent::new(IntentKind::GetMenu, KEYWORD_CONFIDENCE))
}

fn table_availability(text: &str) -> Option<Intent> {
    if !contains_any(text, TABLE_KEYWORDS) {
        return None;
    }

    let mut intent = Intent::new(IntentKind::GetTableAvailability, KEYWORD_CONFIDENCE);
    if let Some((_, status)) = TABLE_STATUS_KEYWORDS.iter().find(|(k, _)| text.contains(k)) {
        intent = intent.with_param("status", *status);
    }
    Some(intent)
}

fn greeting(text: &str) -> Option<Intent> {
    GREETING.is_match(text).then(|| {
        Intent::new(IntentKind::Unknown, GREETING_CONFIDENCE).with_param("greeting", true)
    })
}
