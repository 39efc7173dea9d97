//! Revenue and order statistics. One handler type serves four intents,
//! picked by the [`RevenueQuery`] it is built with.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use tracing::debug;

use super::format::{date_range_line, format_count, format_date, format_price, rank_prefix};
use super::{params, query_store, Clock, HandlerData, HandlerError};
use crate::engine::traits::IntentHandler;
use crate::intent::{IntentKind, Parameters};
use crate::store::{Order, RestaurantStore, Table, TableFilter};

const PEAK_WINDOW_DAYS: i64 = 30;
const DAILY_TOP_HOURS: usize = 3;
const PEAK_TOP_HOURS: usize = 5;
const DEFAULT_RANKING_COUNT: usize = 5;

const NO_TABLE_ORDERS: &str = "Bàn này chưa có đơn hàng nào.";
const NO_DAILY_ORDERS: &str = "Không có đơn hàng nào trong ngày này.";
const NO_PEAK_DATA: &str = "Không có dữ liệu đơn hàng trong khoảng thời gian này.";
const NO_RANKING_DATA: &str = "Không có dữ liệu bàn trong khoảng thời gian này.";
const NO_DATA: &str = "Không có dữ liệu.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevenueQuery {
    TableTotal,
    Daily,
    PeakHours,
    TableRanking,
}

impl RevenueQuery {
    pub const ALL: [RevenueQuery; 4] = [
        RevenueQuery::TableTotal,
        RevenueQuery::Daily,
        RevenueQuery::PeakHours,
        RevenueQuery::TableRanking,
    ];

    pub fn kind(self) -> IntentKind {
        match self {
            RevenueQuery::TableTotal => IntentKind::GetTableRevenue,
            RevenueQuery::Daily => IntentKind::GetDailyRevenue,
            RevenueQuery::PeakHours => IntentKind::GetPeakHours,
            RevenueQuery::TableRanking => IntentKind::GetTableRevenueRanking,
        }
    }

    pub fn from_kind(kind: IntentKind) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.kind() == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingOrder {
    #[default]
    Highest,
    Lowest,
}

impl RankingOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "highest" => Some(RankingOrder::Highest),
            "lowest" => Some(RankingOrder::Lowest),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RankingOrder::Highest => "highest",
            RankingOrder::Lowest => "lowest",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourBucket {
    pub hour: u32,
    pub revenue: Decimal,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedTable {
    pub table: Table,
    pub revenue: Decimal,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevenueReport {
    TableTotal {
        table_name: String,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        total: Decimal,
        order_count: usize,
    },
    Daily {
        date: NaiveDate,
        total: Decimal,
        order_count: usize,
        customer_count: usize,
        /// Highest revenue first.
        by_hour: Vec<HourBucket>,
    },
    PeakHours {
        start: NaiveDate,
        end: NaiveDate,
        /// Busiest first.
        hours: Vec<HourBucket>,
        total_orders: usize,
    },
    Ranking {
        order: RankingOrder,
        top_count: usize,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        entries: Vec<RankedTable>,
    },
}

/// Sorts by revenue in the requested direction, ties by table name, and keeps `top`.
pub fn rank_tables(mut entries: Vec<RankedTable>, order: RankingOrder, top: usize) -> Vec<RankedTable> {
    entries.sort_by(|a, b| {
        let by_revenue = match order {
            RankingOrder::Highest => b.revenue.cmp(&a.revenue),
            RankingOrder::Lowest => a.revenue.cmp(&b.revenue),
        };
        by_revenue.then_with(|| a.table.name.cmp(&b.table.name))
    });
    entries.truncate(top);
    entries
}

fn group_by_hour<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Vec<HourBucket> {
    let mut buckets: BTreeMap<u32, HourBucket> = BTreeMap::new();
    for order in orders {
        let hour = order.time.hour();
        let bucket = buckets.entry(hour).or_insert(HourBucket {
            hour,
            revenue: Decimal::ZERO,
            orders: 0,
        });
        bucket.revenue += order.total;
        bucket.orders += 1;
    }
    buckets.into_values().collect()
}

fn average(total: Decimal, count: usize) -> Option<Decimal> {
    (count > 0).then(|| total / Decimal::from(count as u64))
}

fn window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    (start.map(params::start_of_day), end.map(params::end_of_day))
}

pub struct RevenueHandler {
    query: RevenueQuery,
    store: Arc<dyn RestaurantStore>,
    clock: Arc<dyn Clock>,
}

impl RevenueHandler {
    pub fn new(query: RevenueQuery, store: Arc<dyn RestaurantStore>, clock: Arc<dyn Clock>) -> Self {
        Self { query, store, clock }
    }

    pub fn query(&self) -> RevenueQuery {
        self.query
    }

    async fn completed_orders(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Order>, HandlerError> {
        let orders = query_store(&self.store, move |s| s.orders_between(start, end)).await?;
        Ok(orders.into_iter().filter(Order::is_completed).collect())
    }

    async fn table_total(&self, parameters: &Parameters) -> Result<RevenueReport, HandlerError> {
        let name = params::text(parameters, "tableName");
        let id = params::integer(parameters, "tableId")?;
        if name.is_none() && id.is_none() {
            return Err(HandlerError::MissingParameter("tableName".to_string()));
        }

        let today = self.clock.today();
        let start = params::date(parameters, "startDate", today)?;
        let end = params::date(parameters, "endDate", today)?;
        let (from, to) = window(start, end);

        let tables = query_store(&self.store, |s| s.tables(&TableFilter::default())).await?;
        let matches = |t: &Table| match &name {
            Some(n) => t.name.to_lowercase() == n.to_lowercase(),
            None => Some(t.id) == id,
        };
        let table_name = tables
            .iter()
            .find(|&t| matches(t))
            .map(|t| t.name.clone())
            .or_else(|| name.clone())
            .unwrap_or_else(|| format!("#{}", id.unwrap_or_default()));

        let orders: Vec<Order> = self
            .completed_orders(from, to)
            .await?
            .into_iter()
            .filter(|o| o.table.as_ref().is_some_and(|t| matches(t)))
            .collect();
        debug!(table = %table_name, orders = orders.len(), "Table revenue computed");

        Ok(RevenueReport::TableTotal {
            table_name,
            start,
            end,
            total: orders.iter().map(|o| o.total).sum(),
            order_count: orders.len(),
        })
    }

    async fn daily(&self, parameters: &Parameters) -> Result<RevenueReport, HandlerError> {
        let date = params::date(parameters, "date", self.clock.today())?.unwrap_or_else(|| self.clock.today());
        let orders = self
            .completed_orders(Some(params::start_of_day(date)), Some(params::end_of_day(date)))
            .await?;

        // Orders placed by a known customer; a returning customer counts once per order.
        let customer_count = orders.iter().filter(|o| o.customer.is_some()).count();
        let mut by_hour = group_by_hour(&orders);
        by_hour.sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.hour.cmp(&b.hour)));
        debug!(%date, orders = orders.len(), "Daily revenue computed");

        Ok(RevenueReport::Daily {
            date,
            total: orders.iter().map(|o| o.total).sum(),
            order_count: orders.len(),
            customer_count,
            by_hour,
        })
    }

    async fn peak_hours(&self, parameters: &Parameters) -> Result<RevenueReport, HandlerError> {
        let today = self.clock.today();
        let start = params::date(parameters, "startDate", today)?
            .unwrap_or(today - Duration::days(PEAK_WINDOW_DAYS));
        let end = params::date(parameters, "endDate", today)?.unwrap_or(today);
        let orders = self
            .completed_orders(Some(params::start_of_day(start)), Some(params::end_of_day(end)))
            .await?;

        let mut hours = group_by_hour(&orders);
        hours.sort_by(|a, b| {
            b.orders
                .cmp(&a.orders)
                .then(b.revenue.cmp(&a.revenue))
                .then(a.hour.cmp(&b.hour))
        });
        debug!(%start, %end, orders = orders.len(), "Peak hours computed");

        Ok(RevenueReport::PeakHours {
            start,
            end,
            hours,
            total_orders: orders.len(),
        })
    }

    async fn ranking(&self, parameters: &Parameters) -> Result<RevenueReport, HandlerError> {
        let order = match parameters.get("type") {
            None => RankingOrder::default(),
            Some(value) => value
                .as_str()
                .and_then(RankingOrder::parse)
                .ok_or_else(|| HandlerError::InvalidParameter {
                    name: "type".to_string(),
                    value: value.to_string(),
                })?,
        };
        let top_count = params::count(parameters, "topCount", DEFAULT_RANKING_COUNT)?;
        let today = self.clock.today();
        let start = params::date(parameters, "startDate", today)?;
        let end = params::date(parameters, "endDate", today)?;
        let (from, to) = window(start, end);

        let mut per_table: HashMap<i64, RankedTable> = HashMap::new();
        for o in self.completed_orders(from, to).await? {
            let Some(table) = o.table else { continue };
            let entry = per_table.entry(table.id).or_insert_with(|| RankedTable {
                table,
                revenue: Decimal::ZERO,
                orders: 0,
            });
            entry.revenue += o.total;
            entry.orders += 1;
        }
        debug!(order = order.as_str(), tables = per_table.len(), "Table ranking computed");

        Ok(RevenueReport::Ranking {
            order,
            top_count,
            start,
            end,
            entries: rank_tables(per_table.into_values().collect(), order, top_count),
        })
    }

    fn format_report(&self, report: &RevenueReport) -> String {
        let text = match (self.query, report) {
            (
                RevenueQuery::TableTotal,
                RevenueReport::TableTotal { table_name, start, end, total, order_count },
            ) => format_table_total(table_name, *start, *end, *total, *order_count),
            (
                RevenueQuery::Daily,
                RevenueReport::Daily { date, total, order_count, customer_count, by_hour },
            ) => format_daily(*date, *total, *order_count, *customer_count, by_hour),
            (
                RevenueQuery::PeakHours,
                RevenueReport::PeakHours { start, end, hours, total_orders },
            ) => format_peak_hours(*start, *end, hours, *total_orders),
            (
                RevenueQuery::TableRanking,
                RevenueReport::Ranking { order, top_count, start, end, entries },
            ) => format_ranking(*order, *top_count, *start, *end, entries),
            _ => NO_DATA.to_string(),
        };
        text.trim_end().to_string()
    }
}

fn format_table_total(
    table_name: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    total: Decimal,
    order_count: usize,
) -> String {
    if order_count == 0 {
        return NO_TABLE_ORDERS.to_string();
    }

    let mut out = format!("💰 DOANH THU BÀN {}\n\n", table_name);
    if let Some(line) = date_range_line(start, end) {
        out.push_str(&format!("{}\n\n", line));
    }
    out.push_str("📊 Tổng quan:\n");
    out.push_str(&format!("  • Tổng doanh thu: {}\n", format_price(total)));
    out.push_str(&format!("  • Số đơn hàng: {}\n", order_count));
    if let Some(avg) = average(total, order_count) {
        out.push_str(&format!("  • Doanh thu trung bình/đơn: {}\n", format_price(avg)));
    }
    out
}

fn format_daily(
    date: NaiveDate,
    total: Decimal,
    order_count: usize,
    customer_count: usize,
    by_hour: &[HourBucket],
) -> String {
    if order_count == 0 {
        return NO_DAILY_ORDERS.to_string();
    }

    let mut out = format!("💵 DOANH THU NGÀY {}\n\n", format_date(date));
    out.push_str("📊 Tổng quan:\n");
    out.push_str(&format!("  • Tổng doanh thu: {}\n", format_price(total)));
    out.push_str(&format!("  • Số đơn hàng: {}\n", order_count));
    out.push_str(&format!("  • Số khách hàng: {}\n", customer_count));
    if let Some(avg) = average(total, order_count) {
        out.push_str(&format!("  • Doanh thu trung bình/đơn: {}\n", format_price(avg)));
    }

    if !by_hour.is_empty() {
        out.push_str("\n⏰ Top 3 giờ có doanh thu cao:\n");
        for (i, bucket) in by_hour.iter().take(DAILY_TOP_HOURS).enumerate() {
            out.push_str(&format!(
                "  {}. {:02}:00 - {} ({} đơn)\n",
                i + 1,
                bucket.hour,
                format_price(bucket.revenue),
                bucket.orders
            ));
        }
    }
    out
}

fn format_peak_hours(start: NaiveDate, end: NaiveDate, hours: &[HourBucket], total_orders: usize) -> String {
    if hours.is_empty() {
        return NO_PEAK_DATA.to_string();
    }

    let mut out = String::from("⏰ GIỜ ĐÔNG KHÁCH\n\n");
    out.push_str(&format!(
        "📅 Dữ liệu từ: {} đến {}\n\n",
        format_date(start),
        format_date(end)
    ));
    out.push_str("🔥 Top 5 giờ đông khách nhất:\n");
    for (i, bucket) in hours.iter().take(PEAK_TOP_HOURS).enumerate() {
        out.push_str(&format!(
            "{} {:02}:00 - {} đơn - {}\n",
            rank_prefix(i),
            bucket.hour,
            bucket.orders,
            format_price(bucket.revenue)
        ));
    }
    out.push_str(&format!("\n📊 Tổng số đơn: {}", format_count(total_orders as u64)));
    out
}

fn format_ranking(
    order: RankingOrder,
    top_count: usize,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    entries: &[RankedTable],
) -> String {
    if entries.is_empty() {
        return NO_RANKING_DATA.to_string();
    }

    let mut out = match order {
        RankingOrder::Lowest => format!("📉 TOP {} BÀN CÓ DOANH THU THẤP NHẤT\n\n", top_count),
        RankingOrder::Highest => format!("📈 TOP {} BÀN CÓ DOANH THU CAO NHẤT\n\n", top_count),
    };
    if let Some(line) = date_range_line(start, end) {
        out.push_str(&format!("{}\n\n", line));
    }

    let blocks: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut block = format!("{} {}", rank_prefix(i), entry.table.name);
            if let Some(area) = &entry.table.area {
                block.push_str(&format!(" ({})", area.name));
            }
            block.push_str(&format!("\n    ↳ Doanh thu: {}\n", format_price(entry.revenue)));
            block.push_str(&format!("    ↳ Số đơn: {}\n", entry.orders));
            block
        })
        .collect();
    out.push_str(&blocks.join("\n"));
    out
}

#[async_trait::async_trait]
impl IntentHandler for RevenueHandler {
    fn kind(&self) -> IntentKind {
        self.query.kind()
    }

    fn topic(&self) -> &'static str {
        match self.query {
            RevenueQuery::TableTotal => "Doanh thu theo bàn",
            RevenueQuery::Daily => "Doanh thu theo ngày",
            RevenueQuery::PeakHours => "Giờ đông khách",
            RevenueQuery::TableRanking => "Xếp hạng bàn theo doanh thu",
        }
    }

    async fn fetch(&self, parameters: &Parameters) -> Result<HandlerData, HandlerError> {
        let report = match self.query {
            RevenueQuery::TableTotal => self.table_total(parameters).await?,
            RevenueQuery::Daily => self.daily(parameters).await?,
            RevenueQuery::PeakHours => self.peak_hours(parameters).await?,
            RevenueQuery::TableRanking => self.ranking(parameters).await?,
        };
        Ok(HandlerData::Revenue(report))
    }

    fn format(&self, data: &HandlerData) -> String {
        match data {
            HandlerData::Revenue(report) => self.format_report(report),
            _ => NO_DATA.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{fixtures, FixedClock};
    use crate::intent::ParamValue;
    use pretty_assertions::assert_eq;

    fn handler(query: RevenueQuery) -> RevenueHandler {
        RevenueHandler::new(
            query,
            fixtures::store(),
            Arc::new(FixedClock(fixtures::day(2024, 3, 10))),
        )
    }

    fn params(pairs: &[(&str, ParamValue)]) -> Parameters {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn ranked(name: &str, revenue: i64) -> RankedTable {
        RankedTable {
            table: Table {
                id: 0,
                name: name.into(),
                status: crate::store::TableStatus::Empty,
                capacity: None,
                kind: None,
                area: None,
            },
            revenue: fixtures::money(revenue),
            orders: 1,
        }
    }

    async fn render(query: RevenueQuery, p: Parameters) -> String {
        let handler = handler(query);
        let data = handler.fetch(&p).await.unwrap();
        handler.format(&data)
    }

    #[test]
    fn ranking_direction_is_explicit() {
        let tables = vec![ranked("A01", 500000), ranked("A02", 100000), ranked("A03", 900000)];
        let names = |v: Vec<RankedTable>| v.into_iter().map(|e| e.table.name).collect::<Vec<_>>();

        assert_eq!(names(rank_tables(tables.clone(), RankingOrder::Lowest, 2)), vec!["A02", "A01"]);
        assert_eq!(names(rank_tables(tables, RankingOrder::Highest, 2)), vec!["A03", "A01"]);
    }

    #[test]
    fn ranking_ties_break_by_name() {
        let tables = vec![ranked("B02", 100), ranked("A09", 100)];
        assert_eq!(rank_tables(tables, RankingOrder::Highest, 5)[0].table.name, "A09");
    }

    #[tokio::test]
    async fn table_total_counts_completed_orders_only() {
        let text = render(RevenueQuery::TableTotal, params(&[("tableName", "a01".into())])).await;
        assert_eq!(
            text,
            "💰 DOANH THU BÀN A01\n\
             \n\
             📊 Tổng quan:\n\
             \x20 • Tổng doanh thu: 700,000 VNĐ\n\
             \x20 • Số đơn hàng: 2\n\
             \x20 • Doanh thu trung bình/đơn: 350,000 VNĐ"
        );
    }

    #[tokio::test]
    async fn table_total_with_window_and_by_id() {
        let p = params(&[
            ("tableId", ParamValue::Int(1)),
            ("startDate", "2024-03-10".into()),
            ("endDate", "10/03/2024".into()),
        ]);
        let text = render(RevenueQuery::TableTotal, p).await;
        assert!(text.contains("📅 Thời gian: 10/03/2024 - 10/03/2024\n"));
        assert!(text.contains("Tổng doanh thu: 500,000 VNĐ"));
    }

    #[tokio::test]
    async fn table_total_requires_a_table() {
        let err = handler(RevenueQuery::TableTotal).fetch(&Parameters::new()).await.unwrap_err();
        assert!(matches!(err, HandlerError::MissingParameter(name) if name == "tableName"));

        let text = render(RevenueQuery::TableTotal, params(&[("tableName", "Z99".into())])).await;
        assert_eq!(text, NO_TABLE_ORDERS);
    }

    #[tokio::test]
    async fn daily_defaults_to_today() {
        let text = render(RevenueQuery::Daily, Parameters::new()).await;
        assert_eq!(
            text,
            "💵 DOANH THU NGÀY 10/03/2024\n\
             \n\
             📊 Tổng quan:\n\
             \x20 • Tổng doanh thu: 1,550,000 VNĐ\n\
             \x20 • Số đơn hàng: 4\n\
             \x20 • Số khách hàng: 3\n\
             \x20 • Doanh thu trung bình/đơn: 387,500 VNĐ\n\
             \n\
             ⏰ Top 3 giờ có doanh thu cao:\n\
             \x20 1. 19:00 - 900,000 VNĐ (1 đơn)\n\
             \x20 2. 12:00 - 600,000 VNĐ (2 đơn)\n\
             \x20 3. 23:00 - 50,000 VNĐ (1 đơn)"
        );
    }

    #[tokio::test]
    async fn daily_accepts_relative_dates() {
        let text = render(RevenueQuery::Daily, params(&[("date", "hôm qua".into())])).await;
        assert!(text.starts_with("💵 DOANH THU NGÀY 09/03/2024"));
        assert!(text.contains("Tổng doanh thu: 200,000 VNĐ"));

        let text = render(RevenueQuery::Daily, params(&[("date", "2024-01-01".into())])).await;
        assert_eq!(text, NO_DAILY_ORDERS);

        let err = handler(RevenueQuery::Daily)
            .fetch(&params(&[("date", "someday".into())]))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn out_of_range_dates_are_invalid_not_fatal() {
        for query in [RevenueQuery::Daily, RevenueQuery::PeakHours, RevenueQuery::TableRanking] {
            let key = if query == RevenueQuery::Daily { "date" } else { "endDate" };
            let err = handler(query)
                .fetch(&params(&[(key, "+262142-12-31".into())]))
                .await
                .unwrap_err();
            assert!(matches!(err, HandlerError::InvalidParameter { name, .. } if name == key));
        }
    }

    #[tokio::test]
    async fn peak_hours_rank_by_order_count() {
        let text = render(RevenueQuery::PeakHours, Parameters::new()).await;
        assert_eq!(
            text,
            "⏰ GIỜ ĐÔNG KHÁCH\n\
             \n\
             📅 Dữ liệu từ: 09/02/2024 đến 10/03/2024\n\
             \n\
             🔥 Top 5 giờ đông khách nhất:\n\
             🥇 12:00 - 3 đơn - 800,000 VNĐ\n\
             🥈 19:00 - 1 đơn - 900,000 VNĐ\n\
             🥉 23:00 - 1 đơn - 50,000 VNĐ\n\
             \n\
             📊 Tổng số đơn: 5"
        );

        let p = params(&[("startDate", "2023-01-01".into()), ("endDate", "2023-01-31".into())]);
        assert_eq!(render(RevenueQuery::PeakHours, p).await, NO_PEAK_DATA);
    }

    #[tokio::test]
    async fn ranking_over_store() {
        let p = params(&[("type", "lowest".into()), ("topCount", ParamValue::Int(2))]);
        let text = render(RevenueQuery::TableRanking, p).await;
        assert_eq!(
            text,
            "📉 TOP 2 BÀN CÓ DOANH THU THẤP NHẤT\n\
             \n\
             🥇 A02 (Tầng 1)\n\
             \x20   ↳ Doanh thu: 150,000 VNĐ\n\
             \x20   ↳ Số đơn: 2\n\
             \n\
             🥈 A01 (Tầng 1)\n\
             \x20   ↳ Doanh thu: 700,000 VNĐ\n\
             \x20   ↳ Số đơn: 2"
        );

        let text = render(RevenueQuery::TableRanking, Parameters::new()).await;
        assert!(text.starts_with("📈 TOP 5 BÀN CÓ DOANH THU CAO NHẤT\n\n🥇 A03 (Sân vườn)"));
    }

    #[tokio::test]
    async fn ranking_rejects_unknown_type() {
        let err = handler(RevenueQuery::TableRanking)
            .fetch(&params(&[("type", "middle".into())]))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::InvalidParameter { name, .. } if name == "type"));
    }

    #[test]
    fn mismatched_report_has_no_data() {
        let report = HandlerData::Revenue(RevenueReport::PeakHours {
            start: fixtures::day(2024, 3, 1),
            end: fixtures::day(2024, 3, 2),
            hours: vec![],
            total_orders: 0,
        });
        assert_eq!(handler(RevenueQuery::Daily).format(&report), NO_DATA);
        assert_eq!(handler(RevenueQuery::Daily).format(&HandlerData::Menu(vec![])), NO_DATA);
        assert_eq!(RevenueQuery::from_kind(IntentKind::GetPeakHours), Some(RevenueQuery::PeakHours));
        assert_eq!(RevenueQuery::from_kind(IntentKind::GetMenu), None);
    }
}
