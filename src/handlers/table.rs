use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::format::{compare_names, sort_key};
use super::{params, query_store, HandlerData, HandlerError};
use crate::engine::traits::IntentHandler;
use crate::intent::{IntentKind, Parameters};
use crate::store::{RestaurantStore, Table, TableFilter, TableStatus};

const NO_AREA: &str = "Chưa phân khu";
const NO_TABLES: &str = "Hiện tại không có bàn nào.";
const NOT_TABLE_DATA: &str = "Không có dữ liệu bàn.";

pub fn status_label(status: &TableStatus) -> String {
    match status {
        TableStatus::Empty => "✅ Trống".to_string(),
        TableStatus::Using => "🔴 Đang sử dụng".to_string(),
        TableStatus::Booked => "📅 Đã đặt".to_string(),
        TableStatus::Maintenance => "🔧 Bảo trì".to_string(),
        TableStatus::Other(raw) if raw.trim().is_empty() => "Không xác định".to_string(),
        TableStatus::Other(raw) => raw.clone(),
    }
}

pub struct TableHandler {
    store: Arc<dyn RestaurantStore>,
}

impl TableHandler {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    fn format_tables(tables: &[Table]) -> String {
        if tables.is_empty() {
            return NO_TABLES.to_string();
        }

        let mut groups: BTreeMap<(String, &str), Vec<&Table>> = BTreeMap::new();
        for table in tables {
            let key = table.area.as_ref().map(|a| a.name.as_str()).unwrap_or(NO_AREA);
            groups.entry((sort_key(key), key)).or_default().push(table);
        }

        let mut out = format!("🪑 THÔNG TIN BÀN ({} bàn)\n\n", tables.len());
        for ((_, area), mut items) in groups {
            items.sort_by(|a, b| compare_names(&a.name, &b.name));
            out.push_str(&format!("▶ {}\n", area.to_uppercase()));
            for table in items {
                out.push_str(&format!("  • {} - {}\n", table.name, status_label(&table.status)));
            }
            out.push('\n');
        }

        // Summary keeps the order in which statuses first appear.
        let mut summary: Vec<(&TableStatus, usize)> = Vec::new();
        for table in tables {
            match summary.iter_mut().find(|(s, _)| *s == &table.status) {
                Some((_, n)) => *n += 1,
                None => summary.push((&table.status, 1)),
            }
        }

        out.push_str("📊 Tổng quan:\n");
        for (status, n) in summary {
            out.push_str(&format!("  • {}: {}\n", status_label(status), n));
        }

        out.trim_end().to_string()
    }
}

#[async_trait::async_trait]
impl IntentHandler for TableHandler {
    fn kind(&self) -> IntentKind {
        IntentKind::GetTableAvailability
    }

    fn topic(&self) -> &'static str {
        "Tình trạng bàn"
    }

    async fn fetch(&self, parameters: &Parameters) -> Result<HandlerData, HandlerError> {
        let filter = TableFilter {
            status: params::text(parameters, "status").map(|s| TableStatus::parse(&s)),
            area_id: params::integer(parameters, "areaId")?,
        };
        debug!(?filter, "Fetching tables");

        let mut tables = query_store(&self.store, move |s| s.tables(&filter)).await?;
        tables.sort_by(|a, b| {
            let area = |t: &Table| t.area.as_ref().map(|a| a.name.clone()).unwrap_or_default();
            compare_names(&area(a), &area(b)).then_with(|| compare_names(&a.name, &b.name))
        });
        Ok(HandlerData::Tables(tables))
    }

    fn format(&self, data: &HandlerData) -> String {
        match data {
            HandlerData::Tables(tables) => Self::format_tables(tables),
            _ => NOT_TABLE_DATA.to_string(),
        }
    }
}
