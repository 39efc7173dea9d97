//! In-memory store backed by a flat, id-linked snapshot.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::models::{
    Area, Category, Customer, Dish, DishSales, Order, OrderStatus, Table, TableStatus,
};
use super::{DishFilter, RestaurantStore, StoreError, TableFilter};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub dishes: Vec<DishRow>,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub tables: Vec<TableRow>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub orders: Vec<OrderRow>,
    #[serde(default)]
    pub order_details: Vec<OrderDetailRow>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DishRow {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TableRow {
    pub id: i64,
    pub name: String,
    pub status: TableStatus,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub area_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderRow {
    pub id: i64,
    pub time: NaiveDateTime,
    pub status: OrderStatus,
    pub total: Decimal,
    #[serde(default)]
    pub table_id: Option<i64>,
    #[serde(default)]
    pub customer_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderDetailRow {
    pub order_id: i64,
    pub dish_id: i64,
    pub quantity: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Snapshot,
}

impl InMemoryStore {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        debug!(
            dishes = snapshot.dishes.len(),
            tables = snapshot.tables.len(),
            orders = snapshot.orders.len(),
            "Store loaded"
        );
        Self { snapshot }
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&raw)?;
        info!(path = %path.display(), "Snapshot loaded");
        Ok(store)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn category(&self, id: Option<i64>) -> Option<Category> {
        let id = id?;
        self.snapshot.categories.iter().find(|c| c.id == id).cloned()
    }

    fn area(&self, id: Option<i64>) -> Option<Area> {
        let id = id?;
        self.snapshot.areas.iter().find(|a| a.id == id).cloned()
    }

    fn customer(&self, id: Option<i64>) -> Option<Customer> {
        let id = id?;
        self.snapshot.customers.iter().find(|c| c.id == id).cloned()
    }

    fn hydrate_dish(&self, row: &DishRow) -> Dish {
        Dish {
            id: row.id,
            name: row.name.clone(),
            price: row.price,
            unit: row.unit.clone(),
            description: row.description.clone(),
            category: self.category(row.category_id),
        }
    }

    fn hydrate_table(&self, row: &TableRow) -> Table {
        Table {
            id: row.id,
            name: row.name.clone(),
            status: row.status.clone(),
            capacity: row.capacity,
            kind: row.kind.clone(),
            area: self.area(row.area_id),
        }
    }

    fn table(&self, id: Option<i64>) -> Option<Table> {
        let id = id?;
        self.snapshot
            .tables
            .iter()
            .find(|t| t.id == id)
            .map(|row| self.hydrate_table(row))
    }
}

impl RestaurantStore for InMemoryStore {
    fn dishes(&self, filter: &DishFilter) -> Result<Vec<Dish>, StoreError> {
        let keyword = filter.keyword.as_ref().map(|k| k.to_lowercase());
        Ok(self
            .snapshot
            .dishes
            .iter()
            .filter(|d| filter.category_id.map_or(true, |id| d.category_id == Some(id)))
            .filter(|d| {
                keyword
                    .as_ref()
                    .map_or(true, |k| d.name.to_lowercase().contains(k.as_str()))
            })
            .map(|d| self.hydrate_dish(d))
            .collect())
    }

    fn tables(&self, filter: &TableFilter) -> Result<Vec<Table>, StoreError> {
        Ok(self
            .snapshot
            .tables
            .iter()
            .filter(|t| filter.status.as_ref().map_or(true, |s| &t.status == s))
            .filter(|t| filter.area_id.map_or(true, |id| t.area_id == Some(id)))
            .map(|t| self.hydrate_table(t))
            .collect())
    }

    fn dish_sales(&self) -> Result<Vec<DishSales>, StoreError> {
        let mut totals: HashMap<i64, u64> = HashMap::new();
        for detail in &self.snapshot.order_details {
            *totals.entry(detail.dish_id).or_insert(0) += detail.quantity;
        }

        Ok(self
            .snapshot
            .dishes
            .iter()
            .filter_map(|row| {
                let quantity = *totals.get(&row.id)?;
                Some(DishSales {
                    dish: self.hydrate_dish(row),
                    quantity,
                })
            })
            .collect())
    }

    fn orders_between(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .snapshot
            .orders
            .iter()
            .filter(|o| start.map_or(true, |s| o.time >= s))
            .filter(|o| end.map_or(true, |e| o.time <= e))
            .map(|o| Order {
                id: o.id,
                time: o.time,
                status: o.status.clone(),
                total: o.total,
                table: self.table(o.table_id),
                customer: self.customer(o.customer_id),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "categories": [{"id": 1, "name": "Món chính"}],
        "dishes": [
            {"id": 1, "name": "Cơm tấm", "price": 45000, "unit": "dĩa", "category_id": 1},
            {"id": 2, "name": "Trà đá", "price": "5000", "category_id": 99}
        ],
        "areas": [{"id": 1, "name": "Tầng 1"}],
        "tables": [
            {"id": 1, "name": "A01", "status": "Empty", "area_id": 1},
            {"id": 2, "name": "A02", "status": "Using", "area_id": 7}
        ],
        "customers": [{"id": 1, "full_name": "Nguyễn Văn A"}],
        "orders": [
            {"id": 1, "time": "2024-03-01T12:30:00", "status": "Completed", "total": 90000, "table_id": 1, "customer_id": 1},
            {"id": 2, "time": "2024-03-02T19:00:00", "status": "Cancelled", "total": 5000, "table_id": 2}
        ],
        "order_details": [
            {"order_id": 1, "dish_id": 1, "quantity": 2},
            {"order_id": 2, "dish_id": 1, "quantity": 1}
        ]
    }"#;

    #[test]
    fn hydrates_relations_and_drops_unknown_keys() {
        let store = InMemoryStore::from_json_str(SNAPSHOT).unwrap();
        let dishes = store.dishes(&DishFilter::default()).unwrap();
        assert_eq!(dishes[0].category.as_ref().unwrap().name, "Món chính");
        assert!(dishes[1].category.is_none());

        let tables = store.tables(&TableFilter::default()).unwrap();
        assert_eq!(tables[0].area.as_ref().unwrap().name, "Tầng 1");
        assert!(tables[1].area.is_none());
    }

    #[test]
    fn filters_dishes_and_tables() {
        let store = InMemoryStore::from_json_str(SNAPSHOT).unwrap();
        let by_keyword = store
            .dishes(&DishFilter {
                keyword: Some("TRÀ".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_keyword.len(), 1);
        assert_eq!(by_keyword[0].name, "Trà đá");

        let empty = store
            .tables(&TableFilter {
                status: Some(TableStatus::Empty),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].name, "A01");
    }

    #[test]
    fn sums_sales_and_bounds_orders() {
        let store = InMemoryStore::from_json_str(SNAPSHOT).unwrap();
        let sales = store.dish_sales().unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].quantity, 3);

        let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let orders = store.orders_between(Some(start), None).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, 2);
        assert_eq!(orders[0].table.as_ref().unwrap().name, "A02");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let store = InMemoryStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.snapshot().orders.len(), 2);
    }

    #[test]
    fn rejects_malformed_snapshot() {
        let err = InMemoryStore::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn bundled_sample_data_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/restaurant.json");
        let store = InMemoryStore::from_json_file(path).unwrap();
        assert!(!store.dishes(&DishFilter::default()).unwrap().is_empty());
        assert!(store.orders_between(None, None).unwrap().iter().all(|o| o.table.is_some()));
    }
}
