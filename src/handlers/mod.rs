//! Per-intent data retrieval and formatting, plus the registry that dispatches to them.

pub mod format;
pub mod menu;
pub mod params;
pub mod popular;
pub mod registry;
pub mod revenue;
pub mod table;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::store::{Dish, DishSales, RestaurantStore, StoreError, Table};

pub use menu::MenuHandler;
pub use popular::PopularDishHandler;
pub use registry::HandlerRegistry;
pub use revenue::{RankingOrder, RevenueHandler, RevenueQuery, RevenueReport};
pub use table::TableHandler;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),
    #[error("Invalid value for parameter '{name}': {value}")]
    InvalidParameter { name: String, value: String },
    #[error("Data access failed: {0}")]
    Store(#[from] StoreError),
    #[error("Background worker failed: {0}")]
    Worker(String),
}

/// What a handler's `fetch` hands to its `format`.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerData {
    Menu(Vec<Dish>),
    Tables(Vec<Table>),
    Popular(Vec<DishSales>),
    Revenue(RevenueReport),
}

/// Source of "today" for date defaults.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Runs a store query on the blocking pool so async callers never stall on it.
pub(crate) async fn query_store<T, F>(
    store: &Arc<dyn RestaurantStore>,
    query: F,
) -> Result<T, HandlerError>
where
    T: Send + 'static,
    F: FnOnce(&dyn RestaurantStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    let result = tokio::task::spawn_blocking(move || query(store.as_ref()))
        .await
        .map_err(|e| HandlerError::Worker(e.to_string()))?;
    Ok(result?)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Store seeded in code for handler tests.

    use std::str::FromStr;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::store::memory::{DishRow, OrderDetailRow, OrderRow, Snapshot, TableRow};
    use crate::store::{Area, Category, Customer, InMemoryStore, OrderStatus, RestaurantStore, TableStatus};

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn money(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn order(id: i64, time: &str, status: OrderStatus, total: i64, table: i64, customer: Option<i64>) -> OrderRow {
        OrderRow {
            id,
            time: chrono::NaiveDateTime::from_str(time).unwrap(),
            status,
            total: money(total),
            table_id: Some(table),
            customer_id: customer,
        }
    }

    pub fn snapshot() -> Snapshot {
        Snapshot {
            categories: vec![
                Category { id: 1, name: "Món chính".into(), description: None },
                Category { id: 2, name: "Đồ uống".into(), description: None },
            ],
            dishes: vec![
                DishRow {
                    id: 1,
                    name: "Phở bò".into(),
                    price: money(50000),
                    unit: Some("tô".into()),
                    description: Some("Phở bò tái chín".into()),
                    category_id: Some(1),
                },
                DishRow {
                    id: 2,
                    name: "Cơm tấm".into(),
                    price: money(45000),
                    unit: Some("dĩa".into()),
                    description: None,
                    category_id: Some(1),
                },
                DishRow {
                    id: 3,
                    name: "Trà đá".into(),
                    price: money(5000),
                    unit: None,
                    description: None,
                    category_id: Some(2),
                },
                DishRow {
                    id: 4,
                    name: "Bánh flan".into(),
                    price: money(15000),
                    unit: Some("cái".into()),
                    description: None,
                    category_id: None,
                },
            ],
            areas: vec![
                Area { id: 1, name: "Tầng 1".into(), status: None },
                Area { id: 2, name: "Sân vườn".into(), status: None },
            ],
            tables: vec![
                TableRow { id: 1, name: "A01".into(), status: TableStatus::Empty, capacity: Some(4), kind: Some("Normal".into()), area_id: Some(1) },
                TableRow { id: 2, name: "A02".into(), status: TableStatus::Using, capacity: Some(4), kind: Some("Normal".into()), area_id: Some(1) },
                TableRow { id: 3, name: "A03".into(), status: TableStatus::Booked, capacity: Some(6), kind: Some("Normal".into()), area_id: Some(2) },
                TableRow { id: 4, name: "VIP1".into(), status: TableStatus::Empty, capacity: Some(10), kind: Some("VIP".into()), area_id: None },
            ],
            customers: vec![
                Customer { id: 1, full_name: "Nguyễn Văn A".into(), phone: None, email: None },
                Customer { id: 2, full_name: "Trần Thị B".into(), phone: None, email: None },
            ],
            orders: vec![
                order(1, "2024-03-10T12:15:00", OrderStatus::Completed, 500000, 1, Some(1)),
                order(2, "2024-03-10T12:45:00", OrderStatus::Completed, 100000, 2, Some(1)),
                order(3, "2024-03-10T19:00:00", OrderStatus::Completed, 900000, 3, Some(2)),
                order(4, "2024-03-10T19:30:00", OrderStatus::Cancelled, 700000, 1, None),
                order(5, "2024-03-09T12:00:00", OrderStatus::Completed, 200000, 1, None),
                order(6, "2024-03-10T23:59:59", OrderStatus::Completed, 50000, 2, None),
            ],
            order_details: vec![
                OrderDetailRow { order_id: 1, dish_id: 1, quantity: 4 },
                OrderDetailRow { order_id: 2, dish_id: 2, quantity: 2 },
                OrderDetailRow { order_id: 3, dish_id: 3, quantity: 6 },
                OrderDetailRow { order_id: 5, dish_id: 2, quantity: 2 },
            ],
        }
    }

    pub fn store() -> Arc<dyn RestaurantStore> {
        Arc::new(InMemoryStore::from_snapshot(snapshot()))
    }
}
