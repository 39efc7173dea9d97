//! Read-only data access consumed by the handlers.

pub mod memory;
pub mod models;

use chrono::NaiveDateTime;
use thiserror::Error;

pub use memory::InMemoryStore;
pub use models::{
    Area, Category, Customer, Dish, DishSales, Order, OrderStatus, Table, TableStatus,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishFilter {
    pub category_id: Option<i64>,
    /// Case-insensitive substring of the dish name.
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableFilter {
    pub status: Option<TableStatus>,
    pub area_id: Option<i64>,
}

/// Query capabilities backing the handlers. Every returned record is
/// fully hydrated. Calls are synchronous; handlers move them onto a
/// blocking worker.
pub trait RestaurantStore: Send + Sync {
    fn dishes(&self, filter: &DishFilter) -> Result<Vec<Dish>, StoreError>;

    fn tables(&self, filter: &TableFilter) -> Result<Vec<Table>, StoreError>;

    /// Quantity sold per dish across all order details, dishes never sold omitted.
    fn dish_sales(&self) -> Result<Vec<DishSales>, StoreError>;

    /// Orders whose time lies in `[start, end]`; an absent bound is open.
    fn orders_between(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Order>, StoreError>;
}
