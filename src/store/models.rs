//! Restaurant domain records, fully hydrated as handlers receive them.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    /// Serving unit ("dĩa", "tô", "ly", ...).
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Area {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableStatus {
    Empty,
    Using,
    Booked,
    Maintenance,
    Other(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Table {
    pub id: i64,
    pub name: String,
    pub status: TableStatus,
    #[serde(default)]
    pub capacity: Option<u32>,
    /// "VIP" or "Normal".
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub area: Option<Area>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Scheduled,
    Completed,
    Cancelled,
    Other(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub time: NaiveDateTime,
    pub status: OrderStatus,
    pub total: Decimal,
    #[serde(default)]
    pub table: Option<Table>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

impl Order {
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}

/// Quantity sold per dish, summed over every order detail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DishSales {
    pub dish: Dish,
    pub quantity: u64,
}

impl TableStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "empty" | "available" => TableStatus::Empty,
            "using" | "occupied" => TableStatus::Using,
            "booked" | "reserved" => TableStatus::Booked,
            "maintenance" => TableStatus::Maintenance,
            _ => TableStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TableStatus::Empty => "Empty",
            TableStatus::Using => "Using",
            TableStatus::Booked => "Booked",
            TableStatus::Maintenance => "Maintenance",
            TableStatus::Other(raw) => raw,
        }
    }
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "scheduled" => OrderStatus::Scheduled,
            "completed" => OrderStatus::Completed,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Scheduled => "Scheduled",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(raw) => raw,
        }
    }
}

impl Serialize for TableStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TableStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(TableStatus::parse(&raw))
    }
}

impl Serialize for OrderStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(OrderStatus::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_parse_case_insensitively() {
        assert_eq!(TableStatus::parse("EMPTY"), TableStatus::Empty);
        assert_eq!(TableStatus::parse(" using "), TableStatus::Using);
        assert_eq!(
            TableStatus::parse("Cleaning"),
            TableStatus::Other("Cleaning".to_string())
        );
        assert_eq!(OrderStatus::parse("completed"), OrderStatus::Completed);
        assert_eq!(OrderStatus::parse("Canceled"), OrderStatus::Cancelled);
    }

    #[test]
    fn statuses_round_trip_through_json_as_strings() {
        let json = serde_json::to_string(&TableStatus::Booked).unwrap();
        assert_eq!(json, "\"Booked\"");
        let back: OrderStatus = serde_json::from_str("\"Scheduled\"").unwrap();
        assert_eq!(back, OrderStatus::Scheduled);
    }
}
