use std::sync::Arc;

use tracing::debug;

use super::format::{format_count, format_price, rank_prefix, truncate};
use super::{params, query_store, HandlerData, HandlerError};
use crate::engine::traits::IntentHandler;
use crate::intent::{IntentKind, Parameters};
use crate::store::{DishSales, RestaurantStore};

const DEFAULT_TOP_COUNT: usize = 10;
const DESCRIPTION_CHARS: usize = 60;
const NOTHING_SOLD: &str = "Chưa có món nào được bán.";
const NOT_POPULAR_DATA: &str = "Không có dữ liệu món bán chạy.";

pub struct PopularDishHandler {
    store: Arc<dyn RestaurantStore>,
}

/// Best sellers first, ties by name; the category filter applies before truncation.
pub fn rank_dishes(mut sales: Vec<DishSales>, category_id: Option<i64>, top: usize) -> Vec<DishSales> {
    if let Some(id) = category_id {
        sales.retain(|s| s.dish.category.as_ref().map(|c| c.id) == Some(id));
    }
    sales.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.dish.name.cmp(&b.dish.name))
    });
    sales.truncate(top);
    sales
}

impl PopularDishHandler {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    fn format_ranking(ranking: &[DishSales]) -> String {
        if ranking.is_empty() {
            return NOTHING_SOLD.to_string();
        }

        let entries: Vec<String> = ranking
            .iter()
            .enumerate()
            .map(|(i, sale)| {
                let dish = &sale.dish;
                let mut entry = format!(
                    "{} {} - {} - Đã bán: {} phần\n",
                    rank_prefix(i),
                    dish.name,
                    format_price(dish.price),
                    sale.quantity
                );
                if let Some(category) = &dish.category {
                    entry.push_str(&format!("    ↳ Danh mục: {}\n", category.name));
                }
                if let Some(desc) = dish.description.as_deref().filter(|d| !d.trim().is_empty()) {
                    entry.push_str(&format!("    ↳ {}\n", truncate(desc, DESCRIPTION_CHARS)));
                }
                entry
            })
            .collect();

        let total: u64 = ranking.iter().map(|s| s.quantity).sum();
        let mut out = String::from("🔥 TOP MÓN BÁN CHẠY\n\n");
        out.push_str(&entries.join("\n"));
        out.push_str("\n📊 Tổng quan:\n");
        out.push_str(&format!("  • Tổng số phần đã bán: {}\n", format_count(total)));
        out.push_str(&format!("  • Số món trong danh sách: {}", ranking.len()));
        out
    }
}

#[async_trait::async_trait]
impl IntentHandler for PopularDishHandler {
    fn kind(&self) -> IntentKind {
        IntentKind::GetPopularDishes
    }

    fn topic(&self) -> &'static str {
        "Món ăn bán chạy"
    }

    async fn fetch(&self, parameters: &Parameters) -> Result<HandlerData, HandlerError> {
        let top = params::count(parameters, "topCount", DEFAULT_TOP_COUNT)?;
        let category_id = params::integer(parameters, "categoryId")?;
        debug!(top = top, category_id = ?category_id, "Fetching popular dishes");

        let sales = query_store(&self.store, |s| s.dish_sales()).await?;
        Ok(HandlerData::Popular(rank_dishes(sales, category_id, top)))
    }

    fn format(&self, data: &HandlerData) -> String {
        match data {
            HandlerData::Popular(ranking) => Self::format_ranking(ranking),
            _ => NOT_POPULAR_DATA.to_string(),
        }
    }
}
