use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::format::{compare_names, format_price, sort_key};
use super::{params, query_store, HandlerData, HandlerError};
use crate::engine::traits::IntentHandler;
use crate::intent::{IntentKind, Parameters};
use crate::store::{Dish, DishFilter, RestaurantStore};

const UNCATEGORIZED: &str = "Chưa phân loại";
const NO_DISHES: &str = "Hiện tại không có món ăn nào trong thực đơn.";
const NOT_MENU_DATA: &str = "Không có dữ liệu món ăn.";

pub struct MenuHandler {
    store: Arc<dyn RestaurantStore>,
}

impl MenuHandler {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    fn format_dishes(dishes: &[Dish]) -> String {
        if dishes.is_empty() {
            return NO_DISHES.to_string();
        }

        let mut groups: BTreeMap<(String, &str), Vec<&Dish>> = BTreeMap::new();
        for dish in dishes {
            let key = dish
                .category
                .as_ref()
                .map(|c| c.name.as_str())
                .unwrap_or(UNCATEGORIZED);
            groups.entry((sort_key(key), key)).or_default().push(dish);
        }

        let mut out = format!("📋 THỰC ĐƠN ({} món)\n\n", dishes.len());
        for ((_, category), mut items) in groups {
            items.sort_by(|a, b| compare_names(&a.name, &b.name));
            out.push_str(&format!("▶ {}\n", category.to_uppercase()));
            for dish in items {
                out.push_str(&format!("  • {} - {}", dish.name, format_price(dish.price)));
                if let Some(unit) = dish.unit.as_deref().filter(|u| !u.trim().is_empty()) {
                    out.push_str(&format!(" ({})", unit));
                }
                out.push('\n');
                if let Some(desc) = dish.description.as_deref().filter(|d| !d.trim().is_empty()) {
                    out.push_str(&format!("    ↳ {}\n", desc));
                }
            }
            out.push('\n');
        }

        out.trim_end().to_string()
    }
}

#[async_trait::async_trait]
impl IntentHandler for MenuHandler {
    fn kind(&self) -> IntentKind {
        IntentKind::GetMenu
    }

    fn topic(&self) -> &'static str {
        "Thực đơn món ăn"
    }

    async fn fetch(&self, parameters: &Parameters) -> Result<HandlerData, HandlerError> {
        // A category id wins over a name keyword.
        let filter = match params::integer(parameters, "categoryId")? {
            Some(id) => DishFilter {
                category_id: Some(id),
                keyword: None,
            },
            None => DishFilter {
                category_id: None,
                keyword: params::text(parameters, "keyword"),
            },
        };
        debug!(?filter, "Fetching menu");

        let mut dishes = query_store(&self.store, move |s| s.dishes(&filter)).await?;
        dishes.sort_by(|a, b| compare_names(&a.name, &b.name));
        Ok(HandlerData::Menu(dishes))
    }

    fn format(&self, data: &HandlerData) -> String {
        match data {
            HandlerData::Menu(dishes) => Self::format_dishes(dishes),
            _ => NOT_MENU_DATA.to_string(),
        }
    }
}
