//! Kind-keyed dispatch table.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{Clock, MenuHandler, PopularDishHandler, RevenueHandler, RevenueQuery, TableHandler};
use crate::engine::traits::IntentHandler;
use crate::intent::IntentKind;
use crate::store::RestaurantStore;

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<IntentKind, Arc<dyn IntentHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Menu, tables, popular dishes and the four revenue queries over one store.
    pub fn with_defaults(store: Arc<dyn RestaurantStore>, clock: Arc<dyn Clock>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MenuHandler::new(Arc::clone(&store))));
        registry.register(Arc::new(TableHandler::new(Arc::clone(&store))));
        registry.register(Arc::new(PopularDishHandler::new(Arc::clone(&store))));
        for query in RevenueQuery::ALL {
            registry.register(Arc::new(RevenueHandler::new(
                query,
                Arc::clone(&store),
                Arc::clone(&clock),
            )));
        }
        registry
    }

    /// Last registration wins; the displaced handler is handed back.
    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) -> Option<Arc<dyn IntentHandler>> {
        let kind = handler.kind();
        let previous = self.handlers.insert(kind, handler);
        if previous.is_some() {
            warn!(%kind, "Handler replaced an existing registration");
        } else {
            debug!(%kind, "Handler registered");
        }
        previous
    }

    pub fn get(&self, kind: IntentKind) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.get(&kind).cloned()
    }

    pub fn supports(&self, kind: IntentKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn kinds(&self) -> Vec<IntentKind> {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Topic names in kind order.
    pub fn topics(&self) -> Vec<String> {
        self.kinds()
            .into_iter()
            .filter_map(|k| self.handlers.get(&k))
            .map(|h| h.topic().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
