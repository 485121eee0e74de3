use std::sync::Arc;

use crate::domain::ports::inbound::CardService;

#[derive(Clone)]
pub struct AppState {
    pub card_service: Arc<dyn CardService>,
}

impl AppState {
    pub fn new(card_service: Arc<dyn CardService>) -> Self {
        Self { card_service }
    }
}
