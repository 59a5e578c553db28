use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::DbPool,
    services::{mail::Mailer, storage::StorageService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: StorageService,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config,
            storage: StorageService::new(db),
            mailer,
        }
    }
}
