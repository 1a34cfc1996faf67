//! Application state for shared services

use std::sync::Arc;

use crate::domain::FileStorage;
use crate::infrastructure::services::SymbolPackageFileService;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub symbol_packages: SymbolPackageFileService,
}

impl AppState {
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self {
            symbol_packages: SymbolPackageFileService::new(storage),
        }
    }

    pub fn storage(&self) -> &Arc<dyn FileStorage> {
        self.symbol_packages.storage()
    }
}
