//! Application services

mod symbol_package_file_service;

pub use symbol_package_file_service::SymbolPackageFileService;
