pub mod json_backend;

use std::path::Path;

use crate::{errors::RentError, portfolio::Portfolio};

pub type Result<T> = std::result::Result<T, RentError>;

/// Abstraction over persistence backends capable of storing portfolios and
/// opaque backup snapshots. The engine never interprets snapshot contents.
pub trait StorageBackend: Send + Sync {
    fn save(&self, portfolio: &Portfolio, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Portfolio>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, portfolio: &Portfolio, name: &str, note: Option<&str>) -> Result<()>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Portfolio>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to managed storage when not overridden.
    fn save_to_path(&self, portfolio: &Portfolio, path: &Path) -> Result<()> {
        json_backend::save_portfolio_to_path(portfolio, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Portfolio> {
        json_backend::load_portfolio_from_path(path)
    }
}

pub use json_backend::JsonStorage;
