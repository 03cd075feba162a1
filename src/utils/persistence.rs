use std::{fs, path::Path};

use crate::{errors::RentError, portfolio::Portfolio};

/// Writes the portfolio to disk atomically by staging to a temporary file.
pub fn save_portfolio_to_file(portfolio: &Portfolio, path: &Path) -> Result<(), RentError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(portfolio)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a portfolio snapshot from disk, returning structured errors on failure.
pub fn load_portfolio_from_file(path: &Path) -> Result<Portfolio, RentError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
