use std::env;
use std::path::PathBuf;

use crate::errors::AppError;

pub const DEFAULT_CUSTOMER: &str = "Guest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Name of the authenticated user; becomes the draft's customer.
    pub customer: String,
    /// JSON array of draft commands to replay.
    pub script_path: PathBuf,
    /// Where outbox events go. Stdout when `None`.
    pub outbox_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let customer = lookup("RENTAL_CUSTOMER")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CUSTOMER.to_string());
        let script_path = lookup("RENTAL_SCRIPT")
            .map(PathBuf::from)
            .ok_or_else(|| AppError::Config("RENTAL_SCRIPT must be set".to_string()))?;
        let outbox_path = lookup("RENTAL_OUTBOX")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            customer,
            script_path,
            outbox_path,
        })
    }
}
