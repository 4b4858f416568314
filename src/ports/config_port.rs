//! Configuration access port trait.

use crate::domain::config_validation::parse_codes;
use crate::domain::error::MacrossError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// `Ok(None)` when the key is absent, `ConfigInvalid` when it is present
    /// but not an integer.
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, MacrossError>;

    /// Comma-separated list value; empty when the key is absent.
    fn get_list(&self, section: &str, key: &str) -> Vec<String> {
        self.get_string(section, key)
            .map(|raw| parse_codes(&raw))
            .unwrap_or_default()
    }
}
