//! INI file configuration adapter.

use crate::domain::error::MacrossError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MacrossError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| MacrossError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, MacrossError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| MacrossError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, MacrossError> {
        self.config
            .getint(section, key)
            .map_err(|_| MacrossError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!(
                    "expected an integer, got {:?}",
                    self.get_string(section, key).unwrap_or_default()
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const FULL_CONFIG: &str = r#"
[data]
path = ./prices
codes = 000001.SZ, 000002.SZ,600000.SH
start_date = 2020-01-01
end_date = 2021-12-31

[strategy]
fast_window = 5
slow_window = 20
top_n = 10

[logging]
level = debug
"#;

    #[test]
    fn from_string_parses_all_sections() {
        let adapter = FileConfigAdapter::from_string(FULL_CONFIG).unwrap();
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("./prices".to_string())
        );
        assert_eq!(adapter.get_int("strategy", "slow_window").unwrap(), Some(20));
        assert_eq!(
            adapter.get_string("logging", "level"),
            Some("debug".to_string())
        );
    }

    #[test]
    fn get_list_splits_codes() {
        let adapter = FileConfigAdapter::from_string(FULL_CONFIG).unwrap();
        assert_eq!(
            adapter.get_list("data", "codes"),
            vec!["000001.SZ", "000002.SZ", "600000.SH"]
        );
        assert!(adapter.get_list("data", "missing").is_empty());
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[strategy]\ntop_n = 3\n").unwrap();
        assert_eq!(adapter.get_string("strategy", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_none_for_missing() {
        let adapter = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        assert_eq!(adapter.get_int("strategy", "fast_window").unwrap(), None);
        assert_eq!(adapter.get_int("missing_section", "top_n").unwrap(), None);
    }

    #[test]
    fn get_int_rejects_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nfast_window = abc\n").unwrap();
        let err = adapter.get_int("strategy", "fast_window").unwrap_err();
        assert!(matches!(err, MacrossError::ConfigInvalid { ref key, .. } if key == "fast_window"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[data]\npath = /srv/prices\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("/srv/prices".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/config.ini").unwrap_err();
        assert!(matches!(err, MacrossError::ConfigParse { file, .. } if file.contains("config.ini")));
    }
}
