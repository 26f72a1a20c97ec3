//! Reader for the daemon's main `nagios.cfg`.
//!
//! Lines are `key=value`; `#` starts a comment. `cfg_file` and `cfg_dir` may
//! repeat and accumulate, every other key keeps its last value.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::status::decode_status_bytes;
use crate::{Error, Result};

/// Environment variable naming the config file explicitly.
pub const NAGIOS_CFG_VAR: &str = "NAGIOS_CFG_FILE";

/// Where to look for `nagios.cfg` when nothing else says.
pub const DEFAULT_CFG_GLOBS: [&str; 2] = ["/etc/nagios*/nagios.cfg", "/usr/local/nagios/etc/nagios.cfg"];

/// Parsed `nagios.cfg`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NagiosConfig {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
    cfg_file: Vec<String>,
    cfg_dir: Vec<String>,
}

impl NagiosConfig {
    pub fn parse(text: &str) -> Result<Self> {
        let mut config = Self::default();
        for raw in text.lines() {
            let line = match raw.find('#') {
                Some(i) => &raw[..i],
                None => raw,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| Error::Config(format!("Incorrect configuration line {}", raw)))?;
            let (key, value) = (key.trim(), value.trim());
            match key {
                "cfg_file" => config.cfg_file.push(value.to_string()),
                "cfg_dir" => config.cfg_dir.push(value.to_string()),
                _ => {
                    config.values.insert(key.to_string(), value.to_string());
                }
            }
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file {} does not exist",
                path.display()
            )));
        }
        let bytes = std::fs::read(path)?;
        let mut config = Self::parse(&decode_status_bytes(&bytes))?;
        config.path = Some(path.to_path_buf());
        debug!(path = %path.display(), keys = config.values.len(), "loaded nagios.cfg");
        Ok(config)
    }

    /// Load from `NAGIOS_CFG_FILE`, else the first default location found.
    pub fn discover() -> Result<Self> {
        let path = match std::env::var_os(NAGIOS_CFG_VAR) {
            Some(p) => PathBuf::from(p),
            None => DEFAULT_CFG_GLOBS
                .iter()
                .flat_map(|g| expand_glob(g))
                .next()
                .ok_or_else(|| {
                    Error::Config(format!(
                        "No configuration file option and no files in {}",
                        DEFAULT_CFG_GLOBS.join(", ")
                    ))
                })?,
        };
        Self::load(&path)
    }

    /// File this config was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value parsed as a number, when it is made only of digits, `.` and `-`.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        let value = self.get(key)?;
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
            return None;
        }
        value.parse().ok()
    }

    pub fn status_file(&self) -> Option<&str> {
        self.get("status_file")
    }

    pub fn object_cache_file(&self) -> Option<&str> {
        self.get("object_cache_file")
    }

    pub fn command_file(&self) -> Option<&str> {
        self.get("command_file")
    }

    pub fn cfg_files(&self) -> &[String] {
        &self.cfg_file
    }

    pub fn cfg_dirs(&self) -> &[String] {
        &self.cfg_dir
    }
}

/// Expand a path pattern with wildcards in its components. Matches are
/// sorted per directory; only existing paths are returned.
pub fn expand_glob(pattern: &str) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::new()];
    for component in Path::new(pattern).components() {
        let part = match component {
            Component::Normal(p) => p.to_string_lossy().into_owned(),
            other => {
                for c in &mut candidates {
                    c.push(other.as_os_str());
                }
                continue;
            }
        };

        if !part.contains(&['*', '?', '['][..]) {
            for c in &mut candidates {
                c.push(&part);
            }
            continue;
        }

        let mut next = Vec::new();
        for dir in &candidates {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            let mut names: Vec<String> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .filter(|name| glob_match::glob_match(&part, name))
                .collect();
            names.sort();
            next.extend(names.into_iter().map(|n| dir.join(n)));
        }
        candidates = next;
    }
    candidates.into_iter().filter(|p| p.exists()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_CFG: &str = "\
# Nagios main configuration
log_file=/var/log/nagios3/nagios.log
cfg_file=/etc/nagios3/commands.cfg
cfg_file=/etc/nagios3/localhost.cfg   # trailing comment
cfg_dir=/etc/nagios3/conf.d

object_cache_file=/var/cache/nagios3/objects.cache
status_file=/var/cache/nagios3/status.dat
command_file=/var/lib/nagios3/rw/nagios.cmd
status_update_interval=10
low_service_flap_threshold=5.0
illegal_macro_output_chars=`~$&|'\"<>
";

    #[test]
    fn test_typed_accessors() {
        let cfg = NagiosConfig::parse(SAMPLE_CFG).unwrap();
        assert_eq!(cfg.status_file(), Some("/var/cache/nagios3/status.dat"));
        assert_eq!(cfg.object_cache_file(), Some("/var/cache/nagios3/objects.cache"));
        assert_eq!(cfg.command_file(), Some("/var/lib/nagios3/rw/nagios.cmd"));
        assert_eq!(cfg.get("log_file"), Some("/var/log/nagios3/nagios.log"));
        assert_eq!(cfg.get("missing"), None);
    }

    #[test]
    fn test_cfg_lists_accumulate() {
        let cfg = NagiosConfig::parse(SAMPLE_CFG).unwrap();
        assert_eq!(cfg.cfg_files(), &["/etc/nagios3/commands.cfg", "/etc/nagios3/localhost.cfg"]);
        assert_eq!(cfg.cfg_dirs(), &["/etc/nagios3/conf.d"]);
    }

    #[test]
    fn test_numbers() {
        let cfg = NagiosConfig::parse(SAMPLE_CFG).unwrap();
        assert_eq!(cfg.get_number("status_update_interval"), Some(10.0));
        assert_eq!(cfg.get_number("low_service_flap_threshold"), Some(5.0));
        assert_eq!(cfg.get_number("log_file"), None);
    }

    #[test]
    fn test_non_numeric_words_are_not_numbers() {
        let cfg = NagiosConfig::parse("a=inf\nb=NaN\nc=infinity\nd=-1.5\ne=1e3\n").unwrap();
        assert_eq!(cfg.get_number("a"), None);
        assert_eq!(cfg.get_number("b"), None);
        assert_eq!(cfg.get_number("c"), None);
        assert_eq!(cfg.get_number("d"), Some(-1.5));
        assert_eq!(cfg.get_number("e"), None);
    }

    #[test]
    fn test_last_value_wins() {
        let cfg = NagiosConfig::parse("a=1\na = 2\n").unwrap();
        assert_eq!(cfg.get("a"), Some("2"));
    }

    #[test]
    fn test_line_without_equals_rejected() {
        let err = NagiosConfig::parse("status_file\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_records_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nagios.cfg");
        std::fs::write(&path, "status_file=/tmp/status.dat\n").unwrap();
        let cfg = NagiosConfig::load(&path).unwrap();
        assert_eq!(cfg.path(), Some(path.as_path()));
        assert_eq!(cfg.status_file(), Some("/tmp/status.dat"));
    }

    #[test]
    fn test_load_latin1_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nagios.cfg");
        std::fs::write(&path, b"# r\xe9glages\nstatus_file=/tmp/status.dat\nadmin_email=ren\xe9@example.com\n").unwrap();
        let cfg = NagiosConfig::load(&path).unwrap();
        assert_eq!(cfg.status_file(), Some("/tmp/status.dat"));
        assert_eq!(cfg.get("admin_email"), Some("ren\u{e9}@example.com"));
    }

    #[test]
    fn test_load_missing() {
        assert!(NagiosConfig::load(Path::new("/nonexistent/nagios.cfg")).is_err());
    }

    #[test]
    fn test_expand_glob() {
        let tmp = TempDir::new().unwrap();
        for dir in ["nagios3", "nagios4", "other"] {
            std::fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        std::fs::write(tmp.path().join("nagios4/nagios.cfg"), "").unwrap();
        std::fs::write(tmp.path().join("nagios3/nagios.cfg"), "").unwrap();
        std::fs::write(tmp.path().join("other/nagios.cfg"), "").unwrap();

        let pattern = format!("{}/nagios*/nagios.cfg", tmp.path().display());
        let found = expand_glob(&pattern);
        assert_eq!(
            found,
            vec![tmp.path().join("nagios3/nagios.cfg"), tmp.path().join("nagios4/nagios.cfg")]
        );
    }

    #[test]
    fn test_expand_glob_literal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nagios.cfg");
        assert!(expand_glob(&path.display().to_string()).is_empty());
        std::fs::write(&path, "").unwrap();
        assert_eq!(expand_glob(&path.display().to_string()), vec![path]);
    }
}
