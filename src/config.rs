use snafu::{ensure, ResultExt, Snafu};
use std::env;

pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_title: Option<String>,
    pub max_line_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: None,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl Config {
    pub fn from_environment() -> Result<Self> {
        let default_title = optional_var("NOTIFY_DEFAULT_TITLE")?.filter(|t| !t.is_empty());

        let max_line_bytes = match optional_var("NOTIFY_MAX_LINE_BYTES")? {
            Some(bytes) => {
                let parsed: usize = bytes
                    .parse()
                    .context(InvalidMaxLineBytesSnafu { bytes: &bytes })?;
                ensure!(parsed > 0, ZeroMaxLineBytesSnafu);
                parsed
            }
            None => DEFAULT_MAX_LINE_BYTES,
        };

        Ok(Self {
            default_title,
            max_line_bytes,
        })
    }
}

fn optional_var(name: &'static str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(v) => Ok(Some(v)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).context(UnreadableVariableSnafu { name }),
    }
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{} is not valid Unicode", name))]
    UnreadableVariable {
        source: env::VarError,
        name: &'static str,
    },

    #[snafu(display("NOTIFY_MAX_LINE_BYTES is invalid: {}", bytes))]
    InvalidMaxLineBytes {
        source: std::num::ParseIntError,
        bytes: String,
    },

    #[snafu(display("NOTIFY_MAX_LINE_BYTES must be greater than zero"))]
    ZeroMaxLineBytes,
}

type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;
    use serial_test::serial;

    fn clear() {
        env::remove_var("NOTIFY_DEFAULT_TITLE");
        env::remove_var("NOTIFY_MAX_LINE_BYTES");
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear();

        assert_eq!(Config::from_environment().unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn reads_values() {
        clear();
        env::set_var("NOTIFY_DEFAULT_TITLE", "Jikgong");
        env::set_var("NOTIFY_MAX_LINE_BYTES", "128");

        let config = Config::from_environment().unwrap();
        clear();

        assert_eq!(config.default_title.as_deref(), Some("Jikgong"));
        assert_eq!(config.max_line_bytes, 128);
    }

    #[test]
    #[serial]
    fn empty_title_is_unset() {
        clear();
        env::set_var("NOTIFY_DEFAULT_TITLE", "");

        let config = Config::from_environment().unwrap();
        clear();

        assert_eq!(config.default_title, None);
    }

    #[test]
    #[serial]
    fn rejects_bad_line_limits() {
        clear();

        env::set_var("NOTIFY_MAX_LINE_BYTES", "lots");
        let e = Config::from_environment().unwrap_err();
        assert!(matches!(e, Error::InvalidMaxLineBytes { ref bytes, .. } if bytes == "lots"));

        env::set_var("NOTIFY_MAX_LINE_BYTES", "0");
        let e = Config::from_environment().unwrap_err();
        assert!(matches!(e, Error::ZeroMaxLineBytes));

        clear();
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn rejects_non_unicode_values() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        for name in &["NOTIFY_DEFAULT_TITLE", "NOTIFY_MAX_LINE_BYTES"] {
            clear();
            env::set_var(name, OsStr::from_bytes(&[0x66, 0xff]));

            let e = Config::from_environment().unwrap_err();
            clear();

            assert!(
                matches!(e, Error::UnreadableVariable { name: n, .. } if n == *name),
                "{:?}",
                e
            );
        }
    }
}
