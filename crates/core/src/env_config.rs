//! `EQUIPTRACK_*` environment variables.
//!
//! Every setting is read through an [`EnvKey`], so the prefix lives in one
//! place. Invalid values are logged at warn level and replaced by the default.

use std::fmt::Display;
use std::str::FromStr;

/// Prefix shared by every variable this crate reads.
pub const ENV_PREFIX: &str = "EQUIPTRACK_";

/// Settings that can be overridden from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvKey {
    DbPath,
    Retention,
    DbPoolSize,
    OwnerHeader,
    MaxUploadBytes,
}

impl EnvKey {
    pub const ALL: [Self; 5] =
        [Self::DbPath, Self::Retention, Self::DbPoolSize, Self::OwnerHeader, Self::MaxUploadBytes];

    const fn suffix(self) -> &'static str {
        match self {
            Self::DbPath => "DB_PATH",
            Self::Retention => "RETENTION",
            Self::DbPoolSize => "DB_POOL_SIZE",
            Self::OwnerHeader => "OWNER_HEADER",
            Self::MaxUploadBytes => "MAX_UPLOAD_BYTES",
        }
    }

    /// Full variable name, e.g. `EQUIPTRACK_RETENTION`.
    #[must_use]
    pub fn var_name(self) -> String {
        format!("{ENV_PREFIX}{}", self.suffix())
    }

    /// Parsed value of this setting, or `default` when unset or unparseable.
    #[must_use]
    pub fn parse_or<T: FromStr + Display>(self, default: T) -> T {
        parse_var(&self.var_name(), default)
    }

    /// Trimmed value of this setting. Blank counts as unset.
    #[must_use]
    pub fn string(self) -> Option<String> {
        string_var(&self.var_name())
    }
}

impl Display for EnvKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{ENV_PREFIX}{}", self.suffix())
    }
}

fn parse_var<T: FromStr + Display>(var: &str, default: T) -> T {
    let Some(raw) = string_var(var) else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(var, value = %raw, default = %default, "invalid env var value, using default");
            default
        },
    }
}

fn string_var(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    #[test]
    fn every_key_carries_the_prefix() {
        for key in EnvKey::ALL {
            let name = key.var_name();
            assert!(name.starts_with(ENV_PREFIX), "{name}");
            assert_eq!(key.to_string(), name);
        }
        assert_eq!(EnvKey::Retention.var_name(), "EQUIPTRACK_RETENTION");
        assert_eq!(EnvKey::MaxUploadBytes.var_name(), "EQUIPTRACK_MAX_UPLOAD_BYTES");
    }

    #[test]
    fn test_parse_valid_value() {
        let var_name = "EQUIPTRACK_TEST_ENV_PARSE_VALID_41123";
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var(var_name, " 42 ") };
        let result: u32 = parse_var(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_parse_invalid_value() {
        let var_name = "EQUIPTRACK_TEST_ENV_PARSE_INVALID_41124";
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u32 = parse_var(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_parse_missing_or_blank_var() {
        let var_name = "EQUIPTRACK_TEST_ENV_PARSE_MISSING_41125";
        let result: u32 = parse_var(var_name, 10);
        assert_eq!(result, 10);

        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var(var_name, "  ") };
        let result: u32 = parse_var(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_zero_retention_bound_falls_back() {
        let var_name = "EQUIPTRACK_TEST_ENV_PARSE_ZERO_41126";
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var(var_name, "0") };
        let fallback = NonZeroUsize::new(5).unwrap();
        let result = parse_var(var_name, fallback);
        assert_eq!(result.get(), 5);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_blank_string_is_none() {
        let var_name = "EQUIPTRACK_TEST_ENV_STRING_BLANK_41127";
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var(var_name, "   ") };
        assert_eq!(string_var(var_name), None);
        unsafe { std::env::remove_var(var_name) };
    }
}
