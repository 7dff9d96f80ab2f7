//! Build metadata embedded by build.rs

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("LABELER_BUILD_NUMBER") {
    Some(s) => match parse_build_number(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("LABELER_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Decimal digits only; empty or anything else is `None`
const fn parse_build_number(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// Semver with build metadata, e.g. `0.1.0+build.42`
    pub fn full_version(&self) -> String {
        format!("{}+build.{}", self.version, self.build_number)
    }

    fn banner_lines(&self) -> [String; 5] {
        let rule = "=".repeat(47);
        [
            rule.clone(),
            "  Nutrition Labeler".to_string(),
            format!("  Version: {}", self.full_version()),
            format!("  Compiled: {}", self.build_timestamp),
            rule,
        ]
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    for line in BuildInfo::current().banner_lines() {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_number() {
        assert_eq!(parse_build_number("42"), Some(42));
        assert_eq!(parse_build_number(""), None);
        assert_eq!(parse_build_number("4a"), None);
    }

    #[test]
    fn test_banner_mentions_version() {
        let info = BuildInfo { name: "nutrition-labeler", version: "1.2.3", build_number: 7, build_timestamp: "t" };
        let lines = info.banner_lines();
        assert_eq!(lines[2], "  Version: 1.2.3+build.7");
        assert_eq!(lines[0].len(), 47);
    }
}
