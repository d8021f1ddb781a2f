/// Build provenance embedded by `build.rs`, shown by the `version` command.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_hash: option_env!("QUICK_TALLY_BUILD_HASH").unwrap_or("unknown"),
            git_status: option_env!("QUICK_TALLY_BUILD_STATUS").unwrap_or("unknown"),
            built_at: option_env!("QUICK_TALLY_BUILD_TIMESTAMP").unwrap_or("unknown"),
            target: option_env!("QUICK_TALLY_BUILD_TARGET").unwrap_or("unknown"),
            profile: option_env!("QUICK_TALLY_BUILD_PROFILE").unwrap_or("unknown"),
            rustc: option_env!("QUICK_TALLY_BUILD_RUSTC").unwrap_or("unknown"),
        }
    }

    /// Label/value pairs in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Version", self.version.to_string()),
            ("Commit", format!("{} ({})", self.git_hash, self.git_status)),
            ("Built at", self.built_at.to_string()),
            ("Target", self.target.to_string()),
            ("Profile", self.profile.to_string()),
            ("Rustc", self.rustc.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_manifest() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(info.rows()[0].1, info.version);
    }
}
