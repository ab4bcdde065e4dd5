//! Build metadata.

/// Crate version from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit hash injected at build time via `OUTLIER_GIT_COMMIT`.
pub fn git_commit() -> Option<&'static str> {
    option_env!("OUTLIER_GIT_COMMIT")
        .filter(|c| !c.is_empty())
        .map(|c| c.get(..7).unwrap_or(c))
}

/// Build date injected at build time via `OUTLIER_BUILD_DATE`.
pub fn build_date() -> Option<&'static str> {
    option_env!("OUTLIER_BUILD_DATE").filter(|d| !d.is_empty())
}

/// Version string with whatever build metadata is available,
/// e.g. `0.1.0 (abc1234, 2026-01-15)`.
pub fn full_version() -> String {
    match (git_commit(), build_date()) {
        (Some(commit), Some(date)) => format!("{VERSION} ({commit}, {date})"),
        (Some(commit), None) => format!("{VERSION} ({commit})"),
        (None, Some(date)) => format!("{VERSION} ({date})"),
        (None, None) => VERSION.to_string(),
    }
}
