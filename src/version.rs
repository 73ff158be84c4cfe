// Copyright (c) 2024 Mike Tsao

//! Provides version information about this crate. Based on the crate version,
//! or a version-control identifier if this is a development build.

/// A string that's useful for displaying build information to end users.
pub fn app_version() -> &'static str {
    option_env!("GIT_DESCRIBE")
        .unwrap_or(option_env!("GIT_REV_PARSE").unwrap_or(env!("CARGO_PKG_VERSION")))
}
