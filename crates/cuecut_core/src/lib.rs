//! CueCut Core - segment planning and the split workflow
//!
//! This crate contains all business logic with zero terminal dependencies.
//! It can be used by the CLI or embedded in another frontend.

pub mod config;
pub mod logging;
pub mod segments;
pub mod tools;
pub mod workflow;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
