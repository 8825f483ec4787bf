//! Environment report for support requests.

use crate::config::APP_ALIAS;

/// Render the environment report: tool identity plus host platform.
pub fn generate() -> String {
    format!(
        "{} version {}\nplatform: {}/{}\n",
        APP_ALIAS,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_names_the_tool_and_version() {
        let report = generate();
        assert!(report.starts_with("csaf version "));
        assert!(report.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_report_carries_the_platform() {
        let report = generate();
        assert!(report.contains(&format!(
            "platform: {}/{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        )));
    }
}
