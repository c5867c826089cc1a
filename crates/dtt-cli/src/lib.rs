/// Clean a path pasted or dragged into the terminal: surrounding
/// whitespace and the quotes most terminals wrap dropped paths in.
pub fn clean_dropped_path(raw: &str) -> String {
    raw.trim().trim_matches('\'').trim_matches('"').to_string()
}

/// Format a cent amount as dollars, e.g. 249 -> "$2.49".
pub fn format_usd(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_dropped_path_strips_quotes() {
        assert_eq!(clean_dropped_path("/plain/path"), "/plain/path");
        assert_eq!(clean_dropped_path("'/my projects/haul 01'"), "/my projects/haul 01");
        assert_eq!(clean_dropped_path("\"/my projects/haul 01\""), "/my projects/haul 01");
        assert_eq!(clean_dropped_path("  /padded/path  "), "/padded/path");
    }

    #[test]
    fn format_usd_pads_cents() {
        assert_eq!(format_usd(69), "$0.69");
        assert_eq!(format_usd(129), "$1.29");
        assert_eq!(format_usd(249), "$2.49");
        assert_eq!(format_usd(699), "$6.99");
        assert_eq!(format_usd(700), "$7.00");
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
