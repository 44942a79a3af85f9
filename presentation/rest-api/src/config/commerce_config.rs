/// Switch for the commerce subsystem. When disabled every cart endpoint
/// answers `cart_subsystem_unavailable`.
#[derive(Debug, Clone, Copy)]
pub struct CommerceConfig {
    pub enabled: bool,
}

impl CommerceConfig {
    /// Environment variables:
    /// - COMMERCE_ENABLED: "true"/"false" (also 1/0, yes/no, on/off; default: true)
    pub fn from_env() -> anyhow::Result<Self> {
        let enabled = match std::env::var("COMMERCE_ENABLED") {
            Ok(raw) => parse_flag(&raw)
                .ok_or_else(|| anyhow::anyhow!("COMMERCE_ENABLED must be a boolean, got {raw:?}"))?,
            Err(_) => true,
        };

        Ok(Self { enabled })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
