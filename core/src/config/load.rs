use std::path::Path;

use super::types::AppConfig;

/// Load `./conductor.toml` if present, else defaults.
///
/// Environment overrides (highest priority): `CONDUCTOR_LOG` for the filter
/// level, `CONDUCTOR_EXPORT_PATH` for the session export target.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let local_config = Path::new("conductor.toml");

    let mut cfg: AppConfig = if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    if let Ok(v) = std::env::var("CONDUCTOR_LOG") {
        if !v.trim().is_empty() {
            cfg.logging.level = v;
        }
    }
    if let Ok(v) = std::env::var("CONDUCTOR_EXPORT_PATH") {
        if !v.trim().is_empty() {
            cfg.session.export_path = v;
        }
    }

    Ok(cfg)
}
