use conductor_core::api::{estimate_timeout_minutes, AppConfig};
use conductor_core::error::CliError;

use super::cli::ClassifyArgs;

pub fn classify_cmd(args: ClassifyArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let table = cfg.classifier.rule_table();
    let timeout = estimate_timeout_minutes(&args.description);

    match table.classify(&args.description) {
        Some(rule) if args.json => {
            let out = serde_json::json!({
                "label": rule.label,
                "skills": rule.skills,
                "commands": rule.commands,
                "timeout_minutes": timeout,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).map_err(anyhow::Error::from)?
            );
        }
        Some(rule) => {
            println!("{} (timeout hint: {timeout}m)", rule.label);
        }
        None if args.json => {
            let out = serde_json::json!({
                "label": table.default_label(),
                "skills": [],
                "commands": [],
                "timeout_minutes": timeout,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).map_err(anyhow::Error::from)?
            );
        }
        None => {
            println!("{} (timeout hint: {timeout}m)", table.default_label());
        }
    }

    Ok(0)
}
