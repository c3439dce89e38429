//! Volunteer identity resolution.
//!
//! Every command that writes to the activity log needs to know who is acting.
//! Rather than requiring `--as` on every invocation, identity is resolved
//! through a chain:
//!
//! 1. `--as <volunteer>`: explicit per-command override
//! 2. `SOLIDARITY_VOLUNTEER` env var: session level
//! 3. `volunteer` in `~/.solidarity/config.toml`: global default

use std::env;

use crate::config::Config;

/// Error message shown when identity cannot be resolved.
pub const VOLUNTEER_REQUIRED: &str = "volunteer identity required: pass --as <volunteer>, \
    set SOLIDARITY_VOLUNTEER, or add `volunteer = \"...\"` to ~/.solidarity/config.toml";

/// Resolve the acting volunteer from the tiered resolution chain.
pub fn resolve_volunteer(explicit: Option<&str>, config: &Config) -> Result<String, String> {
    resolve_with(explicit, env::var("SOLIDARITY_VOLUNTEER").ok(), config)
}

fn resolve_with(
    explicit: Option<&str>,
    from_env: Option<String>,
    config: &Config,
) -> Result<String, String> {
    if let Some(id) = explicit.filter(|s| !s.is_empty()) {
        return Ok(id.to_string());
    }

    if let Some(id) = from_env.filter(|s| !s.is_empty()) {
        return Ok(id);
    }

    if let Some(id) = config.volunteer.as_deref().filter(|s| !s.is_empty()) {
        return Ok(id.to_string());
    }

    Err(VOLUNTEER_REQUIRED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(volunteer: Option<&str>) -> Config {
        Config {
            volunteer: volunteer.map(String::from),
            ..Config::default()
        }
    }

    #[test]
    fn explicit_wins() {
        let result = resolve_with(Some("sam"), Some("env".into()), &configured(Some("cfg")));
        assert_eq!(result.unwrap(), "sam");
    }

    #[test]
    fn env_beats_config() {
        let result = resolve_with(None, Some("env".into()), &configured(Some("cfg")));
        assert_eq!(result.unwrap(), "env");
    }

    #[test]
    fn falls_back_to_config() {
        let result = resolve_with(None, Some(String::new()), &configured(Some("cfg")));
        assert_eq!(result.unwrap(), "cfg");
    }

    #[test]
    fn nothing_configured_is_an_error() {
        let err = resolve_with(None, None, &configured(None)).unwrap_err();
        assert_eq!(err, VOLUNTEER_REQUIRED);
    }
}
