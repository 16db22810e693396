use crate::config::Settings;

/// Load settings, falling back to defaults on any problem.
///
/// Config is optional, so a broken file never stops startup. The reason for
/// a fallback is returned so it can be logged once logging is up.
pub fn load_settings() -> (Settings, Option<String>) {
    let loaded = Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| s.validate().map(|()| s).map_err(|msg| format!("invalid config: {msg}")));

    match loaded {
        Ok(s) => (s, None),
        Err(reason) => {
            eprintln!("mixtape: {reason}, using defaults");
            (Settings::default(), Some(reason))
        }
    }
}
