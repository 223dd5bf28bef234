pub const APP_NAME: &str = "preflight";

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "preflight.lua";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PREFLIGHT_CONFIG";

/// Probe flag used when a requirement does not name one.
pub const DEFAULT_PROBE_FLAG: &str = "-v";
