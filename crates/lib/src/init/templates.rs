//! Template content for `preflight init`.

/// Starter `preflight.lua`, set up for a PDF-rasterizing service.
pub const CONFIG_TEMPLATE: &str = r#"-- preflight.lua
--
-- Evaluated by `preflight provision`, `preflight check` and `preflight run`.
-- `preflight.os`, `preflight.arch` and `preflight.which(name)` are available
-- to tailor the config per host.

local on_mac = preflight.os == "darwin"

return {
  -- apt, dnf, apk, pacman or brew. Detected from the host when omitted.
  -- manager = "apt",

  -- Prefix package-manager commands with sudo (ignored for brew).
  sudo = false,

  -- Fail when the package index cannot be refreshed.
  strict_refresh = false,

  -- Searched for probed binaries after PATH.
  search_paths = { "/opt/homebrew/bin", "/usr/local/bin", "/usr/bin" },

  requirements = {
    {
      package = on_mac and "poppler" or "poppler-utils",
      bin = "pdftoppm",
      probe = "-v",
    },
  },

  -- Started by `preflight run` once every requirement is verified.
  launch = { "python3", "pdf_bot.py" },
}
"#;
