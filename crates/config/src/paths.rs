use discotui_types::DiscoError;
use std::path::PathBuf;

const APP_DIR: &str = "discotui";
const TOKEN_FILE: &str = "discogs_tui_config.enc";

/// Return the user's config root (`$XDG_CONFIG_HOME`, else `$HOME/.config`).
///
/// # Errors
///
/// Returns [`DiscoError::Config`] if neither variable is set.
pub fn config_root() -> Result<PathBuf, DiscoError> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg));
    }
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(|home| PathBuf::from(home).join(".config"))
        .ok_or_else(|| DiscoError::Config("cannot determine home directory".into()))
}

/// Per-application directory holding the token file, config and log.
///
/// # Errors
///
/// Returns [`DiscoError::Config`] if the home directory is unknown.
pub fn app_dir() -> Result<PathBuf, DiscoError> {
    Ok(config_root()?.join(APP_DIR))
}

/// Location of the encrypted token file.
///
/// # Errors
///
/// Returns [`DiscoError::Config`] if the home directory is unknown.
pub fn token_path() -> Result<PathBuf, DiscoError> {
    Ok(app_dir()?.join(TOKEN_FILE))
}

/// Default log file location.
///
/// # Errors
///
/// Returns [`DiscoError::Config`] if the home directory is unknown.
pub fn log_path() -> Result<PathBuf, DiscoError> {
    Ok(app_dir()?.join("discotui.log"))
}

/// Config files probed when `--config` is not given, in priority order.
#[must_use]
pub fn default_config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("configs").join("conf.yaml")];
    if let Ok(dir) = app_dir() {
        candidates.push(dir.join("conf.yaml"));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_path_file_name() {
        if let Ok(p) = token_path() {
            assert!(p.ends_with("discotui/discogs_tui_config.enc"));
        }
    }

    #[test]
    fn test_local_config_probed_first() {
        let c = default_config_candidates();
        assert_eq!(c[0], PathBuf::from("configs/conf.yaml"));
    }
}
