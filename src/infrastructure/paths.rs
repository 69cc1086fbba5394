//! Path handling for configured locations.
//!
//! Configuration values may use `~` for the user's home directory. Expansion
//! happens once, when the configuration is parsed.

use std::path::PathBuf;

/// Expands a leading `~` using the `HOME` environment variable.
///
/// Paths without a leading tilde, and tilde paths when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use survey_lens::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/srv/survey/data"), PathBuf::from("/srv/survey/data"));
/// assert_eq!(expand_tilde("./data"), PathBuf::from("./data"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_with_home(path, std::env::var_os("HOME").map(PathBuf::from))
}

fn expand_with_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
