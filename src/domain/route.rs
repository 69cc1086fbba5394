//! Read-only view of the host router's current location.

/// Current route path and optional hash fragment, as reported by the host.
///
/// # Example
///
/// ```rust
/// use survey_lens::domain::RouteLocation;
///
/// let location = RouteLocation::new(
///     "/sample-characteristics/household",
///     Some("#/sample-characteristics/household/household-income"),
/// );
/// assert_eq!(location.section(), Some("sample-characteristics"));
/// assert_eq!(location.subsection(), Some("household"));
/// assert_eq!(location.fragment_tail(), Some("household-income"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteLocation {
    path: String,
    fragment: Option<String>,
}

impl RouteLocation {
    /// Creates a location. A fragment that is empty or only `#` counts as absent.
    #[must_use]
    pub fn new(path: impl Into<String>, fragment: Option<&str>) -> Self {
        let fragment = fragment
            .map(|f| f.trim_start_matches('#').trim())
            .filter(|f| !f.is_empty())
            .map(String::from);

        Self {
            path: path.into(),
            fragment,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fragment without its leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// First path segment, e.g. `sample-characteristics`.
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.segments().next()
    }

    /// Second path segment, e.g. `household`.
    #[must_use]
    pub fn subsection(&self) -> Option<&str> {
        self.segments().nth(1)
    }

    /// Last non-empty `/`-separated segment of the fragment.
    #[must_use]
    pub fn fragment_tail(&self) -> Option<&str> {
        self.fragment
            .as_deref()?
            .split('/')
            .filter(|s| !s.is_empty())
            .next_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_no_fragment() {
        let location = RouteLocation::new("/overview", Some("#"));
        assert_eq!(location.fragment(), None);
        assert_eq!(location.fragment_tail(), None);
    }

    #[test]
    fn flat_fragment_is_its_own_tail() {
        let location = RouteLocation::new("/a/b", Some("#household-size"));
        assert_eq!(location.fragment_tail(), Some("household-size"));
    }

    #[test]
    fn root_path_has_no_section() {
        let location = RouteLocation::new("/", None);
        assert_eq!(location.section(), None);
        assert_eq!(location.subsection(), None);
    }
}
