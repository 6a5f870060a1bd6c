use serde::{Deserialize, Serialize};

/// A user's name for an application, as heard or typed.
///
/// Always trimmed and never empty. Case is preserved; every comparison the
/// resolver makes against it is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppName(String);

impl AppName {
    /// Build an app name from raw text. Returns `None` for blank input.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for matching.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    /// The name with an executable suffix appended (e.g. `notepad` -> `notepad.exe`).
    pub fn with_suffix(&self, suffix: &str) -> String {
        format!("{}{}", self.0, suffix)
    }

    /// Case-insensitive substring test against some other name.
    pub fn is_contained_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded())
    }
}

impl std::fmt::Display for AppName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Catalog-specific identifier of an installed application
/// (a Start-menu AppID, an `.app` bundle path, a desktop entry id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppIdentifier(String);

impl AppIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_names_are_rejected() {
        assert!(AppName::new("").is_none());
        assert!(AppName::new("   \t ").is_none());
    }

    #[test]
    fn test_name_is_trimmed_and_case_preserved() {
        let name = AppName::new("  Visual Studio Code ").unwrap();
        assert_eq!(name.as_str(), "Visual Studio Code");
        assert_eq!(name.folded(), "visual studio code");
    }

    #[test]
    fn test_substring_match_ignores_case() {
        let name = AppName::new("chrome").unwrap();
        assert!(name.is_contained_in("Google Chrome"));
        assert!(name.is_contained_in("CHROME.EXE"));
        assert!(!name.is_contained_in("firefox"));
    }

    #[test]
    fn test_with_suffix() {
        let name = AppName::new("notepad").unwrap();
        assert_eq!(name.with_suffix(".exe"), "notepad.exe");
        assert_eq!(name.with_suffix(""), "notepad");
    }
}
