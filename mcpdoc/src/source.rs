//! Documentation sources and locator classification

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Prefix marking a locator as an explicit local file reference
pub const FILE_SCHEME: &str = "file://";

/// A source of documentation for a library or package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSource {
    /// Display name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// URL of the llms.txt file, a `file://` URL, or a filesystem path
    #[serde(alias = "url", alias = "locator")]
    pub llms_txt: String,

    /// Free-form description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DocSource {
    pub fn new(llms_txt: impl Into<String>) -> Self {
        Self {
            name: None,
            llms_txt: llms_txt.into(),
            description: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Classify this source's locator
    pub fn locator(&self) -> Locator {
        Locator::classify(&self.llms_txt)
    }

    /// Name shown in listings
    ///
    /// The configured name wins. Otherwise local sources use the file's base
    /// name and remote sources use their origin.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        match self.locator() {
            Locator::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Locator::Remote(url) => extract_origin(&url).unwrap_or(url),
        }
    }
}

/// Where a locator points: the local filesystem or a remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Local(PathBuf),
    Remote(String),
}

impl Locator {
    /// Classify a raw locator string.
    ///
    /// A `file://` prefix always means local (with the prefix stripped), even
    /// if nothing exists at the stripped path. Without the prefix, a string
    /// naming an existing filesystem entry is local. Everything else is remote.
    pub fn classify(raw: &str) -> Self {
        if let Some(path) = raw.strip_prefix(FILE_SCHEME) {
            debug!(%raw, "Locator::classify: file scheme");
            return Self::Local(PathBuf::from(path));
        }

        if !raw.is_empty() && Path::new(raw).exists() {
            debug!(%raw, "Locator::classify: existing filesystem path");
            return Self::Local(PathBuf::from(raw));
        }

        debug!(%raw, "Locator::classify: remote");
        Self::Remote(raw.to_string())
    }

    /// Same rule as `classify`, with a non-blocking existence check for
    /// use on the async fetch path.
    pub async fn resolve(raw: &str) -> Self {
        if let Some(path) = raw.strip_prefix(FILE_SCHEME) {
            return Self::Local(PathBuf::from(path));
        }

        if !raw.is_empty() && tokio::fs::try_exists(raw).await.unwrap_or(false) {
            debug!(%raw, "Locator::resolve: existing filesystem path");
            return Self::Local(PathBuf::from(raw));
        }

        Self::Remote(raw.to_string())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

/// Extract the origin of a URL as `scheme://authority/`.
///
/// The scheme and authority are taken verbatim from the input, without case
/// folding or port normalization. Returns `None` when the string is not an
/// absolute URL with a host.
pub fn extract_origin(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str()?;

    let (scheme, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if scheme.is_empty() || authority.is_empty() {
        return None;
    }

    Some(format!("{}://{}/", scheme, authority))
}

/// The configured documentation sources, in order
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<DocSource>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<DocSource>) -> Self {
        debug!(count = sources.len(), "SourceRegistry::new: called");
        Self { sources }
    }

    pub fn sources(&self) -> &[DocSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Render the human-readable source listing.
    ///
    /// Each entry is a name line, a `Path:` or `URL:` line, an optional
    /// `Description:` line, then a blank line.
    pub fn list_sources(&self) -> String {
        debug!(count = self.sources.len(), "SourceRegistry::list_sources: called");
        let mut content = String::new();

        for source in &self.sources {
            content.push_str(&source.display_name());
            content.push('\n');

            let label = if source.locator().is_local() { "Path" } else { "URL" };
            content.push_str(&format!("{}: {}\n", label, source.llms_txt));

            if let Some(description) = source.description.as_deref().filter(|d| !d.is_empty()) {
                content.push_str(&format!("Description: {}\n", description));
            }

            content.push('\n');
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_classify_file_scheme_strips_prefix() {
        let locator = Locator::classify("file:///does/not/exist/llms.txt");
        assert_eq!(locator, Locator::Local(PathBuf::from("/does/not/exist/llms.txt")));
    }

    #[test]
    fn test_classify_existing_path_is_local() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("llms.txt");
        fs::write(&file_path, "# Docs").unwrap();

        let raw = file_path.to_str().unwrap();
        assert_eq!(Locator::classify(raw), Locator::Local(file_path.clone()));
    }

    #[test]
    fn test_classify_url_is_remote() {
        let locator = Locator::classify("https://docs.example.com/llms.txt");
        assert_eq!(locator, Locator::Remote("https://docs.example.com/llms.txt".to_string()));
        assert!(!locator.is_local());
    }

    #[test]
    fn test_classify_missing_bare_path_is_remote() {
        let locator = Locator::classify("/definitely/not/here/llms.txt");
        assert!(!locator.is_local());
    }

    #[tokio::test]
    async fn test_resolve_matches_classify() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("llms.txt");
        fs::write(&file_path, "# Docs").unwrap();
        let existing = file_path.to_str().unwrap().to_string();

        for raw in [
            existing.as_str(),
            "file:///does/not/exist/llms.txt",
            "/definitely/not/here/llms.txt",
            "https://docs.example.com/llms.txt",
            "",
        ] {
            assert_eq!(Locator::resolve(raw).await, Locator::classify(raw), "{}", raw);
        }
        assert!(Locator::resolve(&existing).await.is_local());
    }

    #[test]
    fn test_extract_origin() {
        assert_eq!(
            extract_origin("https://docs.example.com/page/llms.txt"),
            Some("https://docs.example.com/".to_string())
        );
        assert_eq!(
            extract_origin("http://127.0.0.1:8080/llms.txt"),
            Some("http://127.0.0.1:8080/".to_string())
        );
        assert_eq!(extract_origin("not a url"), None);
        assert_eq!(extract_origin("https:///llms.txt"), None);
    }

    #[test]
    fn test_extract_origin_keeps_authority_verbatim() {
        assert_eq!(
            extract_origin("https://Docs.Example.com/llms.txt"),
            Some("https://Docs.Example.com/".to_string())
        );
        assert_eq!(extract_origin("https://a.com:443/llms.txt"), Some("https://a.com:443/".to_string()));
        assert_eq!(extract_origin("https://user@a.com/llms.txt"), Some("https://user@a.com/".to_string()));
    }

    #[test]
    fn test_display_name_prefers_configured_name() {
        let source = DocSource::new("https://a.com/llms.txt").with_name("LangGraph");
        assert_eq!(source.display_name(), "LangGraph");
    }

    #[test]
    fn test_display_name_falls_back_to_origin() {
        let source = DocSource::new("https://a.com/docs/llms.txt");
        assert_eq!(source.display_name(), "https://a.com/");

        let empty_name = DocSource::new("https://a.com/docs/llms.txt").with_name("");
        assert_eq!(empty_name.display_name(), "https://a.com/");
    }

    #[test]
    fn test_display_name_falls_back_to_file_name() {
        let source = DocSource::new("file:///srv/docs/llms.txt");
        assert_eq!(source.display_name(), "llms.txt");
    }

    #[test]
    fn test_list_sources_format_and_order() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("local.txt");
        fs::write(&file_path, "local docs").unwrap();
        let local = file_path.to_str().unwrap().to_string();

        let registry = SourceRegistry::new(vec![
            DocSource::new("https://a.com/llms.txt").with_name("Alpha"),
            DocSource::new(local.clone()),
            DocSource::new("https://b.com/llms.txt"),
        ]);

        let listing = registry.list_sources();
        let expected = format!(
            "Alpha\nURL: https://a.com/llms.txt\n\nlocal.txt\nPath: {}\n\nhttps://b.com/\nURL: https://b.com/llms.txt\n\n",
            local
        );
        assert_eq!(listing, expected);
    }

    #[test]
    fn test_list_sources_includes_description() {
        let registry = SourceRegistry::new(vec![
            DocSource::new("https://a.com/llms.txt")
                .with_name("Alpha")
                .with_description("Alpha framework docs"),
        ]);

        let listing = registry.list_sources();
        assert!(listing.contains("URL: https://a.com/llms.txt\nDescription: Alpha framework docs\n"));
    }

    #[test]
    fn test_list_sources_empty() {
        let registry = SourceRegistry::new(vec![]);
        assert!(registry.is_empty());
        assert_eq!(registry.list_sources(), "");
    }

    #[test]
    fn test_doc_source_deserialize_aliases() {
        let source: DocSource = serde_yaml::from_str("llms_txt: https://a.com/llms.txt").unwrap();
        assert_eq!(source.llms_txt, "https://a.com/llms.txt");
        assert!(source.name.is_none());

        let source: DocSource = serde_yaml::from_str("name: A\nurl: https://a.com/llms.txt").unwrap();
        assert_eq!(source.llms_txt, "https://a.com/llms.txt");
        assert_eq!(source.name.as_deref(), Some("A"));
    }
}
