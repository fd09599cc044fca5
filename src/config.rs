//! Generation settings.
//!
//! Defaults match the annotation grammar and the runtime contract the generated code has always used
//! (`apigen:api` marker, `apivalidator` tag, `X-Auth: 100500` shared secret).

/// Default doc-comment marker of generation-tagged methods.
pub const DEFAULT_MARKER: &str = "apigen:api";
/// Default name of the field tag attribute.
pub const DEFAULT_TAG_ATTRIBUTE: &str = "apivalidator";
/// Default request header checked by the auth middleware.
pub const DEFAULT_AUTH_HEADER: &str = "X-Auth";
/// Default shared secret expected in the auth header.
pub const DEFAULT_AUTH_SECRET: &str = "100500";

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Token that marks a method's doc comment as an endpoint descriptor
    pub marker: String,
    /// Attribute name carrying field tags
    pub tag_attribute: String,
    /// Header compared by the generated auth middleware
    pub auth_header: String,
    /// Value the auth header must carry
    pub auth_secret: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            tag_attribute: DEFAULT_TAG_ATTRIBUTE.to_string(),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            auth_secret: DEFAULT_AUTH_SECRET.to_string(),
        }
    }
}

impl GenerateConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generation marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Set the tag attribute name
    pub fn with_tag_attribute(mut self, name: impl Into<String>) -> Self {
        self.tag_attribute = name.into();
        self
    }

    /// Set the auth header name
    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = header.into();
        self
    }

    /// Set the shared auth secret
    pub fn with_auth_secret(mut self, secret: impl Into<String>) -> Self {
        self.auth_secret = secret.into();
        self
    }
}
