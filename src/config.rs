//! Bulletin formatter configuration

/// Output format name handled by the bulletin builder formatter
pub const BULLETIN_BUILDER_FORMAT: &str = "AAP BULLETIN BUILDER";

/// Bulletin builder formatter configuration
///
/// # Example
///
/// ```
/// use newsdesk::BulletinConfig;
///
/// // Recommended: start from the defaults
/// let config = BulletinConfig::default();
/// assert_eq!(config.format_type, "AAP BULLETIN BUILDER");
/// assert_eq!(config.slugline_max_len, 24);
///
/// // Or construct manually
/// let config = BulletinConfig {
///     format_type: "BULLETIN".to_string(),
///     slugline_max_len: 30,
///     legal_prefix: "Legal".to_string(),
/// };
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulletinConfig {
    /// Output format name accepted by `can_format`
    #[serde(default = "default_format_type")]
    pub format_type: String,

    /// Maximum slugline length of items marked for legal review, in characters
    #[serde(default = "default_slugline_max_len")]
    pub slugline_max_len: usize,

    /// Marker put in front of the slugline of items marked for legal review
    #[serde(default = "default_legal_prefix")]
    pub legal_prefix: String,
}

fn default_format_type() -> String {
    BULLETIN_BUILDER_FORMAT.to_string()
}

fn default_slugline_max_len() -> usize {
    24
}

fn default_legal_prefix() -> String {
    "Legal".to_string()
}

impl Default for BulletinConfig {
    fn default() -> Self {
        Self {
            format_type: default_format_type(),
            slugline_max_len: default_slugline_max_len(),
            legal_prefix: default_legal_prefix(),
        }
    }
}

impl BulletinConfig {
    /// Create a configuration for a differently named output format
    pub fn for_format(format_type: impl Into<String>) -> Self {
        Self {
            format_type: format_type.into(),
            ..Self::default()
        }
    }
}
