use fieldrules_tag::{ParseLimits, DEFAULT_MAX_ONEOF_MEMBERS, DEFAULT_MAX_TAG_LEN};

/// Controls registration limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum length of one rule tag, in bytes.
    pub max_tag_len: usize,
    /// Maximum number of members in a `oneof` clause.
    pub max_oneof_members: usize,
    /// Maximum bytes read from a rules file.
    pub max_rules_file_size: usize,
    /// Maximum number of types declared by one rules document.
    pub max_types_from_file: usize,
}

impl RegistryConfig {
    pub fn parse_limits(&self) -> ParseLimits {
        ParseLimits {
            max_tag_len: self.max_tag_len,
            max_oneof_members: self.max_oneof_members,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_tag_len: DEFAULT_MAX_TAG_LEN,
            max_oneof_members: DEFAULT_MAX_ONEOF_MEMBERS,
            max_rules_file_size: 256 * 1024,
            max_types_from_file: 256,
        }
    }
}
