//! Navigator configuration

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Default selector of the content host
pub const DEFAULT_CONTENT_AREA: &str = "#page-content";
/// Default landing page
pub const DEFAULT_LANDING_PAGE: &str = "home";
/// Default prefix for external page templates
pub const DEFAULT_BASE_TEMPLATE_PATH: &str = "assets/html/";
/// Default attribute marking an element as a navigation link
pub const DEFAULT_LINK_ATTRIBUTE: &str = "data-page-target";
/// Default attribute carrying a link's record identifier
pub const DEFAULT_RECORD_ID_ATTRIBUTE: &str = "data-page-target-id";
/// Default attribute naming a link's active group
pub const DEFAULT_GROUP_ATTRIBUTE: &str = "data-active-group";

/// Construction options recognized by the navigator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigatorConfig {
    /// Selector of the content host
    #[serde(alias = "content_area")]
    pub content_area: String,
    /// Page shown when the URL carries no route
    #[serde(alias = "landing_page")]
    pub landing_page: String,
    /// Prefix prepended to external template paths
    #[serde(alias = "base_template_path")]
    pub base_template_path: String,
    /// Attribute marking navigation links
    #[serde(alias = "link_attribute")]
    pub link_attribute: String,
    /// Attribute carrying a link's record identifier
    #[serde(alias = "record_id_attribute")]
    pub record_id_attribute: String,
    /// Attribute naming a link's active group
    #[serde(alias = "group_attribute")]
    pub group_attribute: String,
}

impl NavigatorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content area selector
    pub fn with_content_area(mut self, selector: impl Into<String>) -> Self {
        self.content_area = selector.into();
        self
    }

    /// Set the landing page
    pub fn with_landing_page(mut self, key: impl Into<String>) -> Self {
        self.landing_page = key.into();
        self
    }

    /// Set the external template prefix
    pub fn with_base_template_path(mut self, path: impl Into<String>) -> Self {
        self.base_template_path = path.into();
        self
    }

    /// Set the link attribute name
    pub fn with_link_attribute(mut self, name: impl Into<String>) -> Self {
        self.link_attribute = name.into();
        self
    }

    /// Set the record identifier attribute name
    pub fn with_record_id_attribute(mut self, name: impl Into<String>) -> Self {
        self.record_id_attribute = name.into();
        self
    }

    /// Set the active group attribute name
    pub fn with_group_attribute(mut self, name: impl Into<String>) -> Self {
        self.group_attribute = name.into();
        self
    }

    /// Full path of an external template
    pub fn template_path(&self, path: &str) -> String {
        format!("{}{}", self.base_template_path, path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("contentArea", &self.content_area),
            ("landingPage", &self.landing_page),
            ("linkAttribute", &self.link_attribute),
            ("recordIdAttribute", &self.record_id_attribute),
            ("groupAttribute", &self.group_attribute),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                }
                .into());
            }
        }

        if self.link_attribute == self.record_id_attribute
            || self.link_attribute == self.group_attribute
        {
            return Err(ConfigError::InvalidValue {
                field: "linkAttribute".to_string(),
                value: self.link_attribute.clone(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            content_area: DEFAULT_CONTENT_AREA.to_string(),
            landing_page: DEFAULT_LANDING_PAGE.to_string(),
            base_template_path: DEFAULT_BASE_TEMPLATE_PATH.to_string(),
            link_attribute: DEFAULT_LINK_ATTRIBUTE.to_string(),
            record_id_attribute: DEFAULT_RECORD_ID_ATTRIBUTE.to_string(),
            group_attribute: DEFAULT_GROUP_ATTRIBUTE.to_string(),
        }
    }
}
