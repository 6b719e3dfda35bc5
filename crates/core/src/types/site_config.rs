//! Site-wide configuration domains and their compiled defaults.
//!
//! Each domain value is replaced as a whole: the `with_*` / `without_*`
//! helpers borrow the current value and return a new one, so the current
//! value and the compiled default never share state.

use chrono::{Datelike, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::id::ItemId;

/// One of the five independent global settings categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigDomain {
    Header,
    Footer,
    Navigation,
    Seo,
    Scripts,
}

impl ConfigDomain {
    /// All domains, in editor tab order.
    pub const ALL: [Self; 5] = [
        Self::Header,
        Self::Footer,
        Self::Navigation,
        Self::Seo,
        Self::Scripts,
    ];

    /// Domain name, also the document key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Navigation => "navigation",
            Self::Seo => "seo",
            Self::Scripts => "scripts",
        }
    }
}

impl std::fmt::Display for ConfigDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConfigDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| format!("invalid config domain: {s}"))
    }
}

/// A typed config domain value.
pub trait DomainConfig:
    Clone + PartialEq + Default + Serialize + DeserializeOwned + Into<ConfigValue>
{
    /// The domain this type holds.
    const DOMAIN: ConfigDomain;

    /// Borrow this domain's value out of a [`ConfigValue`].
    fn from_value(value: &ConfigValue) -> Option<&Self>;
}

/// Any one domain's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Header(HeaderConfig),
    Footer(FooterConfig),
    Navigation(NavigationConfig),
    Seo(SeoConfig),
    Scripts(ScriptConfig),
}

impl ConfigValue {
    /// The compiled default of `domain`.
    #[must_use]
    pub fn default_for(domain: ConfigDomain) -> Self {
        match domain {
            ConfigDomain::Header => Self::Header(HeaderConfig::default()),
            ConfigDomain::Footer => Self::Footer(FooterConfig::default()),
            ConfigDomain::Navigation => Self::Navigation(NavigationConfig::default()),
            ConfigDomain::Seo => Self::Seo(SeoConfig::default()),
            ConfigDomain::Scripts => Self::Scripts(ScriptConfig::default()),
        }
    }

    /// Parse a stored document as the value of `domain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the domain's shape.
    pub fn from_json(
        domain: ConfigDomain,
        json: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match domain {
            ConfigDomain::Header => Self::Header(serde_json::from_value(json)?),
            ConfigDomain::Footer => Self::Footer(serde_json::from_value(json)?),
            ConfigDomain::Navigation => Self::Navigation(serde_json::from_value(json)?),
            ConfigDomain::Seo => Self::Seo(serde_json::from_value(json)?),
            ConfigDomain::Scripts => Self::Scripts(serde_json::from_value(json)?),
        })
    }

    /// Which domain this value belongs to.
    #[must_use]
    pub const fn domain(&self) -> ConfigDomain {
        match self {
            Self::Header(_) => ConfigDomain::Header,
            Self::Footer(_) => ConfigDomain::Footer,
            Self::Navigation(_) => ConfigDomain::Navigation,
            Self::Seo(_) => ConfigDomain::Seo,
            Self::Scripts(_) => ConfigDomain::Scripts,
        }
    }
}

macro_rules! impl_domain_config {
    ($ty:ty, $variant:ident) => {
        impl DomainConfig for $ty {
            const DOMAIN: ConfigDomain = ConfigDomain::$variant;

            fn from_value(value: &ConfigValue) -> Option<&Self> {
                match value {
                    ConfigValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ConfigValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

impl_domain_config!(HeaderConfig, Header);
impl_domain_config!(FooterConfig, Footer);
impl_domain_config!(NavigationConfig, Navigation);
impl_domain_config!(SeoConfig, Seo);
impl_domain_config!(ScriptConfig, Scripts);

// =============================================================================
// Header
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfig {
    pub logo: String,
    pub favicon: String,
    pub is_sticky: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            logo: "/logo.svg".to_string(),
            favicon: "/favicon.ico".to_string(),
            is_sticky: true,
        }
    }
}

// =============================================================================
// Footer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterConfig {
    pub copyright: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub columns: Vec<FooterColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: ItemId,
    pub platform: String,
    pub url: String,
    pub icon: String,
}

impl SocialLink {
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        platform: impl Into<String>,
        url: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            platform: platform.into(),
            url: url.into(),
            icon: icon.into(),
        }
    }

    /// A blank entry as added by the editor.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(ItemId::generate(), "New Platform", "https://", "link")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterColumn {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub links: Vec<FooterLink>,
}

impl FooterColumn {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, links: Vec<FooterLink>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            links,
        }
    }

    /// A blank column as added by the editor.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(ItemId::generate(), "New Column", Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: ItemId,
    pub text: String,
    pub url: String,
}

impl FooterLink {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            url: url.into(),
        }
    }

    /// A blank link as added by the editor.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(ItemId::generate(), "New Link", "/")
    }
}

impl FooterConfig {
    #[must_use]
    pub fn with_social_link(&self, link: SocialLink) -> Self {
        let mut next = self.clone();
        next.social_links.push(link);
        next
    }

    #[must_use]
    pub fn without_social_link(&self, id: &ItemId) -> Self {
        let mut next = self.clone();
        next.social_links.retain(|link| &link.id != id);
        next
    }

    #[must_use]
    pub fn with_column(&self, column: FooterColumn) -> Self {
        let mut next = self.clone();
        next.columns.push(column);
        next
    }

    #[must_use]
    pub fn without_column(&self, id: &ItemId) -> Self {
        let mut next = self.clone();
        next.columns.retain(|column| &column.id != id);
        next
    }

    /// Append `link` to the column `column_id`. Unknown columns leave the
    /// value unchanged.
    #[must_use]
    pub fn with_column_link(&self, column_id: &ItemId, link: FooterLink) -> Self {
        let mut next = self.clone();
        if let Some(column) = next.columns.iter_mut().find(|c| &c.id == column_id) {
            column.links.push(link);
        }
        next
    }

    #[must_use]
    pub fn without_column_link(&self, column_id: &ItemId, link_id: &ItemId) -> Self {
        let mut next = self.clone();
        if let Some(column) = next.columns.iter_mut().find(|c| &c.id == column_id) {
            column.links.retain(|link| &link.id != link_id);
        }
        next
    }
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            copyright: format!(
                "© {} Your Company. All rights reserved.",
                Utc::now().year()
            ),
            social_links: vec![
                SocialLink::new("1", "Twitter", "https://twitter.com", "twitter"),
                SocialLink::new("2", "Facebook", "https://facebook.com", "facebook"),
                SocialLink::new("3", "Instagram", "https://instagram.com", "instagram"),
            ],
            columns: vec![
                FooterColumn::new(
                    "1",
                    "Company",
                    vec![
                        FooterLink::new("1", "About", "/about"),
                        FooterLink::new("2", "Contact", "/contact"),
                    ],
                ),
                FooterColumn::new(
                    "2",
                    "Resources",
                    vec![
                        FooterLink::new("1", "Blog", "/blog"),
                        FooterLink::new("2", "Documentation", "/docs"),
                    ],
                ),
            ],
        }
    }
}

// =============================================================================
// Navigation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub id: ItemId,
    pub text: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavItem>>,
}

impl NavItem {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            url: url.into(),
            children: None,
        }
    }

    /// A blank item as added by the editor.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(ItemId::generate(), "New Item", "/")
    }
}

impl NavigationConfig {
    #[must_use]
    pub fn with_item(&self, item: NavItem) -> Self {
        let mut next = self.clone();
        next.items.push(item);
        next
    }

    /// Remove the top-level item `id`.
    #[must_use]
    pub fn without_item(&self, id: &ItemId) -> Self {
        let mut next = self.clone();
        next.items.retain(|item| &item.id != id);
        next
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            items: vec![
                NavItem::new("1", "Home", "/"),
                NavItem::new("2", "About", "/about"),
                NavItem::new("3", "Services", "/services"),
                NavItem::new("4", "Contact", "/contact"),
            ],
        }
    }
}

// =============================================================================
// SEO
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoConfig {
    pub default_title: String,
    pub default_description: String,
    pub default_keywords: String,
    pub og_image: String,
    pub twitter_handle: String,
    pub enable_sitemap: bool,
    pub enable_robots: bool,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            default_title: "Your Website".to_string(),
            default_description: "Your website description goes here".to_string(),
            default_keywords: "website, cms, content management".to_string(),
            og_image: "/og-image.jpg".to_string(),
            twitter_handle: "@yourhandle".to_string(),
            enable_sitemap: true,
            enable_robots: true,
        }
    }
}

// =============================================================================
// Scripts
// =============================================================================

/// Where a script is injected in the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptLocation {
    Head,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
    #[serde(default)]
    pub head_scripts: Vec<Script>,
    #[serde(default)]
    pub body_scripts: Vec<Script>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: ItemId,
    pub name: String,
    pub content: String,
    /// Disabled scripts keep their content but are left out of the page.
    pub is_enabled: bool,
}

impl Script {
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        content: impl Into<String>,
        is_enabled: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
            is_enabled,
        }
    }

    /// A blank script as added by the editor.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(
            ItemId::generate(),
            "New Script",
            "<!-- Script content -->",
            true,
        )
    }
}

impl ScriptConfig {
    /// Scripts at `location`, enabled or not.
    #[must_use]
    pub fn scripts(&self, location: ScriptLocation) -> &[Script] {
        match location {
            ScriptLocation::Head => &self.head_scripts,
            ScriptLocation::Body => &self.body_scripts,
        }
    }

    /// Scripts at `location` that should be rendered.
    pub fn enabled_scripts(&self, location: ScriptLocation) -> impl Iterator<Item = &Script> {
        self.scripts(location).iter().filter(|s| s.is_enabled)
    }

    fn scripts_mut(&mut self, location: ScriptLocation) -> &mut Vec<Script> {
        match location {
            ScriptLocation::Head => &mut self.head_scripts,
            ScriptLocation::Body => &mut self.body_scripts,
        }
    }

    #[must_use]
    pub fn with_script(&self, location: ScriptLocation, script: Script) -> Self {
        let mut next = self.clone();
        next.scripts_mut(location).push(script);
        next
    }

    /// Remove a script entirely, discarding its content.
    #[must_use]
    pub fn without_script(&self, location: ScriptLocation, id: &ItemId) -> Self {
        let mut next = self.clone();
        next.scripts_mut(location).retain(|s| &s.id != id);
        next
    }

    /// Flip `is_enabled` on one script, keeping its content.
    #[must_use]
    pub fn with_script_toggled(&self, location: ScriptLocation, id: &ItemId) -> Self {
        let mut next = self.clone();
        if let Some(script) = next.scripts_mut(location).iter_mut().find(|s| &s.id == id) {
            script.is_enabled = !script.is_enabled;
        }
        next
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            head_scripts: vec![Script::new(
                "1",
                "Google Analytics",
                "<!-- Google Analytics code -->",
                true,
            )],
            body_scripts: vec![Script::new(
                "1",
                "Chat Widget",
                "<!-- Chat widget code -->",
                false,
            )],
        }
    }
}
