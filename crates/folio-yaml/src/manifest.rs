//! Portfolio content manifest (`site.yaml`).

use crate::error::ParseError;
use folio_core::CountUp;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const BUNDLED_SITE: &str = include_str!("../assets/default_site.yaml");

/// Everything the page shows apart from the live metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteManifest {
    /// Owner name, shown as the logo
    pub name: String,
    /// Hero headline, revealed by the typewriter
    pub headline: String,
    /// Hero paragraph
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub contact: Contact,
}

/// Skills showcase card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    /// Featured cards span two columns on the page
    #[serde(default)]
    pub featured: bool,
}

/// "By the numbers" counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub label: String,
    pub number: u64,
    #[serde(default)]
    pub suffix: String,
}

impl Stat {
    #[must_use]
    pub const fn counter(&self, duration: Duration) -> CountUp {
        CountUp::new(self.number, duration)
    }

    /// Counter value with its suffix, e.g. `12+`.
    #[must_use]
    pub fn display_at(&self, duration: Duration, elapsed: Duration) -> String {
        format!("{}{}", self.counter(duration).value(elapsed), self.suffix)
    }
}

/// Project gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub live: Option<String>,
    /// Short tag line shown above the title
    #[serde(default)]
    pub badge: Option<String>,
}

/// Contact section and outbound links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl Contact {
    #[must_use]
    pub fn mailto(&self) -> Option<String> {
        self.email.as_ref().map(|e| format!("mailto:{e}"))
    }
}

impl SiteManifest {
    /// Parse and validate a manifest.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// The manifest shipped with the crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_yaml(BUNDLED_SITE).expect("bundled site manifest is valid")
    }

    /// Raw YAML of the bundled manifest.
    #[must_use]
    pub const fn bundled_yaml() -> &'static str {
        BUNDLED_SITE
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        require_text("name", &self.name)?;
        require_text("headline", &self.headline)?;
        if self.skills.is_empty() {
            return Err(ParseError::MissingField("skills".to_string()));
        }
        for (i, skill) in self.skills.iter().enumerate() {
            require_text(&format!("skills[{i}].title"), &skill.title)?;
        }
        for (i, stat) in self.stats.iter().enumerate() {
            require_text(&format!("stats[{i}].label"), &stat.label)?;
        }

        check_link("resume_url", self.resume_url.as_deref())?;
        check_link("photo_url", self.photo_url.as_deref())?;
        for (i, project) in self.projects.iter().enumerate() {
            require_text(&format!("projects[{i}].title"), &project.title)?;
            check_link(&format!("projects[{i}].repository"), project.repository.as_deref())?;
            check_link(&format!("projects[{i}].live"), project.live.as_deref())?;
        }

        check_link("contact.github", self.contact.github.as_deref())?;
        check_link("contact.linkedin", self.contact.linkedin.as_deref())?;
        if let Some(email) = &self.contact.email {
            if !is_email(email) {
                return Err(ParseError::invalid(
                    "contact.email",
                    format!("'{email}' is not an email address"),
                ));
            }
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ParseError> {
    if value.trim().is_empty() {
        Err(ParseError::MissingField(field.to_string()))
    } else {
        Ok(())
    }
}

fn check_link(field: &str, url: Option<&str>) -> Result<(), ParseError> {
    match url {
        Some(u) if !(u.starts_with("https://") || u.starts_with("http://")) => Err(
            ParseError::invalid(field, format!("'{u}' must be an http(s) URL")),
        ),
        _ => Ok(()),
    }
}

fn is_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(user), Some(domain), None) => {
            !user.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}
