//! YAML surfaces for folio: the site manifest and the runtime config.
//!
//! ```
//! use folio_yaml::{FolioConfig, SiteManifest};
//!
//! let site = SiteManifest::bundled();
//! assert!(!site.skills.is_empty());
//!
//! let config = FolioConfig::from_yaml("refresh_ms: 1000\n").unwrap();
//! assert_eq!(config.refresh_interval().as_millis(), 1000);
//! ```

mod config;
mod error;
mod manifest;

pub use config::{AnimationConfig, ColorChoice, FolioConfig, ServerConfig};
pub use error::ParseError;
pub use manifest::{Contact, Project, SiteManifest, Skill, Stat};
