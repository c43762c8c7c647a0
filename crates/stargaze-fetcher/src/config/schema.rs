use std::time::Duration;

use serde::Deserialize;
use stargaze_core::error::{Result, StargazeError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StargazeConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub source: SourceSection,

    #[serde(default)]
    pub hero: HeroContent,
}

impl Default for StargazeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            source: SourceSection::default(),
            hero: HeroContent::default(),
        }
    }
}

impl StargazeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(StargazeError::UnsupportedVersion);
        }

        self.source.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// "owner/name"
    #[serde(default = "default_repo")]
    pub repo: String,

    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Environment variable holding the optional bearer credential.
    #[serde(default = "default_credential_env")]
    pub credential_env: String,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            repo: default_repo(),
            revalidate_secs: default_revalidate_secs(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            credential_env: default_credential_env(),
        }
    }
}

impl SourceSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(StargazeError::BadRequest(
                "source.api_base must be an http(s) url".into(),
            ));
        }
        match self.repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => {
                return Err(StargazeError::BadRequest(format!(
                    "source.repo must be owner/name (got {})",
                    self.repo
                )))
            }
        }
        if !(1..=86400).contains(&self.revalidate_secs) {
            return Err(StargazeError::BadRequest(
                "source.revalidate_secs must be between 1 and 86400".into(),
            ));
        }
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(StargazeError::BadRequest(
                "source.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(StargazeError::BadRequest(
                "source.user_agent must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Fixed endpoint for the configured repository.
    pub fn endpoint(&self) -> String {
        format!("{}/repos/{}", self.api_base.trim_end_matches('/'), self.repo)
    }

    /// Public page for the repository (badge link target).
    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}", self.repo)
    }

    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Static hero copy. Rendered around the fetched stat.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroContent {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    #[serde(default = "default_cta_label")]
    pub cta_label: String,
    #[serde(default = "default_cta_href")]
    pub cta_href: String,
    #[serde(default = "default_note")]
    pub note: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            cta_label: default_cta_label(),
            cta_href: default_cta_href(),
            note: default_note(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_api_base() -> String {
    "https://api.github.com".into()
}
fn default_repo() -> String {
    "mickasmt/next-saas-stripe-starter".into()
}
fn default_revalidate_secs() -> u64 {
    3600
}
fn default_timeout_ms() -> u64 {
    10000
}
fn default_user_agent() -> String {
    concat!("stargaze/", env!("CARGO_PKG_VERSION")).into()
}
fn default_credential_env() -> String {
    "GITHUB_OAUTH_TOKEN".into()
}
fn default_title() -> String {
    "Vi hanterar dina recensioner.".into()
}
fn default_subtitle() -> String {
    "Professionella svar på alla dina Google-recensioner inom 24h. Vi kan även be nöjda kunder lämna nya.".into()
}
fn default_cta_label() -> String {
    "Kom igång – 995 kr/mån".into()
}
fn default_cta_href() -> String {
    "/pricing".into()
}
fn default_note() -> String {
    "Allt ingår. Ingen bindningstid.".into()
}
