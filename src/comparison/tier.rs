//! Tier policy
//!
//! Maps a pricing tier to a named orchestration path and its parameters.

use serde::{Deserialize, Serialize};

use crate::config::{PathConfig, PathName, PathsConfig};
use crate::error::{Result, WikilensError};
use crate::llm::GenerationParams;

/// Pricing class of a comparison request.
///
/// There is no default: a missing or unknown tier is a caller error, never
/// silently mapped to a billed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = WikilensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "premium" => Ok(Tier::Premium),
            _ => Err(WikilensError::InvalidRequest(
                rust_i18n::t!("comparison.unknown_tier", tier = s).to_string(),
            )),
        }
    }
}

/// Resolved orchestration plan of one request.
#[derive(Debug, Clone, Copy)]
pub struct PathPlan<'a> {
    pub name: PathName,
    pub path: &'a PathConfig,
    /// `Some(budget)` when articles are shaped before prompting.
    pub shaping_budget: Option<usize>,
    pub params: GenerationParams,
}

/// Selects the comparison path for a tier.
///
/// - `Premium` → `comparison_premium`: a single paid candidate, shaped articles
/// - `Free` → `comparison_free`: ordered free candidates, articles passed as-is
///
/// # Errors
/// [`WikilensError::Configuration`] if the premium path lists more than one candidate.
pub fn select_path(tier: Tier, paths: &PathsConfig) -> Result<PathPlan<'_>> {
    let name = match tier {
        Tier::Premium => PathName::ComparisonPremium,
        Tier::Free => PathName::ComparisonFree,
    };
    let path = paths.get(name);

    if tier == Tier::Premium && path.candidates.len() > 1 {
        return Err(WikilensError::Configuration(format!(
            "paths.{}: expected a single candidate, found {}",
            name,
            path.candidates.len()
        )));
    }

    Ok(plan_for(name, path))
}

/// Plan for a path looked up by name (used by chat).
pub fn plan_for(name: PathName, path: &PathConfig) -> PathPlan<'_> {
    PathPlan {
        name,
        path,
        shaping_budget: path.shaping_budget,
        params: GenerationParams {
            temperature: path.temperature,
            max_tokens: path.max_tokens,
        },
    }
}
