//! Agent binding registry
//! Maps agent names to the network address of the remote agent process

use crate::config::UpstreamConfig;
use crate::error::AppError;
use reqwest::Url;
use serde::Serialize;

/// A single agent name bound to its endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentBinding {
    /// Name the UI addresses the agent by
    pub name: String,
    /// Absolute http(s) address of the agent endpoint
    pub url: Url,
}

impl AgentBinding {
    /// Create a binding, validating the name and URL
    pub fn new(name: impl Into<String>, url: &str) -> Result<Self, AppError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::InvalidAgentBinding(
                "Agent name cannot be empty".to_string(),
            ));
        }

        let url = Url::parse(url)
            .map_err(|e| AppError::InvalidAgentBinding(format!("{}: {}", url, e)))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(AppError::InvalidAgentBinding(format!(
                "{}: only absolute http(s) URLs are supported",
                url
            )));
        }

        Ok(Self { name, url })
    }
}

/// Serializable view of a binding for the listing endpoint
#[derive(Debug, Serialize)]
pub struct AgentBindingInfo {
    /// Agent name
    pub name: String,
    /// Agent endpoint
    pub url: String,
    /// Whether relay traffic goes to this agent
    pub default: bool,
}

/// Immutable registry of agent bindings, fixed at process start
#[derive(Debug, Clone)]
pub struct AgentBindings {
    bindings: Vec<AgentBinding>,
    default_index: usize,
}

impl AgentBindings {
    /// Registry holding exactly one binding, which is also the default
    pub fn single(binding: AgentBinding) -> Self {
        Self {
            bindings: vec![binding],
            default_index: 0,
        }
    }

    /// Build the registry from upstream configuration
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, AppError> {
        let binding = AgentBinding::new(config.agent_name.clone(), &config.agent_url)?;
        Ok(Self::single(binding))
    }

    /// Look up a binding by agent name
    pub fn get(&self, name: &str) -> Option<&AgentBinding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// The agent relay traffic is forwarded to
    pub fn default_agent(&self) -> &AgentBinding {
        &self.bindings[self.default_index]
    }

    /// Number of bound agents
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Always false: a registry is never built without a binding
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Listing of all bindings, sorted by name
    pub fn describe(&self) -> Vec<AgentBindingInfo> {
        let default_name = &self.default_agent().name;
        let mut infos: Vec<AgentBindingInfo> = self
            .bindings
            .iter()
            .map(|b| AgentBindingInfo {
                name: b.name.clone(),
                url: b.url.to_string(),
                default: &b.name == default_name,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_AGENT_NAME, DEFAULT_AGENT_URL};

    #[test]
    fn test_binding_accepts_http_url() {
        let binding = AgentBinding::new("agent", "http://localhost:8000/api/copilotkit").unwrap();
        assert_eq!(binding.name, "agent");
        assert_eq!(binding.url.path(), "/api/copilotkit");
        assert_eq!(binding.url.port(), Some(8000));
    }

    #[test]
    fn test_binding_rejects_empty_name() {
        let result = AgentBinding::new("  ", "http://localhost:8000");
        assert!(matches!(result, Err(AppError::InvalidAgentBinding(_))));
    }

    #[test]
    fn test_binding_rejects_bad_urls() {
        assert!(AgentBinding::new("agent", "not a url").is_err());
        assert!(AgentBinding::new("agent", "ftp://example.com/agent").is_err());
        assert!(AgentBinding::new("agent", "mailto:agent@example.com").is_err());
    }

    #[test]
    fn test_registry_from_default_config() {
        let config = UpstreamConfig {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            agent_url: DEFAULT_AGENT_URL.to_string(),
        };
        let bindings = AgentBindings::from_config(&config).unwrap();

        assert_eq!(bindings.len(), 1);
        assert!(!bindings.is_empty());
        assert_eq!(bindings.default_agent().name, "agent");
        assert!(bindings.get("agent").is_some());
        assert!(bindings.get("other").is_none());

        let listing = bindings.describe();
        assert_eq!(listing.len(), 1);
        assert!(listing[0].default);
        assert_eq!(listing[0].url, DEFAULT_AGENT_URL);
    }
}
