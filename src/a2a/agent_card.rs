//! Agent Card generation for `.well-known/agent-card.json`.
//!
//! Builds the `AgentCard` from the running configuration. In `langdock`
//! mode the card declares the `X-API-Key` header scheme callers must send.

use crate::a2a::types::*;
use crate::config::AgentMode;
use std::collections::BTreeMap;

/// Name of the security scheme entry in the card.
pub const API_KEY_SCHEME: &str = "apiKeyAuth";

/// Build the Agent Card for this agent.
pub fn build_agent_card(agent_url: &str, mode: AgentMode) -> AgentCard {
    let mut card = AgentCard {
        name: "Langdock A2A Agent".to_string(),
        description: "A simple agent that can be used to test the Langdock A2A implementation."
            .to_string(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        version: crate::VERSION.to_string(),
        url: agent_url.to_string(),
        skills: vec![AgentSkill {
            id: "Ask Langdock Agent".to_string(),
            name: "Ask Langdock Agent".to_string(),
            description: "Ask the Langdock Agent a question.".to_string(),
            tags: vec!["prompt".to_string()],
            examples: vec![],
        }],
        capabilities: AgentCapabilities {
            streaming: false,
            push_notifications: false,
        },
        default_input_modes: vec!["text".to_string()],
        default_output_modes: vec!["text".to_string()],
        security_schemes: BTreeMap::new(),
        security: vec![],
    };

    if mode == AgentMode::Langdock {
        card.security_schemes.insert(
            API_KEY_SCHEME.to_string(),
            SecurityScheme::ApiKey {
                name: "X-API-Key".to_string(),
                location: ApiKeyLocation::Header,
            },
        );
        card.security = vec![BTreeMap::from([(API_KEY_SCHEME.to_string(), vec![])])];
    }

    card
}
