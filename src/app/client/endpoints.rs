//! Endpoint path templates
//!
//! Each template is a path relative to the service base URL with `{token}`
//! and/or `{category}` placeholders. Substitution happens here so callers of
//! the invoker only ever see concrete paths.

use serde::{Deserialize, Serialize};

use crate::app::models::Token;
use crate::constants::api::{
    self, CATEGORY_PLACEHOLDER, TOKEN_PLACEHOLDER,
};
use crate::errors::{ConfigError, ConfigResult};

/// The five endpoint templates of the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointTemplates {
    pub token: String,
    pub categories: String,
    pub category_detail: String,
    pub subscribers: String,
    pub answer: String,
}

impl Default for EndpointTemplates {
    fn default() -> Self {
        Self {
            token: api::TOKEN_PATH.to_string(),
            categories: api::CATEGORIES_PATH.to_string(),
            category_detail: api::CATEGORY_PATH.to_string(),
            subscribers: api::SUBSCRIBERS_PATH.to_string(),
            answer: api::ANSWER_PATH.to_string(),
        }
    }
}

impl EndpointTemplates {
    pub fn token_path(&self) -> String {
        self.token.clone()
    }

    pub fn categories_path(&self, token: &Token) -> String {
        with_token(&self.categories, token)
    }

    /// Category names are percent-encoded as one path segment
    pub fn category_path(&self, category: &str, token: &Token) -> String {
        let encoded = urlencoding::encode(category);
        with_token(&self.category_detail, token).replace(CATEGORY_PLACEHOLDER, &encoded)
    }

    pub fn subscribers_path(&self, token: &Token) -> String {
        with_token(&self.subscribers, token)
    }

    pub fn answer_path(&self, token: &Token) -> String {
        with_token(&self.answer, token)
    }

    /// Check every template carries the placeholders it needs
    pub fn validate(&self) -> ConfigResult<()> {
        let token_bearing = [
            ("api.categories_path", &self.categories),
            ("api.category_path", &self.category_detail),
            ("api.subscribers_path", &self.subscribers),
            ("api.answer_path", &self.answer),
        ];

        for (field, template) in token_bearing {
            require_placeholder(field, template, TOKEN_PLACEHOLDER)?;
        }
        require_placeholder("api.category_path", &self.category_detail, CATEGORY_PLACEHOLDER)?;

        if self.token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.token_path".to_string(),
                value: self.token.clone(),
                reason: "Token path must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn with_token(template: &str, token: &Token) -> String {
    template.replace(TOKEN_PLACEHOLDER, token.as_str())
}

fn require_placeholder(field: &str, template: &str, placeholder: &str) -> ConfigResult<()> {
    if template.contains(placeholder) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: template.to_string(),
            reason: format!("Template must contain {}", placeholder),
        })
    }
}
