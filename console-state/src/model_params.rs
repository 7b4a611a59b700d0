//! Inference parameter validation and transport encoding.
//!
//! The console edits all four knobs as concrete values; only values that
//! differ from the compiled-in defaults travel to the server, so server-side
//! defaults are never overridden by accident and request payloads stay
//! minimal.

use studio_client::ModelParamsPatch;

use crate::error::ConsoleStateError;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_PRESENCE_PENALTY: f32 = 0.0;
pub const DEFAULT_FREQUENCY_PENALTY: f32 = 0.0;
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// The compiled-in parameter set shown when a runner session starts.
pub const DEFAULT_MODEL_PARAMS: ModelParams = ModelParams {
    temperature: DEFAULT_TEMPERATURE,
    presence_penalty: DEFAULT_PRESENCE_PENALTY,
    frequency_penalty: DEFAULT_FREQUENCY_PENALTY,
    max_tokens: DEFAULT_MAX_TOKENS,
};

/// What "unchanged `max_tokens`" means when encoding for transport.
///
/// An older deployment treated `-1` as "let the server decide" instead of
/// carrying a concrete default. That behavior survives here as an explicit
/// choice rather than a silent constant: under [`MaxTokensDefault::ServerChoice`]
/// every valid `max_tokens` value is encoded, since there is no client-side
/// default to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxTokensDefault {
    /// Concrete client-side default; equal values are omitted from transport.
    Fixed(u32),
    /// No client-side default; the server chooses unless the user sets one.
    ServerChoice,
}

impl Default for MaxTokensDefault {
    fn default() -> Self {
        MaxTokensDefault::Fixed(DEFAULT_MAX_TOKENS)
    }
}

/// Editable inference parameters.
///
/// Invariants (checked by [`ModelParams::validate`]):
/// `temperature ∈ [0, 2]`, `presence_penalty ∈ [-2, 2]`,
/// `frequency_penalty ∈ [-2, 2]`, `max_tokens > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    pub max_tokens: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        DEFAULT_MODEL_PARAMS
    }
}

impl ModelParams {
    /// True iff every range invariant holds.
    pub fn validate(&self) -> bool {
        self.find_issues().is_empty()
    }

    /// One human-readable message per violated invariant, in fixed order:
    /// temperature, presence penalty, frequency penalty, max tokens.
    pub fn find_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.temperature.is_finite() || self.temperature < 0.0 || self.temperature > 2.0 {
            issues.push("Temperature must be between 0.0 and 2.0".to_string());
        }
        if !self.presence_penalty.is_finite()
            || self.presence_penalty < -2.0
            || self.presence_penalty > 2.0
        {
            issues.push("Presence penalty must be between -2.0 and 2.0".to_string());
        }
        if !self.frequency_penalty.is_finite()
            || self.frequency_penalty < -2.0
            || self.frequency_penalty > 2.0
        {
            issues.push("Frequency penalty must be between -2.0 and 2.0".to_string());
        }
        if self.max_tokens == 0 {
            issues.push("Max tokens must be greater than 0".to_string());
        }
        issues
    }

    /// Encodes the parameters for transport against the standard defaults.
    ///
    /// # Errors
    /// [`ConsoleStateError::InvalidParams`] when validation fails; nothing
    /// is ever sent with out-of-range values.
    pub fn encode_for_transport(&self) -> Result<ModelParamsPatch, ConsoleStateError> {
        self.encode_with_max_tokens_default(MaxTokensDefault::default())
    }

    /// Encodes for transport under an explicit `max_tokens` default policy.
    pub fn encode_with_max_tokens_default(
        &self,
        policy: MaxTokensDefault,
    ) -> Result<ModelParamsPatch, ConsoleStateError> {
        let issues = self.find_issues();
        if !issues.is_empty() {
            return Err(ConsoleStateError::InvalidParams { issues });
        }

        let mut patch = ModelParamsPatch::default();
        if self.temperature != DEFAULT_TEMPERATURE {
            patch.temperature = Some(self.temperature);
        }
        if self.presence_penalty != DEFAULT_PRESENCE_PENALTY {
            patch.presence_penalty = Some(self.presence_penalty);
        }
        if self.frequency_penalty != DEFAULT_FREQUENCY_PENALTY {
            patch.frequency_penalty = Some(self.frequency_penalty);
        }
        match policy {
            MaxTokensDefault::Fixed(default) => {
                if self.max_tokens != default {
                    patch.max_tokens = Some(self.max_tokens);
                }
            }
            MaxTokensDefault::ServerChoice => {
                patch.max_tokens = Some(self.max_tokens);
            }
        }
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_encode_to_nothing() {
        let params = DEFAULT_MODEL_PARAMS;
        assert!(params.validate());
        assert!(params.find_issues().is_empty());

        let patch = params.encode_for_transport().unwrap();
        assert!(patch.is_empty());
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn only_changed_fields_are_encoded() {
        let params = ModelParams {
            max_tokens: 256,
            ..DEFAULT_MODEL_PARAMS
        };
        let patch = params.encode_for_transport().unwrap();
        assert_eq!(patch.max_tokens, Some(256));
        assert!(patch.temperature.is_none());
        assert!(patch.presence_penalty.is_none());
        assert!(patch.frequency_penalty.is_none());
    }

    #[test]
    fn out_of_range_temperature_yields_exactly_one_issue() {
        let params = ModelParams {
            temperature: 2.5,
            ..DEFAULT_MODEL_PARAMS
        };
        let issues = params.find_issues();
        assert_eq!(issues, vec!["Temperature must be between 0.0 and 2.0"]);
        assert!(!params.validate());
        assert!(params.encode_for_transport().is_err());
    }

    #[test]
    fn issues_keep_fixed_order_when_everything_is_wrong() {
        let params = ModelParams {
            temperature: -1.0,
            presence_penalty: 3.0,
            frequency_penalty: -2.5,
            max_tokens: 0,
        };
        let issues = params.find_issues();
        assert_eq!(
            issues,
            vec![
                "Temperature must be between 0.0 and 2.0",
                "Presence penalty must be between -2.0 and 2.0",
                "Frequency penalty must be between -2.0 and 2.0",
                "Max tokens must be greater than 0",
            ]
        );
    }

    #[test]
    fn server_choice_policy_always_encodes_max_tokens() {
        let patch = DEFAULT_MODEL_PARAMS
            .encode_with_max_tokens_default(MaxTokensDefault::ServerChoice)
            .unwrap();
        assert_eq!(patch.max_tokens, Some(DEFAULT_MAX_TOKENS));
        assert!(patch.temperature.is_none());
    }
}
