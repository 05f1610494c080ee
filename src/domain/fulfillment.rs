//! Conversational-agent webhook payloads.
//!
//! `WebhookRequest` is what the agent platform posts on every matched
//! intent; `Fulfillment` is what it expects back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::PLATFORM_ACTIONS_ON_GOOGLE;

/// Incoming webhook call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookRequest {
    pub response_id: String,
    /// Full session path, `projects/<id>/agent/sessions/<session>`
    pub session: String,
    pub query_result: QueryResult,
    pub original_detect_intent_request: Option<Value>,
}

/// Result of the conversational query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResult {
    pub query_text: String,
    pub action: String,
    pub parameters: Map<String, Value>,
    pub all_required_params_present: bool,
    pub fulfillment_text: String,
    pub output_contexts: Vec<Context>,
    pub intent: Option<Intent>,
    pub intent_detection_confidence: Option<f64>,
    pub language_code: String,
}

/// Matched intent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Intent {
    pub name: String,
    pub display_name: String,
}

/// Conversation context, either received or emitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Context {
    /// Full context path, `<session>/contexts/<context-id>`
    pub name: String,
    pub lifespan_count: i32,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

impl Context {
    /// Short identifier, the last path segment of `name`.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

fn non_blank_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl QueryResult {
    /// Non-blank string parameter, looked up on the query first and then on
    /// any incoming output context.
    pub fn string_param(&self, name: &str) -> Option<String> {
        self.parameters
            .get(name)
            .and_then(non_blank_string)
            .or_else(|| {
                self.output_contexts
                    .iter()
                    .find_map(|ctx| ctx.parameters.get(name).and_then(non_blank_string))
            })
    }

    /// Non-blank string parameter carried by the named context only.
    pub fn context_param(&self, context_id: &str, name: &str) -> Option<String> {
        self.output_contexts
            .iter()
            .filter(|ctx| ctx.id() == context_id)
            .find_map(|ctx| ctx.parameters.get(name).and_then(non_blank_string))
    }
}

/// Webhook response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fulfillment_messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<Context>,
}

/// One rich response message, optionally bound to a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(flatten)]
    pub content: RichMessage,
}

/// Message payload variants understood by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RichMessage {
    Text(Text),
    SimpleResponses(SimpleResponses),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponses {
    pub simple_responses: Vec<SimpleResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub text_to_speech: String,
    pub display_text: String,
}

impl Message {
    /// Plain text message for every platform.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            platform: None,
            content: RichMessage::Text(Text {
                text: vec![text.into()],
            }),
        }
    }

    /// Single simple response for Actions on Google.
    pub fn google_simple_response(speech: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            platform: Some(PLATFORM_ACTIONS_ON_GOOGLE.to_string()),
            content: RichMessage::SimpleResponses(SimpleResponses {
                simple_responses: vec![SimpleResponse {
                    text_to_speech: speech.into(),
                    display_text: display.into(),
                }],
            }),
        }
    }
}

impl Fulfillment {
    /// Reply with the same sentence as text and as a Google simple response.
    pub fn say(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            fulfillment_messages: vec![
                Message::text(text.clone()),
                Message::google_simple_response(text.clone(), text),
            ],
            ..Self::default()
        }
    }

    /// Attach an output context.
    pub fn with_context(mut self, context: Context) -> Self {
        self.output_contexts.push(context);
        self
    }

    /// Attach a custom payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// First plain text line, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.fulfillment_messages.iter().find_map(|m| match &m.content {
            RichMessage::Text(t) => t.text.first().map(String::as_str),
            RichMessage::SimpleResponses(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_agent_request() {
        let request: WebhookRequest = serde_json::from_value(json!({
            "responseId": "abc",
            "session": "projects/bar/agent/sessions/42",
            "queryResult": {
                "queryText": "give me a random cocktail",
                "action": "random",
                "parameters": {},
                "allRequiredParamsPresent": true,
                "intent": {"name": "projects/bar/agent/intents/1", "displayName": "Random"},
                "languageCode": "en"
            }
        }))
        .unwrap();

        assert_eq!(request.query_result.action, "random");
        assert_eq!(request.session, "projects/bar/agent/sessions/42");
        assert_eq!(request.query_result.intent.unwrap().display_name, "Random");
    }

    #[test]
    fn missing_fields_default() {
        let request: WebhookRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.query_result.action, "");
    }

    #[test]
    fn say_serializes_text_and_google_messages() {
        let value = serde_json::to_value(Fulfillment::say("Cheers")).unwrap();
        assert_eq!(
            value,
            json!({
                "fulfillmentMessages": [
                    {"text": {"text": ["Cheers"]}},
                    {
                        "platform": "ACTIONS_ON_GOOGLE",
                        "simpleResponses": {
                            "simpleResponses": [
                                {"textToSpeech": "Cheers", "displayText": "Cheers"}
                            ]
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn string_param_falls_back_to_contexts() {
        let result: QueryResult = serde_json::from_value(json!({
            "parameters": {"drink": "  "},
            "outputContexts": [{
                "name": "projects/bar/agent/sessions/42/contexts/search-followup",
                "lifespanCount": 1,
                "parameters": {"drink": "Mojito"}
            }]
        }))
        .unwrap();

        assert_eq!(result.string_param("drink").as_deref(), Some("Mojito"));
        assert_eq!(
            result.context_param("search-followup", "drink").as_deref(),
            Some("Mojito")
        );
        assert_eq!(result.context_param("other", "drink"), None);
    }
}
