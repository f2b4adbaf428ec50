//! Conversion between the backend-agnostic model and the Ollama wire format

use crate::error::AdapterError;
use crate::media::MediaResolver;
use crate::protocol::{OllamaChatRequest, OllamaChatResponse, OllamaMessage, OllamaOptions};
use crate::types::{
    ChatRequest, ChatResponse, ContentPart, FinishReason, ResponseMessage, Role, ToolCall, Usage,
};

/// Role as the wire format spells it
const fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

/// Build the outbound chat payload
///
/// Image references are resolved to base64 through the media collaborator
/// while message content is flattened.
pub async fn chat_payload(
    request: &ChatRequest,
    media: &dyn MediaResolver,
) -> Result<OllamaChatRequest, AdapterError> {
    let mut messages = Vec::with_capacity(request.messages.len());

    for msg in &request.messages {
        if msg.role == Role::Tool {
            // One wire message per part; only parts with a textual
            // rendering under role "tool" survive
            for part in &msg.content {
                match part {
                    ContentPart::ToolResult { name, content } => messages.push(OllamaMessage {
                        role: "tool".to_owned(),
                        content: content.clone(),
                        name: name.clone(),
                        images: None,
                    }),
                    ContentPart::Text { text } => messages.push(OllamaMessage {
                        role: "tool".to_owned(),
                        content: text.clone(),
                        name: None,
                        images: None,
                    }),
                    ContentPart::Image { .. } | ContentPart::ToolCall { .. } => {}
                }
            }
            continue;
        }

        let mut text = String::new();
        let mut media_ids = Vec::new();
        for part in &msg.content {
            match part {
                ContentPart::Text { text: t } => text.push_str(t),
                ContentPart::Image { media_id } => media_ids.push(media_id.as_str()),
                // Tool calls are never re-sent; tool results only render
                // under the tool role
                ContentPart::ToolCall { .. } | ContentPart::ToolResult { .. } => {}
            }
        }

        let mut images = Vec::with_capacity(media_ids.len());
        for media_id in media_ids {
            images.push(media.base64(media_id).await?);
        }

        // A message with no text and no images still produces an entry
        // with empty content
        messages.push(OllamaMessage {
            role: role_str(msg.role).to_owned(),
            content: text,
            name: None,
            images: if images.is_empty() { None } else { Some(images) },
        });
    }

    Ok(OllamaChatRequest {
        model: request.model.clone(),
        messages,
        stream: false,
        options: OllamaOptions {
            temperature: request.params.temperature,
            top_p: request.params.top_p,
            num_predict: request.params.max_tokens,
            stop: request.params.stop.clone(),
            tools: request.tools.clone(),
        },
    })
}

/// Map a backend chat reply onto the generic response model
///
/// The wire format cannot tell whether textual content coexists with tool
/// calls, so calls are recorded both as content parts and in the
/// structured list.
pub fn chat_response(model: String, reply: OllamaChatResponse) -> ChatResponse {
    let OllamaChatResponse {
        message,
        prompt_eval_count,
        eval_count,
    } = reply;

    let mut content = vec![ContentPart::Text {
        text: message.content.unwrap_or_default(),
    }];

    let tool_calls = message
        .tool_calls
        .filter(|calls| !calls.is_empty())
        .map(|calls| {
            calls
                .into_iter()
                .map(|call| ToolCall {
                    name: call.function.name,
                    arguments: call.function.arguments,
                })
                .collect::<Vec<_>>()
        });

    if let Some(calls) = &tool_calls {
        content.extend(calls.iter().map(|call| ContentPart::ToolCall {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        }));
    }

    ChatResponse {
        model,
        message: ResponseMessage {
            role: Role::Assistant,
            content,
            finish_reason: FinishReason::Stop,
            tool_calls,
        },
        usage: Usage {
            prompt_tokens: prompt_eval_count,
            completion_tokens: eval_count,
            total_tokens: prompt_eval_count + eval_count,
        },
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::media::MediaError;
    use crate::protocol::{OllamaFunctionCall, OllamaResponseMessage, OllamaToolCall};
    use crate::types::{GenerationParams, Message, ToolDefinition};

    /// Resolver that prefixes the id, making resolution visible in output
    struct StaticMedia;

    #[async_trait]
    impl MediaResolver for StaticMedia {
        async fn base64(&self, media_id: &str) -> Result<String, MediaError> {
            Ok(format!("b64:{media_id}"))
        }
    }

    fn request(messages: Vec<Message>) -> ChatRequest {
        ChatRequest {
            model: "llama3".to_owned(),
            messages,
            params: GenerationParams::default(),
            tools: None,
        }
    }

    #[tokio::test]
    async fn text_messages_map_one_to_one() {
        let req = request(vec![
            Message::text(Role::System, "be terse"),
            Message::text(Role::User, "hello"),
            Message::text(Role::Assistant, "hi"),
        ]);

        let payload = chat_payload(&req, &StaticMedia).await.unwrap();

        assert_eq!(payload.messages.len(), 3);
        assert_eq!(payload.messages[0].role, "system");
        assert_eq!(payload.messages[1].content, "hello");
        assert!(payload.messages.iter().all(|m| m.images.is_none()));
        assert!(!payload.stream);
    }

    #[tokio::test]
    async fn text_parts_concatenate() {
        let req = request(vec![Message {
            role: Role::User,
            content: vec![
                ContentPart::Text { text: "a".to_owned() },
                ContentPart::Text { text: "b".to_owned() },
            ],
        }]);

        let payload = chat_payload(&req, &StaticMedia).await.unwrap();
        assert_eq!(payload.messages[0].content, "ab");
    }

    #[tokio::test]
    async fn image_parts_resolve_in_order() {
        let req = request(vec![Message {
            role: Role::User,
            content: vec![
                ContentPart::Text {
                    text: "look".to_owned(),
                },
                ContentPart::Image {
                    media_id: "m1".to_owned(),
                },
                ContentPart::Image {
                    media_id: "m2".to_owned(),
                },
            ],
        }]);

        let payload = chat_payload(&req, &StaticMedia).await.unwrap();

        let images = payload.messages[0].images.as_ref().unwrap();
        assert_eq!(images, &["b64:m1".to_owned(), "b64:m2".to_owned()]);
        assert_eq!(payload.messages[0].content, "look");
    }

    #[tokio::test]
    async fn empty_message_still_produces_entry() {
        let req = request(vec![Message {
            role: Role::User,
            content: vec![],
        }]);

        let payload = chat_payload(&req, &StaticMedia).await.unwrap();

        assert_eq!(payload.messages.len(), 1);
        assert_eq!(payload.messages[0].content, "");
        assert!(payload.messages[0].images.is_none());
    }

    #[tokio::test]
    async fn tool_message_fans_out_per_part() {
        let req = request(vec![Message {
            role: Role::Tool,
            content: vec![
                ContentPart::ToolResult {
                    name: Some("lookup".to_owned()),
                    content: "42".to_owned(),
                },
                ContentPart::ToolResult {
                    name: Some("fetch".to_owned()),
                    content: "ok".to_owned(),
                },
            ],
        }]);

        let payload = chat_payload(&req, &StaticMedia).await.unwrap();

        assert_eq!(payload.messages.len(), 2);
        assert_eq!(payload.messages[0].role, "tool");
        assert_eq!(payload.messages[0].content, "42");
        assert_eq!(payload.messages[0].name.as_deref(), Some("lookup"));
        assert_eq!(payload.messages[1].name.as_deref(), Some("fetch"));
    }

    #[tokio::test]
    async fn tool_call_parts_are_not_resent() {
        let req = request(vec![Message {
            role: Role::Assistant,
            content: vec![
                ContentPart::Text {
                    text: "calling".to_owned(),
                },
                ContentPart::ToolCall {
                    name: "lookup".to_owned(),
                    arguments: Some(json!({"q": "x"})),
                },
            ],
        }]);

        let payload = chat_payload(&req, &StaticMedia).await.unwrap();

        assert_eq!(payload.messages.len(), 1);
        assert_eq!(payload.messages[0].content, "calling");
    }

    #[tokio::test]
    async fn absent_params_are_dropped_from_json() {
        let req = request(vec![Message::text(Role::User, "hi")]);

        let payload = chat_payload(&req, &StaticMedia).await.unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        let options = value["options"].as_object().unwrap();
        assert!(options.is_empty());
        let message = value["messages"][0].as_object().unwrap();
        assert!(!message.contains_key("images"));
        assert!(!message.contains_key("name"));
    }

    #[tokio::test]
    async fn set_params_and_tools_serialize_into_options() {
        let mut req = request(vec![Message::text(Role::User, "hi")]);
        req.params = GenerationParams {
            temperature: Some(0.2),
            top_p: Some(0.9),
            max_tokens: Some(128),
            stop: Some(vec!["\n".to_owned()]),
        };
        req.tools = Some(vec![ToolDefinition::function(
            "lookup",
            json!({"type": "object"}),
        )]);

        let payload = chat_payload(&req, &StaticMedia).await.unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["options"]["num_predict"], 128);
        assert_eq!(value["options"]["temperature"], 0.2);
        assert_eq!(value["options"]["stop"][0], "\n");
        assert_eq!(value["options"]["tools"][0]["function"]["name"], "lookup");
    }

    fn reply(message: OllamaResponseMessage) -> OllamaChatResponse {
        OllamaChatResponse {
            message,
            prompt_eval_count: 5,
            eval_count: 10,
        }
    }

    #[test]
    fn usage_totals_prompt_and_completion() {
        let resp = chat_response(
            "llama3".to_owned(),
            reply(OllamaResponseMessage {
                content: Some("hi".to_owned()),
                tool_calls: None,
            }),
        );

        assert_eq!(resp.usage.prompt_tokens, 5);
        assert_eq!(resp.usage.completion_tokens, 10);
        assert_eq!(resp.usage.total_tokens, 15);
        assert_eq!(resp.model, "llama3");
        assert_eq!(resp.message.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn missing_content_defaults_to_empty_text() {
        let resp = chat_response(
            "llama3".to_owned(),
            reply(OllamaResponseMessage {
                content: None,
                tool_calls: None,
            }),
        );

        assert_eq!(
            resp.message.content,
            vec![ContentPart::Text { text: String::new() }]
        );
        assert!(resp.message.tool_calls.is_none());
    }

    #[test]
    fn tool_calls_populate_both_representations() {
        let calls = vec![
            OllamaToolCall {
                function: OllamaFunctionCall {
                    name: "lookup".to_owned(),
                    arguments: Some(json!({"q": "x"})),
                },
            },
            OllamaToolCall {
                function: OllamaFunctionCall {
                    name: "fetch".to_owned(),
                    arguments: None,
                },
            },
        ];

        let resp = chat_response(
            "llama3".to_owned(),
            reply(OllamaResponseMessage {
                content: Some("using tools".to_owned()),
                tool_calls: Some(calls),
            }),
        );

        assert_eq!(resp.message.content.len(), 3);
        assert_eq!(
            resp.message.content[0],
            ContentPart::Text {
                text: "using tools".to_owned()
            }
        );
        assert_eq!(
            resp.message.content[1],
            ContentPart::ToolCall {
                name: "lookup".to_owned(),
                arguments: Some(json!({"q": "x"})),
            }
        );

        let structured = resp.message.tool_calls.unwrap();
        assert_eq!(structured.len(), 2);
        assert_eq!(structured[0].name, "lookup");
        assert_eq!(structured[1].name, "fetch");
        assert_eq!(structured[1].arguments, None);
    }

    #[test]
    fn empty_tool_call_list_is_treated_as_absent() {
        let resp = chat_response(
            "llama3".to_owned(),
            reply(OllamaResponseMessage {
                content: Some("hi".to_owned()),
                tool_calls: Some(vec![]),
            }),
        );

        assert!(resp.message.tool_calls.is_none());
        assert_eq!(resp.message.content.len(), 1);
    }
}
