use serde::{Deserialize, Serialize};

/// Role of a message participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
    /// Tool/function result
    Tool,
}

/// Message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,
    /// Ordered content parts making up the message
    pub content: Vec<ContentPart>,
}

impl Message {
    /// Create a message holding a single text part
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }
}

/// One typed fragment of a chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content block
    Text {
        /// The text string
        text: String,
    },
    /// Reference to an image held by the media store
    Image {
        /// Opaque media identifier, resolved to base64 at mapping time
        media_id: String,
    },
    /// A tool invocation requested by the assistant
    ToolCall {
        /// Function name
        name: String,
        /// Function arguments as opaque JSON
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arguments: Option<serde_json::Value>,
    },
    /// Output of a previously requested tool invocation
    ToolResult {
        /// Name of the tool that produced this result
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Tool output content
        content: String,
    },
}

/// A tool/function call reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Function name
    pub name: String,
    /// Function arguments as opaque JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}
