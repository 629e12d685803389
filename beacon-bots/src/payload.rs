//! Wire types for the Lanxin webhook

use crate::{BotError, Result, status};
use serde::{Deserialize, Serialize};

/// Message type tag for plain text messages
pub const MSG_TYPE_TEXT: &str = "text";

/// Signed envelope POSTed to the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanxinMessage {
    pub sign: String,

    /// Unix seconds as a decimal string
    pub timestamp: String,

    pub msg_type: String,

    pub msg_data: MsgData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgData {
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

impl LanxinMessage {
    /// Build a text message signed for `timestamp`.
    pub fn text(sign: impl Into<String>, timestamp: i64, content: impl Into<String>) -> Self {
        Self {
            sign: sign.into(),
            timestamp: timestamp.to_string(),
            msg_type: MSG_TYPE_TEXT.to_string(),
            msg_data: MsgData {
                text: TextContent {
                    content: content.into(),
                },
            },
        }
    }

    /// The text content carried by this message.
    pub fn content(&self) -> &str {
        &self.msg_data.text.content
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Body the webhook answers with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanxinResponse {
    #[serde(alias = "errCode")]
    pub code: i64,

    #[serde(default, alias = "errMsg")]
    pub msg: String,
}

impl LanxinResponse {
    pub fn is_ok(&self) -> bool {
        self.code == status::STATUS_OK
    }

    /// Map a non-zero code to [`BotError::Remote`].
    pub fn into_result(self) -> Result<()> {
        if self.is_ok() {
            return Ok(());
        }

        Err(BotError::Remote {
            code: self.code,
            description: status::describe_or_unknown(self.code),
            message: self.msg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_wire_format() {
        let timestamp = 1_700_000_000;
        let sign = crate::signature::sign("s", timestamp).unwrap();
        let message = LanxinMessage::text(sign, timestamp, "hello");
        let body = String::from_utf8(message.to_bytes().unwrap()).unwrap();

        assert_eq!(
            body,
            r#"{"sign":"ZwYWxN9/Fm+GsuEBhAoGmIHHA4MxEgqvXuo52MXN0OI=","timestamp":"1700000000","msgType":"text","msgData":{"text":{"content":"hello"}}}"#
        );
    }

    #[test]
    fn test_content_is_escaped() {
        let message = LanxinMessage::text("s", 1, "line one\n\"quoted\"");
        let body = String::from_utf8(message.to_bytes().unwrap()).unwrap();

        assert!(body.contains(r#""content":"line one\n\"quoted\"""#));
        let decoded: LanxinMessage = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded.content(), "line one\n\"quoted\"");
    }

    #[test]
    fn test_response_ok() {
        let response: LanxinResponse = serde_json::from_str(r#"{"code":0,"msg":"ok"}"#).unwrap();
        assert!(response.is_ok());
        assert!(response.into_result().is_ok());
    }

    #[test]
    fn test_response_remote_error() {
        let response: LanxinResponse =
            serde_json::from_str(r#"{"code":59001,"msg":"bot disabled"}"#).unwrap();

        match response.into_result() {
            Err(BotError::Remote {
                code,
                description,
                message,
            }) => {
                assert_eq!(code, 59001);
                assert_eq!(description, "bot 已停用");
                assert_eq!(message, "bot disabled");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_response_err_code_alias() {
        let response: LanxinResponse =
            serde_json::from_str(r#"{"errCode":59002,"errMsg":"sign mismatch","data":{}}"#)
                .unwrap();
        assert_eq!(response.code, 59002);
        assert_eq!(response.msg, "sign mismatch");
    }

    #[test]
    fn test_response_without_code_is_rejected() {
        assert!(serde_json::from_str::<LanxinResponse>(r#"{"msg":"hi"}"#).is_err());
    }
}
