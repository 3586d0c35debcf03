use serde::{Deserialize, Serialize};
use log::{debug, trace};
use std::time::Duration;

// ===== Message Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "system".to_string()
          , content: content.into()
        }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: content.into()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f32
  , pub max_tokens: usize
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
}

// ===== Chat Completions Client =====

/// OpenAI-compatible chat-completions client
/// Holds no per-request state, safe to share across handlers
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient
{   http_client: reqwest::Client
  , url: String
  , api_key: String
  , timeout: Duration
}

impl ChatCompletionsClient
{   pub fn new(config: &crate::config::ServiceConfig) -> Self
    {   debug!(
          "Creating ChatCompletionsClient for {}",
          config.api_base_url
        );
        ChatCompletionsClient
        {   http_client: reqwest::Client::new()
          , url: config.completions_url()
          , api_key: config.api_key.clone()
          , timeout: Duration::from_secs(config.timeout_secs)
        }
    }

    /// Single POST, no retries; returns the first choice's text
    pub async fn complete(
      &self
    , request: &ChatCompletionRequest
    ) -> Result<String, crate::error::Error>
    {   trace!("Chat request: {:?}", request);

        let response = self.http_client
          .post(&self.url)
          .timeout(self.timeout)
          .header("Authorization", format!("Bearer {}", self.api_key))
          .header("Content-Type", "application/json")
          .json(request)
          .send()
          .await
          .map_err(|e| {
            debug!("HTTP error: {}", e);
            crate::error::Error::from(e)
          })?;

        let status = response.status();
        trace!("Chat response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            debug!("API error (status {}): {}", status, body);
            return Err(crate::error::Error::Upstream
            {   status: status.as_u16()
              , body
            });
        }

        let body = response.text().await
          .map_err(|e| {
            debug!("Failed to read response body: {}", e);
            crate::error::Error::from(e)
          })?;

        first_choice_content(&body)
    }
}

/// Pulls the first choice's content out of a raw reply body
pub fn first_choice_content(body: &str)
  -> Result<String, crate::error::Error>
{   let chat_response: ChatCompletionResponse
      = serde_json::from_str(body).map_err(|e| {
        debug!("Parse error: {}", e);
        crate::error::Error::Decode(e.to_string())
      })?;

    chat_response.choices.into_iter().next()
      .map(|c| c.message.content)
      .ok_or_else(|| {
        debug!("No choices in response");
        crate::error::Error::NoResponse
      })
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::error::Error;

    #[test]
    fn request_serializes_wire_shape()
    {   let request = ChatCompletionRequest
        {   model: "gpt-3.5-turbo".to_string()
          , messages: vec![
              ChatMessage::system("be terse")
            , ChatMessage::user("<input>hi</input>")
            ]
          , temperature: 0.7
          , max_tokens: 200
        };
        let json = serde_json::to_value(&request).expect("serializable");
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "<input>hi</input>");
        assert_eq!(json["max_tokens"], 200);
        assert!((json["temperature"].as_f64().unwrap_or(0.0) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn first_choice_is_used()
    {   let body = r##"{"choices":[
          {"message":{"role":"assistant","content":"#FFFFFF"}},
          {"message":{"role":"assistant","content":"ignored"}}
        ]}"##;
        assert_eq!(first_choice_content(body), Ok("#FFFFFF".to_string()));
    }

    #[test]
    fn extra_reply_fields_are_ignored()
    {   let body = r##"{"id":"cmpl-1","choices":[
          {"index":0,"finish_reason":"stop",
           "message":{"role":"assistant","content":"#ABCDEF"}}
        ],"usage":{"total_tokens":12}}"##;
        assert_eq!(first_choice_content(body), Ok("#ABCDEF".to_string()));
    }

    #[test]
    fn empty_choices_is_no_response()
    {   assert_eq!(
          first_choice_content(r#"{"choices":[]}"#),
          Err(Error::NoResponse)
        );
    }

    #[test]
    fn wrong_shape_is_decode_error()
    {   for body in ["not json", r#"{"data":[]}"#, r#"{"choices":[{"text":"x"}]}"#]
        {   assert!(
              matches!(first_choice_content(body), Err(Error::Decode(_))),
              "{}", body
            );
        }
    }
}
