use std::fmt;

/// Error type for palette generation
/// Implements Clone so a failure can be logged and still handed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is missing, the AI path is disabled
    Configuration(String)
  , /// Network failure or timeout talking to the provider
    Transport(String)
  , /// Provider answered with a non-success status
    Upstream
    {   status: u16
      , body: String
    }
  , /// Provider reply did not have the chat-completion shape
    Decode(String)
  , /// No choices in provider reply
    NoResponse
  , /// Fewer unique colors than a palette needs
    InsufficientColors(usize)
  , /// Caller sent an unusable request
    InvalidRequest(String)
}

impl Error
{   /// Only input validation failures reach the caller
    pub fn is_client_error(&self) -> bool
    {   matches!(self, Error::InvalidRequest(_))
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Configuration(msg) => {
              write!(f, "Configuration error: {}", msg)
            }
          , Error::Transport(msg) => {
              write!(f, "Transport error: {}", msg)
            }
          , Error::Upstream { status, body } => {
              write!(f,
                "API error (status {}): {}",
                status, body
              )
            }
          , Error::Decode(msg) => {
              write!(f, "Decode error: {}", msg)
            }
          , Error::NoResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::InsufficientColors(got) => {
              write!(f,
                "AI returned insufficient colors: got {}, expected {}",
                got, crate::PALETTE_SIZE
              )
            }
          , Error::InvalidRequest(msg) => {
              write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   Error::Transport(format!("request timed out: {}", e))
        } else
        {   Error::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn only_invalid_request_is_client_error()
    {   assert!(Error::InvalidRequest("prompt is required".into())
          .is_client_error());
        assert!(!Error::NoResponse.is_client_error());
        assert!(!Error::InsufficientColors(3).is_client_error());
        assert!(!Error::Configuration("no key".into())
          .is_client_error());
    }

    #[test]
    fn display_carries_status_and_count()
    {   let upstream = Error::Upstream
        {   status: 429
          , body: "slow down".to_string()
        };
        assert_eq!(
          upstream.to_string(),
          "API error (status 429): slow down"
        );
        assert_eq!(
          Error::InsufficientColors(3).to_string(),
          "AI returned insufficient colors: got 3, expected 5"
        );
    }
}
