//! Configuration for the palette service, read once at startup

use log::{error, info, warn};
use std::net::SocketAddr;

pub const DEFAULT_API_BASE_URL: &str
  = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Provider configuration, immutable after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig
{   /// Bearer token; empty disables the AI path
    pub api_key: String
  , /// Base URL, `/chat/completions` is appended
    pub api_base_url: String
  , /// Model name sent with every request
    pub model: String
  , /// Request timeout in seconds
    pub timeout_secs: u64
}

impl Default for ServiceConfig
{   fn default() -> Self
    {   ServiceConfig
        {   api_key: String::new()
          , api_base_url: DEFAULT_API_BASE_URL.to_string()
          , model: DEFAULT_MODEL.to_string()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
        }
    }
}

impl ServiceConfig
{   /// Read from the process environment
    pub fn from_env() -> Self
    {   Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; the first non-empty of
    /// each name pair wins
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String>
    {   let get = |primary: &str, alias: &str| {
          lookup(primary)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| {
              lookup(alias).filter(|v| !v.trim().is_empty())
            })
            .map(|v| v.trim().to_string())
        };

        let api_key = get("API_KEY", "AI_API_KEY")
          .unwrap_or_default();
        if api_key.is_empty()
        {   error!("API_KEY is not set, AI generation is disabled");
        }

        let api_base_url = get("API_BASE_URL", "AI_API_BASE_URL")
          .unwrap_or_else(|| {
            info!(
              "API_BASE_URL is not set, using default value: {}",
              DEFAULT_API_BASE_URL
            );
            DEFAULT_API_BASE_URL.to_string()
          })
          .trim_end_matches('/')
          .to_string();

        let model = get("MODEL", "AI_MODEL")
          .unwrap_or_else(|| {
            info!(
              "MODEL is not set, using default value: {}",
              DEFAULT_MODEL
            );
            DEFAULT_MODEL.to_string()
          });

        let timeout_secs = match get("TIMEOUT_SECONDS", "AI_TIMEOUT")
        {   None => DEFAULT_TIMEOUT_SECS
          , Some(raw) => match raw.parse::<u64>()
            {   Ok(secs) if secs > 0 => secs
              , _ => {
                  warn!(
                    "Invalid TIMEOUT_SECONDS '{}', using {}",
                    raw, DEFAULT_TIMEOUT_SECS
                  );
                  DEFAULT_TIMEOUT_SECS
                }
            }
        };

        ServiceConfig
        {   api_key
          , api_base_url
          , model
          , timeout_secs
        }
    }

    pub fn has_api_key(&self) -> bool
    {   !self.api_key.is_empty()
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String
    {   format!("{}/chat/completions", self.api_base_url)
    }
}

/// Listener configuration for the HTTP binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig
{   pub bind_addr: String
  , pub port: u16
}

impl ServerConfig
{   pub fn from_env() -> Self
    {   Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String>
    {   let bind_addr = lookup("BIND_ADDR")
          .filter(|v| !v.trim().is_empty())
          .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let port = match lookup("PORT")
        {   None => DEFAULT_PORT
          , Some(raw) => raw.trim().parse::<u16>()
              .unwrap_or_else(|_| {
                warn!("Invalid PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
              })
        };

        ServerConfig
        {   bind_addr
          , port
        }
    }

    pub fn socket_addr(&self)
      -> Result<SocketAddr, std::net::AddrParseError>
    {   format!("{}:{}", self.bind_addr, self.port).parse()
    }
}
