//! Request and response types for the palette service

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `#RRGGBB` color, always uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColorCode(String);

impl ColorCode
{   /// Accepts `#` plus exactly 6 hex digits in any case
    pub fn parse(raw: &str) -> Option<Self>
    {   let digits = raw.strip_prefix('#')?;
        if digits.len() == 6
          && digits.bytes().all(|b| b.is_ascii_hexdigit())
        {   Some(ColorCode(format!("#{}", digits.to_ascii_uppercase())))
        } else
        {   None
        }
    }

    /// Formats the low 24 bits as a color
    pub fn from_rgb(value: u32) -> Self
    {   ColorCode(format!("#{:06X}", value & 0xFF_FFFF))
    }

    pub fn as_str(&self) -> &str
    {   &self.0
    }
}

impl fmt::Display for ColorCode
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(&self.0)
    }
}

impl AsRef<str> for ColorCode
{   fn as_ref(&self) -> &str
    {   &self.0
    }
}

/// Inbound palette request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteRequest
{   /// Free-text description of the palette
    #[serde(default)]
    pub prompt: String
}

impl PaletteRequest
{   /// Rejects a missing or blank prompt
    pub fn validate(&self) -> Result<&str, crate::error::Error>
    {   if self.prompt.trim().is_empty()
        {   return Err(crate::error::Error::InvalidRequest(
              "prompt is required".to_string()
            ));
        }
        Ok(&self.prompt)
    }
}

/// Palette handed back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct PaletteResponse
{   pub colors: Vec<ColorCode>
  , /// Seconds since epoch
    pub timestamp: i64
  , pub description: String
}

impl PaletteResponse
{   pub fn new(prompt: &str, colors: Vec<ColorCode>) -> Self
    {   PaletteResponse
        {   colors
          , timestamp: chrono::Utc::now().timestamp()
          , description: describe(prompt)
        }
    }
}

/// Human-readable description for a prompt
pub fn describe(prompt: &str) -> String
{   format!("Color palette generated from prompt '{}'", prompt)
}

/// Error body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse
{   pub error: String
}

/// Liveness probe body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse
{   pub status: String
}

impl Default for HealthResponse
{   fn default() -> Self
    {   HealthResponse
        {   status: "ok".to_string()
        }
    }
}
