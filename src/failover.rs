//! Fallback palette generation when the AI path fails

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use crate::request::{ColorCode, PaletteRequest, PaletteResponse};

/// Pseudo-random palette source that cannot fail
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPaletteFallback;

impl RandomPaletteFallback
{   pub fn new() -> Self
    {   RandomPaletteFallback
    }

    /// Seed derived from the prompt's byte length
    pub fn seed_for(prompt: &str) -> u64
    {   prompt.len() as u64
    }

    /// `count` colors, duplicates allowed. Each call owns its
    /// generator, so nothing is shared between requests.
    pub fn generate(&self, prompt: &str, count: usize)
      -> Vec<ColorCode>
    {   let seed = Self::seed_for(prompt);
        debug!("Generating {} fallback colors with seed {}", count, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
          .map(|_| ColorCode::from_rgb(rng.random_range(0..=0xFF_FFFF)))
          .collect()
    }
}

/// Primary generator with the random fallback behind it
#[derive(Debug, Clone)]
pub struct PaletteService
{   generator: crate::client::PaletteGenerator
  , fallback: RandomPaletteFallback
}

impl PaletteService
{   pub fn new(config: crate::config::ServiceConfig) -> Self
    {   PaletteService
        {   generator: crate::client::PaletteGenerator::new(config)
          , fallback: RandomPaletteFallback::new()
        }
    }

    /// Always yields a full palette for a non-empty prompt
    pub async fn generate(&self, prompt: &str) -> Vec<ColorCode>
    {   info!("Using '{}' to create colors", prompt);
        match self.generator.generate(prompt).await
        {   Ok(colors) => colors
          , Err(e) => {
              warn!(
                "AI generation failed: {}, falling back to random generation",
                e
              );
              self.fallback.generate(prompt, crate::PALETTE_SIZE)
            }
        }
    }

    /// Validates the request and assembles the response body
    pub async fn handle(&self, request: &PaletteRequest)
      -> Result<PaletteResponse, crate::error::Error>
    {   let prompt = request.validate()?;
        let colors = self.generate(prompt).await;
        Ok(PaletteResponse::new(prompt, colors))
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::error::Error;

    fn is_hex_color(s: &str) -> bool
    {   s.len() == 7
          && s.starts_with('#')
          && s[1..].bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
    }

    #[test]
    fn fallback_produces_requested_count()
    {   let fallback = RandomPaletteFallback::new();
        for prompt in ["", "a", "sunset beach", "深海"]
        {   let colors = fallback.generate(prompt, 5);
            assert_eq!(colors.len(), 5);
            assert!(colors.iter().all(|c| is_hex_color(c.as_str())));
        }
        assert!(fallback.generate("x", 0).is_empty());
    }

    #[test]
    fn fallback_is_stable_for_equal_lengths()
    {   let fallback = RandomPaletteFallback::new();
        assert_eq!(
          fallback.generate("sunset", 5),
          fallback.generate("sunset", 5)
        );
        // same byte length collides by construction
        assert_eq!(
          fallback.generate("abcdef", 5),
          fallback.generate("sunset", 5)
        );
        assert_eq!(RandomPaletteFallback::seed_for("深海"), 6);
    }

    #[test]
    fn fallback_keeps_duplicates()
    {   let colors = RandomPaletteFallback::new().generate("sunset beach", 64);
        let mut rng = StdRng::seed_from_u64(12);
        let expected: Vec<ColorCode> = (0..64)
          .map(|_| ColorCode::from_rgb(rng.random_range(0..=0xFF_FFFF)))
          .collect();
        assert_eq!(colors.len(), 64);
        // the raw draw sequence, nothing filtered out
        assert_eq!(colors, expected);
    }

    #[tokio::test]
    async fn service_falls_back_without_key()
    {   let service = PaletteService::new(
          crate::config::ServiceConfig::default()
        );
        let response = service
          .handle(&PaletteRequest { prompt: "sunset beach".to_string() })
          .await
          .expect("valid request");
        assert_eq!(response.colors.len(), 5);
        assert_eq!(
          response.colors,
          RandomPaletteFallback::new().generate("sunset beach", 5)
        );
        assert!(response.description.contains("sunset beach"));
    }

    #[tokio::test]
    async fn service_rejects_empty_prompt()
    {   let service = PaletteService::new(
          crate::config::ServiceConfig::default()
        );
        let result = service
          .handle(&PaletteRequest { prompt: String::new() })
          .await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
    }
}
