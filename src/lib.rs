pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod failover;
pub mod client;
pub mod server;

/*

hexpal turns a free-text prompt into a five color palette.

  caller -> PaletteGenerator (chat-completions provider)
         -> on any failure: RandomPaletteFallback
         -> PaletteResponse { colors, timestamp, description }

hexpal/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and policy constants
│   ├── main.rs         # HTTP binary entry
│   ├── error.rs        # Error taxonomy
│   ├── config.rs       # Environment-sourced configuration
│   ├── request.rs      # Service request/response types, ColorCode
│   ├── client.rs       # PaletteGenerator: request building, extraction
│   ├── failover.rs     # Random fallback and the primary/fallback chain
│   ├── server.rs       # axum routes
│   └── providers/
│       ├── mod.rs
│       └── openai.rs   # OpenAI-compatible chat-completions client
└── tests/              # Integration tests against a mock upstream

*/

/// Number of colors in every palette
pub const PALETTE_SIZE: usize = 5;

pub use client::PaletteGenerator;
pub use config::{ServerConfig, ServiceConfig};
pub use error::Error;
pub use failover::{PaletteService, RandomPaletteFallback};
pub use request::{ColorCode, PaletteRequest, PaletteResponse};
