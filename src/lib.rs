//! Keyscribe: reconstruct typed text from keyboard recorder logs
//!
//! This library provides the core functionality for:
//! - Reading newline-delimited keyboard activity logs
//! - Classifying raw key labels (characters, named keys, unknown labels)
//! - Rebuilding typed lines with single-shot shift, backspace and Enter
//! - Writing the reconstructed sentences as a JSON or text document
//!
//! # Architecture
//!
//! ```text
//!                                   ┌──────────────┐
//!                                   │ Recorder log │ (one JSON record per line)
//!                                   └──────────────┘
//!                                            │
//!                                            ▼ RawEvent
//!                                   ┌──────────────┐
//!                                   │    Input     │ malformed lines skipped
//!                                   └──────────────┘
//!                                            │
//!                                            ▼ key_press records
//!          ┌─────────────────────────────────────────────────────────────────┐
//!          │                        Reconstructor                            │
//!          │  shift ──▶ pending      key ──▶ decode ──▶ Effect ──▶ buffer    │
//!          │                                   Enter / end ──▶ finalize      │
//!          └─────────────────────────────────────────────────────────────────┘
//!                                            │
//!                                            ▼ sentences
//!                                   ┌──────────────┐
//!                                   │    Output    │ atomic json/text write
//!                                   └──────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod event;
pub mod input;
pub mod output;
pub mod reconstruct;
pub mod text;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use decode::{decode, Effect};
pub use error::{KeyscribeError, Result};
pub use event::{EventType, KeyToken, NamedKey, RawEvent};
pub use output::{ExportFormat, ReconstructionResult, ResultWriter};
pub use reconstruct::{reconstruct, Reconstruction, ReconstructStats, Reconstructor};
