//! Lacquerware Studio Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック

pub mod types;
pub mod prompts;
pub mod gemini;
pub mod client;
pub mod session;
pub mod download;
pub mod error;

pub use types::{
    BaseMaterial, Decoration, DesignRecord, GeneratedResult, ImageResource, Motif, VesselShape,
    Vocabulary,
};
pub use prompts::compile_prompt;
pub use gemini::{GEMINI_IMAGE_MODEL, GeminiRequest, GeminiResponse, api_error, extract_image};
pub use client::{Transport, generate_image};
pub use session::{PreviewKey, PreviewState, RequestTicket, SessionState};
pub use download::{decode_image, download_file_name};
pub use error::{Error, Result};
