//! Recipe Finder Common Library
//!
//! CLIとWeb(WASM)で共有される型とセッションロジック

pub mod backend;
pub mod error;
pub mod ingredients;
pub mod instructions;
pub mod keys;
pub mod panel;
pub mod selection;
pub mod session;
pub mod types;

pub use backend::RecipeBackend;
pub use error::{Error, Result};
pub use ingredients::DetectionStatus;
pub use instructions::{format_instructions, Instructions, NO_INSTRUCTIONS};
pub use keys::KeyCommand;
pub use panel::{RecommendTrigger, ResultPanel};
pub use selection::{Chip, ChipChange, MeatSelection, NONE_LABEL};
pub use session::{PendingRecommendation, Session, UploadTicket};
pub use types::{
    Recipe, RecommendRequest, RecommendResponse, Recommendation, UploadResponse,
};
