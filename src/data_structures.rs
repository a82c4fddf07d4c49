use chrono::{DateTime, Utc};
use std::sync::Arc;

// --- Core Data Structures ---

// The dashboard page, rendered once at startup and never mutated
#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub html: String,
    pub has_data: bool,
    pub rows: usize,
    pub generated_at: DateTime<Utc>,
}

// --- Type Aliases for Shared State ---

pub type SharedPage = Arc<RenderedPage>;
