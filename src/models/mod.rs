//! Response shapes returned by the travel backend.
//!
//! These are plain data-transfer types. They are decoded once from a
//! response body and handed to the caller unchanged.

pub mod assistant;
pub mod history;
pub mod recommendation;
pub mod user;

pub use assistant::{AssistantResult, DayPlan, Place};
pub use history::SearchHistoryEntry;
pub use recommendation::{Recommendation, RecommendationResult};
pub use user::{UserId, UserProfile};
