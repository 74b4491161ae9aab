/// Server services
pub mod aggregator;
pub mod assistant;
pub mod recommender;

pub use aggregator::MoodAggregator;
pub use assistant::{ChatAssistant, ChatReply};
pub use recommender::{PlaylistRecommender, Recommendation};
