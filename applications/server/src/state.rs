/// Shared application state
use crate::services::{ChatAssistant, MoodAggregator, PlaylistRecommender};
use moodtune_core::{
    storage::StorageContext, Clock, IntentClassifier, LanguageModel, PlaylistCatalog,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageContext>,
    pub recommender: Arc<PlaylistRecommender>,
    pub aggregator: Arc<MoodAggregator>,
    pub assistant: Arc<ChatAssistant>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire the services around their external collaborators
    pub fn new(
        storage: Arc<dyn StorageContext>,
        catalog: Arc<dyn PlaylistCatalog>,
        model: Arc<dyn LanguageModel>,
        classifier: IntentClassifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let aggregator = Arc::new(MoodAggregator::new(
            Arc::clone(&storage),
            Arc::clone(&clock),
        ));
        let recommender = Arc::new(PlaylistRecommender::new(
            catalog,
            Arc::clone(&storage),
            Arc::clone(&clock),
        ));
        let assistant = Arc::new(ChatAssistant::new(
            model,
            Arc::clone(&aggregator),
            classifier,
            Arc::clone(&clock),
        ));

        Self {
            storage,
            recommender,
            aggregator,
            assistant,
            clock,
        }
    }
}
