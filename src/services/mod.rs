pub mod aggregator;
pub mod assistant;
pub mod classifier;
pub mod journal;
pub mod prompts;
pub mod recommender;
pub mod summary_builder;
pub mod week;
