//! Static, process-wide catalogs: the daily questionnaire and the
//! micro-action pool. Both are immutable tables keyed by stable string ids.

pub mod micro_actions;
pub mod questions;

pub use micro_actions::{MicroAction, MicroActionDef, Priority, MICRO_ACTIONS};
pub use questions::{Category, Model, Question, QUESTIONS};
