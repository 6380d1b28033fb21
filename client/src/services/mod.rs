//! Client-side services for the plant pairing workflow

pub mod input_form;
pub mod pair_cache;
pub mod search;
pub mod workflow;

pub use input_form::{PlantInputForm, Submission};
pub use pair_cache::{PairCache, CACHE_KEY};
pub use search::{SearchCoordinator, SearchPhase, SearchSnapshot};
pub use workflow::{AppState, TopPairsSource, ViewState, WorkflowController};
