mod process;
mod scorer;
mod types;

pub use process::ProcessScorer;
pub use scorer::{INVALID_OUTPUT_MESSAGE, RelayFailure, Scorer, ScorerOutput};
pub use types::{Assessment, PredictionRequest, PredictionResult, WqiClass};
