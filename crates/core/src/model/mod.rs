mod activity;
mod auth;
mod choice;
mod ids;
mod selection;
mod stats;
mod word;

pub use activity::ActivitySample;
pub use auth::{AuthToken, SessionContext, UserProfile};
pub use choice::{ChoiceOption, ChoiceSet, ChoiceSetError, QuizItem};
pub use ids::{ParseIdError, UserId, WordId};
pub use selection::Selection;
pub use stats::{ProgressOverview, SessionStats};
pub use word::{Word, WordError};
