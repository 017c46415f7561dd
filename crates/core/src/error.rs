use thiserror::Error;

use crate::calendar::CalendarError;
use crate::model::{ChoiceSetError, WordError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    ChoiceSet(#[from] ChoiceSetError),
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
