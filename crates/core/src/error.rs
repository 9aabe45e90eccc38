use thiserror::Error;

use crate::model::{TallyError, WordError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Tally(#[from] TallyError),
}
