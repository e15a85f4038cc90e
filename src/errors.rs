use thiserror::Error;

use crate::domain::Identity;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Tree is empty: no head node has been set")]
    EmptyTree,

    #[error("Node is already attached to a parent: {0}")]
    AlreadyAttached(Identity),

    #[error("Cycle detected: node cannot become its own descendant: {0}")]
    CycleDetected(Identity),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
