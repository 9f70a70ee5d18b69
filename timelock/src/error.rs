use agora_types::{AccountId, OperationId, Timepoint};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelockError {
    #[error("operation {0} is already scheduled")]
    AlreadyScheduled(OperationId),

    #[error("operation {0} is not scheduled")]
    NotFound(OperationId),

    #[error(
        "delay {} is below the minimum delay {}",
        agora_utils::format_ticks(*delay),
        agora_utils::format_ticks(*min_delay)
    )]
    InsufficientDelay { delay: u64, min_delay: u64 },

    #[error("operation {id} is not ready: ready at {ready_at}, now {now}")]
    NotReady {
        id: OperationId,
        ready_at: Timepoint,
        now: Timepoint,
    },

    #[error("operation {id} is waiting on predecessor {predecessor}")]
    MissingDependency {
        id: OperationId,
        predecessor: OperationId,
    },

    #[error("operation {0} has already been executed")]
    AlreadyExecuted(OperationId),

    #[error("caller {caller} is not authorized (expected {expected})")]
    Unauthorized {
        caller: AccountId,
        expected: AccountId,
    },
}
