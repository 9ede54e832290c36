pub mod context_remote;
pub mod submit_remote;

pub use context_remote::{ContextOutcome, load_context, request_reset};
#[cfg(not(target_arch = "wasm32"))]
pub use context_remote::{spawn_context_load, spawn_reset};
pub use submit_remote::{
    SubmitError, SubmitOutcome, SubmitRequest, SubmitResponse, spawn_submission,
};
