//! Orchestration services for the user context.

mod lifecycle;

pub use lifecycle::{
    CreateUserRequest, UpdateUserRequest, UserLifecycleError, UserLifecycleResult,
    UserLifecycleService,
};
