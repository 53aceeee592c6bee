//! In-memory repository integration tests.
//!
//! Tests are organised into modules by functionality:
//! - `association_tests`: Association lifecycle and cascade behaviour
//! - `user_tests`: User lifecycle and reference-holding rules
//! - `task_lifecycle_tests`: Task creation, relations, update, removal
//! - `pagination_tests`: Shared listing engine behaviour across entities

mod in_memory {
    pub mod helpers;

    mod association_tests;
    mod pagination_tests;
    mod task_lifecycle_tests;
    mod user_tests;
}
