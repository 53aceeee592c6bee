//! Port contracts for user persistence.

mod repository;

pub use repository::{
    UserFilter, UserListQuery, UserRepository, UserRepositoryError, UserRepositoryResult,
    UserSortField,
};
