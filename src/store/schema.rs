//! Diesel schema for the relational store.

diesel::table! {
    /// Association records.
    associations (id) {
        /// Association identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// CNPJ tax registration.
        #[max_length = 18]
        cnpj -> Varchar,
        /// Active flag.
        status -> Bool,
    }
}

diesel::table! {
    /// User records. Identity comes from the upstream provider; no
    /// credential columns exist.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Unique e-mail address.
        #[max_length = 255]
        email -> Varchar,
        /// Platform role.
        #[max_length = 50]
        role -> Varchar,
    }
}

diesel::table! {
    /// Task records. `association_id` cascades on association deletion;
    /// `creator_id` restricts user deletion.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Detailed description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority axis.
        #[max_length = 50]
        priority -> Varchar,
        /// Optional kind axis.
        #[max_length = 50]
        kind -> Nullable<Varchar>,
        /// Creation timestamp, immutable after insert.
        created_at -> Timestamptz,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Creator reference.
        creator_id -> Uuid,
        /// Owning association reference.
        association_id -> Uuid,
    }
}

diesel::table! {
    /// Task team join table. Both sides cascade so membership rows never
    /// outlive either end of the relation.
    task_team_users (task_id, user_id) {
        /// Task side of the membership.
        task_id -> Uuid,
        /// User side of the membership.
        user_id -> Uuid,
    }
}

diesel::joinable!(tasks -> users (creator_id));
diesel::joinable!(tasks -> associations (association_id));
diesel::joinable!(task_team_users -> tasks (task_id));
diesel::joinable!(task_team_users -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(associations, users, tasks, task_team_users);
