//! Diesel schema for pull request persistence.

diesel::table! {
    /// Pull request records.
    pull_requests (pull_request_id) {
        /// Caller-supplied identifier.
        #[max_length = 255]
        pull_request_id -> Varchar,
        /// Display name.
        #[max_length = 255]
        pull_request_name -> Varchar,
        /// Author user identifier.
        #[max_length = 255]
        author_id -> Varchar,
        /// Lifecycle status (`OPEN` or `MERGED`).
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Merge timestamp, set once merged.
        merged_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Current reviewer set of each pull request.
    assigned_reviewers (pull_request_id, reviewer_id) {
        /// Owning pull request.
        #[max_length = 255]
        pull_request_id -> Varchar,
        /// Assigned reviewer.
        #[max_length = 255]
        reviewer_id -> Varchar,
        /// Zero-based assignment order.
        position -> Int4,
    }
}

diesel::allow_tables_to_appear_in_same_query!(pull_requests, assigned_reviewers);
