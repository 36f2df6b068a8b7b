pub mod friend_ledger;
pub mod user_manager_auth;
pub mod user_manager_auth_impl;
