pub mod friendship_entity;
pub mod user_entity;
