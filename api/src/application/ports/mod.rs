pub mod fishnik_repository;
pub mod token_codec;
pub mod user_repository;
