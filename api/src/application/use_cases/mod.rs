pub mod auth;
pub mod fishniks;
