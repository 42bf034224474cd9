pub mod fishniks;
pub mod users;
