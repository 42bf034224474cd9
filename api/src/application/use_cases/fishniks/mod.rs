pub mod create_fishnik;
pub mod delete_fishnik;
pub mod get_fishnik;
pub mod list_fishniks;
pub mod update_fishnik;
