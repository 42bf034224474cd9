pub mod crypto;
pub mod db;
pub mod memory;
