pub mod fishnik_repository_memory;
pub mod user_repository_memory;

pub use fishnik_repository_memory::MemoryFishnikRepository;
pub use user_repository_memory::MemoryUserRepository;
