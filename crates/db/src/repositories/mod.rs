pub mod search_count_repo;

pub use search_count_repo::SearchCountRepo;
