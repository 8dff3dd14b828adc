pub mod extractor;
pub mod fetcher;
pub mod normalizer;
pub mod recipes;
pub mod session;
