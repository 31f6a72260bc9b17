//! Join authorization adapters

pub mod allow_list;

pub use allow_list::StaticAllowList;
