pub mod line_merge;
pub mod locate;
pub mod overlay;
pub mod query;
pub mod relate;
