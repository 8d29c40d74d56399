pub mod edits;
pub mod pages;
