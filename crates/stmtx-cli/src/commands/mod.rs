pub mod config;
pub mod extract;
pub mod output;
pub mod parse;
pub mod preview;
pub mod search;
