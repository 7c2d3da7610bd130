pub mod cli;
pub mod screen;
