pub mod process;
pub mod results;
