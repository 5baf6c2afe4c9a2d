pub mod inference;
pub mod io;
pub mod system;
