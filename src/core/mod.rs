pub mod error;
pub mod format;
pub mod io;
pub mod model;
