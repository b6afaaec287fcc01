pub mod constants;
pub mod url;
