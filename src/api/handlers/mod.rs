pub mod notices;
pub mod root;
