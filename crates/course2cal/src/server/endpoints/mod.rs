pub mod events;
pub mod parse;
pub mod status;
