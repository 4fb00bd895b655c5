pub mod brick;
pub mod quote;
