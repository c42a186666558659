pub mod naming;
pub mod parsing;

pub use naming::*;
pub use parsing::ParsingError;
