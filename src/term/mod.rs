//! Terminal input and output

mod display;
mod input;

pub use display::AsciiDisplay;
pub use input::{InputContext, InputFrame};
