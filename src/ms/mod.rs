//! The ms macro layer: command formatting, block emitters and table
//! alignment.

pub mod align;
mod command;
pub mod emit;

pub use align::{align, AlignedTable};
pub use command::{ms_print, Arg, Macro};
