pub mod compiler;
pub mod diff;
pub mod pipeline;
pub mod result;
pub mod runner;
pub mod testcase;

pub use compiler::*;
pub use pipeline::*;
pub use result::*;
pub use runner::*;
pub use testcase::*;
