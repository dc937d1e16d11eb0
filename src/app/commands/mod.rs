pub mod collect;
pub mod latest;
pub mod process;
