pub mod tracingx;
pub mod wrap;
