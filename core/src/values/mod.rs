//! Runtime values produced by evaluation and supplied by the host.

mod value;

pub use value::Value;

#[cfg(test)]
mod value_test;
