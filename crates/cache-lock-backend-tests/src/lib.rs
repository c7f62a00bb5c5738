mod testcase;

#[cfg(test)]
mod backend;
#[cfg(test)]
mod lock;

pub use testcase::{backend_test_case, TestResult, REDIS_ADDRESS_VAR};
