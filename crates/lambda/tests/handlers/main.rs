//! Handler tests for relay-lambda.
//!
//! Every AWS service is replaced by a recording mock, so these run without
//! credentials or network access.

mod mocks;
