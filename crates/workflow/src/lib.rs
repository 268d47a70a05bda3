//! Hand-off of running queries to the tracking state machine.

pub mod input;
pub mod starter;

pub use input::{QueryExecutionRef, WorkflowInput};
pub use starter::{StepFunctionsStarter, WorkflowError, WorkflowStarter};
