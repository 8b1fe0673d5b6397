//! 应用层

mod order_workflow;

pub use order_workflow::OrderWorkflow;
