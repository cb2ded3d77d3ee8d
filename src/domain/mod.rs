pub mod call;
pub mod candidate;
pub mod client;
pub mod event;
pub mod types;
