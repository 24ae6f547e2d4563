//! Integration tests - full gestures driven through `Canvas`.

mod autoscroll_tests;
mod connection_tests;
mod lifecycle_tests;
mod wheel_tests;
