//! Scenario tests across generator, queue and factory

mod concurrent_tests;
mod timing_tests;
