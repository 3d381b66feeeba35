pub mod action_executor;
pub mod config;
pub mod contract;
pub mod error;
pub mod filter;
pub mod helper;
pub mod logging;
pub mod model;
pub mod preferences;
pub mod presenter;
pub mod query_service;
pub mod runtime;
pub mod sources;
pub mod transport;

#[cfg(test)]
mod tests {
    mod filter_latency_test {
        include!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../tests/perf/filter_latency_test.rs"
        ));
    }
}
