mod server;

pub use server::{
    analyze_handler, analyze_pair_handler, compare_handler, health_handler, router, ApiError,
    ApiJson, AppState, ErrorBody, PairAnalysis, RecordingPair, SharedState, SnapshotPair, WebServer,
};
