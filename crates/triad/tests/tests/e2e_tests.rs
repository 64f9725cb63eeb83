#[path = "e2e/full_session.rs"]
mod full_session;

#[path = "e2e/degraded_paths.rs"]
mod degraded_paths;

#[path = "e2e/corrupted_reference.rs"]
mod corrupted_reference;

#[path = "e2e/cache_isolation.rs"]
mod cache_isolation;
