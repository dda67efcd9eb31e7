//! Mock server infrastructure for testing
//!
//! This module provides a shared mockito server for parallel test execution
//! plus a helper for stubbing the GitHub release-list endpoint.

use lazy_static::lazy_static;
use mockito::{Mock, Server, ServerGuard};
use std::sync::Mutex;

lazy_static! {
    /// Global shared mockito server for all tests
    ///
    /// Initialized once and shared across all test threads, so tests only
    /// need distinct owner/repo paths to stay independent.
    pub static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Get reference to shared mock server
///
/// # Best Practices for Avoiding Mock Collisions
///
/// 1. **Use unique paths per test**: mock a different `owner/repo` per test
/// 2. **Mock cleanup is automatic**: mocks are removed when the `Mock` drops
/// 3. **Lock scope matters**: hold the lock only while creating mocks
///
/// # Examples
///
/// ```no_run
/// use kozmo_setup_testkit::{get_shared_mock_server, mock_release_feed};
///
/// let (url, _mock) = {
///     let mut server = get_shared_mock_server();
///     let mock = mock_release_feed(&mut server, "kozmoai", "unique-repo", "[]");
///     (server.url(), mock)
/// }; // Lock released here
/// ```
pub fn get_shared_mock_server() -> std::sync::MutexGuard<'static, ServerGuard> {
    SHARED_MOCK_SERVER.lock().unwrap_or_else(|poisoned| {
        // Mockito server remains functional after a panic; unique paths keep tests isolated
        poisoned.into_inner()
    })
}

/// Stubs `GET /repos/{owner}/{repo}/releases` with the given JSON body
///
/// The returned mock expects exactly one request; call `assert()` on it to
/// verify the feed was fetched once.
pub fn mock_release_feed(server: &mut ServerGuard, owner: &str, repo: &str, body: &str) -> Mock {
    server
        .mock("GET", format!("/repos/{}/{}/releases", owner, repo).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create()
}
