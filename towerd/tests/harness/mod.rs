//! Integration Test Harness
//!
//! `TestServer` spawns a real towerd server on a random port inside the test
//! process and drives it over HTTP, the way the browser UI does.
//!
//! # Example
//!
//! ```rust,ignore
//! use harness::TestServer;
//!
//! #[tokio::test]
//! async fn test_fireball() {
//!     let server = TestServer::start().await.unwrap();
//!     server.preset("8d6").await.unwrap();
//!     let roll = server.roll_tray().await.unwrap();
//!     assert!((8..=48).contains(&roll.total));
//! }
//! ```

mod server;

#[allow(unused_imports)]
pub use server::{Roll, TestServer};
