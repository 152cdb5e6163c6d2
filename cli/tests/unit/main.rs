//! Unit tests for birelay-deploy
//!
//! These tests drive the application services through in-memory fakes and
//! a temp-dir filesystem. Nothing here needs root, a network, or systemd.

mod fakes;

mod secrets;
