//! Local HTTP file server for a browser game's assets.
//!
//! Every response carries permissive CORS headers, and recognized audio files
//! answer `Range` requests with `206 Partial Content` so media elements can
//! seek. The `get-sounds` binary prints the checklist of audio files the game
//! expects.

pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
