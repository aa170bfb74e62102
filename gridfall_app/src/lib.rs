//! `gridfall_app`
//!
//! Console frontend:
//! - Command-line parsing and config loading
//! - Stdin command channel feeding the frame loop
//! - ASCII view of the container and falling piece

pub mod view;
