//! BoxRow Web Server
//!
//! Serves the box-row page and owns the rotating cell sequence. The browser
//! never computes a rotation; it POSTs to this server and rewrites the boxes
//! from the response.

pub mod page;
pub mod server;
pub mod static_files;

pub use server::WebServer;
