//! docnav: browse a markdown documentation set from the terminal
//!
//! The documentation set is a directory of markdown files served over HTTP,
//! with a `data.md` index listing categories (`### **Title**`) and numbered
//! topics (`1. **Title**`). Topic titles map to file names via [`domain::slugify`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
