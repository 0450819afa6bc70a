pub mod cli;
pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod runner;
pub mod ui;
pub mod warning;

pub use error::{Result, Svn2GitError};
