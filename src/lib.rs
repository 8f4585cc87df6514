//! Ekskul Register — extracurricular registration form and its submission client.

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod submit;
