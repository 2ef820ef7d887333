//! Snapsort pages through the images of a source folder and copies the
//! keepers into an output folder, one key press per decision. Viewed
//! images can optionally be deleted from the source folder on exit.

pub mod app;
pub mod components;
pub mod config;
pub mod image_pipeline;
pub mod message;
pub mod model;
pub mod notification;
pub mod views;
