//! Inkdrift - a dithering editor core
//!
//! Headless engine for an image-dithering editor: the Atkinson pipeline
//! that turns imports into recolored 1-bit artifacts, and the
//! physics-backed canvas that drifts them around under a pan/zoom camera.
//! This library exposes modules for integration testing.

pub mod canvas;
pub mod error;
pub mod models;
pub mod physics;
pub mod rendering;
pub mod services;
