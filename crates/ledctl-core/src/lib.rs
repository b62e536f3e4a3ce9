//! ledctl-core - color pipeline, matrix geometry, chipset table and framebuffer pool.
//!
//! This crate provides the pure, allocation-light building blocks shared by the
//! local pixel driver and the DDP transmitter:
//!
//! - [`gamma`] - 8-bit gamma correction with precomputed tables for common exponents
//! - [`color`] - HSV↔RGB, RGB→RGBW white extraction, color-order permutation
//! - [`geometry`] - linear/serpentine 2-D index mapping for matrix-shaped strips
//! - [`chipset`] - the closed table of supported LED chipsets and their timing
//! - [`framebuffer`] - a keyed pool of owned RGB buffers
//!
//! # Design
//!
//! Everything in [`gamma`], [`color`] and [`geometry`] is a total, allocation-free
//! function: no error path, no partial result. [`framebuffer::FramebufferPool`] is
//! the one piece of shared mutable state, and it is guarded by a single mutex.

pub mod chipset;
pub mod color;
pub mod framebuffer;
pub mod gamma;
pub mod geometry;

pub use chipset::{BitTiming, Chipset, ChipsetInfo};
pub use color::{ColorOrder, hsv_to_rgb, permute_color_order, process_pixel, rgb_to_hsv, rgb_to_rgbw, unpermute_color_order};
pub use framebuffer::{Framebuffer, FramebufferPool};
pub use gamma::{apply_gamma, apply_gamma_pixel};
pub use geometry::MatrixGeometry;
