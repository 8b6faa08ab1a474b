//! Frame drawing: color model, viewport placement, the surface contract and the CPU rasterizer.

pub(crate) mod backend;
pub(crate) mod color;
pub(crate) mod cpu;
pub(crate) mod viewport;
