//! GPU context: instance, adapter, device, queue, and the window surface.
//!
//! All GPU-side entities are created during initialization and live for the
//! whole run; the surface is the only piece reconfigured mid-run (on resize).

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
