//! Texture loading and upload.
//!
//! Decoding is delegated to the `image` crate; upload converts the decoded
//! pixels into a GPU texture with a full CPU-generated mipmap chain and a
//! repeat-wrap, trilinear sampling policy.

mod decode;
mod mips;
mod upload;

pub use decode::DecodedImage;
pub use mips::{downsample_rgba, mip_level_count};
pub use upload::{Texture, bind_group_layout};
