use super::{DecodedImage, downsample_rgba, mip_level_count};

/// Creates the fragment-stage binding layout for a sampled quad texture.
///
/// Standalone so the pipeline can be linked before any texture exists; the
/// layout describes the binding shape, not a particular texture.
pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glint quad texture bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// A GPU texture with its full mipmap chain, sampler, and fragment binding.
pub struct Texture {
    pub width: u32,
    pub height: u32,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl Texture {
    /// Uploads a decoded image as an sRGB texture with all mip levels.
    ///
    /// Consumes the image: the CPU-side pixel buffer is owned here for the
    /// duration of the upload and freed exactly once when this function
    /// returns. A second release is unrepresentable.
    ///
    /// Sampling policy: repeat wrap on both axes, linear minification and
    /// magnification, linear between mip levels.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: DecodedImage,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let DecodedImage { width, height, channels: _, bytes } = image;
        let levels = mip_level_count(width, height);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glint quad texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Level 0 is the decoded image; each further level is box-filtered
        // from the previous one on the CPU and written individually.
        let mut level_bytes = bytes;
        let (mut w, mut h) = (width, height);

        for level in 0..levels {
            if level > 0 {
                let (next, nw, nh) = downsample_rgba(&level_bytes, w, h);
                level_bytes = next;
                w = nw;
                h = nh;
            }

            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level_bytes,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(w * 4),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d {
                    width: w,
                    height: h,
                    depth_or_array_layers: 1,
                },
            );
        }

        log::info!("uploaded {width}x{height} texture with {levels} mip levels");

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glint quad sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint quad texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            width,
            height,
            texture,
            bind_group,
        }
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn mip_level_count(&self) -> u32 {
        self.texture.mip_level_count()
    }
}
