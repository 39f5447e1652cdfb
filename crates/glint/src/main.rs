use std::path::{Path, PathBuf};

use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::{Harness, HarnessConfig, RenderMode};

/// Texture the harness shows when present; absent, the quad renders flat.
const TEXTURE_PATH: &str = "assets/quad.png";

const VERTEX_SHADER: &str = "shaders/quad.vert.wgsl";
const FRAGMENT_SHADER: &str = "shaders/quad.frag.wgsl";
const FRAGMENT_SHADER_TEXTURED: &str = "shaders/quad_textured.frag.wgsl";

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let arg = std::env::args().nth(1);
    let mode = RenderMode::from_arg(arg.as_deref());
    if mode == RenderMode::Wireframe {
        log::info!("running in wireframe mode");
    }

    let texture = Path::new(TEXTURE_PATH)
        .exists()
        .then(|| PathBuf::from(TEXTURE_PATH));

    // The textured fragment shader samples a binding that only exists when
    // a texture is configured, so the shader choice follows the probe.
    let fragment_shader = if texture.is_some() {
        PathBuf::from(FRAGMENT_SHADER_TEXTURED)
    } else {
        PathBuf::from(FRAGMENT_SHADER)
    };

    Harness::run(HarnessConfig {
        title: "glint".to_string(),
        vertex_shader: PathBuf::from(VERTEX_SHADER),
        fragment_shader,
        texture,
        mode,
        ..HarnessConfig::default()
    })
}
