use crate::error::HarnessError;

use super::{ShaderSource, ShaderStage};

/// A successfully compiled shader module.
///
/// Consumed by value at link time; the pipeline retains the compiled code,
/// so the module itself is released as soon as linking finishes.
pub struct CompiledShader {
    pub module: wgpu::ShaderModule,
    pub stage: ShaderStage,
}

/// Compiles one shader stage, capturing the driver's diagnostic log.
///
/// wgpu reports shader rejection through validation error scopes rather than
/// a return value; the scope push/pop brackets exactly the module creation
/// so nothing else can be attributed to this stage. Warnings are logged and
/// never fail the build.
pub fn compile_stage(
    device: &wgpu::Device,
    source: &ShaderSource,
) -> Result<CompiledShader, HarnessError> {
    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("glint {} shader", source.stage)),
        source: wgpu::ShaderSource::Wgsl(source.text.as_str().into()),
    });

    if let Some(err) = pollster::block_on(error_scope.pop()) {
        return Err(HarnessError::Compile {
            stage: source.stage,
            log: err.to_string(),
        });
    }

    for msg in pollster::block_on(module.get_compilation_info()).messages {
        match msg.message_type {
            wgpu::CompilationMessageType::Error => {
                // Errors are surfaced by the scope above; anything reaching
                // here is duplicated detail worth keeping in the log.
                log::error!("{} shader: {}", source.stage, msg.message)
            }
            wgpu::CompilationMessageType::Warning => {
                log::warn!("{} shader: {}", source.stage, msg.message)
            }
            wgpu::CompilationMessageType::Info => {
                log::debug!("{} shader: {}", source.stage, msg.message)
            }
        }
    }

    log::info!("compiled {} shader from {}", source.stage, source.path.display());

    Ok(CompiledShader {
        module,
        stage: source.stage,
    })
}
