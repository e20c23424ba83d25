// Shader module loading
//
// Vulkan consumes SPIR-V bytecode. Shaders are compiled ahead of time by
// build.rs and read from disk at pipeline creation.

use super::error::{RendererError, Result};
use ash::vk;
use std::io::Cursor;
use std::path::Path;

/// Read a whole file as raw bytes
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| RendererError::FileOpenFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Reinterpret SPIR-V bytes as words. Handles unaligned buffers and rejects
/// sizes that are not a multiple of 4.
pub fn spirv_words(code: &[u8]) -> Result<Vec<u32>> {
    ash::util::read_spv(&mut Cursor::new(code))
        .map_err(|e| RendererError::ShaderModuleCreationFailed(e.to_string()))
}

/// Create a shader module from SPIR-V bytes
pub fn create_shader_module(device: &ash::Device, code: &[u8]) -> Result<vk::ShaderModule> {
    let words = spirv_words(code)?;
    let create_info = vk::ShaderModuleCreateInfo::builder().code(&words);

    unsafe { device.create_shader_module(&create_info, None) }
        .map_err(|e| RendererError::ShaderModuleCreationFailed(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_file_open_failed() {
        let err = read_file("shaders/definitely_not_here.spv").unwrap_err();
        match err {
            RendererError::FileOpenFailed { path, source } => {
                assert!(path.ends_with("definitely_not_here.spv"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reads_existing_file() {
        let bytes = read_file("Cargo.toml").unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn spirv_words_are_little_endian() {
        // SPIR-V magic number followed by one more word
        let bytes = [0x03, 0x02, 0x23, 0x07, 0x00, 0x00, 0x01, 0x00];
        assert_eq!(spirv_words(&bytes).unwrap(), vec![0x0723_0203, 0x0001_0000]);
    }

    #[test]
    fn spirv_size_must_be_word_multiple() {
        let bytes = [0x03, 0x02, 0x23];
        assert!(matches!(
            spirv_words(&bytes),
            Err(RendererError::ShaderModuleCreationFailed(_))
        ));
    }
}
