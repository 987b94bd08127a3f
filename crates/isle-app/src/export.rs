//! PNG encoding of preview images.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use isle_config::PreviewConfig;
use isle_terrain::Island;
use isle_terrain::preview::{
    DebugImage, render_land_preview, render_noise_preview, render_quadtree_overlay,
};

/// Errors from writing a preview PNG.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The output file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Output path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Encode `image` as an 8-bit RGBA PNG into `writer`.
pub fn encode_png<W: Write>(image: &DebugImage, writer: W) -> Result<(), ExportError> {
    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.pixels)?;
    writer.finish()?;
    Ok(())
}

/// Write `image` to `path` as PNG.
pub fn write_png(image: &DebugImage, path: &Path) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    encode_png(image, BufWriter::new(file))
}

/// Write every PNG preview `config` names and return the paths written.
pub fn write_previews(
    island: &Island,
    config: &PreviewConfig,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    if let Some(path) = &config.png_path {
        write_png(&render_land_preview(island.land_mask(), config.flip_y), path)?;
        written.push(path.clone());
    }
    if let Some(path) = &config.noise_png_path {
        write_png(&render_noise_preview(island.noise_field()), path)?;
        written.push(path.clone());
    }
    if let Some(path) = &config.quadtree_png_path {
        let image = render_quadtree_overlay(island.quadtree(), island.land_mask());
        write_png(&image, path)?;
        written.push(path.clone());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use isle_terrain::{IslandParams, NoiseParams, generate_all};

    use super::*;

    fn small_island() -> Island {
        generate_all(&IslandParams {
            noise: NoiseParams {
                width: 12,
                height: 10,
                seed: 6,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap()
    }

    fn decode(path: &Path) -> (u32, u32, Vec<u8>) {
        let decoder = png::Decoder::new(std::io::BufReader::new(File::open(path).unwrap()));
        let mut reader = decoder.read_info().unwrap();
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels).unwrap();
        pixels.truncate(info.buffer_size());
        (info.width, info.height, pixels)
    }

    #[test]
    fn test_write_previews_writes_each_configured_image() {
        let temp = tempfile::tempdir().unwrap();
        let island = small_island();
        let config = PreviewConfig {
            png_path: Some(temp.path().join("land.png")),
            noise_png_path: Some(temp.path().join("noise.png")),
            quadtree_png_path: Some(temp.path().join("tree.png")),
            ..Default::default()
        };

        let written = write_previews(&island, &config).unwrap();
        assert_eq!(written.len(), 3);

        let (w, h, noise) = decode(&temp.path().join("noise.png"));
        assert_eq!((w, h), (12, 10));
        assert_eq!(noise, render_noise_preview(island.noise_field()).pixels);

        let (_, _, tree) = decode(&temp.path().join("tree.png"));
        let expected = render_quadtree_overlay(island.quadtree(), island.land_mask());
        assert_eq!(tree, expected.pixels);

        let (_, _, land) = decode(&temp.path().join("land.png"));
        assert_eq!(land, render_land_preview(island.land_mask(), true).pixels);
    }

    #[test]
    fn test_write_previews_skips_unset_paths() {
        let temp = tempfile::tempdir().unwrap();
        let config = PreviewConfig {
            noise_png_path: Some(temp.path().join("noise.png")),
            ..Default::default()
        };
        let written = write_previews(&small_island(), &config).unwrap();
        assert_eq!(written, vec![temp.path().join("noise.png")]);
        assert!(!temp.path().join("land.png").exists());
    }

    #[test]
    fn test_encoded_png_decodes_with_same_pixels() {
        let mut image = DebugImage::new(3, 2);
        image.set_pixel(0, 0, [51, 204, 51]);
        image.set_pixel(2, 1, [25, 76, 204]);

        let mut buf = Vec::new();
        encode_png(&image, &mut buf).unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(buf));
        let mut reader = decoder.read_info().unwrap();
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels).unwrap();
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(&pixels[..info.buffer_size()], image.pixels.as_slice());
    }

    #[test]
    fn test_write_png_to_missing_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing").join("island.png");
        let image = DebugImage::new(1, 1);
        assert!(matches!(
            write_png(&image, &path),
            Err(ExportError::Io { .. })
        ));
    }
}
