use std::{fs, path::Path, time::Instant};

use clap::ValueEnum;
use tiny_skia::Pixmap;
use usvg::Tree;

use crate::{
    error::{Error, Result},
    render::scene::Scene,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Guess the format from a file extension, falling back to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

/// Rasterize the scene at its native pixel size. Text uses the fonts installed on the system.
pub fn rasterize(scene: &Scene) -> Result<Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = Tree::from_str(&scene.svg, &opt)?;

    let mut pixmap =
        Pixmap::new(scene.width_px, scene.height_px).ok_or(Error::Raster(scene.width_px, scene.height_px))?;
    let size = tree.size().to_int_size();
    let scale_x = scene.width_px as f32 / size.width().max(1) as f32;
    let scale_y = scene.height_px as f32 / size.height().max(1) as f32;
    let transform = tiny_skia::Transform::from_scale(scale_x, scale_y);
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, transform, &mut pm);
    Ok(pixmap)
}

pub fn encode_png(scene: &Scene) -> Result<Vec<u8>> {
    let pixmap = rasterize(scene)?;
    pixmap.encode_png().map_err(|e| Error::Encode(e.to_string()))
}

/// Write the scene to `path` as PNG or as the SVG source.
pub fn write_image(scene: &Scene, path: impl AsRef<Path>, format: ImageFormat) -> Result<()> {
    let path = path.as_ref();
    let started = Instant::now();
    let bytes = match format {
        ImageFormat::Png => encode_png(scene)?,
        ImageFormat::Svg => scene.svg.clone().into_bytes(),
    };
    fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
    log::info!(
        "Wrote {}x{} {:?} image to {} ({} bytes) in {:?}",
        scene.width_px,
        scene.height_px,
        format,
        path.display(),
        bytes.len(),
        started.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RenderConfig,
        input::source::GraphFile,
        layout::spring_layout,
        render::{draw_graph, style::Canvas},
    };

    fn small_config() -> RenderConfig {
        RenderConfig {
            canvas: Canvas {
                width_in: 2.0,
                height_in: 1.5,
                dpi: 60.0,
                margin: 0.1,
            },
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_png_has_canvas_size() {
        let graph = GraphFile::parse(include_str!("../../test_data/graph_data.json"))
            .and_then(GraphFile::into_graph)
            .expect("sample should build");
        let config = small_config();
        let scene = draw_graph(&graph, &spring_layout(&graph, &config.layout), &config).expect("scene");

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("graph_visualization.png");
        write_image(&scene, &path, ImageFormat::Png).expect("png should be written");

        let bytes = fs::read(&path).expect("png should exist");
        let decoded = Pixmap::decode_png(&bytes).expect("valid png");
        assert_eq!((decoded.width(), decoded.height()), (120, 90));
    }

    #[test]
    fn test_single_teacher_is_green() {
        // Empty label so no glyph covers the centre pixel
        let graph = GraphFile::parse(r#"{"nodes": [{"id": 1, "label": ""}], "edges": []}"#)
            .and_then(GraphFile::into_graph)
            .expect("graph");
        let config = RenderConfig {
            teacher_prefixes: vec![String::new()],
            ..small_config()
        };
        let scene = draw_graph(&graph, &spring_layout(&graph, &config.layout), &config).expect("scene");
        assert_eq!(scene.teachers_drawn, 1);

        let pixmap = rasterize(&scene).expect("rasterize");
        let center = pixmap.pixel(60, 45).expect("pixel in bounds").demultiply();
        // lightgreen (144, 238, 144) at 0.9 opacity over white
        assert!((center.red() as i32 - 155).abs() <= 3);
        assert!((center.green() as i32 - 240).abs() <= 3);
        assert!((center.blue() as i32 - 155).abs() <= 3);

        let corner = pixmap.pixel(0, 0).expect("pixel in bounds").demultiply();
        assert_eq!((corner.red(), corner.green(), corner.blue()), (255, 255, 255));
    }

    #[test]
    fn test_svg_output_and_format_guess() {
        let graph = GraphFile::parse(r#"{"nodes": [{"id": 1, "label": "A"}], "edges": []}"#)
            .and_then(GraphFile::into_graph)
            .expect("graph");
        let config = small_config();
        let scene = draw_graph(&graph, &spring_layout(&graph, &config.layout), &config).expect("scene");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("graph.svg");
        write_image(&scene, &path, ImageFormat::from_path(&path)).expect("svg should be written");
        let written = fs::read_to_string(&path).expect("svg should exist");
        assert_eq!(written, scene.svg);

        assert_eq!(ImageFormat::from_path(Path::new("out.SVG")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("out.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("out")), ImageFormat::Png);
    }

    #[test]
    fn test_unwritable_path() {
        let graph = GraphFile::parse(r#"{"nodes": [], "edges": []}"#)
            .and_then(GraphFile::into_graph)
            .expect("graph");
        let config = small_config();
        let scene = draw_graph(&graph, &spring_layout(&graph, &config.layout), &config).expect("scene");
        let err = write_image(&scene, "/nonexistent/dir/out.svg", ImageFormat::Svg)
            .expect_err("directory does not exist");
        assert!(matches!(err, Error::Io { .. }));
    }
}
