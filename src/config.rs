/*!
Render settings.

Values come from the built-in defaults, optionally overridden by a TOML file, then by
command line flags. Every section and key in the file is optional:

```toml
teacher_prefixes = ["Sir", "Maam", "Dr"]

[layout]
k = 0.2
iterations = 50
seed = 7

[canvas]
dpi = 150

[style]
student_color = "#87ceeb"
```
*/

use std::{fs, path::Path};

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    graph::node::DEFAULT_TEACHER_PREFIXES,
    layout::LayoutSettings,
    render::style::{Canvas, Style},
};

/// Where the picture goes when no output path is given.
pub const DEFAULT_OUTPUT: &str = "graph_visualization.png";
/// Graph file read when no input path is given.
pub const DEFAULT_INPUT: &str = "graph_data.json";
/// Largest canvas side in pixels. Bigger pictures would need gigabytes of pixel memory.
pub const MAX_CANVAS_PX: u32 = 16_384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub teacher_prefixes: Vec<String>,
    pub layout: LayoutSettings,
    pub canvas: Canvas,
    pub style: Style,
}

/// Command line flags that take precedence over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct RenderOverrides {
    /// Seed for the initial node placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of layout iterations
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Optimal distance between nodes
    #[arg(short)]
    pub k: Option<f64>,

    /// Resolution in dots per inch
    #[arg(long)]
    pub dpi: Option<f32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            teacher_prefixes: DEFAULT_TEACHER_PREFIXES.iter().map(|p| p.to_string()).collect(),
            layout: LayoutSettings::default(),
            canvas: Canvas::default(),
            style: Style::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RenderConfig = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded render settings from {}", path.display());
        Ok(config)
    }

    /// Apply flags given on the command line, then check the result.
    pub fn apply_overrides(&mut self, overrides: &RenderOverrides) -> Result<()> {
        if let Some(seed) = overrides.seed {
            self.layout.seed = seed;
        }
        if let Some(iterations) = overrides.iterations {
            self.layout.iterations = iterations;
        }
        if let Some(k) = overrides.k {
            self.layout.k = k;
        }
        if let Some(dpi) = overrides.dpi {
            self.canvas.dpi = dpi;
        }
        self.validate()
    }

    /// Reject settings that cannot produce a picture.
    pub fn validate(&self) -> Result<()> {
        let canvas = &self.canvas;
        if !(canvas.width_in > 0.0 && canvas.height_in > 0.0 && canvas.dpi > 0.0) {
            return Err(Error::Config(format!(
                "canvas must have a positive size, got {}x{} in at {} dpi",
                canvas.width_in, canvas.height_in, canvas.dpi
            )));
        }
        // f32 -> u32 casts saturate, so huge or infinite sizes land above the cap too
        if canvas.width_px() > MAX_CANVAS_PX || canvas.height_px() > MAX_CANVAS_PX {
            return Err(Error::Config(format!(
                "canvas of {}x{} px exceeds the {MAX_CANVAS_PX} px limit per side",
                canvas.width_px(),
                canvas.height_px()
            )));
        }
        if !(self.layout.k > 0.0) {
            return Err(Error::Config(format!("layout.k must be positive, got {}", self.layout.k)));
        }
        if !(0.0..=1.0).contains(&self.style.node_alpha) {
            return Err(Error::Config(format!(
                "style.node_alpha must be within 0..=1, got {}",
                self.style.node_alpha
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = RenderConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.teacher_prefixes, vec!["Sir".to_string(), "Maam".to_string()]);
    }

    #[test]
    fn test_partial_override() {
        let config = RenderConfig::from_toml_str(
            r##"
            teacher_prefixes = ["Dr"]

            [layout]
            iterations = 50

            [style]
            student_color = "#87ceeb"
            "##,
        )
        .expect("valid config");
        assert_eq!(config.teacher_prefixes, vec!["Dr".to_string()]);
        assert_eq!(config.layout.iterations, 50);
        assert_eq!(config.layout.k, 0.15);
        assert_eq!(config.style.student_color, "#87ceeb");
        assert_eq!(config.style.teacher_color, "lightgreen");
        assert_eq!(config.canvas, Canvas::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            RenderConfig::from_toml_str("[canvas]\ndpi = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("[layout]\nk = -1.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("colour = \"red\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("[layout]\niterations = \"many\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_flags_win_over_file() {
        let mut config = RenderConfig::from_toml_str(
            r#"
            [layout]
            seed = 7
            iterations = 50

            [canvas]
            dpi = 150
            "#,
        )
        .expect("valid config");
        config
            .apply_overrides(&RenderOverrides {
                seed: Some(9),
                dpi: Some(72.0),
                ..RenderOverrides::default()
            })
            .expect("valid overrides");
        assert_eq!(config.layout.seed, 9);
        assert_eq!(config.canvas.dpi, 72.0);
        // Not given on the command line, so the file's values stay
        assert_eq!(config.layout.iterations, 50);
        assert_eq!(config.layout.k, 0.15);

        let mut unchanged = RenderConfig::default();
        unchanged
            .apply_overrides(&RenderOverrides::default())
            .expect("defaults are valid");
        assert_eq!(unchanged, RenderConfig::default());
    }

    #[test]
    fn test_rejects_oversized_canvas() {
        let mut config = RenderConfig::default();
        let err = config
            .apply_overrides(&RenderOverrides {
                dpi: Some(100_000.0),
                ..RenderOverrides::default()
            })
            .expect_err("1.2 million px per side");
        assert!(matches!(err, Error::Config(_)));

        assert!(matches!(
            RenderConfig::from_toml_str("[canvas]\nwidth_in = 1e30"),
            Err(Error::Config(_))
        ));
        // Right at the limit is fine
        let mut config = RenderConfig::default();
        config
            .apply_overrides(&RenderOverrides {
                dpi: Some(MAX_CANVAS_PX as f32 / 12.0),
                ..RenderOverrides::default()
            })
            .expect("16384 px per side");
    }
}
