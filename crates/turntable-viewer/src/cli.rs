use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use turntable_engine::time::interval_for_rate;

#[derive(Debug, Parser)]
#[command(name = "turntable-viewer")]
#[command(author, version, about = "Spins a vertex-colored mesh in a window")]
pub struct Args {
    /// Geometry file (`v x y z` lines)
    #[arg(default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/cube.obj"))]
    pub model: PathBuf,

    /// WGSL vertex shader
    #[arg(long, value_name = "FILE", default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/vertex.wgsl"))]
    pub vertex_shader: PathBuf,

    /// WGSL fragment shader
    #[arg(long, value_name = "FILE", default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/fragment.wgsl"))]
    pub fragment_shader: PathBuf,

    /// Window width in logical pixels
    #[arg(long, default_value = "800", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value = "600", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    #[arg(long, default_value = "3D Model Viewer")]
    pub title: String,

    /// Frame rate cap (flat sleep per frame); 0 disables the sleep
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Log filter in `env_logger` syntax, overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Args {
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.fps > 0).then(|| interval_for_rate(self.fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_assets() {
        let args = Args::try_parse_from(["turntable-viewer"]).unwrap();

        assert!(args.model.ends_with("data/cube.obj"));
        assert!(args.vertex_shader.ends_with("shaders/vertex.wgsl"));
        assert!(args.fragment_shader.ends_with("shaders/fragment.wgsl"));
        assert_eq!((args.width, args.height), (800, 600));
        assert_eq!(args.title, "3D Model Viewer");
        assert_eq!(args.frame_interval(), Some(Duration::from_secs(1) / 60));
    }

    #[test]
    fn bundled_assets_exist() {
        let args = Args::try_parse_from(["turntable-viewer"]).unwrap();
        assert!(args.model.is_file());
        assert!(args.vertex_shader.is_file());
        assert!(args.fragment_shader.is_file());
    }

    #[test]
    fn zero_fps_disables_pacing() {
        let args = Args::try_parse_from(["turntable-viewer", "--fps", "0"]).unwrap();
        assert_eq!(args.frame_interval(), None);
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(Args::try_parse_from(["turntable-viewer", "--height", "0"]).is_err());
    }

    #[test]
    fn positional_model_and_overrides() {
        let args = Args::try_parse_from([
            "turntable-viewer",
            "miata.obj",
            "--width",
            "1024",
            "--log",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.model, PathBuf::from("miata.obj"));
        assert_eq!(args.width, 1024);
        assert_eq!(args.log.as_deref(), Some("debug"));
    }
}
