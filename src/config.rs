// filepath: src/config.rs
//! Configuration handling for scan-overlay
//!
//! This file defines the configuration structure and provides
//! functionality to load and save configuration from/to files.
//! The OverlayConfig struct holds the palette, viewfinder style,
//! marker style, animation cadence and demo settings.

use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::Result;
use crate::geometry::LASER_STEP;

/// Overlay colors as RGBA; unset entries fall back to the built-in theme
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaletteConfig {
    pub mask: Option<[u8; 4]>,
    pub result: Option<[u8; 4]>,
    pub horn: Option<[u8; 4]>,
    pub border: Option<[u8; 4]>,
    pub laser_start: Option<[u8; 4]>,
    pub laser_middle: Option<[u8; 4]>,
    pub laser_end: Option<[u8; 4]>,
    pub result_point: Option<[u8; 4]>,
}

/// Resolved palette with no Option fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mask: [u8; 4],
    pub result: [u8; 4],
    pub horn: [u8; 4],
    pub border: [u8; 4],
    pub laser: [[u8; 4]; 3],
    pub result_point: [u8; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            mask: [0, 0, 0, 0x60],
            result: [0, 0, 0, 0xb0],
            horn: [0x1a, 0xad, 0x19, 0xff],
            border: [0xff, 0xff, 0xff, 0xff],
            laser: [
                [0x1a, 0xad, 0x19, 0x00],
                [0x1a, 0xad, 0x19, 0xff],
                [0x1a, 0xad, 0x19, 0x00],
            ],
            result_point: [0xff, 0xbd, 0x21, 0xc0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewfinderConfig {
    pub corner_radius: f32,
    pub horn_width: f32,
    /// How far each horn reaches from its corner
    pub horn_length: f32,
    /// Length of the rounded cap at the end of each horn
    pub horn_cap_length: f32,
    pub border_width: f32,
    pub gap_width: f32,
    pub laser_thickness: f32,
}

impl Default for ViewfinderConfig {
    fn default() -> Self {
        Self {
            corner_radius: 20.0,
            horn_width: 10.0,
            horn_length: 60.0,
            horn_cap_length: 20.0,
            border_width: 4.0,
            gap_width: 6.0,
            laser_thickness: 7.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarkerConfig {
    /// Radius of a fresh marker; trail markers use half
    pub point_size: f32,
    /// Alpha of a fresh marker; trail markers use half
    pub opacity: u8,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            point_size: 6.0,
            opacity: 0xa0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub tick_interval_ms: u64,
    pub laser_step: i32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            laser_step: LASER_STEP,
        }
    }
}

impl AnimationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Settings for the bundled demo host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub preview_width: u32,
    pub preview_height: u32,
    /// Number of render ticks before the demo exits
    pub ticks: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            preview_width: 1920,
            preview_height: 1080,
            ticks: 300,
        }
    }
}

/// Configuration for the overlay appearance and behavior
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OverlayConfig {
    #[serde(default)]
    pub palette: PaletteConfig,

    #[serde(default)]
    pub viewfinder: ViewfinderConfig,

    #[serde(default)]
    pub markers: MarkerConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

impl OverlayConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("scan-overlay")
        } else {
            PathBuf::from(".config/scan-overlay")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from the default location
    pub fn load_from_file() -> Result<Self> {
        Self::load_from_path(&Self::get_config_path())
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from_path(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config at {}, writing defaults", path.display());
                let default_config = Self::default();
                default_config.save_to_path(path)?;
                Ok(default_config)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to the default location
    pub fn save_to_file(&self) -> Result<()> {
        self.save_to_path(&Self::get_config_path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Get the effective palette, filling gaps from the default theme
    pub fn palette(&self) -> Palette {
        let fallback = Palette::default();
        let p = &self.palette;
        Palette {
            mask: p.mask.unwrap_or(fallback.mask),
            result: p.result.unwrap_or(fallback.result),
            horn: p.horn.unwrap_or(fallback.horn),
            border: p.border.unwrap_or(fallback.border),
            laser: [
                p.laser_start.unwrap_or(fallback.laser[0]),
                p.laser_middle.unwrap_or(fallback.laser[1]),
                p.laser_end.unwrap_or(fallback.laser[2]),
            ],
            result_point: p.result_point.unwrap_or(fallback.result_point),
        }
    }
}
