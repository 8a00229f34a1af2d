use crate::button::BorderStyle;
use crate::colour::Colour;
use crate::error::{ConfigurationError, Result};
use std::path::Path;

/// Everything the shell reads once at startup and never changes afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub colours: ColourSettings,
    pub button: BorderStyle,
    pub menu: MenuSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u16,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            fps: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColourSettings {
    pub background: Colour,
    pub light_square: Colour,
    pub dark_square: Colour,
    pub highlight: Colour,
}

impl Default for ColourSettings {
    fn default() -> Self {
        Self {
            background: Colour::BLACK,
            light_square: Colour::rgb(0xee, 0xee, 0xd2),
            dark_square: Colour::rgb(0x76, 0x96, 0x56),
            highlight: Colour::rgb(0x3c, 0x3c, 0x3c),
        }
    }
}

/// Tuning of the falling pieces behind the main menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Pieces are scaled to `square_size` x `1.5 * square_size`.
    pub square_size: u32,
    /// Inclusive range of the fall speed in pixels per frame.
    pub speed: (i32, i32),
    /// Inclusive range of the rotation rate magnitude. The sign is picked at random.
    pub rotate_speed: (i32, i32),
    /// Fixed seed for reproducible layouts. Random when unset.
    pub seed: Option<u64>,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            square_size: 100,
            speed: (1, 4),
            rotate_speed: (25, 50),
            seed: None,
        }
    }
}

impl MenuSettings {
    pub fn piece_size(&self) -> (u32, u32) {
        (self.square_size, self.square_size / 2 * 3)
    }
}

impl Settings {
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        let WindowSettings { width, height, fps } = self.window;
        if width == 0 || height == 0 {
            return Err(ConfigurationError::InvalidWindowSize { width, height });
        }
        if fps == 0 {
            return Err(ConfigurationError::InvalidFrameRate { fps });
        }
        check_range("menu.speed", self.menu.speed)?;
        check_range("menu.rotate_speed", self.menu.rotate_speed)?;
        Ok(())
    }

    /// Reads the settings file. A missing file is not an error and yields the defaults.
    pub fn read(file_path: &Path) -> Result<Settings> {
        let settings = if !file_path.exists() {
            info!("Settings file {:?} doesn't exist. Using defaults.", file_path);
            Settings::default()
        } else {
            let file = std::fs::File::open(file_path)?;
            serde_yaml::from_reader(file)?
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn check_range(name: &'static str, range: (i32, i32)) -> std::result::Result<(), ConfigurationError> {
    if range.0 > range.1 {
        return Err(ConfigurationError::InvalidRange {
            name,
            min: range.0 as i64,
            max: range.1 as i64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.button.border_colour, Some(Colour::MAGENTA));
        assert_eq!(settings.button.border_width, 5);
        assert_eq!(settings.menu.piece_size(), (100, 150));
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_the_rest() {
        let yaml = "window:\n  width: 640\nbutton:\n  border_colour: null\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.window.width, 640);
        assert_eq!(settings.window.height, 800);
        assert_eq!(settings.button.border_colour, None);
        assert_eq!(settings.button.border_width, 5);
        assert_eq!(settings.colours, ColourSettings::default());
    }

    #[test]
    fn colours_are_read_as_hex_strings() {
        let yaml = "colours:\n  background: \"#102030\"\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.colours.background, Colour::rgb(0x10, 0x20, 0x30));
        assert!(serde_yaml::from_str::<Settings>("colours:\n  background: red\n").is_err());
    }

    #[test]
    fn rejects_empty_window_and_ranges() {
        let mut settings = Settings::default();
        settings.window.height = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidWindowSize { .. })
        ));

        let mut settings = Settings::default();
        settings.window.fps = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidFrameRate { fps: 0 })
        ));

        let mut settings = Settings::default();
        settings.menu.speed = (4, 1);
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidRange { name: "menu.speed", .. })
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = Path::new("/nonexistent/chessframe/settings.yml");
        assert_eq!(Settings::read(path).unwrap(), Settings::default());
    }
}
