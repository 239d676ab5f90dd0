//! Configuration system

pub use serde::{Serialize, Deserialize};

/// Side length of one grid box in world units
pub const DEFAULT_BOX_SIZE: f32 = 128.0;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;
        
        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }
    
    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };
        
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
    
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
    
    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value was parsed but is out of range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Settings for a collision scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Side length of a spatial grid box
    pub box_size: f32,

    /// Check the grid invariant after every successful register/move.
    /// Violations panic in debug builds and are logged in release builds.
    pub verify_index: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            verify_index: cfg!(debug_assertions),
        }
    }
}

impl Config for CollisionConfig {}

impl CollisionConfig {
    /// Reject settings the grid cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.box_size.is_finite() || self.box_size <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "box_size",
                reason: format!("must be a positive finite number, got {}", self.box_size),
            });
        }
        Ok(())
    }
}
