//! Explicit device and precision selection for every tensor the encoder produces.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use serde::{Deserialize, Serialize};
use tch::{Device, Kind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceConfig {
    Cpu,
    Cuda(usize),
    CudaIfAvailable,
    Mps,
}

impl DeviceConfig {
    pub fn resolve(&self) -> Device {
        match self {
            DeviceConfig::Cpu => Device::Cpu,
            DeviceConfig::Cuda(ordinal) => Device::Cuda(*ordinal),
            DeviceConfig::CudaIfAvailable => Device::cuda_if_available(),
            DeviceConfig::Mps => Device::Mps,
        }
    }
}

/// Element type of the encoded planes. Counters are stored as values, never truncated to flags,
/// so every kind here is a floating point kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneKind {
    Float,
    Double,
    Half,
}

impl PlaneKind {
    pub fn resolve(&self) -> Kind {
        match self {
            PlaneKind::Float => Kind::Float,
            PlaneKind::Double => Kind::Double,
            PlaneKind::Half => Kind::Half,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub device: DeviceConfig,
    pub kind: PlaneKind,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            device: DeviceConfig::Cpu,
            kind: PlaneKind::Float,
        }
    }
}

impl EncoderConfig {
    pub fn new(device: DeviceConfig, kind: PlaneKind) -> EncoderConfig {
        EncoderConfig { device, kind }
    }

    pub fn device(&self) -> Device {
        self.device.resolve()
    }

    pub fn kind(&self) -> Kind {
        self.kind.resolve()
    }

    /// Tensor options for `Tensor::zeros` and friends.
    pub fn options(&self) -> (Kind, Device) {
        (self.kind(), self.device())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let writer = BufWriter::new(File::create(path).map_err(ConfigError::Io)?);
        bincode::serialize_into(writer, self).map_err(ConfigError::Serialization)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<EncoderConfig, ConfigError> {
        let reader = BufReader::new(File::open(path).map_err(ConfigError::Io)?);
        bincode::deserialize_from(reader).map_err(ConfigError::Serialization)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Serialization(bincode::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Could not access config file: {}", e),
            ConfigError::Serialization(e) => write!(f, "Could not (de)serialize config: {}", e),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serialization(e) => Some(e.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.device(), Device::Cpu);
        assert_eq!(config.kind(), Kind::Float);
        assert_eq!(config.options(), (Kind::Float, Device::Cpu));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(DeviceConfig::Cuda(1).resolve(), Device::Cuda(1));
        assert_eq!(DeviceConfig::Mps.resolve(), Device::Mps);
        assert_eq!(PlaneKind::Double.resolve(), Kind::Double);
        assert_eq!(PlaneKind::Half.resolve(), Kind::Half);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("chess_tensor_config_{}.bin", std::process::id()));
        let config = EncoderConfig::new(DeviceConfig::Cuda(2), PlaneKind::Double);
        config.save(&path).unwrap();
        let loaded = EncoderConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("chess_tensor_config_that_does_not_exist.bin");
        assert!(matches!(EncoderConfig::load(path), Err(ConfigError::Io(_))));
    }
}
