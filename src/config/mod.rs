//! Configuration management for the Game of Life simulation

pub mod settings;

pub use settings::{
    Settings, GridConfig, InputConfig, InputEncoding, TimingConfig, RandomConfig, DisplayConfig,
    CliOverrides
};
