pub mod settings;

pub use settings::HelixConfig;
