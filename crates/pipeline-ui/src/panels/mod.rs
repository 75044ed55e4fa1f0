pub mod palette;
pub mod settings;
pub mod toolbar;
