//! Data types shared by the store, the token controller and the gate.

pub mod environment;
pub mod presets;
pub mod product;
pub mod settings;
pub mod token;

pub use environment::{Environment, ParseEnvironmentError};
pub use presets::Preset;
pub use product::{ParseProductTypeError, ProductType};
pub use settings::{Credentials, EnvCredentials, ProductSettings, ProductSettingsPatch};
pub use token::BridgeToken;
