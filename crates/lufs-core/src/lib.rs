pub mod assets;
pub mod bands;
pub mod constants;
pub mod error;
pub mod platform;
pub mod playback;
pub mod provider;
pub mod reactive;
pub mod signal;
pub mod volume;

pub use assets::*;
pub use bands::*;
pub use constants::*;
pub use error::*;
pub use platform::*;
pub use playback::*;
pub use provider::*;
pub use reactive::*;
pub use signal::*;
pub use volume::*;
