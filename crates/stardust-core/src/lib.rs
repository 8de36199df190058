pub mod buffers;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod pointer;
pub mod pool;
pub mod trail;
pub static STARDUST_WGSL: &str = include_str!("../shaders/stardust.wgsl");

pub use buffers::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use pointer::*;
pub use pool::*;
pub use trail::*;
