// YapBattle - AI debate sparring with scoring and ranked play
// Library exports

pub mod claude;
pub mod cli;
pub mod config;
pub mod debate;
pub mod errors;
pub mod metrics;
pub mod providers;
pub mod rating;
pub mod server;
pub mod tools;
pub mod voice;

pub use errors::{DebateError, DebateResult};
