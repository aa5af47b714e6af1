//! Общие компоненты и ресурсы симуляции
//!
//! - arena: геометрия арены (collision rect, угловые якоря, culling)
//! - color: палитра RGB
//! - player: snapshot игрока для босса

pub mod arena;
pub mod color;
pub mod player;

pub use arena::*;
pub use color::*;
pub use player::*;
