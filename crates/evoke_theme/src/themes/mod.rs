//! Built-in themes

mod evoke;

pub use evoke::{dark_palette, light_palette, EvokeTheme};
