pub mod handle;
pub mod render;
pub mod window;
