pub mod animation;
pub mod assets;
pub mod core;
pub mod loading;
pub mod page;
pub mod particles;
pub mod pointer;
pub mod reveal;
pub mod scene;
pub mod systems;
