mod component;
pub mod input_box;

pub use component::{Component, ComponentRender};
pub use input_box::InputBox;
