mod animation;
mod depth;
mod sprite;

pub use animation::{Animation, AnimationSet, Animator, ANIMATION_SPEED};
pub use depth::{depth_sort, DrawCommand, DrawLayer, DrawList, FloorLayer};
pub use sprite::TextureHandle;
