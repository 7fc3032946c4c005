pub mod animation_plan;
pub mod zoom_animator;
