use bevy_ecs::prelude::Component;

/// Sprite is identified by an animation key and its size in world units.
/// `flip_h` mirrors the sprite horizontally; movement controls with facing
/// enabled drive it.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub anim_key: String,
    pub width: f32,
    pub height: f32,
    pub flip_h: bool,
}

impl Sprite {
    /// Sprite centered on its position.
    pub fn new(anim_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            anim_key: anim_key.into(),
            width,
            height,
            flip_h: false,
        }
    }
}
