/// Opaque handle to an image owned by the external asset loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub fn to_u32(self) -> u32 {
        self.0
    }
}
