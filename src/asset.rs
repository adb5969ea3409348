//! Symbolic names of the visual assets the scene refers to.
//!
//! Rendering is left to the host; the game only ever hands out these names.

use strum_macros::{EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SpriteAsset {
    Background,
    Dog,
    DogBark,
    /// The girlfriend who runs across the screen on a level-up.
    DogGf,
    Shrub,
    Banner,
    BannerShort,
    LevelUp,
    #[strum(serialize = "gameover")]
    GameOver,
    Restart,
    Home,
    XMark,
}

impl SpriteAsset {
    /// The asset's name as understood by the host's renderer.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
