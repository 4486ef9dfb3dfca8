mod behavior;
mod extensive;
mod normal;
mod sequence;
mod strategy;

pub use behavior::*;
pub use extensive::*;
pub use normal::*;
pub use sequence::*;
pub use strategy::*;

use crate::Error;

/// Either representation of a finite game.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Normal(NormalFormGame),
    Extensive(ExtensiveFormGame),
}

impl Game {
    pub fn players(&self) -> usize {
        match self {
            Self::Normal(game) => game.players(),
            Self::Extensive(game) => game.players(),
        }
    }
    pub fn title(&self) -> &str {
        match self {
            Self::Normal(game) => game.title(),
            Self::Extensive(game) => game.title(),
        }
    }
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Normal(game) => game.validate(),
            Self::Extensive(game) => game.validate(),
        }
    }
    /// The strategic form, converting an extensive game if needed.
    pub fn normal(&self) -> Result<std::borrow::Cow<'_, NormalFormGame>, Error> {
        match self {
            Self::Normal(game) => Ok(std::borrow::Cow::Borrowed(game)),
            Self::Extensive(game) => game.to_normal_form().map(std::borrow::Cow::Owned),
        }
    }
}

impl From<NormalFormGame> for Game {
    fn from(game: NormalFormGame) -> Self {
        Self::Normal(game)
    }
}

impl From<ExtensiveFormGame> for Game {
    fn from(game: ExtensiveFormGame) -> Self {
        Self::Extensive(game)
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal(game) => write!(f, "{}", game),
            Self::Extensive(game) => write!(f, "{}", game),
        }
    }
}
