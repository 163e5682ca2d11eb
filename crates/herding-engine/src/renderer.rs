//! Text renderer for the game board.
//!
//! The simulation only reports which cells changed. This renderer owns the
//! kind-to-tile table (a glyph for terminal output and an image path for
//! graphical front ends) and turns change notifications into log output.
//! The table comes from the optional `render` section of
//! `herding-config.yaml`; unspecified kinds keep their defaults.

use std::collections::BTreeMap;

use herding_core::RenderHook;
use herding_types::{CellKind, Position};
use herding_world::Board;
use serde::Deserialize;
use tracing::{debug, trace};

/// The `render` section of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    /// Attach the text renderer to the game.
    #[serde(default)]
    pub enabled: bool,

    /// Per-kind tile overrides.
    #[serde(default)]
    pub tiles: BTreeMap<CellKind, TileConfig>,
}

/// Override for one kind's tile. Missing fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TileConfig {
    /// Character drawn in text output.
    #[serde(default)]
    pub glyph: Option<char>,

    /// Image file for graphical output.
    #[serde(default)]
    pub image: Option<String>,
}

/// How one kind is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Character drawn in text output.
    pub glyph: char,
    /// Image file for graphical output.
    pub image: String,
}

/// Read-only kind-to-tile table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    tiles: BTreeMap<CellKind, Tile>,
}

impl TileSet {
    /// Defaults with the overrides from `config` applied.
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut set = Self::default();
        for (kind, tile) in &config.tiles {
            if let Some(entry) = set.tiles.get_mut(kind) {
                if let Some(glyph) = tile.glyph {
                    entry.glyph = glyph;
                }
                if let Some(image) = &tile.image {
                    entry.image.clone_from(image);
                }
            }
        }
        set
    }

    /// The tile for `kind`.
    pub fn tile(&self, kind: CellKind) -> Option<&Tile> {
        self.tiles.get(&kind)
    }

    /// The glyph for `kind`, falling back to its symbol.
    pub fn glyph(&self, kind: CellKind) -> char {
        self.tile(kind).map_or_else(|| kind.symbol(), |t| t.glyph)
    }
}

impl Default for TileSet {
    fn default() -> Self {
        let tiles = CellKind::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind,
                    Tile {
                        glyph: kind.symbol(),
                        image: format!("{kind}.png"),
                    },
                )
            })
            .collect();
        Self { tiles }
    }
}

/// Render hook that logs the board after every change.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    tiles: TileSet,
    frames: u64,
}

impl TextRenderer {
    /// Create a renderer drawing with `tiles`.
    pub const fn new(tiles: TileSet) -> Self {
        Self { tiles, frames: 0 }
    }

    /// The whole board as text, one line per row.
    pub fn render(&self, board: &Board) -> String {
        let mut out = String::new();
        for y in 0..board.height() {
            for x in 0..board.width() {
                let kind = board.kind_at(Position::new(x, y)).unwrap_or_default();
                out.push(self.tiles.glyph(kind));
            }
            out.push('\n');
        }
        out
    }
}

impl RenderHook for TextRenderer {
    fn on_change(&mut self, board: &Board, changed: &[Position]) {
        self.frames = self.frames.saturating_add(1);
        for &at in changed {
            let kind = board.kind_at(at).unwrap_or_default();
            if let Some(tile) = self.tiles.tile(kind) {
                trace!(at = %at, %kind, image = tile.image, "Tile updated");
            }
        }
        debug!(
            frame = self.frames,
            changed = changed.len(),
            "Board updated\n{}",
            self.render(board)
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_tiles_cover_every_kind() {
        let tiles = TileSet::default();
        for kind in CellKind::ALL {
            let tile = tiles.tile(kind).unwrap();
            assert_eq!(tile.glyph, kind.symbol());
        }
        assert_eq!(tiles.tile(CellKind::Cow).unwrap().image, "cow.png");
        assert_eq!(tiles.tile(CellKind::Empty).unwrap().image, "empty.png");
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let yaml = r#"
enabled: true
tiles:
  empty:
    glyph: "."
  wolf:
    image: "assets/wolf.png"
"#;
        let config: RenderConfig = serde_yml::from_str(yaml).unwrap();
        let tiles = TileSet::from_config(&config);

        assert!(config.enabled);
        assert_eq!(tiles.glyph(CellKind::Empty), '.');
        assert_eq!(tiles.tile(CellKind::Empty).unwrap().image, "empty.png");
        assert_eq!(tiles.glyph(CellKind::Wolf), 'W');
        assert_eq!(tiles.tile(CellKind::Wolf).unwrap().image, "assets/wolf.png");
    }

    #[test]
    fn render_draws_rows_with_glyphs() {
        let config: RenderConfig =
            serde_yml::from_str("tiles:\n  empty:\n    glyph: \".\"\n").unwrap();
        let renderer = TextRenderer::new(TileSet::from_config(&config));
        let board = Board::parse("PEC\nESW").unwrap();
        assert_eq!(renderer.render(&board), "P.C\n.SW\n");
    }

    #[test]
    fn each_notification_is_a_frame() {
        let mut renderer = TextRenderer::new(TileSet::default());
        let board = Board::parse("PS").unwrap();
        renderer.on_change(&board, &[Position::new(0, 0)]);
        renderer.on_change(&board, &[Position::new(1, 0)]);
        assert_eq!(renderer.frames, 2);
    }
}
