// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

// Tiles in hand. 0 is an unresolved joker. Order is kept but carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rack {
    tiles: Box<[u8]>,
}

impl Rack {
    pub fn new(tiles: &[u8]) -> Self {
        Self {
            tiles: tiles.into(),
        }
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    // Removes exactly the tile at `index`, leaving other copies alone.
    pub fn without(&self, index: usize) -> Self {
        let mut tiles = Vec::with_capacity(self.tiles.len().saturating_sub(1));
        tiles.extend_from_slice(&self.tiles[..index]);
        tiles.extend_from_slice(&self.tiles[index + 1..]);
        Self {
            tiles: tiles.into_boxed_slice(),
        }
    }

    // One index per distinct tile value, first occurrence wins.
    pub fn distinct_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, t)| !self.tiles[..i].contains(t))
            .map(|(i, _)| i)
    }

    // Board tiles are accepted too: a resolved joker uses up a 0.
    pub fn without_tiles<II: IntoIterator<Item = u8>>(&self, tiles: II) -> error::Returns<Self> {
        let mut rack = self.tiles.to_vec();
        for tile in tiles {
            let tile = if tile & 0x80 != 0 { 0 } else { tile };
            let Some(pos) = rack.iter().rposition(|&t| t == tile) else {
                return_error!(format!("tile {} is not on rack {:?}", tile, self.tiles));
            };
            rack.remove(pos);
        }
        Ok(Self {
            tiles: rack.into_boxed_slice(),
        })
    }

    pub fn with_tiles(&self, tiles: &[u8]) -> Self {
        let mut rack = self.tiles.to_vec();
        rack.extend_from_slice(tiles);
        Self {
            tiles: rack.into_boxed_slice(),
        }
    }
}
