// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, rack};
use rand::prelude::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bag(pub Vec<u8>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for tile in 0..alphabet.len() {
            for _ in 0..alphabet.freq(tile) {
                bag.push(tile);
            }
        }
        Bag(bag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.0.shuffle(rng);
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.0.pop()
    }

    // Draws from the end until the rack is full or the bag runs out.
    pub fn replenish(&mut self, rack: &rack::Rack, rack_size: usize) -> rack::Rack {
        let num_drawn = rack_size.saturating_sub(rack.len()).min(self.0.len());
        let drawn = self.0.split_off(self.0.len() - num_drawn);
        rack.with_tiles(&drawn)
    }

    // put back the tiles in random order. keep the rest of the bag in the same order.
    pub fn put_back(&mut self, rng: &mut dyn RngCore, tiles: &[u8]) {
        match tiles.len() {
            0 => {}
            1 => {
                let pos = rng.random_range(0..self.0.len() + 1);
                self.0.insert(pos, tiles[0]);
            }
            _ => {
                let mut new_tiles = tiles.to_vec();
                new_tiles.shuffle(rng);
                let old_tiles = std::mem::take(&mut self.0);
                let mut num_old = old_tiles.len();
                let mut num_new = new_tiles.len();
                let mut old_iter = old_tiles.into_iter();
                let mut new_iter = new_tiles.into_iter();
                self.0.reserve(num_old + num_new);
                while num_old + num_new > 0 {
                    if rng.random_range(0..num_old + num_new) < num_old {
                        self.0.extend(old_iter.next());
                        num_old -= 1;
                    } else {
                        self.0.extend(new_iter.next());
                        num_new -= 1;
                    }
                }
            }
        }
    }
}
