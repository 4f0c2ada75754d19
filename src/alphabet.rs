// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

// Letters are 1-based. 0 is the joker on a rack and "no tile" on a board.
// Bit 0x80 marks a board tile that came from a joker.
pub const MAX_TILES: usize = 32;

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Tile {
    pub label: String,
    pub blank_label: String,
    pub freq: u8,
    pub score: i8,
}

#[derive(Clone, Debug)]
pub struct Alphabet {
    tiles: Box<[Tile]>,
    num_tiles: u16,
}

impl Alphabet {
    // tiles[0] describes the joker.
    pub fn new(tiles: Vec<Tile>) -> error::Returns<Alphabet> {
        if tiles.is_empty() {
            return_error!("alphabet needs at least the joker entry".into());
        }
        if tiles.len() > MAX_TILES {
            return_error!(format!(
                "alphabet has {} entries, at most {} are supported",
                tiles.len(),
                MAX_TILES
            ));
        }
        let num_tiles = tiles.iter().map(|t| t.freq as u16).sum();
        Ok(Alphabet {
            tiles: tiles.into_boxed_slice(),
            num_tiles,
        })
    }

    // csv rows: label,blank_label,freq,score. The first row is the joker.
    pub fn from_csv<R: std::io::Read>(reader: R) -> error::Returns<Alphabet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut tiles = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            if record.len() != 4 {
                return_error!(format!("expected 4 fields, got {:?}", record));
            }
            tiles.push(Tile {
                label: record[0].into(),
                blank_label: record[1].into(),
                freq: record[2].parse()?,
                score: record[3].parse()?,
            });
        }
        Alphabet::new(tiles)
    }

    // including the joker
    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.tiles.len() as u8
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.num_letters() == 0
    }

    #[inline(always)]
    pub fn num_letters(&self) -> u8 {
        self.len() - 1
    }

    #[inline(always)]
    pub fn first_letter(&self) -> u8 {
        1
    }

    #[inline(always)]
    pub fn last_letter(&self) -> u8 {
        self.len() - 1
    }

    #[inline(always)]
    pub fn letters(&self) -> std::ops::RangeInclusive<u8> {
        self.first_letter()..=self.last_letter()
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &Tile {
        &self.tiles[idx as usize]
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        self.num_tiles
    }

    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&str> {
        let c = idx & 0x7f;
        if c == 0 || c >= self.len() {
            None
        } else if idx & 0x80 == 0 {
            Some(&self.get(c).label)
        } else {
            Some(&self.get(c).blank_label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&str> {
        if idx >= self.len() {
            None
        } else {
            Some(&self.get(idx).label)
        }
    }

    // jokers placed on the board score as tile 0
    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        if idx & 0x80 != 0 {
            self.get(0).score
        } else {
            self.get(idx).score
        }
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    pub fn fmt_rack<'a>(&'a self, rack: &'a [u8]) -> WriteableRack<'a> {
        WriteableRack {
            alphabet: self,
            rack,
        }
    }

    pub fn fmt_word<'a>(&'a self, word: &'a [u8]) -> WriteableWord<'a> {
        WriteableWord {
            alphabet: self,
            word,
        }
    }
}

pub struct WriteableRack<'a> {
    alphabet: &'a Alphabet,
    rack: &'a [u8],
}

impl std::fmt::Display for WriteableRack<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &tile in self.rack {
            write!(f, "{}", self.alphabet.from_rack(tile).unwrap_or("!"))?;
        }
        Ok(())
    }
}

pub struct WriteableWord<'a> {
    alphabet: &'a Alphabet,
    word: &'a [u8],
}

impl std::fmt::Display for WriteableWord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &tile in self.word {
            write!(f, "{}", self.alphabet.from_board(tile).unwrap_or("."))?;
        }
        Ok(())
    }
}

// Greedy longest-label reader, so multi-character labels work.
pub struct AlphabetReader<'a> {
    supported: Vec<(&'a str, u8)>,
}

impl<'a> AlphabetReader<'a> {
    fn with_entries(mut supported: Vec<(&'a str, u8)>) -> Self {
        supported.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { supported }
    }

    // letters only, for lexicon words
    pub fn new_for_words(alphabet: &'a Alphabet) -> Self {
        Self::with_entries(
            alphabet
                .letters()
                .map(|tile| (alphabet.get(tile).label.as_str(), tile))
                .collect(),
        )
    }

    // letters plus the joker as 0
    pub fn new_for_racks(alphabet: &'a Alphabet) -> Self {
        Self::with_entries(
            (0..alphabet.len())
                .map(|tile| (alphabet.get(tile).label.as_str(), tile))
                .collect(),
        )
    }

    // letters plus blank labels as resolved jokers
    pub fn new_for_plays(alphabet: &'a Alphabet) -> Self {
        Self::with_entries(
            alphabet
                .letters()
                .flat_map(|tile| {
                    [
                        (alphabet.get(tile).label.as_str(), tile),
                        (alphabet.get(tile).blank_label.as_str(), tile | 0x80),
                    ]
                })
                .collect(),
        )
    }

    #[inline(always)]
    pub fn next_tile(&self, sb: &[u8], ix: usize) -> Option<(u8, usize)> {
        let rest = &sb[ix..];
        self.supported
            .iter()
            .find(|(label, _)| !label.is_empty() && rest.starts_with(label.as_bytes()))
            .map(|&(label, tile)| (tile, ix + label.len()))
    }

    pub fn read(&self, s: &str) -> error::Returns<Vec<u8>> {
        let sb = s.as_bytes();
        let mut v = Vec::with_capacity(sb.len());
        let mut ix = 0;
        while ix < sb.len() {
            if let Some((tile, end_ix)) = self.next_tile(sb, ix) {
                v.push(tile);
                ix = end_ix;
            } else {
                return_error!(format!("invalid tile after {:?} in {:?}", v, s));
            }
        }
        Ok(v)
    }
}

fn tile(label: &str, blank_label: &str, freq: u8, score: i8) -> Tile {
    Tile {
        label: label.into(),
        blank_label: blank_label.into(),
        freq,
        score,
    }
}

pub fn make_english_alphabet() -> Alphabet {
    let tiles = vec![
        tile("?", "?", 2, 0),
        tile("A", "a", 9, 1),
        tile("B", "b", 2, 3),
        tile("C", "c", 2, 3),
        tile("D", "d", 4, 2),
        tile("E", "e", 12, 1),
        tile("F", "f", 2, 4),
        tile("G", "g", 3, 2),
        tile("H", "h", 2, 4),
        tile("I", "i", 9, 1),
        tile("J", "j", 1, 8),
        tile("K", "k", 1, 5),
        tile("L", "l", 4, 1),
        tile("M", "m", 2, 3),
        tile("N", "n", 6, 1),
        tile("O", "o", 8, 1),
        tile("P", "p", 2, 3),
        tile("Q", "q", 1, 10),
        tile("R", "r", 6, 1),
        tile("S", "s", 4, 1),
        tile("T", "t", 6, 1),
        tile("U", "u", 4, 1),
        tile("V", "v", 2, 4),
        tile("W", "w", 2, 4),
        tile("X", "x", 1, 8),
        tile("Y", "y", 2, 4),
        tile("Z", "z", 1, 10),
    ];
    let num_tiles = tiles.iter().map(|t| t.freq as u16).sum();
    Alphabet {
        tiles: tiles.into_boxed_slice(),
        num_tiles,
    }
}
