use std::collections::HashMap;

use crate::segment::GlyphBlock;

/// User supplied character substitutions, applied after hardblank replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharMap {
    map: HashMap<char, char>,
}

impl CharMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later pairs for the same source character replace earlier ones.
    pub fn insert(&mut self, from: char, to: char) {
        self.map.insert(from, to);
    }

    /// Parses a `"#█"` style pair: the first two characters of `pair`.
    pub fn parse_pair(pair: &str) -> Option<(char, char)> {
        let mut chars = pair.chars();
        Some((chars.next()?, chars.next()?))
    }

    pub fn get(&self, ch: char) -> Option<char> {
        self.map.get(&ch).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    fn apply(&self, ch: char) -> char {
        self.get(ch).unwrap_or(ch)
    }
}

impl FromIterator<(char, char)> for CharMap {
    fn from_iter<T: IntoIterator<Item = (char, char)>>(iter: T) -> Self {
        let mut map = CharMap::new();
        for (from, to) in iter {
            map.insert(from, to);
        }
        map
    }
}

/// Replaces the hardblank with a space, then applies `map` to every character.
///
/// The second pass sees the spaces produced by the first one, so a mapping
/// keyed on the hardblank itself never fires.
pub fn normalize_line(line: &str, hardblank: char, map: &CharMap) -> String {
    line.chars()
        .map(|c| if c == hardblank { ' ' } else { c })
        .map(|c| map.apply(c))
        .collect()
}

pub fn normalize_block(block: &GlyphBlock, hardblank: char, map: &CharMap) -> Vec<String> {
    block
        .lines
        .iter()
        .map(|line| normalize_line(line, hardblank, map))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardblank_becomes_single_space() {
        let map = CharMap::new();
        assert_eq!(normalize_line("$$_$", '$', &map), "  _ ");
        assert_eq!(normalize_line("|_|", '$', &map), "|_|");
    }

    #[test]
    fn mapping_applies_per_character() {
        let map: CharMap = [('#', '█')].into_iter().collect();
        assert_eq!(normalize_line("# #$", '$', &map), "█ █ ");
    }

    #[test]
    fn mapping_the_hardblank_has_no_effect() {
        let map: CharMap = [('$', 'X')].into_iter().collect();
        assert_eq!(normalize_line("a$b", '$', &map), "a b");
    }

    #[test]
    fn multibyte_hardblank_and_targets() {
        let map: CharMap = [('█', '#')].into_iter().collect();
        assert_eq!(normalize_line("█\u{a0}█", '\u{a0}', &map), "# #");
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        let map: CharMap = [('#', '█')].into_iter().collect();
        let block = GlyphBlock::new(vec!["#$#".into(), "$$".into()]);
        let once = normalize_block(&block, '$', &map);
        let twice = normalize_block(&GlyphBlock::new(once.clone()), '$', &map);
        assert_eq!(once, twice);
        assert_eq!(once.len(), block.lines.len());
    }

    #[test]
    fn parse_pair() {
        assert_eq!(CharMap::parse_pair("#█"), Some(('#', '█')));
        assert_eq!(CharMap::parse_pair("ab-ignored"), Some(('a', 'b')));
        assert_eq!(CharMap::parse_pair("#"), None);
    }

    #[test]
    fn later_pairs_win() {
        let map: CharMap = [('#', 'a'), ('#', 'b')].into_iter().collect();
        assert_eq!(map.get('#'), Some('b'));
        assert_eq!(map.len(), 1);
    }
}
