use super::leading_spaces;

pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: &'static [u8] = b"*-_";
    pub const MIN_MARKERS: usize = 3;

    /// Up to three spaces, then three or more of one marker character with
    /// only spaces or tabs between them.
    pub fn matches(line: &str) -> bool {
        let indent = leading_spaces(line);
        if indent > 3 {
            return false;
        }
        let rest = line[indent..].trim_end();
        let Some(&marker) = rest.as_bytes().first() else {
            return false;
        };
        if !Self::MARKERS.contains(&marker) {
            return false;
        }
        let mut count = 0;
        for b in rest.bytes() {
            match b {
                b' ' | b'\t' => {}
                b if b == marker => count += 1,
                _ => return false,
            }
        }
        count >= Self::MIN_MARKERS
    }
}
