/// Non-ASCII glyphs found in ingredient lines and their ASCII spellings.
const GLYPHS: &[(char, &str)] = &[
    ('\u{2009}', " "),
    ('\u{00a0}', " "),
    ('\u{00bc}', "1/4"),
    ('\u{00bd}', "1/2"),
    ('\u{00be}', "3/4"),
    ('\u{2153}', "1/3"),
    ('\u{2154}', "2/3"),
    ('\u{2155}', "1/5"),
    ('\u{2156}', "2/5"),
    ('\u{2157}', "3/5"),
    ('\u{2158}', "4/5"),
    ('\u{2159}', "1/6"),
    ('\u{215a}', "5/6"),
    ('\u{215b}', "1/8"),
    ('\u{215c}', "3/8"),
    ('\u{215d}', "5/8"),
    ('\u{215e}', "7/8"),
    ('\u{ff06}', "&"),
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
];

fn substitute(ch: char) -> Option<&'static str> {
    GLYPHS
        .iter()
        .find(|(glyph, _)| *glyph == ch)
        .map(|(_, ascii)| *ascii)
}

/// Replace vulgar fractions, thin spaces and friends with ASCII, leaving
/// every other character untouched and in place.
pub fn normalize_glyphs(s: &str) -> String {
    if s.is_ascii() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match substitute(ch) {
            Some(ascii) => out.push_str(ascii),
            None => out.push(ch),
        }
    }
    out
}
