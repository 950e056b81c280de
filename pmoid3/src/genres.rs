//! The ID3v1 genre list, Winamp extensions included.

pub const GENRES: [&str; 192] = [
    "Blues", "Classic Rock", "Country", "Dance", "Disco", "Funk", "Grunge", "Hip-Hop",
    "Jazz", "Metal", "New Age", "Oldies", "Other", "Pop", "R&B", "Rap",
    "Reggae", "Rock", "Techno", "Industrial", "Alternative", "Ska", "Death Metal", "Pranks",
    "Soundtrack", "Euro-Techno", "Ambient", "Trip-Hop", "Vocal", "Jazz+Funk", "Fusion", "Trance",
    "Classical", "Instrumental", "Acid", "House", "Game", "Sound Clip", "Gospel", "Noise",
    "Alt. Rock", "Bass", "Soul", "Punk", "Space", "Meditative", "Instrumental Pop",
    "Instrumental Rock", "Ethnic", "Gothic", "Darkwave", "Techno-Industrial", "Electronic",
    "Pop-Folk", "Eurodance", "Dream", "Southern Rock", "Comedy", "Cult", "Gangsta Rap", "Top 40",
    "Christian Rap", "Pop/Funk", "Jungle", "Native American", "Cabaret", "New Wave",
    "Psychedelic", "Rave", "Showtunes", "Trailer", "Lo-Fi", "Tribal", "Acid Punk", "Acid Jazz",
    "Polka", "Retro", "Musical", "Rock & Roll", "Hard Rock", "Folk", "Folk/Rock",
    "National Folk", "Swing", "Fast-Fusion", "Bebob", "Latin", "Revival", "Celtic", "Bluegrass",
    "Avantgarde", "Gothic Rock", "Progressive Rock", "Psychedelic Rock", "Symphonic Rock",
    "Slow Rock", "Big Band", "Chorus", "Easy Listening", "Acoustic", "Humour", "Speech",
    "Chanson", "Opera", "Chamber Music", "Sonata", "Symphony", "Booty Bass", "Primus",
    "Porn Groove", "Satire", "Slow Jam", "Club", "Tango", "Samba", "Folklore", "Ballad",
    "Power Ballad", "Rhythmic Soul", "Freestyle", "Duet", "Punk Rock", "Drum Solo", "A Cappella",
    "Euro-House", "Dance Hall", "Goa", "Drum & Bass", "Club-House", "Hardcore", "Terror",
    "Indie", "BritPop", "Negerpunk", "Polsk Punk", "Beat", "Christian Gangsta Rap",
    "Heavy Metal", "Black Metal", "Crossover", "Contemporary Christian", "Christian Rock",
    "Merengue", "Salsa", "Thrash Metal", "Anime", "JPop", "Synthpop", "Abstract", "Art Rock",
    "Baroque", "Bhangra", "Big Beat", "Breakbeat", "Chillout", "Downtempo", "Dub", "EBM",
    "Eclectic", "Electro", "Electroclash", "Emo", "Experimental", "Garage", "Global", "IDM",
    "Illbient", "Industro-Goth", "Jam Band", "Krautrock", "Leftfield", "Lounge", "Math Rock",
    "New Romantic", "Nu-Breakz", "Post-Punk", "Post-Rock", "Psytrance", "Shoegaze", "Space Rock",
    "Trop Rock", "World Music", "Neoclassical", "Audiobook", "Audio Theatre",
    "Neue Deutsche Welle", "Podcast", "Indie Rock", "G-Funk", "Dubstep", "Garage Rock",
    "Psybient",
];

pub fn genre_name(index: usize) -> Option<&'static str> {
    GENRES.get(index).copied()
}

/// Expands an ID3v2 content-type string.
///
/// `(nn)` references the genre list, `(RX)` and `(CR)` stand for Remix and
/// Cover, `((` escapes a literal parenthesis. A bare number is a reference
/// when it is the only content.
pub fn parse_genre(text: &str) -> Vec<String> {
    let mut genres = Vec::new();
    let mut word = String::new();
    let mut code: Option<String> = None;

    for c in text.chars() {
        match code.as_mut() {
            Some(pending) if c == '(' && pending.is_empty() => {
                word.push('(');
                code = None;
            }
            Some(pending) if c == ')' => {
                if !word.is_empty() {
                    genres.push(std::mem::take(&mut word));
                }
                if let Some(genre) = genre_code(pending) {
                    genres.push(genre.to_string());
                }
                code = None;
            }
            Some(pending) => pending.push(c),
            None if c == '(' => code = Some(String::new()),
            None => word.push(c),
        }
    }

    if !word.is_empty() {
        if genres.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(genre) = genre_code(&word) {
                genres.push(genre.to_string());
            }
        } else {
            genres.push(word);
        }
    }
    genres
}

fn genre_code(code: &str) -> Option<&'static str> {
    match code {
        "RX" => Some("Remix"),
        "CR" => Some("Cover"),
        _ if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) => {
            code.parse().ok().and_then(genre_name)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_bounds() {
        assert_eq!(genre_name(0), Some("Blues"));
        assert_eq!(genre_name(17), Some("Rock"));
        assert_eq!(genre_name(191), Some("Psybient"));
        assert_eq!(genre_name(192), None);
    }

    #[test]
    fn references_and_refinements() {
        assert_eq!(parse_genre("(17)"), vec!["Rock"]);
        assert_eq!(parse_genre("(4)Eurodisco"), vec!["Disco", "Eurodisco"]);
        assert_eq!(parse_genre("(RX)(CR)"), vec!["Remix", "Cover"]);
        assert_eq!(parse_genre("((Drum) & Bass"), vec!["(Drum) & Bass"]);
        assert_eq!(parse_genre("13"), vec!["Pop"]);
        assert_eq!(parse_genre("Synthwave"), vec!["Synthwave"]);
        assert_eq!(parse_genre("(999)"), Vec::<String>::new());
    }
}
