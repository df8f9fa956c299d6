use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Characters left bare in the query value. Everything else, spaces and
/// commas included, is percent-encoded.
const QUERY_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Canonical Maps search URL for a free-text place name or address.
///
/// Any input, including the empty string, yields a syntactically valid URL.
pub fn maps_search_url(location: &str) -> String {
    format!(
        "{MAPS_SEARCH_BASE}{}",
        utf8_percent_encode(location, QUERY_SAFE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn decode_query(url: &str) -> String {
        let query = url
            .strip_prefix(MAPS_SEARCH_BASE)
            .expect("url should carry the maps search prefix");
        percent_decode_str(query)
            .decode_utf8()
            .expect("encoded query should decode back to utf-8")
            .into_owned()
    }

    #[test]
    fn encodes_spaces_and_punctuation() {
        assert_eq!(
            maps_search_url("Eiffel Tower"),
            "https://www.google.com/maps/search/?api=1&query=Eiffel%20Tower"
        );
        assert_eq!(
            maps_search_url("1600 Pennsylvania Ave"),
            "https://www.google.com/maps/search/?api=1&query=1600%20Pennsylvania%20Ave"
        );
    }

    #[test]
    fn round_trips_arbitrary_input() {
        for s in [
            "",
            "Sydney Opera House",
            "Q&A Caf\u{e9}, 3rd Floor",
            "a+b=c/100%?",
            "   leading and trailing   ",
        ] {
            let url = maps_search_url(s);
            assert!(url.starts_with(MAPS_SEARCH_BASE));
            assert_eq!(decode_query(&url), s);
        }
    }

    #[test]
    fn reserved_characters_never_leak_into_the_query() {
        let url = maps_search_url("a&b=c?d#e");
        let query = url.strip_prefix(MAPS_SEARCH_BASE).unwrap();
        for forbidden in ['&', '=', '?', '#', ' '] {
            assert!(!query.contains(forbidden), "{forbidden:?} leaked: {query}");
        }
    }
}
