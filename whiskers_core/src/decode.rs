// Wide enough that html2text never wraps a single chat line.
const RENDER_WIDTH: usize = 4096;

pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') && !text.contains('<') {
        return collapse_whitespace(text);
    }

    let rendered = html2text::from_read(text.as_bytes(), RENDER_WIDTH);
    collapse_whitespace(&rendered)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(
            decode_entities("Who said &quot;I&#039;ll be back&quot;?"),
            "Who said \"I'll be back\"?"
        );
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(
            decode_entities("Entertainment: Video Games"),
            "Entertainment: Video Games"
        );
    }

    #[test]
    fn blank_input_stays_blank() {
        assert_eq!(decode_entities("   "), "");
    }
}
