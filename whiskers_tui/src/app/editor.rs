use ratatui::layout::Rect;

pub fn split_line_at_char(line: &str, idx: usize) -> (String, Option<char>, String) {
    let mut before = String::new();
    let mut current = None;
    let mut after = String::new();

    for (i, ch) in line.chars().enumerate() {
        if i < idx {
            before.push(ch);
        } else if i == idx {
            current = Some(ch);
        } else {
            after.push(ch);
        }
    }

    (before, current, after)
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn byte_index(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    if let Some((idx, _)) = text.char_indices().nth(char_idx) {
        return idx;
    }
    text.len()
}

pub fn insert_char_at_cursor(text: &mut String, cursor: &mut usize, ch: char) {
    let ch = if ch == '\n' || ch == '\r' { ' ' } else { ch };
    let idx = byte_index(text, *cursor);
    text.insert(idx, ch);
    *cursor += 1;
}

pub fn delete_char_before_cursor(text: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    let start = byte_index(text, *cursor - 1);
    let end = byte_index(text, *cursor);
    if start < end {
        text.replace_range(start..end, "");
        *cursor -= 1;
    }
}

pub fn delete_char_at_cursor(text: &mut String, cursor: &mut usize) {
    let len = char_count(text);
    if *cursor >= len {
        return;
    }
    let start = byte_index(text, *cursor);
    let end = byte_index(text, *cursor + 1);
    if start < end {
        text.replace_range(start..end, "");
    }
}

pub fn point_in_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// `prefix_len` is the width of the prompt drawn before the text.
pub fn set_cursor_from_click(text: &str, cursor: &mut usize, area: Rect, col: u16, prefix_len: u16) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let col_in_area = col.saturating_sub(area.x).saturating_sub(prefix_len) as usize;
    *cursor = col_in_area.min(char_count(text));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_respect_multibyte_chars() {
        let mut text = String::from("mü");
        let mut cursor = 1;
        insert_char_at_cursor(&mut text, &mut cursor, 'ä');
        assert_eq!(text, "mäü");
        assert_eq!(cursor, 2);

        delete_char_before_cursor(&mut text, &mut cursor);
        assert_eq!(text, "mü");
        assert_eq!(cursor, 1);

        delete_char_at_cursor(&mut text, &mut cursor);
        assert_eq!(text, "m");
        assert_eq!(cursor, 1);

        delete_char_at_cursor(&mut text, &mut cursor);
        assert_eq!(text, "m");
    }

    #[test]
    fn pasted_newlines_become_spaces() {
        let mut text = String::new();
        let mut cursor = 0;
        for ch in "a\nb".chars() {
            insert_char_at_cursor(&mut text, &mut cursor, ch);
        }
        assert_eq!(text, "a b");
    }

    #[test]
    fn split_marks_cursor_char() {
        assert_eq!(
            split_line_at_char("cat", 1),
            ("c".to_string(), Some('a'), "t".to_string())
        );
        assert_eq!(
            split_line_at_char("cat", 3),
            ("cat".to_string(), None, String::new())
        );
    }

    #[test]
    fn click_places_cursor_within_text() {
        let area = Rect::new(10, 5, 40, 3);
        let mut cursor = 0;
        set_cursor_from_click("hello", &mut cursor, area, 15, 3);
        assert_eq!(cursor, 2);
        set_cursor_from_click("hello", &mut cursor, area, 49, 3);
        assert_eq!(cursor, 5);
        assert!(point_in_rect(area, 10, 5));
        assert!(!point_in_rect(area, 50, 5));
    }
}
