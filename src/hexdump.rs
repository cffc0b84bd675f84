//! The fixed, testable hex dump rendering contract (see the parameter collector's
//! `emit_hex_dump` operation).

const BYTES_PER_ROW: usize = 16;
const HEX_ROW_LEN: usize = BYTES_PER_ROW * 2 + BYTES_PER_ROW + BYTES_PER_ROW / 4;

/// Renders `data` as a 16-byte-per-row hex dump: a 4-hex-digit offset prefix,
/// a hex pane with an extra space every 4 bytes and padded to a fixed width,
/// then a single space and an ASCII pane (non-printable bytes shown as `.`).
/// Rows are newline-separated; there is no trailing newline.
pub fn hex_dump(data: &[u8]) -> String {
    let mut view = String::new();
    let mut row_hex = String::with_capacity(HEX_ROW_LEN);
    let mut row_ascii = String::with_capacity(BYTES_PER_ROW);

    let mut row = 0;
    while row * BYTES_PER_ROW < data.len() {
        if !view.is_empty() {
            view.push('\n');
        }
        let row_start = row * BYTES_PER_ROW;
        let row_end = (row_start + BYTES_PER_ROW).min(data.len());
        for pos in row_start..row_end {
            if pos != row_start && pos % 4 == 0 {
                row_hex.push(' ');
            }
            row_hex.push_str(&format!("{:02x} ", data[pos]));
            let byte = data[pos];
            row_ascii.push(if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            });
        }
        view.push_str(&format!("{:04x}:   ", row_start as u16));
        row_hex.truncate(row_hex.len().min(HEX_ROW_LEN));
        while row_hex.len() < HEX_ROW_LEN {
            row_hex.push(' ');
        }
        view.push_str(&row_hex);
        view.push(' ');
        view.push_str(&row_ascii);

        row_hex.clear();
        row_ascii.clear();
        row += 1;
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_full_row() {
        let data: Vec<u8> = (0..16).collect();
        let dump = hex_dump(&data);
        assert!(dump.starts_with("0000:   00 01 02 03  04 05 06 07  08 09 0a 0b  0c 0d 0e 0f"));
        assert!(dump.ends_with("................"));
        assert_eq!(dump.lines().count(), 1);
    }

    #[test]
    fn group_boundaries_get_an_extra_space() {
        let data: Vec<u8> = (0..16).collect();
        let dump = hex_dump(&data);
        // every 4-byte boundary within the row doubles up the separating space
        assert!(dump.contains("03  04"));
        assert!(dump.contains("07  08"));
        assert!(dump.contains("0b  0c"));
    }

    #[test]
    fn hex_pane_is_padded_to_a_fixed_width_before_the_ascii_pane() {
        let data = [0x41u8, 0x42, 0x43];
        let dump = hex_dump(&data);
        assert!(dump.starts_with("0000:   41 42 43"));
        assert!(dump.ends_with(" ABC"));
        // offset(8) + fixed hex pane(52) + separating space(1) + ascii pane(3)
        assert_eq!(dump.len(), 8 + 52 + 1 + 3);
    }

    #[test]
    fn non_printable_bytes_become_dots() {
        let data = [0x00u8, 0x7f, 0xff, b'z'];
        let dump = hex_dump(&data);
        assert!(dump.ends_with("...z"));
    }

    #[test]
    fn two_rows_are_newline_separated_with_no_trailing_newline() {
        let data: Vec<u8> = (0..20).collect();
        let dump = hex_dump(&data);
        let lines: Vec<&str> = dump.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("0010:   "));
        assert!(!dump.ends_with('\n'));
    }

    #[test]
    fn idempotent() {
        let data: Vec<u8> = (0..40).map(|i| (i * 7) as u8).collect();
        assert_eq!(hex_dump(&data), hex_dump(&data));
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(hex_dump(&[]), "");
    }
}
