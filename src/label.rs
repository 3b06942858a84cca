use crate::data::Cell;

/// The category that marks a row of the loaded dataset as positive.
pub const POSITIVE_LABEL: &str = "malicious";

/// Maps a label cell to `1` if it's the text `"malicious"` in any letter case and `0` otherwise.
///
/// Numbers, missing cells and any other category map to `0`. The text is not trimmed.
pub fn binarize_label(cell: &Cell) -> u8 {
    match cell {
        Cell::Text(text) => text.eq_ignore_ascii_case(POSITIVE_LABEL) as u8,
        Cell::Number(_) | Cell::Missing => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malicious_in_any_case_is_positive() {
        for text in ["malicious", "MALICIOUS", "Malicious", "mAlIcIoUs"] {
            assert_eq!(binarize_label(&Cell::Text(text.into())), 1, "{text}");
        }
    }

    #[test]
    fn everything_else_is_negative() {
        for text in ["benign", "normal", "malicious ", " malicious", "malware", ""] {
            assert_eq!(binarize_label(&Cell::Text(text.into())), 0, "{text:?}");
        }

        assert_eq!(binarize_label(&Cell::Number(1.)), 0);
        assert_eq!(binarize_label(&Cell::Missing), 0);
    }
}
