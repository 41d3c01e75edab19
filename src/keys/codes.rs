//! Named-key table: symbolic key names and the byte sequences they carry
//! on an xterm-like terminal.

/// Key name used by the engine when it sends an Enter on the script's behalf.
pub const KEY_ENTER: &str = "Enter";

pub const CODE_ENTER: &[u8] = b"\r";
pub const CODE_BACKSPACE: &[u8] = b"\x7f";
pub const CODE_UP: &[u8] = b"\x1bOA";
pub const CODE_DOWN: &[u8] = b"\x1bOB";
pub const CODE_RIGHT: &[u8] = b"\x1bOC";
pub const CODE_LEFT: &[u8] = b"\x1bOD";
pub const CODE_HOME: &[u8] = b"\x1bOH";
pub const CODE_END: &[u8] = b"\x1bOF";
pub const CODE_INSERT: &[u8] = b"\x1b[2~";
pub const CODE_DELETE: &[u8] = b"\x1b[3~";
pub const CODE_PAGE_UP: &[u8] = b"\x1b[5~";
pub const CODE_PAGE_DOWN: &[u8] = b"\x1b[6~";

// Legacy variants some terminals emit for the same keys. Accepted on input,
// never emitted.
pub const CODE_UP_LEGACY: &[u8] = b"\x1b[A";
pub const CODE_DOWN_LEGACY: &[u8] = b"\x1b[B";
pub const CODE_RIGHT_LEGACY: &[u8] = b"\x1b[C";
pub const CODE_LEFT_LEGACY: &[u8] = b"\x1b[D";
pub const CODE_HOME_LEGACY: &[u8] = b"\x1b[1~";
pub const CODE_END_LEGACY: &[u8] = b"\x1b[4~";

/// Byte sequence emitted for a symbolic key name.
pub fn code_for(name: &str) -> Option<&'static [u8]> {
    match name {
        "Enter" | "Return" => Some(CODE_ENTER),
        "Backspace" => Some(CODE_BACKSPACE),
        "Up" => Some(CODE_UP),
        "Down" => Some(CODE_DOWN),
        "Right" => Some(CODE_RIGHT),
        "Left" => Some(CODE_LEFT),
        "Home" => Some(CODE_HOME),
        "End" => Some(CODE_END),
        "Insert" => Some(CODE_INSERT),
        "Delete" => Some(CODE_DELETE),
        "PageUp" => Some(CODE_PAGE_UP),
        "PageDown" => Some(CODE_PAGE_DOWN),
        _ => None,
    }
}

/// Every recognized inbound sequence, ordered by decreasing length and then
/// lexicographically. `match_prefix` scans this front to back, which makes
/// the longest match win and keeps the scan deterministic.
const MULTI_CHAR_KEYS: &[&[u8]] = &[
    CODE_HOME_LEGACY,
    CODE_INSERT,
    CODE_DELETE,
    CODE_END_LEGACY,
    CODE_PAGE_UP,
    CODE_PAGE_DOWN,
    CODE_UP,
    CODE_DOWN,
    CODE_RIGHT,
    CODE_LEFT,
    CODE_END,
    CODE_HOME,
    CODE_UP_LEGACY,
    CODE_DOWN_LEGACY,
    CODE_RIGHT_LEGACY,
    CODE_LEFT_LEGACY,
    CODE_BACKSPACE,
];

/// Length in bytes of the longest known key sequence that is a prefix of
/// `bytes`, or 0 if none is.
pub fn match_prefix(bytes: &[u8]) -> usize {
    MULTI_CHAR_KEYS
        .iter()
        .find(|seq| bytes.starts_with(seq))
        .map(|seq| seq.len())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_is_length_descending_then_lexicographic() {
        for pair in MULTI_CHAR_KEYS.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(
                a.len() > b.len() || (a.len() == b.len() && a < b),
                "{a:?} must sort before {b:?}"
            );
        }
    }

    #[test]
    fn test_match_prefix_is_longest_match() {
        // Every table entry must match itself at its own length, even when a
        // shorter entry shares a prefix.
        for seq in MULTI_CHAR_KEYS {
            let mut padded = seq.to_vec();
            padded.extend_from_slice(b"trailing");
            assert_eq!(match_prefix(&padded), seq.len(), "for {seq:?}");
        }
    }

    #[test]
    fn test_match_prefix_delete() {
        assert_eq!(match_prefix(b"\x1b[3~rest"), 4);
    }

    #[test]
    fn test_match_prefix_arrow() {
        assert_eq!(match_prefix(b"\x1bOArest"), 3);
    }

    #[test]
    fn test_match_prefix_legacy_arrow() {
        assert_eq!(match_prefix(b"\x1b[Arest"), 3);
    }

    #[test]
    fn test_match_prefix_backspace() {
        assert_eq!(match_prefix(b"\x7fabc"), 1);
    }

    #[test]
    fn test_match_prefix_miss() {
        assert_eq!(match_prefix(b"xyz"), 0);
    }

    #[test]
    fn test_match_prefix_partial_escape_is_a_miss() {
        assert_eq!(match_prefix(b"\x1b"), 0);
        assert_eq!(match_prefix(b"\x1b["), 0);
    }

    #[test]
    fn test_match_prefix_empty() {
        assert_eq!(match_prefix(b""), 0);
    }

    #[test]
    fn test_code_for_aliases() {
        assert_eq!(code_for("Enter"), Some(CODE_ENTER));
        assert_eq!(code_for("Return"), Some(CODE_ENTER));
    }

    #[test]
    fn test_code_for_every_name() {
        for name in [
            "Enter",
            "Return",
            "Backspace",
            "Up",
            "Down",
            "Right",
            "Left",
            "Home",
            "End",
            "Insert",
            "Delete",
            "PageUp",
            "PageDown",
        ] {
            assert!(code_for(name).is_some(), "missing code for {name}");
        }
    }

    #[test]
    fn test_code_for_unknown() {
        assert_eq!(code_for("Hyper"), None);
        assert_eq!(code_for("enter"), None);
    }
}
