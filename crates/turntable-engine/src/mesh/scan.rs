/// Prefix marking a vertex line: a lowercase `v` followed by exactly one space.
pub const VERTEX_PREFIX: &str = "v ";

/// Outcome of scanning a single vertex line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScannedVertex {
    /// Parsed position. Components that were not read are `0.0`.
    pub position: [f32; 3],

    /// Number of leading components read before scanning stopped (`0..=3`).
    pub components_read: usize,
}

impl ScannedVertex {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.components_read == 3
    }
}

/// Scans one line of geometry text.
///
/// Returns `None` if the line is not a vertex line. Otherwise up to three
/// whitespace-separated floats following the prefix are read in order.
///
/// The scan is lenient and never fails: it stops at the first missing or
/// malformed token and every component not yet read stays `0.0`. So
/// `v 1 oops 3` yields `[1, 0, 0]`. Tokens after the third are ignored.
///
/// A token must parse as a float in full; there is no prefix matching. A
/// number with trailing junk counts as malformed (`v 1 2 3abc` yields
/// `[1, 2, 0]`) and commas are not separators (`v 1,2,3` yields `[0, 0, 0]`).
pub fn scan_vertex_line(line: &str) -> Option<ScannedVertex> {
    let rest = line.strip_prefix(VERTEX_PREFIX)?;

    let mut position = [0.0f32; 3];
    let mut components_read = 0;

    for (slot, token) in position.iter_mut().zip(rest.split_whitespace()) {
        match token.parse::<f32>() {
            Ok(value) => {
                *slot = value;
                components_read += 1;
            }
            Err(_) => break,
        }
    }

    Some(ScannedVertex {
        position,
        components_read,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(line: &str) -> ScannedVertex {
        scan_vertex_line(line).unwrap()
    }

    // ── classification ────────────────────────────────────────────────────

    #[test]
    fn non_vertex_lines_are_skipped() {
        for line in [
            "",
            "# comment",
            "vn 0 1 0",
            "vt 0.5 0.5",
            "f 1 2 3",
            "o body",
            " v 1 2 3",
            "V 1 2 3",
            "v\t1 2 3",
            "v",
        ] {
            assert_eq!(scan_vertex_line(line), None, "line {line:?}");
        }
    }

    #[test]
    fn bare_prefix_is_a_vertex_at_origin() {
        let v = scan("v ");
        assert_eq!(v.position, [0.0; 3]);
        assert_eq!(v.components_read, 0);
    }

    // ── well-formed input ─────────────────────────────────────────────────

    #[test]
    fn reads_three_components() {
        let v = scan("v 0.5 -1.25 3");
        assert_eq!(v.position, [0.5, -1.25, 3.0]);
        assert!(v.is_complete());
    }

    #[test]
    fn tolerates_extra_whitespace_between_tokens() {
        assert_eq!(scan("v  1\t2   3").position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn ignores_tokens_after_the_third() {
        // OBJ allows an optional w component; it is dropped.
        let v = scan("v 1 2 3 1.0 extra");
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert!(v.is_complete());
    }

    #[test]
    fn accepts_exponent_notation() {
        assert_eq!(scan("v 1e-1 -2.5E2 +4").position, [0.1, -250.0, 4.0]);
    }

    // ── lenient fallback ──────────────────────────────────────────────────

    #[test]
    fn missing_components_are_zero_filled() {
        let v = scan("v 7 8");
        assert_eq!(v.position, [7.0, 8.0, 0.0]);
        assert_eq!(v.components_read, 2);
    }

    #[test]
    fn scan_stops_at_first_malformed_token() {
        let v = scan("v 1 oops 3");
        assert_eq!(v.position, [1.0, 0.0, 0.0]);
        assert_eq!(v.components_read, 1);
        assert!(!v.is_complete());
    }

    #[test]
    fn trailing_junk_makes_a_token_malformed() {
        let v = scan("v 1 2 3abc");
        assert_eq!(v.position, [1.0, 2.0, 0.0]);
        assert_eq!(v.components_read, 2);
    }

    #[test]
    fn commas_are_not_separators() {
        let v = scan("v 1,2,3");
        assert_eq!(v.position, [0.0; 3]);
        assert_eq!(v.components_read, 0);
    }

    #[test]
    fn malformed_first_token_yields_origin() {
        let v = scan("v x y z");
        assert_eq!(v.position, [0.0; 3]);
        assert_eq!(v.components_read, 0);
    }
}
