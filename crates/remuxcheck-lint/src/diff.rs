//! Character-level text diff for mismatch hints.
//!
//! The diff turns `actual` into `expected`: deleted runs are wrapped in
//! `~~`, inserted runs in `**`, unchanged text is left as is.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal,
    Delete,
    Insert,
}

/// Largest LCS table built; beyond it the differing middle is replaced whole.
const MAX_TABLE_CELLS: usize = 1 << 20;

/// Edit script between two char slices.
///
/// The common prefix and suffix are kept as is; the middle goes through an
/// LCS table unless that table would exceed [`MAX_TABLE_CELLS`].
fn edit_script(a: &[char], b: &[char]) -> Vec<(Op, char)> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a_mid, b_mid) = (&a[prefix..a.len() - suffix], &b[prefix..b.len() - suffix]);

    let mut ops = Vec::with_capacity(a.len().max(b.len()));
    ops.extend(a[..prefix].iter().map(|&c| (Op::Equal, c)));
    if (a_mid.len() + 1).saturating_mul(b_mid.len() + 1) > MAX_TABLE_CELLS {
        ops.extend(a_mid.iter().map(|&c| (Op::Delete, c)));
        ops.extend(b_mid.iter().map(|&c| (Op::Insert, c)));
    } else {
        lcs_script(a_mid, b_mid, &mut ops);
    }
    ops.extend(a[a.len() - suffix..].iter().map(|&c| (Op::Equal, c)));
    ops
}

fn lcs_script(a: &[char], b: &[char], ops: &mut Vec<(Op, char)>) {
    let (n, m) = (a.len(), b.len());
    // lcs[i][j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            ops.push((Op::Equal, a[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push((Op::Delete, a[i]));
            i += 1;
        } else {
            ops.push((Op::Insert, b[j]));
            j += 1;
        }
    }
    ops.extend(a[i..].iter().map(|&c| (Op::Delete, c)));
    ops.extend(b[j..].iter().map(|&c| (Op::Insert, c)));
}

fn flush(out: &mut String, run: &mut String, op: Op) {
    if run.is_empty() {
        return;
    }
    match op {
        Op::Equal => out.push_str(run),
        Op::Delete => {
            out.push_str("~~");
            out.push_str(run);
            out.push_str("~~");
        }
        Op::Insert => {
            out.push_str("**");
            out.push_str(run);
            out.push_str("**");
        }
    }
    run.clear();
}

/// Renders the edits that turn `actual` into `expected`.
///
/// Returns `actual` unchanged when the strings are equal.
pub fn show_diff(actual: &str, expected: &str) -> String {
    let a: Vec<char> = actual.chars().collect();
    let b: Vec<char> = expected.chars().collect();

    let mut out = String::with_capacity(actual.len() + expected.len());
    let mut run = String::new();
    let mut run_op = Op::Equal;

    for (op, c) in edit_script(&a, &b) {
        if op != run_op {
            flush(&mut out, &mut run, run_op);
            run_op = op;
        }
        run.push(c);
    }
    flush(&mut out, &mut run, run_op);
    out
}

/// Detail block for a mismatch: both values, labelled, then the diff.
pub fn mismatch_detail(actual_label: &str, actual: &str, expected_label: &str, expected: &str) -> String {
    format!(
        "{}: {}\n{}: {}\nDiff: {}",
        actual_label,
        actual,
        expected_label,
        expected,
        show_diff(actual, expected)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical() {
        assert_eq!(show_diff("Heat (1995)", "Heat (1995)"), "Heat (1995)");
    }

    #[test]
    fn test_insertion_and_deletion() {
        assert_eq!(show_diff("Heat (1996)", "Heat (1995)"), "Heat (199~~6~~**5**)");
        assert_eq!(show_diff("Heat", "Heat (1995)"), "Heat** (1995)**");
        assert_eq!(show_diff("The Heat", "Heat"), "~~The ~~Heat");
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(show_diff("", "abc"), "**abc**");
        assert_eq!(show_diff("abc", ""), "~~abc~~");
    }

    #[test]
    fn test_long_inputs_fall_back_to_replacing_the_middle() {
        let actual = format!("Heat {} (1995)", "a".repeat(2_000));
        let expected = format!("Heat {} (1995)", "b".repeat(2_000));
        assert_eq!(
            show_diff(&actual, &expected),
            format!("Heat ~~{}~~**{}** (1995)", "a".repeat(2_000), "b".repeat(2_000))
        );

        // Large but equal inputs never reach the table.
        let same = "x".repeat(100_000);
        assert_eq!(show_diff(&same, &same), same);
    }

    #[test]
    fn test_mismatch_detail() {
        let detail = mismatch_detail("BDInfo", "DTS Audio", "MediaInfo", "DTS Audio ");
        assert_eq!(detail, "BDInfo: DTS Audio\nMediaInfo: DTS Audio \nDiff: DTS Audio** **");
    }
}
