use crate::diff::tokenize::tokenize;
use crate::diff::TextSegment;

/// Aligns `revised` against `original` token by token and tags what changed.
///
/// The alignment is greedy: on a mismatch it anchors on the nearest original word that
/// reappears later in the revision, and everything before the anchor becomes one revised
/// segment. Segment texts concatenate back to `revised`.
pub fn reconcile(original: &str, revised: &str) -> Vec<TextSegment> {
    let source = tokenize(original);
    let target = tokenize(revised);
    let mut segments = Vec::new();
    let mut i = 0usize;
    let mut j = 0usize;

    while i < source.len() || j < target.len() {
        if i < source.len() && j < target.len() && source[i] == target[j] {
            segments.push(TextSegment::unchanged(target[j]));
            i += 1;
            j += 1;
            continue;
        }

        match find_anchor(&source, &target, i, j) {
            Some((anchor_i, anchor_j)) => {
                segments.push(TextSegment::revised(
                    target[j..anchor_j].concat(),
                    source[i..anchor_i].concat(),
                ));
                i = anchor_i;
                j = anchor_j;
            }
            None => {
                let text = target[j..].concat();
                // Nothing left to revert to when the original ran out first.
                let original_text = if i < source.len() {
                    source[i..].concat()
                } else {
                    text.clone()
                };
                segments.push(TextSegment::revised(text, original_text));
                break;
            }
        }
    }

    tracing::debug!(
        segments = segments.len(),
        revised = segments.iter().filter(|segment| segment.is_revised).count(),
        "reconciled revision"
    );
    segments
}

// Nearest non-whitespace token of source[i..] found in target[j..]. Whitespace shared just
// before the anchor stays unchanged.
fn find_anchor(source: &[&str], target: &[&str], i: usize, j: usize) -> Option<(usize, usize)> {
    let (mut anchor_i, mut anchor_j) = (i..source.len())
        .filter(|si| !is_whitespace(source[*si]))
        .find_map(|si| {
            target[j..]
                .iter()
                .position(|token| *token == source[si])
                .map(|offset| (si, j + offset))
        })?;

    while anchor_i > i && anchor_j > j && source[anchor_i - 1] == target[anchor_j - 1] {
        anchor_i -= 1;
        anchor_j -= 1;
    }
    Some((anchor_i, anchor_j))
}

fn is_whitespace(token: &str) -> bool {
    token.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_reverts_to_nothing() {
        let segments = reconcile("hello world", "hello big world");
        assert_eq!(
            segments,
            vec![
                TextSegment::unchanged("hello"),
                TextSegment::unchanged(" "),
                TextSegment::revised("big ", ""),
                TextSegment::unchanged("world"),
            ]
        );
    }

    #[test]
    fn deletion_keeps_an_empty_revised_segment() {
        let segments = reconcile("really very good", "really good");
        assert_eq!(
            segments,
            vec![
                TextSegment::unchanged("really"),
                TextSegment::unchanged(" "),
                TextSegment::revised("", "very "),
                TextSegment::unchanged("good"),
            ]
        );
    }

    #[test]
    fn appended_tail_points_at_itself() {
        let segments = reconcile("ship it", "ship it 🚀");
        assert_eq!(segments.last(), Some(&TextSegment::revised(" 🚀", " 🚀")));
    }
}
