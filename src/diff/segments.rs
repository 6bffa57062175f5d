use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub is_revised: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl TextSegment {
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_revised: false,
            original_text: None,
        }
    }

    pub fn revised(text: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_revised: true,
            original_text: Some(original_text.into()),
        }
    }

    pub fn reverted(&self) -> Self {
        match (&self.original_text, self.is_revised) {
            (Some(original), true) => TextSegment::unchanged(original.clone()),
            _ => self.clone(),
        }
    }
}

/// Returns a new sequence with segment `index` reverted to its original wording.
///
/// Unchanged segments and out-of-range indices leave the sequence as it was.
pub fn revert(segments: &[TextSegment], index: usize) -> Vec<TextSegment> {
    segments
        .iter()
        .enumerate()
        .map(|(position, segment)| {
            if position == index {
                segment.reverted()
            } else {
                segment.clone()
            }
        })
        .collect()
}

pub fn revert_all(segments: &[TextSegment]) -> Vec<TextSegment> {
    segments.iter().map(TextSegment::reverted).collect()
}

pub fn render(segments: &[TextSegment]) -> String {
    segments.iter().map(|segment| segment.text.as_str()).collect()
}

pub fn render_original(segments: &[TextSegment]) -> String {
    render(&revert_all(segments))
}

pub fn revised_count(segments: &[TextSegment]) -> usize {
    segments.iter().filter(|segment| segment.is_revised).count()
}
