/// A field key split into its path segments.
///
/// Keys are written the way entry data is addressed: segments separated by
/// `.`, optionally with bracketed list indices (`gallery[0].image` and
/// `gallery.0.image` are the same path). Empty segments are dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        let segments = value
            .split(['.', '[', ']'])
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();

        Self { segments }
    }
}

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether a segment addresses a list item rather than a named field.
    pub fn is_index(segment: &str) -> bool {
        !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
    }
}
