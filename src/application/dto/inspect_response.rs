/// InspectResponse - rendered answer to an [`super::Query`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectResponse {
    /// Text ready for the presenter, newline-terminated unless empty
    pub content: String,
    /// Some repeated subtree was replaced by a placeholder
    pub redundancy_hidden: bool,
}

impl InspectResponse {
    pub fn new(content: String, redundancy_hidden: bool) -> Self {
        Self {
            content,
            redundancy_hidden,
        }
    }

    /// One item per line
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        Self::new(content, false)
    }
}
