use serde::Serialize;

/// One performed rewrite, as listed in the per-file log and the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformationRecord {
    /// Strategy name, or `property:<field>` for object fields.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "original")]
    pub original_key: String,
    #[serde(rename = "rendered")]
    pub rendered_form: String,
    /// 1-based line of the rewritten node.
    #[serde(rename = "line")]
    pub source_line: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

impl TransformationRecord {
    pub fn new(
        kind: impl Into<String>,
        original_key: impl Into<String>,
        rendered_form: impl Into<String>,
        source_line: usize,
    ) -> Self {
        Self {
            kind: kind.into(),
            original_key: original_key.into(),
            rendered_form: rendered_form.into(),
            source_line,
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = params;
        self
    }
}
