use regex::Regex;

/// Known description keys, matched case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FieldKey {
    Designator,
    ConstructionStatus,
    MaterialType,
    Usage,
    Specification,
    SpliceType,
    NumberOfCores,
    FiberLength,
}

/// Key aliases as they appear in survey exports. Unknown keys are ignored
/// entirely.
const FIELD_TABLE: &[(&str, FieldKey)] = &[
    ("designator", FieldKey::Designator),
    ("construction status", FieldKey::ConstructionStatus),
    ("material type", FieldKey::MaterialType),
    ("usage", FieldKey::Usage),
    ("specification id", FieldKey::Specification),
    ("specification", FieldKey::Specification),
    ("splice type", FieldKey::SpliceType),
    ("number of cores", FieldKey::NumberOfCores),
    ("number of core", FieldKey::NumberOfCores),
    ("fiber length", FieldKey::FiberLength),
];

/// Scans `Key: Value` lines out of free-text description blocks.
pub(super) struct FieldExtractor {
    line: Regex,
}

impl FieldExtractor {
    pub(super) fn new() -> Self {
        // One `Key: Value` pair per line; keys may contain spaces.
        Self { line: Regex::new(r"(?m)^\s*([^:\r\n]+?)\s*:\s*(.+?)\s*$").expect("static regex") }
    }

    /// Extract every recognized (key, value) pair from a description block.
    pub(super) fn extract<'a>(&self, description: &'a str) -> Vec<(FieldKey, &'a str)> {
        self.line
            .captures_iter(description)
            .filter_map(|cap| {
                let key = cap.get(1)?.as_str().trim().to_ascii_lowercase();
                let value = cap.get(2)?.as_str();
                let field = FIELD_TABLE.iter().find(|(alias, _)| *alias == key)?.1;
                Some((field, value))
            })
            .collect()
    }
}

/// First value recorded for a key, if any.
pub(super) fn get<'a>(fields: &[(FieldKey, &'a str)], key: FieldKey) -> Option<&'a str> {
    fields.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Parse a free-text length like `"1234"`, `"1234 m"`, `"1.5 km"` into meters.
pub(super) fn parse_length_m(text: &str) -> Option<f64> {
    let text = text.trim().to_ascii_lowercase();
    if let Some(km) = text.strip_suffix("km") {
        return km.trim().parse::<f64>().ok().map(|v| v * 1000.0);
    }
    let meters = text
        .strip_suffix("meters")
        .or_else(|| text.strip_suffix("meter"))
        .or_else(|| text.strip_suffix('m'))
        .unwrap_or(&text);
    meters.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
