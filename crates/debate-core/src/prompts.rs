//! Prompt template store
//!
//! A mutable name -> template mapping seeded with the three builtin debate
//! prompts. Templates carry `{placeholder}` tokens that are substituted at
//! render time; rendering with a missing placeholder is an error.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors from template lookup and rendering
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),
    #[error("Missing placeholder value: {name}")]
    MissingPlaceholder { name: String },
}

/// Multi-round attack prompt. Placeholders: topic, position, round_num, context.
const STRATEGIC_DEBATE: &str = r#"You are debating the {position} position on: "{topic}"

This is Round {round_num}. Previous arguments:
{context}

RULES:
1. Keep it BRIEF: 100-150 words MAX.
2. Each round must be STRONGER than the previous.
3. Use 1-2 POWERFUL, SPECIFIC pieces of evidence.
4. Be PUNCHY and IMPACTFUL.
5. Round 1: Establish position with strong facts.
6. Round 2+: DIRECTLY attack opponent's weaknesses.
7. Later rounds: Go for the knockout - your strongest points.

Format: Start with your most powerful argument, back it with data, end with impact.
"#;

/// First-round prompt. Placeholders: topic, position.
const OPENING_STATEMENT: &str = r#"Opening statement for {position} on: "{topic}"

RULES:
1. 100-150 words MAX.
2. Start with your STRONGEST point.
3. Use 2-3 concrete pieces of evidence.
4. No fluff - every sentence must deliver impact.

Format:
- Opening punch (claim + evidence)
- Supporting strike (more data)
- Closing impact (why it matters)
"#;

/// Scoring-instruction prompt. Placeholders: topic, pro_arg, con_arg.
const JUDGE_ROUND: &str = r#"Evaluate these arguments on: "{topic}"

PRO: {pro_arg}

CON: {con_arg}

Rate 1-10 based on:
- Brevity + impact
- Evidence quality
- Engagement with opponent
- Strategic strength

Output format:
PRO: X/10
CON: X/10
Winner: [PRO/CON/TIE]
Reason: [short, specific explanation]
"#;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("valid regex"))
}

/// Substitute `{name}` tokens in `template` from `vars`.
///
/// Every placeholder in the template must have a value; extra vars are
/// ignored. Caller-supplied values are interpolated verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in placeholder_re().captures_iter(template) {
        let token = caps.get(0).expect("group 0 always present");
        let name = &caps[1];
        let value = vars
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| TemplateError::MissingPlaceholder {
                name: name.to_string(),
            })?;
        out.push_str(&template[last..token.start()]);
        out.push_str(value);
        last = token.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// In-memory prompt template store.
///
/// Serializes transparently as a JSON object of name -> body, which is the
/// wire shape of `GET /prompts`. Not persisted: a restart resets the store
/// to the three builtins.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PromptStore {
    templates: HashMap<String, String>,
}

impl PromptStore {
    /// Empty store
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Store seeded with the three builtin templates
    pub fn builtin() -> Self {
        let mut store = Self::new();
        store.upsert("strategic_debate", STRATEGIC_DEBATE);
        store.upsert("opening_statement", OPENING_STATEMENT);
        store.upsert("judge_round", JUDGE_ROUND);
        store
    }

    /// All templates, name -> body
    pub fn list(&self) -> &HashMap<String, String> {
        &self.templates
    }

    /// Look up a template body by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Insert or overwrite a template. Last write wins.
    pub fn upsert(&mut self, name: &str, body: &str) {
        self.templates.insert(name.to_string(), body.to_string());
    }

    /// Remove a template, returning whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.templates.remove(name).is_some()
    }

    /// Render the named template with the given placeholder values
    pub fn render(&self, name: &str, vars: &[(&str, &str)]) -> Result<String, TemplateError> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        render(template, vars)
    }
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_present() {
        let store = PromptStore::builtin();
        assert_eq!(store.list().len(), 3);
        assert!(store.get("strategic_debate").is_some());
        assert!(store.get("opening_statement").is_some());
        assert!(store.get("judge_round").is_some());
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let store = PromptStore::builtin();
        let rendered = store
            .render(
                "strategic_debate",
                &[
                    ("topic", "nuclear energy"),
                    ("position", "PRO"),
                    ("round_num", "2"),
                    ("context", "Round 1: opening statements."),
                ],
            )
            .unwrap();
        assert!(rendered.contains("nuclear energy"));
        assert!(rendered.contains("Round 2"));
        assert!(!rendered.contains('{'));
    }

    #[test]
    fn test_render_missing_placeholder_fails() {
        let err = render("hello {name}", &[("other", "x")]).unwrap_err();
        match err {
            TemplateError::MissingPlaceholder { name } => assert_eq!(name, "name"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_ignores_extra_vars() {
        let out = render("{a}", &[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(out, "1");
    }

    #[test]
    fn test_render_unknown_template() {
        let store = PromptStore::builtin();
        assert!(matches!(
            store.render("nope", &[]),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_upsert_overwrites_silently() {
        let mut store = PromptStore::new();
        store.upsert("x", "body {a}");
        assert_eq!(store.get("x"), Some("body {a}"));
        store.upsert("x", "other");
        assert_eq!(store.get("x"), Some("other"));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove_reports_existence() {
        let mut store = PromptStore::new();
        store.upsert("x", "body {a}");
        assert!(store.remove("x"));
        assert!(!store.remove("x"));
    }
}
