//! Classifier configuration from TOML (`[classifier]` section)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use triage_application::ClassifierConfig;
use triage_application::config::classifier_config::DEFAULT_LABEL_FIELD;
use triage_domain::{
    CategorySet, ConfigIssue, ConfigIssueCode, Model, PromptSet, PromptTemplate, StrategyRole,
};

/// Call types of the water-utility dataset the tool was built around
pub const DEFAULT_CATEGORIES: [&str; 11] = [
    "RESTORE",
    "ABATEMENT",
    "AMR (METERING)",
    "BILLING",
    "BPCS (BROKEN PIPE)",
    "BTR/O (BAD TASTE & ODOR)",
    "C/I - DEP (CAVE IN/DEPRESSION)",
    "CEMENT",
    "CHOKED DRAIN",
    "CLAIMS",
    "COMPOST",
];

/// Raw classifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClassifierConfig {
    /// Closed label vocabulary, in display order
    pub categories: Vec<String>,
    /// Model name passed to the provider
    pub model: String,
    /// JSON key holding the label in structured replies
    pub label_field: String,
    /// Per-strategy prompt overrides keyed by `primary`, `backup`,
    /// `negative` or `baseline`
    pub prompt_templates: BTreeMap<String, String>,
}

impl Default for FileClassifierConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            model: Model::default().to_string(),
            label_field: DEFAULT_LABEL_FIELD.to_string(),
            prompt_templates: BTreeMap::new(),
        }
    }
}

impl FileClassifierConfig {
    /// Parse the category list, returning any issues found.
    pub fn parse_categories(&self) -> (Option<CategorySet>, Vec<ConfigIssue>) {
        match CategorySet::new(self.categories.iter()) {
            Ok(set) => (Some(set), vec![]),
            Err(e) => {
                let code = if self.categories.is_empty() {
                    ConfigIssueCode::EmptyCategories
                } else {
                    ConfigIssueCode::InvalidCategory
                };
                (None, vec![ConfigIssue::error(code, format!("classifier.categories: {e}"))])
            }
        }
    }

    /// Parse the model name, returning any issues found.
    ///
    /// Names that are not Claude models are kept and reported as a warning.
    pub fn parse_model(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        match Model::parse_checked(&self.model) {
            Ok(model) if model.is_claude() => (Some(model), vec![]),
            Ok(model) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::UnrecognizedModel,
                    format!(
                        "classifier.model: '{}' does not look like a Claude model, passing it through as-is",
                        model
                    ),
                );
                (Some(model), vec![issue])
            }
            Err(e) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidModel,
                    format!("classifier.model: {e}"),
                )],
            ),
        }
    }

    /// Parse prompt overrides on top of the built-in templates.
    pub fn parse_prompts(&self) -> (PromptSet, Vec<ConfigIssue>) {
        let mut prompts = PromptSet::default();
        let mut issues = Vec::new();

        for (name, source) in &self.prompt_templates {
            let role = match name.parse::<StrategyRole>() {
                Ok(role) => role,
                Err(_) => {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::UnknownPromptTemplate,
                        format!(
                            "classifier.prompt_templates.{name}: unknown strategy, expected primary, backup, negative or baseline"
                        ),
                    ));
                    continue;
                }
            };

            match PromptTemplate::new(role, source.as_str()) {
                Ok(template) => prompts = prompts.with(template),
                Err(e) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidPromptTemplate,
                    format!("classifier.prompt_templates.{name}: {e}"),
                )),
            }
        }

        (prompts, issues)
    }

    fn label_field_issues(&self) -> Vec<ConfigIssue> {
        if self.label_field.trim().is_empty() {
            vec![ConfigIssue::error(
                ConfigIssueCode::EmptyLabelField,
                "classifier.label_field cannot be empty",
            )]
        } else {
            vec![]
        }
    }

    /// All issues in this section
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.parse_categories().1);
        issues.extend(self.parse_model().1);
        issues.extend(self.parse_prompts().1);
        issues.extend(self.label_field_issues());
        issues
    }

    /// Build the application config, or every error-severity issue found.
    pub fn to_classifier_config(&self) -> Result<ClassifierConfig, Vec<ConfigIssue>> {
        let (categories, mut issues) = self.parse_categories();
        let (model, model_issues) = self.parse_model();
        let (prompts, prompt_issues) = self.parse_prompts();
        issues.extend(model_issues);
        issues.extend(prompt_issues);
        issues.extend(self.label_field_issues());
        issues.retain(ConfigIssue::is_error);

        match (categories, model) {
            (Some(categories), Some(model)) if issues.is_empty() => Ok(ClassifierConfig::new(categories)
                .with_model(model)
                .with_label_field(self.label_field.trim())
                .with_prompts(prompts)),
            _ => Err(issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FileClassifierConfig::default();
        assert!(config.validate().is_empty());
        let built = config.to_classifier_config().unwrap();
        assert_eq!(built.categories.len(), 11);
        assert_eq!(built.categories.as_slice()[0], "RESTORE");
        assert_eq!(built.model, Model::ClaudeSonnet37);
    }

    #[test]
    fn test_empty_categories_is_error() {
        let config = FileClassifierConfig {
            categories: vec![],
            ..Default::default()
        };
        let issues = config.to_classifier_config().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyCategories);
    }

    #[test]
    fn test_duplicate_category_is_error() {
        let config = FileClassifierConfig {
            categories: vec!["A".into(), "A".into()],
            ..Default::default()
        };
        let (set, issues) = config.parse_categories();
        assert!(set.is_none());
        assert_eq!(issues[0].code, ConfigIssueCode::InvalidCategory);
    }

    #[test]
    fn test_unknown_model_warns() {
        let config = FileClassifierConfig {
            model: "my-finetune".into(),
            ..Default::default()
        };
        let (model, issues) = config.parse_model();
        assert_eq!(model, Some(Model::Custom("my-finetune".into())));
        assert!(!issues[0].is_error());
        assert!(config.to_classifier_config().is_ok());
    }

    #[test]
    fn test_prompt_override() {
        let mut config = FileClassifierConfig::default();
        config
            .prompt_templates
            .insert("negative".into(), "Classifiable? {input_text}".into());
        let built = config.to_classifier_config().unwrap();
        assert_eq!(built.prompts.negative.source(), "Classifiable? {input_text}");
        assert_eq!(
            built.prompts.primary,
            PromptTemplate::default_for(StrategyRole::Primary)
        );
    }

    #[test]
    fn test_bad_prompt_is_error_and_unknown_key_warns() {
        let mut config = FileClassifierConfig::default();
        config.prompt_templates.insert("primary".into(), "{input}".into());
        config.prompt_templates.insert("tertiary".into(), "{input_text}".into());
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::InvalidPromptTemplate && i.is_error()));
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::UnknownPromptTemplate && !i.is_error()));
    }

    #[test]
    fn test_blank_label_field_is_error() {
        let config = FileClassifierConfig {
            label_field: "  ".into(),
            ..Default::default()
        };
        let issues = config.to_classifier_config().unwrap_err();
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyLabelField);
    }
}
