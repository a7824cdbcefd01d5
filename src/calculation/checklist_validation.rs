//! Checklist submission validation.
//!
//! A submission must answer every item of every category in the template.
//! The first gap found, in template order, rejects the whole submission.

use crate::config::ChecklistTemplate;
use crate::error::{EngineError, EngineResult};
use crate::models::ChecklistAnswers;

/// Validates that `answers` covers the whole template.
///
/// Blank answers count as missing. Answers to categories or items that are
/// not in the template are ignored.
///
/// # Example
///
/// ```
/// use fleet_commission::calculation::validate_submission;
/// use fleet_commission::config::{ChecklistCategory, ChecklistTemplate};
/// use fleet_commission::models::ChecklistAnswers;
///
/// let template = ChecklistTemplate {
///     categories: vec![ChecklistCategory {
///         name: "Pneus".to_string(),
///         items: vec!["Calibragem".to_string()],
///     }],
/// };
/// let mut answers = ChecklistAnswers::new();
/// assert!(validate_submission(&template, &answers).is_err());
///
/// answers
///     .entry("Pneus".to_string())
///     .or_default()
///     .insert("Calibragem".to_string(), "OK".to_string());
/// assert!(validate_submission(&template, &answers).is_ok());
/// ```
pub fn validate_submission(
    template: &ChecklistTemplate,
    answers: &ChecklistAnswers,
) -> EngineResult<()> {
    for category in &template.categories {
        let Some(category_answers) = answers.get(&category.name) else {
            return Err(EngineError::ChecklistIncomplete {
                category: category.name.clone(),
                item: None,
            });
        };

        for item in &category.items {
            let answered = category_answers
                .get(item)
                .is_some_and(|answer| !answer.trim().is_empty());
            if !answered {
                return Err(EngineError::ChecklistIncomplete {
                    category: category.name.clone(),
                    item: Some(item.clone()),
                });
            }
        }
    }
    Ok(())
}
