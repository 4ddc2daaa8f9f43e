// ── Policy editor draft ──
//
// In-progress policy form state. Lives entirely client-side until
// `submit` posts it; a failed submit leaves the draft intact so the
// admin can fix and retry.

use campusgate_api::ApiClient;
use campusgate_api::types::{Policy, PolicyAction, PolicyCategory, PolicyCreate};

use crate::error::CoreError;

/// Draft of a new filtering policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDraft {
    pub name: String,
    pub description: String,
    pub category: PolicyCategory,
    pub action: PolicyAction,
    pub domains: Vec<String>,
    pub keywords: Vec<String>,
    pub enabled: bool,
    pub priority: u8,
}

impl Default for PolicyDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: PolicyCategory::SocialMedia,
            action: PolicyAction::Block,
            domains: Vec::new(),
            keywords: Vec::new(),
            enabled: true,
            priority: 1,
        }
    }
}

impl PolicyDraft {
    /// Add a domain to the block/allow list.
    ///
    /// Input is trimmed; empty or duplicate entries are ignored.
    /// Matching is exact after the trim -- `Facebook.com` and
    /// `facebook.com` are distinct entries.
    pub fn add_domain(&mut self, raw: &str) -> bool {
        Self::add_entry(&mut self.domains, raw)
    }

    /// Remove a domain by exact value. Returns `false` if absent.
    pub fn remove_domain(&mut self, domain: &str) -> bool {
        Self::remove_entry(&mut self.domains, domain)
    }

    /// Add a keyword; same trim/dedup rules as domains.
    pub fn add_keyword(&mut self, raw: &str) -> bool {
        Self::add_entry(&mut self.keywords, raw)
    }

    /// Remove a keyword by exact value. Returns `false` if absent.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        Self::remove_entry(&mut self.keywords, keyword)
    }

    fn add_entry(list: &mut Vec<String>, raw: &str) -> bool {
        let entry = raw.trim();
        if entry.is_empty() || list.iter().any(|e| e == entry) {
            return false;
        }
        list.push(entry.to_owned());
        true
    }

    fn remove_entry(list: &mut Vec<String>, value: &str) -> bool {
        let before = list.len();
        list.retain(|e| e != value);
        list.len() != before
    }

    /// Check the draft is submittable.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "Policy name is required".into(),
            });
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "Policy description is required".into(),
            });
        }
        if !(1..=5).contains(&self.priority) {
            return Err(CoreError::ValidationFailed {
                message: format!("Priority must be 1-5, got {}", self.priority),
            });
        }
        Ok(())
    }

    /// Build the create request from the current draft.
    pub fn to_request(&self) -> PolicyCreate {
        PolicyCreate {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            action: self.action,
            domains: self.domains.clone(),
            keywords: self.keywords.clone(),
            enabled: self.enabled,
            priority: self.priority,
        }
    }

    /// Validate and post the draft.
    ///
    /// On failure the draft is untouched; the caller decides whether to
    /// keep showing the form.
    pub async fn submit(&self, client: &ApiClient) -> Result<Policy, CoreError> {
        self.validate()?;
        client
            .create_policy(&self.to_request())
            .await
            .map_err(CoreError::from)
    }

    /// Clear back to defaults after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_most_common_policy() {
        let draft = PolicyDraft::default();
        assert_eq!(draft.category, PolicyCategory::SocialMedia);
        assert_eq!(draft.action, PolicyAction::Block);
        assert!(draft.enabled);
        assert_eq!(draft.priority, 1);
    }

    #[test]
    fn add_domain_trims_and_dedups() {
        let mut draft = PolicyDraft::default();

        assert!(draft.add_domain("  facebook.com  "));
        assert!(!draft.add_domain("facebook.com"));
        assert_eq!(draft.domains, vec!["facebook.com"]);
    }

    #[test]
    fn add_domain_is_case_sensitive() {
        let mut draft = PolicyDraft::default();

        assert!(draft.add_domain("facebook.com"));
        assert!(draft.add_domain("Facebook.com"));
        assert_eq!(draft.domains.len(), 2);
    }

    #[test]
    fn empty_domain_is_ignored() {
        let mut draft = PolicyDraft::default();
        assert!(!draft.add_domain("   "));
        assert!(draft.domains.is_empty());
    }

    #[test]
    fn remove_domain_by_exact_value() {
        let mut draft = PolicyDraft::default();
        draft.add_domain("tiktok.com");

        assert!(!draft.remove_domain("TikTok.com"));
        assert!(draft.remove_domain("tiktok.com"));
        assert!(draft.domains.is_empty());
    }

    #[test]
    fn keywords_follow_same_rules() {
        let mut draft = PolicyDraft::default();

        assert!(draft.add_keyword(" game "));
        assert!(!draft.add_keyword("game"));
        assert!(draft.remove_keyword("game"));
        assert!(draft.keywords.is_empty());
    }

    fn filled_draft() -> PolicyDraft {
        PolicyDraft {
            name: "Block Gaming".into(),
            description: "No games on lab machines".into(),
            ..PolicyDraft::default()
        }
    }

    #[test]
    fn validate_requires_name_and_description() {
        assert!(matches!(
            PolicyDraft::default().validate(),
            Err(CoreError::ValidationFailed { .. })
        ));

        let draft = PolicyDraft {
            name: "  ".into(),
            ..filled_draft()
        };
        assert!(draft.validate().is_err());

        let draft = PolicyDraft {
            description: "  ".into(),
            ..filled_draft()
        };
        assert!(draft.validate().is_err());

        assert!(filled_draft().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_priority() {
        let draft = PolicyDraft {
            priority: 0,
            ..filled_draft()
        };
        assert!(draft.validate().is_err());

        let draft = PolicyDraft {
            priority: 6,
            ..filled_draft()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut draft = PolicyDraft {
            name: "Block Gaming".into(),
            priority: 3,
            ..PolicyDraft::default()
        };
        draft.add_domain("steam.com");

        draft.reset();
        assert_eq!(draft, PolicyDraft::default());
    }
}
