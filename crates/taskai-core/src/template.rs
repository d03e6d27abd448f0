use crate::commitment::NewCommitment;
use crate::error::{Result, TaskaiError};
use crate::types::{CommitmentSource, CommitmentType};

/// A starting point for a new commitment: a preset type and, except for
/// `custom`, a preset title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: CommitmentType,
}

pub const TEMPLATES: [Template; 4] = [
    Template {
        id: "passport",
        name: "Passport",
        kind: CommitmentType::Expiration,
    },
    Template {
        id: "insurance",
        name: "Insurance",
        kind: CommitmentType::Expiration,
    },
    Template {
        id: "warranty",
        name: "Warranty",
        kind: CommitmentType::Expiration,
    },
    Template {
        id: "custom",
        name: "Custom",
        kind: CommitmentType::Deadline,
    },
];

pub fn find_template(id: &str) -> Result<&'static Template> {
    TEMPLATES
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| TaskaiError::TemplateNotFound(id.to_string()))
}

impl Template {
    /// Whether picking this template fills in the title.
    pub fn presets_title(&self) -> bool {
        self.id != "custom"
    }

    /// Draft with this template's type, source `template`, and `title` or
    /// (when blank and the template has one) the preset title.
    pub fn draft(&self, title: &str) -> NewCommitment {
        let title = if title.trim().is_empty() && self.presets_title() {
            self.name
        } else {
            title
        };
        NewCommitment::new(self.kind, title).with_source(CommitmentSource::Template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        assert_eq!(find_template("warranty").unwrap().kind, CommitmentType::Expiration);
        assert_eq!(find_template("custom").unwrap().kind, CommitmentType::Deadline);
        assert!(matches!(
            find_template("lease"),
            Err(TaskaiError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn draft_fills_blank_title_and_source() {
        let draft = find_template("passport").unwrap().draft("");
        assert_eq!(draft.title, "Passport");
        assert_eq!(draft.kind, CommitmentType::Expiration);
        assert_eq!(draft.source, CommitmentSource::Template);
    }

    #[test]
    fn explicit_title_wins() {
        let draft = find_template("insurance").unwrap().draft("Car insurance");
        assert_eq!(draft.title, "Car insurance");
    }

    #[test]
    fn custom_leaves_title_blank() {
        let draft = find_template("custom").unwrap().draft("  ");
        assert_eq!(draft.kind, CommitmentType::Deadline);
        assert!(draft.title.trim().is_empty());
    }
}
