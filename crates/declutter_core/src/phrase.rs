/// Phrases hidden when no explicit list is configured.
///
/// These are the bot-generated and bookkeeping entries that crowd a pull
/// request conversation timeline.
pub const DEFAULT_PHRASES: &[&str] = &[
    "added some commits",
    "added a commit",
    "force-pushed",
    "requested a review from",
    "requested review from",
    "removed the request for review",
    "self-assigned this",
    "assigned",
    "unassigned",
    "added the",
    "removed the",
    "changed the title",
    "changed the base branch",
    "deleted the",
    "marked this pull request as ready for review",
    "marked this pull request as draft",
    "linked an issue",
    "mentioned this pull request",
    "referenced this pull request",
];

/// Ordered set of literal phrases; an item whose text contains any of them is noise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSet {
    phrases: Vec<String>,
}

impl PhraseSet {
    /// Builds a set keeping first-occurrence order.
    /// Empty phrases are dropped since they would match every item.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.into();
            if phrase.is_empty() || unique.contains(&phrase) {
                continue;
            }
            unique.push(phrase);
        }
        Self { phrases: unique }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// First phrase in set order contained in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|phrase| text.contains(phrase.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

impl Default for PhraseSet {
    fn default() -> Self {
        Self::new(DEFAULT_PHRASES.iter().copied())
    }
}
