use crate::models::{PostingRecord, RankedPosting};

/// Skills assumed when the caller supplies neither an inline keyword list
/// nor a resume file. Mirrors a typical full-stack/cloud profile.
pub const DEFAULT_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "Rust",
    "Solidity",
    "Shell Scripting",
    "HTML",
    "CSS",
    "JavaScript",
    "TypeScript",
    "SQL",
    "Node.js",
    "Flask",
    "Django",
    "FastAPI",
    "Spring Boot",
    "Express.js",
    "GraphQL",
    "REST APIs",
    "Kafka",
    "ReactJS",
    "NextJS",
    "Linux/Unix",
    "JSON",
    "MVC",
    "JUnit",
    "Android",
    "Swift",
    "Unit Testing",
    "Integration Testing",
    "Load Testing",
    "Git",
    "GitHub",
    "Postman",
    "MySQL",
    "PostgreSQL",
    "DynamoDB",
    "NoSQL",
    "Oracle",
    "MongoDB",
    "Redis",
    "Pandas",
    "NumPy",
    "Matplotlib",
    "PyTorch",
    "Jupyter",
    "Tableau",
    "Data Structures & Algorithms",
    "Scalability",
    "Performance Tuning",
    "Debugging",
    "System Design",
    "AWS Lambda",
    "AWS EC2",
    "AWS S3",
    "AWS CloudWatch",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "Jenkins",
    "CI/CD Pipelines",
    "Grafana",
    "Prometheus",
    "GitHub Actions",
    "GitLab",
    "ArgoCD",
    "Helm",
];

/// The set of skill terms postings are scored against.
///
/// Entries keep their original casing for display but compare
/// case-insensitively. Iteration order is insertion order, which fixes the
/// order matched keywords are reported in.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from raw terms: trims each entry, drops blanks,
    /// and drops case-insensitive duplicates (first occurrence wins).
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            let folded = term.to_lowercase();
            if seen.contains(&folded) {
                continue;
            }
            seen.push(folded);
            entries.push(term.to_string());
        }
        Vocabulary { entries }
    }

    pub fn default_skills() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries found as case-insensitive substrings of `text`, in
    /// vocabulary order.
    ///
    /// Substring semantics are intentional: multi-word phrases like
    /// "Data Structures & Algorithms" must match whole, and that rules out
    /// word-boundary checks. The cost is the occasional false positive,
    /// e.g. "SQL" matching inside "NoSQL".
    pub fn matched_in(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        self.entries
            .iter()
            .filter(|kw| haystack.contains(&kw.to_lowercase()))
            .cloned()
            .collect()
    }
}

/// Percentage of the vocabulary that matched, rounded to two decimals.
/// An empty vocabulary scores zero rather than dividing by it.
pub fn score(matched: usize, vocabulary_size: usize) -> f64 {
    if vocabulary_size == 0 {
        return 0.0;
    }
    let pct = (matched as f64 / vocabulary_size as f64) * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Score every posting against the vocabulary and sort by score, highest
/// first. The sort is stable, so equal scores keep their input order.
/// Nothing is dropped or deduplicated here.
pub fn rank(postings: Vec<PostingRecord>, vocabulary: &Vocabulary) -> Vec<RankedPosting> {
    let mut ranked: Vec<RankedPosting> = postings
        .into_iter()
        .map(|record| {
            let matched_keywords = vocabulary.matched_in(&record.combined_text());
            let match_score = score(matched_keywords.len(), vocabulary.len());
            RankedPosting {
                record,
                matched_keywords,
                match_score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}
