use serde::{Deserialize, Serialize};

use crate::metrics::{AnalysisSnapshot, MetricName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pitch,
    Rhythm,
    Dynamics,
    Stability,
    Resonance,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Practice advice attached to an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

/// Where a rule reads its score from
#[derive(Debug, Clone, Copy)]
enum Score {
    Metric(MetricName),
    Resonance,
}

/// Fires when the score falls below `threshold`
struct Rule {
    category: Category,
    score: Score,
    threshold: f64,
    priority: Priority,
}

struct Template {
    category: Category,
    priority: Priority,
    title: &'static str,
    description: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        category: Category::Pitch,
        score: Score::Metric(MetricName::PitchAccuracy),
        threshold: 75.0,
        priority: Priority::High,
    },
    Rule {
        category: Category::Rhythm,
        score: Score::Metric(MetricName::RhythmAccuracy),
        threshold: 80.0,
        priority: Priority::High,
    },
    Rule {
        category: Category::Dynamics,
        score: Score::Metric(MetricName::DynamicRange),
        threshold: 25.0,
        priority: Priority::Medium,
    },
    Rule {
        category: Category::Stability,
        score: Score::Metric(MetricName::VocalStability),
        threshold: 70.0,
        priority: Priority::High,
    },
    Rule {
        category: Category::Resonance,
        score: Score::Resonance,
        threshold: 75.0,
        priority: Priority::Medium,
    },
];

const TEMPLATES: &[Template] = &[
    Template {
        category: Category::Pitch,
        priority: Priority::High,
        title: "Improve pitch accuracy",
        description: "Return to the pentatonic scale exercises from lesson 2 of the foundation course, \
            especially the slow step-wise scale drill. Practice 15 minutes a day and keep the breath \
            supported from the abdomen.",
    },
    Template {
        category: Category::Rhythm,
        priority: Priority::High,
        title: "Steady your rhythm",
        description: "Use the beat subdivision method from lesson 4 with a metronome at 80 BPM. \
            Clap the subdivisions before singing them and pay close attention to syncopated figures.",
    },
    Template {
        category: Category::Dynamics,
        priority: Priority::Medium,
        title: "Widen your dynamics",
        description: "Apply the crescendo and decrescendo drills from lesson 6, moving from mp to f \
            while keeping the tone colour even across the whole range.",
    },
    Template {
        category: Category::Stability,
        priority: Priority::High,
        title: "Stabilise your tone",
        description: "Strengthen the diaphragmatic breathing taught in lesson 3: five minutes of slow \
            inhale and slow exhale every day, followed by sustained long notes with an even airflow.",
    },
    Template {
        category: Category::Resonance,
        priority: Priority::Medium,
        title: "Refine resonance placement",
        description: "Work on mask resonance from lesson 5. Use humming to find the nasal resonance \
            point, keep the jaw open and feel the soft palate lift.",
    },
    Template {
        category: Category::General,
        priority: Priority::Medium,
        title: "Deepen emotional expression",
        description: "Use the lyric analysis method from lesson 7: read the lyrics aloud to understand \
            their feeling first, then express it through changes in vocal colour.",
    },
];

fn template(category: Category, priority: Priority) -> Option<&'static Template> {
    TEMPLATES
        .iter()
        .find(|t| t.category == category && t.priority == priority)
}

fn instantiate(category: Category, priority: Priority) -> Option<Recommendation> {
    template(category, priority).map(|t| Recommendation {
        category: t.category,
        priority: t.priority,
        title: t.title.to_string(),
        description: t.description.to_string(),
    })
}

/// Select practice advice for a snapshot.
///
/// Every rule whose score is below its threshold contributes its template;
/// the list is then padded with general advice up to `min_count` entries.
pub fn recommend(
    snapshot: &AnalysisSnapshot,
    resonance_score: f64,
    min_count: usize,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| {
            let score = match rule.score {
                Score::Metric(name) => snapshot.value(name),
                Score::Resonance => Some(resonance_score),
            };
            score.is_some_and(|s| s < rule.threshold)
        })
        .filter_map(|rule| instantiate(rule.category, rule.priority))
        .collect();

    while recommendations.len() < min_count {
        match instantiate(Category::General, Priority::Medium) {
            Some(general) => recommendations.push(general),
            None => break,
        }
    }

    recommendations
}
