use crate::net::messages::PlayerId;

/// One row of the score list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub id: PlayerId,
    pub name: String,
    pub score: i64,
}

impl ScoreEntry {
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.score)
    }
}

/// Scores of everyone in the match, kept in join order.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player with a zero score. Re-adding an id resets its entry in
    /// place.
    pub fn insert(&mut self, id: PlayerId, name: impl Into<String>) {
        let entry = ScoreEntry {
            id,
            name: name.into(),
            score: 0,
        };
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<ScoreEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Returns true if the score changed.
    pub fn set_score(&mut self, id: &str, score: i64) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if entry.score != score => {
                entry.score = score;
                true
            },
            _ => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ScoreEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Highest score first; ties keep join order.
    pub fn ranking(&self) -> Vec<&ScoreEntry> {
        let mut ranked: Vec<&ScoreEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

/// Whether a score delta is a gain or a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaTone {
    Gain,
    Loss,
}

/// Popup text for a score change: gains get an explicit `+`.
pub fn format_delta(delta: i64) -> (String, DeltaTone) {
    if delta > 0 {
        (format!("+{delta}"), DeltaTone::Gain)
    } else {
        (delta.to_string(), DeltaTone::Loss)
    }
}
